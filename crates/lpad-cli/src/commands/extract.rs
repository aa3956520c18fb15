//! Extract command handler

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::warn;

use lpad_core::{FileFormat, LayoutConfig};

use crate::output::Output;

/// Extract the current Launchpad layout to a layout file
///
/// Hidden apps leave no trace in the database, so if a layout file already
/// exists at the target path its `hidden_apps` list is carried forward.
pub fn run(config_path: &Path, format: FileFormat, output: &Output) -> Result<ExitCode> {
    let hidden_apps = if config_path.exists() {
        match LayoutConfig::from_path(config_path) {
            Ok(existing) => existing.hidden_apps,
            Err(e) => {
                warn!(error = %e, "could not read existing layout file, hidden_apps will be empty");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let engine = super::open_engine()?;
    let layout = engine.extract_layout(hidden_apps)?;

    layout
        .write_to(config_path, format)
        .with_context(|| format!("Failed to save layout to {:?}", config_path))?;

    output.success(&format!(
        "Successfully extracted layout to: {}",
        config_path.display()
    ));
    Ok(ExitCode::SUCCESS)
}
