//! Compare command handler

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use lpad_core::LayoutConfig;

use crate::output::Output;

/// Compare the live Launchpad layout against a layout file
///
/// Exit code 0 when they match, 1 when they differ.
pub fn run(config_path: &Path, output: &Output) -> Result<ExitCode> {
    let declared = LayoutConfig::from_path(config_path)
        .with_context(|| format!("Failed to load layout from {:?}", config_path))?;

    let engine = super::open_engine()?;
    // hidden_apps is a passthrough field, so compare it against itself
    let live = engine.extract_layout(declared.hidden_apps.clone())?;

    if declared == live {
        output.success("Layouts match");
        Ok(ExitCode::SUCCESS)
    } else {
        output.outcome("differ", "Layouts differ");
        Ok(ExitCode::FAILURE)
    }
}
