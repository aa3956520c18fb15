//! Build command handler

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use lpad_core::{BuildOptions, LayoutConfig};

use crate::output::Output;

/// Rebuild the Launchpad layout from a layout file
pub fn run(
    config_path: &Path,
    no_rebuild: bool,
    no_restart: bool,
    output: &Output,
) -> Result<ExitCode> {
    // Load and validate before any mutation
    let mut config = LayoutConfig::from_path(config_path)
        .with_context(|| format!("Failed to load layout from {:?}", config_path))?;

    let mut engine = super::open_engine()?;

    let options = BuildOptions {
        reset: !no_rebuild,
        restart: !no_restart,
        ..Default::default()
    };

    output.message("Building Launchpad layout...");
    let report = engine.build_layout(&mut config.app_layout, &config.hidden_apps, &options)?;

    output.print_report(&report);
    output.success("Successfully built Launchpad layout");
    Ok(ExitCode::SUCCESS)
}
