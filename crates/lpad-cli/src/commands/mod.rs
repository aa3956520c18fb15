//! Command handlers

pub mod build;
pub mod compare;
pub mod extract;

use anyhow::{Context, Result};
use lpad_core::{Config, LaunchpadStore, LayoutEngine, SystemDock};

/// Open the live Launchpad database and wrap it in a layout engine
pub(crate) fn open_engine() -> Result<LayoutEngine<SystemDock>> {
    let config = Config::locate().context("Failed to locate the Launchpad database")?;
    let store = LaunchpadStore::open(&config.db_path).with_context(|| {
        format!(
            "Failed to open Launchpad database at {:?}",
            config.db_path
        )
    })?;
    Ok(LayoutEngine::new(store, SystemDock))
}
