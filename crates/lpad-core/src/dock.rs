//! Dock process control
//!
//! The Dock owns the Launchpad database. Resetting the layout and
//! restarting the Dock go through `defaults` and `killall`; the trait
//! seam lets the layout engine run against a stub in tests.

use std::process::Command;

use crate::error::{LayoutError, LayoutResult};

/// Control surface for the host Dock process
pub trait DockControl {
    /// Reset Launchpad to its default layout (Dock re-enumerates apps)
    fn reset_layout(&self) -> LayoutResult<()>;

    /// Restart the Dock so it picks up the rebuilt database
    fn restart(&self) -> LayoutResult<()>;
}

/// Dock control backed by the real system commands
pub struct SystemDock;

impl DockControl for SystemDock {
    fn reset_layout(&self) -> LayoutResult<()> {
        run(
            "defaults",
            &["write", "com.apple.dock", "ResetLaunchPad", "-bool", "true"],
        )?;
        run("killall", &["Dock"])
    }

    fn restart(&self) -> LayoutResult<()> {
        run("killall", &["Dock"])
    }
}

fn run(command: &str, args: &[&str]) -> LayoutResult<()> {
    let status = Command::new(command)
        .args(args)
        .status()
        .map_err(|e| LayoutError::HostCommand {
            command: command.to_string(),
            details: e.to_string(),
        })?;

    if !status.success() {
        return Err(LayoutError::HostCommand {
            command: command.to_string(),
            details: format!("exited with {}", status),
        });
    }

    Ok(())
}
