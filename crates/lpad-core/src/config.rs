//! Database location
//!
//! The Launchpad database lives under the per-user Darwin directory,
//! resolved through `getconf DARWIN_USER_DIR`. The `LPAD_DB_PATH`
//! environment variable overrides the lookup, which also keeps tests
//! and scratch databases off the live Dock.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{LayoutError, LayoutResult};

/// Environment variable overriding the database path
const ENV_DB_PATH: &str = "LPAD_DB_PATH";

/// Resolved tool configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Launchpad SQLite database
    pub db_path: PathBuf,
}

impl Config {
    /// Locate the Launchpad database
    ///
    /// Order of precedence: `LPAD_DB_PATH`, then the Darwin user
    /// directory lookup.
    pub fn locate() -> LayoutResult<Self> {
        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            return Ok(Self {
                db_path: PathBuf::from(path),
            });
        }

        Ok(Self {
            db_path: darwin_user_dir()?
                .join("com.apple.dock.launchpad")
                .join("db")
                .join("db"),
        })
    }
}

/// Query the per-user Darwin directory from the system
fn darwin_user_dir() -> LayoutResult<PathBuf> {
    let output = Command::new("getconf")
        .arg("DARWIN_USER_DIR")
        .output()
        .map_err(|e| LayoutError::HostCommand {
            command: "getconf".to_string(),
            details: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(LayoutError::HostCommand {
            command: "getconf".to_string(),
            details: format!("exited with {}", output.status),
        });
    }

    let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if dir.is_empty() {
        return Err(LayoutError::HostCommand {
            command: "getconf".to_string(),
            details: "DARWIN_USER_DIR is empty".to_string(),
        });
    }

    Ok(PathBuf::from(dir))
}
