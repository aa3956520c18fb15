//! Error handling for layout operations
//!
//! Provides typed errors for the layout engine and store adapter.
//! Per-record write failures are not represented here: those roll back
//! the single record and are accumulated in the build report instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while managing the Launchpad layout
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Failed to read a layout file
    #[error("Failed to read layout file '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a layout file
    #[error("Failed to write layout file '{path}': {source}")]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to serialize a layout for writing
    #[error("Failed to serialize layout for '{path}': {details}")]
    SerializeConfig { path: PathBuf, details: String },

    /// Layout file extension is not a supported format
    #[error("Unsupported layout format '{extension}' for '{path}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Layout file could not be parsed
    #[error("Invalid layout file '{path}': {details}")]
    ParseConfig { path: PathBuf, details: String },

    /// Layout document failed structural validation
    #[error("Invalid layout at {location}: {reason}")]
    Validation { location: String, reason: String },

    /// A required dbinfo key is absent from the database
    #[error("Database is missing dbinfo key '{key}'")]
    MissingDbInfo { key: String },

    /// External host command failed (getconf, defaults, killall)
    #[error("Host command '{command}' failed: {details}")]
    HostCommand { command: String, details: String },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LayoutError {
    /// Build a validation error for a position inside the layout document
    pub fn invalid(location: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::Validation {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_location() {
        let err = LayoutError::invalid("app_layout[2][0]", "expected a string");
        let msg = err.to_string();
        assert!(msg.contains("app_layout[2][0]"));
        assert!(msg.contains("expected a string"));
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = LayoutError::UnsupportedFormat {
            path: PathBuf::from("layout.toml"),
            extension: "toml".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("toml"));
        assert!(msg.contains("layout.toml"));
    }
}
