//! Output formatting for CLI
//!
//! Provides consistent output across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use lpad_core::BuildReport;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {}
            OutputFormat::Quiet => {}
        }
    }

    /// Print a non-success outcome (a result, not an error)
    pub fn outcome(&self, status: &str, message: &str) {
        if let Some(line) = self.render_outcome(status, message) {
            println!("{}", line);
        }
    }

    fn render_outcome(&self, status: &str, message: &str) -> Option<String> {
        match self.format {
            OutputFormat::Human => Some(message.to_string()),
            OutputFormat::Json => Some(
                serde_json::json!({"status": status, "message": message}).to_string(),
            ),
            OutputFormat::Quiet => None,
        }
    }

    /// Print the warnings accumulated by a rebuild run
    pub fn print_report(&self, report: &BuildReport) {
        match self.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "hidden": report.hidden,
                        "unplaced": report.unplaced,
                        "missing": report.missing,
                        "failed_writes": report.failed_writes,
                    })
                );
            }
            OutputFormat::Human => {
                self.warn_list("Apps hidden from Launchpad", &report.hidden);
                self.warn_list(
                    "Apps not in the layout, appended to the last page(s)",
                    &report.unplaced,
                );
                self.warn_list("Unable to find apps (skipped)", &report.missing);
                self.warn_list("Records that failed to write", &report.failed_writes);
            }
            OutputFormat::Quiet => {}
        }
    }

    fn warn_list(&self, header: &str, titles: &[String]) {
        if titles.is_empty() {
            return;
        }
        eprintln!("⚠ {}:", header);
        for title in titles {
            eprintln!("  - {}", title);
        }
    }
}
