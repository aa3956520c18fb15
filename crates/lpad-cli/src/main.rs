//! lpad CLI
//!
//! Command-line interface for Launchpad layout management.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lpad_core::FileFormat;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "lpad")]
#[command(about = "lpad - Launchpad layout management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the Launchpad layout from a layout file
    Build {
        /// Path to the layout file (JSON or YAML)
        config_path: PathBuf,
        /// Skip resetting Launchpad to defaults before rebuilding
        #[arg(long)]
        no_rebuild: bool,
        /// Skip restarting the Dock after rebuilding
        #[arg(long)]
        no_restart: bool,
    },
    /// Extract the current Launchpad layout to a layout file
    Extract {
        /// Path to save the layout
        config_path: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: FormatArg,
    },
    /// Compare the current Launchpad layout with a layout file
    Compare {
        /// Path to the layout file to compare against
        config_path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for FileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => FileFormat::Json,
            FormatArg::Yaml => FileFormat::Yaml,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match run(cli.command, &output) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, output: &Output) -> Result<ExitCode> {
    match command {
        Commands::Build {
            config_path,
            no_rebuild,
            no_restart,
        } => commands::build::run(&config_path, no_rebuild, no_restart, output),
        Commands::Extract {
            config_path,
            format,
        } => commands::extract::run(&config_path, format.into(), output),
        Commands::Compare { config_path } => commands::compare::run(&config_path, output),
    }
}
