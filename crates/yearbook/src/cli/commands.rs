//! CLI command definitions.
//!
//! Flags given here override the matching configuration values.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Generate command arguments.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Directory holding one subdirectory per year
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Where to write the manifest
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Manifest to summarize
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Manifest to serve
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory holding the year directories
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Address to listen on (e.g. 127.0.0.1:4009)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Link images through /@fs/ with absolute file-system paths
    #[arg(long)]
    pub dev: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
