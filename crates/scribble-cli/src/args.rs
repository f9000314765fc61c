//! Command-line argument definitions for the Scribble CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, output formatting and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Scribble scene tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file (TOML)
    #[arg(help = "Path to the input scene file")]
    pub input: String,

    /// Path to the output Excalidraw file
    #[arg(short, long, default_value = "out.excalidraw")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write JSON without indentation, overriding the configuration
    #[arg(long)]
    pub compact: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
