//! Command-line interface definitions.
//!
//! A single-shot run with no subcommands: point the tool at a project
//! root and it checks the configured source set.

use clap::Parser;
use std::path::PathBuf;

/// Design-token consistency checker CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root containing the CSS and HTML sources
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: polish.toml)
    #[arg(short = 'C', long, default_value = "polish.toml")]
    pub config: PathBuf,
}
