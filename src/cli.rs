//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Expand directive files into one page per data record
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: json-files.toml)
    #[arg(short = 'C', long, default_value = "json-files.toml")]
    pub config: PathBuf,

    /// Process directives one after another in path order
    #[arg(long)]
    pub sequential: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Expand all directives and write the resulting files
    Build {
        /// Remove the output directory before writing
        #[arg(long)]
        clean: bool,

        /// Write manifest.json with the metadata of every entry
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        manifest: Option<bool>,
    },

    /// Expand all directives and print the resulting file names without writing
    List,
}
