//! Command-line surface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "keiji-cli",
    version,
    about = "Generate building-management notice posters as signage CSV records"
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the master lookup tables
    Masters {
        /// Read the masters from the backend instead of the built-in dataset
        #[arg(long)]
        remote: bool,
    },
    /// Import a tab-delimited file into a grid and report row validity
    Import {
        /// Tab-delimited input file (the paste-import format)
        file: PathBuf,
        /// User id the auto-save snapshot is keyed by
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Export a tab-delimited file as a signage CSV
    Export {
        /// Tab-delimited input file
        file: PathBuf,
        /// Output CSV path; defaults to the generated filename
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Submit a tab-delimited file to the backend approval queue
    Submit {
        /// Tab-delimited input file
        file: PathBuf,
        /// Save as draft instead of submitting for approval
        #[arg(long)]
        draft: bool,
    },
    /// List entries waiting in the backend approval queue
    Pending,
    /// Inspect or discard the local auto-save snapshot
    Restore {
        /// User id the snapshot is keyed by
        #[arg(long, default_value = "local")]
        user: String,
        /// Discard the snapshot instead of showing it
        #[arg(long)]
        discard: bool,
    },
}
