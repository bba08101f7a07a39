//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Hierarchical drill-down aggregation viewer: navigate category totals, toggle leaf filters, share filter URLs
#[derive(Parser, Debug)]
#[command(name = "drillview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one level with totals and percentages
    Show {
        /// Hierarchy document (JSON); defaults to config `hierarchy_file`
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Drill into this node before rendering (repeatable, applied in order)
        #[arg(short, long = "at")]
        at: Vec<String>,

        /// Toggle a filter, KEY=VALUE (repeatable)
        #[arg(short, long = "filter")]
        filter: Vec<String>,

        /// Sort the level by value, descending
        #[arg(short, long)]
        sort: bool,

        /// Print a shareable URL for the active filters
        #[arg(long)]
        share: bool,
    },

    /// Show the full hierarchy as a tree
    Tree {
        /// Hierarchy document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List leaf filter nodes with their key/value pairs
    Leaves {
        /// Hierarchy document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Validate a hierarchy document
    Check {
        /// Hierarchy document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Decode a share URL into filter pairs
    Decode {
        /// Shareable address with filter query parameters
        url: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}
