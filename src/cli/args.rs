//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Genealogical family tree: import, grow and query a family
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Family database file (default: <base_dir>/<db_name> from config)
    #[arg(long, global = true, env = "FAMTREE_DB", value_hint = ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    /// Config file to use instead of the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a nested family tree (default: king Arthur's family)
    Import {
        /// Nested-tree JSON document
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Remove every member from the database
    Clean,

    /// Add a child through its mother
    AddChild {
        /// Name of the mother
        mother: String,
        /// Name of the new child
        name: String,
        /// Male or Female
        gender: String,
    },

    /// Show members related to a person (Siblings, Maternal-Aunt, Sister-In-Law)
    Relationship {
        /// Name of the person
        person: String,
        /// Relation name
        relation: String,
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

    /// Print a config template
    Init,

    /// Show config and database paths
    Path,
}
