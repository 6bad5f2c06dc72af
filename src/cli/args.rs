//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Stern-Brocot / Farey tree navigation over exact rationals
#[derive(Parser, Debug)]
#[command(name = "sbtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Tree configuration (stern-brocot, farey, octave-reduced, custom)
    #[arg(short, long, global = true, env = "SBTREE_TREE")]
    pub tree: Option<String>,

    /// Explicit config file, layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Binary-search path from the boundaries to a node
    Path {
        /// Target node, e.g. 11/10
        node: String,
    },

    /// Parent pair whose mediant is the node
    Parents { node: String },

    /// Ancestors shared by two nodes
    Common { first: String, second: String },

    /// L/R path string of a node
    Encode {
        node: String,
        /// Stop after this many moves
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Node at the end of an L/R path string
    Decode {
        /// Path, e.g. RLL (also accepts 0/1)
        path: String,
        /// Also print the move matrix
        #[arg(short, long)]
        matrix: bool,
    },

    /// Every node down to a depth, in order
    Sequence {
        #[arg(default_value_t = 3)]
        depth: usize,
    },

    /// Descendants of a parent pair
    Descendants {
        first: String,
        second: String,
        #[arg(short = 'n', long, default_value_t = 2)]
        depth: usize,
        /// Also subdivide pairs that are not Farey neighbors
        #[arg(short, long)]
        lenient: bool,
    },

    /// Tree levels row by row
    Tree {
        #[arg(default_value_t = 4)]
        depth: usize,
        /// Draw the tree instead of printing rows
        #[arg(short, long)]
        render: bool,
    },

    /// Descend by continued-fraction quotients
    Walk {
        /// Rational (m/n) or decimal value
        #[arg(required_unless_present = "sqrt", conflicts_with = "sqrt")]
        value: Option<String>,
        /// Walk towards the square root of this integer
        #[arg(long)]
        sqrt: Option<u64>,
        /// Quotients to consume (default: walk_limit setting)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Farey neighbors of a node
    Neighbors {
        node: String,
        /// Probe count (default: search_range setting)
        #[arg(short, long)]
        range: Option<u64>,
    },

    /// Stern's diatomic sequence
    Diatomic {
        #[arg(default_value_t = 16)]
        count: usize,
        /// Print Calkin-Wilf fractions instead of terms
        #[arg(short = 'w', long)]
        fractions: bool,
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
    /// Show effective configuration
    Show,
    /// Print a commented template
    Template,
    /// Show the global config file location
    Path,
}
