//! CLI argument parsing for taxa.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand};

/// Taxa structured search
///
/// Refines a vector search ranking with clauses over the biological
/// entities recorded in each document.
#[derive(Parser, Debug)]
#[command(name = "taxa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/taxa/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override the document collection directory
    #[arg(long, global = true)]
    pub collection: Option<String>,

    /// Override the archives directory for sessions and reports
    #[arg(long, global = true)]
    pub archives: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Taxa commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a structured query over a vector search result
    Filter {
        /// Vector search result file (JSON)
        #[arg(short, long)]
        vector: String,

        /// Structured query, e.g. "leaf color green, stem length"
        #[arg(short, long)]
        query: String,

        /// Export the session under this name (empty for a timestamp name)
        #[arg(short, long)]
        export: Option<String>,

        /// Treat the export name as an absolute path
        #[arg(long)]
        absolute: bool,

        /// Write a report after filtering
        #[arg(short, long)]
        report: bool,

        /// Write the report as HTML
        #[arg(long)]
        html: bool,

        /// Load each document once per filter run
        #[arg(long)]
        cache: bool,
    },

    /// Show an exported session
    Show {
        /// Session name (relative to archives) or path with --absolute
        session: String,

        /// Treat the session as an absolute path
        #[arg(long)]
        absolute: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a report for an exported session
    Report {
        /// Session name (relative to archives) or path with --absolute
        session: String,

        /// Treat the session as an absolute path
        #[arg(long)]
        absolute: bool,

        /// Write the report as HTML
        #[arg(long)]
        html: bool,
    },
}
