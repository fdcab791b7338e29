//! Taxa structured search
//!
//! Prunes a vector search ranking with structured clauses over the
//! biological entities of each document.
//!
//! # Usage
//!
//! ```bash
//! taxa filter --vector result.json --query "leaf color green, stem" [--export NAME] [--report]
//! taxa show NAME [--absolute] [--json]
//! taxa report NAME [--absolute] [--html]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/taxa/config.toml)
//! 3. Environment variables (TAXA_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use taxa_cli::{
    handle_filter, handle_report, handle_show, init_logging, load_settings, Cli, Commands,
    FilterArgs,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(
        cli.config.as_deref(),
        cli.log_level.as_deref(),
        cli.collection.as_deref(),
        cli.archives.as_deref(),
    )?;
    init_logging(&settings)?;

    match cli.command {
        Commands::Filter {
            vector,
            query,
            export,
            absolute,
            report,
            html,
            cache,
        } => {
            let args = FilterArgs {
                vector,
                query,
                export,
                absolute,
                report,
                html,
                cache,
            };
            handle_filter(&settings, &args)?;
        }
        Commands::Show {
            session,
            absolute,
            json,
        } => {
            handle_show(&settings, &session, absolute, json)?;
        }
        Commands::Report {
            session,
            absolute,
            html,
        } => {
            handle_report(&settings, &session, absolute, html)?;
        }
    }

    Ok(())
}
