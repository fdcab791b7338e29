//! Command implementations for taxa.
//!
//! Handles:
//! - filter: Run a structured query over a vector search result
//! - show: Print the summary of an exported session
//! - report: Write a report for an exported session

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use taxa_query::{FilterOptions, XmlDocumentLoader};
use taxa_session::{ReportFormat, SearchSession, SessionSource};
use taxa_types::Settings;

/// Options for the `filter` command.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub vector: String,
    pub query: String,
    pub export: Option<String>,
    pub absolute: bool,
    pub report: bool,
    pub html: bool,
    pub cache: bool,
}

/// Load configuration and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    collection_override: Option<&str>,
    archives_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(level) = log_level_override {
        settings.log_level = level.to_string();
    }
    if let Some(collection) = collection_override {
        settings.collection_path = collection.to_string();
    }
    if let Some(archives) = archives_override {
        settings.archives_path = archives.to_string();
    }

    Ok(settings)
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

fn report_format(html: bool) -> ReportFormat {
    if html {
        ReportFormat::Html
    } else {
        ReportFormat::Text
    }
}

/// Loader for the collection a session was run against.
///
/// Falls back to the configured collection when the vector search result
/// recorded none.
fn session_loader(session: &SearchSession, settings: &Settings) -> XmlDocumentLoader {
    if session.collection_path.trim().is_empty() {
        XmlDocumentLoader::new(settings.collection_dir())
    } else {
        XmlDocumentLoader::new(&session.collection_path)
    }
}

/// Run a structured query, then optionally export the session and write a report.
pub fn handle_filter(settings: &Settings, args: &FilterArgs) -> Result<SearchSession> {
    let options = FilterOptions {
        cache_attributes: args.cache || settings.cache_attributes,
    };

    let mut session = SearchSession::create(SessionSource::FromPath(PathBuf::from(&args.vector)))
        .with_context(|| format!("Failed to import vector search result: {}", args.vector))?;
    let loader = session_loader(&session, settings);

    info!(
        vector = %args.vector,
        collection = %session.collection_path,
        cache = options.cache_attributes,
        "Running structured query"
    );

    session
        .execute(&args.query, &loader, options)
        .with_context(|| format!("Structured query failed: {}", args.query))?;

    println!("{}", session.summary());
    for doc in session.ranking() {
        println!(
            "  {:>4}  {:.3}  {}  {}",
            doc.position, doc.similarity, doc.document_id, doc.taxon_name
        );
    }

    if let Some(name) = &args.export {
        let path = session
            .export_to(name, args.absolute, settings)
            .context("Failed to export session")?;
        println!("Session exported to {}", path.display());
    }

    if args.report {
        let path = session
            .write_report(settings, &loader, report_format(args.html))
            .context("Failed to write report")?;
        println!("Report written to {}", path.display());
    }

    Ok(session)
}

/// Print the summary of an exported session.
pub fn handle_show(settings: &Settings, session: &str, absolute: bool, json: bool) -> Result<()> {
    let session = SearchSession::import_from(session, absolute, settings)
        .with_context(|| format!("Failed to import session: {}", session))?;

    let summary = session.summary();
    if json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", rendered);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

/// Write a report for an exported session. Returns the report path.
pub fn handle_report(
    settings: &Settings,
    session: &str,
    absolute: bool,
    html: bool,
) -> Result<PathBuf> {
    let session = SearchSession::import_from(session, absolute, settings)
        .with_context(|| format!("Failed to import session: {}", session))?;

    let loader = session_loader(&session, settings);
    let path = session
        .write_report(settings, &loader, report_format(html))
        .context("Failed to write report")?;

    println!("Report written to {}", path.display());
    Ok(path)
}
