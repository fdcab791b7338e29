//! Session reports.
//!
//! The report lists the session metadata, the clauses, and the top
//! [`REPORT_LIMIT`] surviving documents. Each listed document is loaded again
//! to obtain its taxon description.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use tracing::info;

use taxa_query::DocumentLoader;
use taxa_types::Settings;

use crate::error::SessionError;
use crate::session::SearchSession;

/// Maximum number of documents listed in a report.
pub const REPORT_LIMIT: usize = 30;

/// Output format of a written report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text
    #[default]
    Text,
    /// Text report wrapped in a minimal HTML page
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
        }
    }
}

impl SearchSession {
    /// Render the plain text report.
    pub fn render_report<L: DocumentLoader + ?Sized>(
        &self,
        loader: &L,
    ) -> Result<String, SessionError> {
        let mut out = String::new();

        out.push_str(&format!(
            "Fecha de la consulta estructurada: {}\n",
            report_timestamp(&self.structured_query_timestamp)
        ));
        out.push_str(&format!(
            "Fecha de la consulta vectorial: {}\n",
            report_timestamp(&self.vector_query_timestamp)
        ));
        out.push_str(&format!(
            "Ruta de la coleccion consultada: {}\n",
            self.collection_path
        ));
        out.push_str(&format!("Texto de la consulta: {}\n", self.vector_query));
        out.push_str("Listas de cláusulas de la consulta:\n");

        for clause in self.clauses() {
            out.push_str(&format!("Bilogical entity: {}\n", clause.entity));
            out.push_str(&format!("Character Name: {}\n", clause.attribute_name));
            out.push_str(&format!("Character Value: {}\n", clause.attribute_value));
        }

        for doc in self.ranking().iter().take(REPORT_LIMIT) {
            let description = loader.load(doc)?.description;

            out.push('\n');
            out.push_str(&format!("ID del documento: {}\n", doc.document_id));
            out.push_str(&format!("Posicion obtenida: {}\n", doc.position));
            out.push_str(&format!("Similitud: {:.3}\n", doc.similarity));
            out.push_str(&format!("Taxon Name: {}\n", doc.taxon_name));
            out.push_str(&format!("Taxon Rank: {}\n", doc.taxon_rank));
            out.push_str(&format!("Taxon Description:\n{}\n", description));
        }

        Ok(out)
    }

    /// Render the report in the given format.
    pub fn render_report_as<L: DocumentLoader + ?Sized>(
        &self,
        loader: &L,
        format: ReportFormat,
    ) -> Result<String, SessionError> {
        let text = self.render_report(loader)?;
        Ok(match format {
            ReportFormat::Text => text,
            ReportFormat::Html => format!(
                "<head><meta charset=\"UTF-8\"></head><h1>Consulta estructurada</h1><pre>{}</pre>\n",
                escape_html(&text)
            ),
        })
    }

    /// Write the report under the archives directory.
    ///
    /// The file is named `<prefix> Busqueda Estruc <timestamp>.<ext>`.
    /// Returns the path written.
    pub fn write_report<L: DocumentLoader + ?Sized>(
        &self,
        settings: &Settings,
        loader: &L,
        format: ReportFormat,
    ) -> Result<PathBuf, SessionError> {
        let content = self.render_report_as(loader, format)?;

        let dir = settings.archives_dir();
        fs::create_dir_all(&dir).map_err(|e| SessionError::io(&dir, e))?;

        let path = dir.join(format!(
            "{} Busqueda Estruc {}.{}",
            settings.default_prefix,
            Local::now().format("%Y%m%d-%H%M%S-%3f"),
            format.extension()
        ));
        fs::write(&path, content).map_err(|e| SessionError::io(&path, e))?;

        info!(
            path = %path.display(),
            documents = self.ranking().len().min(REPORT_LIMIT),
            "Wrote report"
        );
        Ok(path)
    }
}

/// `dd/MM/yyyy hh:mm:ss.fff AM` in local time.
fn report_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d/%m/%Y %I:%M:%S%.3f %p")
        .to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
