//! Session error types.

use std::path::PathBuf;

use taxa_query::QueryError;
use taxa_types::TypesError;
use thiserror::Error;

/// Errors that can occur while building, executing, persisting or reporting
/// a search session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Query parsing or filtering failed
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Vector search result could not be imported
    #[error("Vector result error: {0}")]
    VectorResult(#[from] TypesError),

    /// Session or report file could not be read or written
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted session is malformed
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Session could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The structured query has already been executed
    #[error("Session already executed")]
    AlreadyExecuted,
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}
