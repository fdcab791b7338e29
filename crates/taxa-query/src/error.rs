//! Query error types.

use thiserror::Error;

/// Errors that can occur while parsing a structured query or filtering a
/// ranking with it.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Clause or query has an invalid shape
    #[error("Format error: {0}")]
    Format(String),

    /// A ranked document could not be loaded
    #[error("Failed to load document {path}: {message}")]
    DocumentLoad { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::Format("clause has invalid shape".to_string());
        assert_eq!(err.to_string(), "Format error: clause has invalid shape");

        let err = QueryError::DocumentLoad {
            path: "12.xml".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to load document 12.xml: not found");
    }
}
