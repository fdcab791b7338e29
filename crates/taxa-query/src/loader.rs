//! Document loading.
//!
//! The filter never parses markup itself: it asks a [`DocumentLoader`] for
//! the entity/character data of each ranked document.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use taxa_types::{RankedDocument, TaxonDocument};

use crate::error::QueryError;

/// Trait for document loaders.
///
/// Implementations turn a ranked document reference into its loaded
/// entity/character data and description.
pub trait DocumentLoader: Send + Sync {
    /// Load the document referenced by a ranking entry.
    fn load(&self, document: &RankedDocument) -> Result<TaxonDocument, QueryError>;
}

/// In-memory document loader for testing.
///
/// Documents are keyed by `document_id`; unknown ids and ids marked as
/// failing produce [`QueryError::DocumentLoad`].
#[derive(Debug, Default)]
pub struct MockDocumentLoader {
    documents: HashMap<u64, TaxonDocument>,
    failures: HashSet<u64>,
    loads: AtomicUsize,
}

impl MockDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document.
    pub fn with_document(mut self, document_id: u64, document: TaxonDocument) -> Self {
        self.documents.insert(document_id, document);
        self
    }

    /// Make loading a document fail.
    pub fn with_failure(mut self, document_id: u64) -> Self {
        self.failures.insert(document_id);
        self
    }

    /// Number of `load` calls served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl DocumentLoader for MockDocumentLoader {
    fn load(&self, document: &RankedDocument) -> Result<TaxonDocument, QueryError> {
        self.loads.fetch_add(1, Ordering::Relaxed);

        if self.failures.contains(&document.document_id) {
            return Err(QueryError::DocumentLoad {
                path: document.document_path.clone(),
                message: "simulated failure".to_string(),
            });
        }

        self.documents
            .get(&document.document_id)
            .cloned()
            .ok_or_else(|| QueryError::DocumentLoad {
                path: document.document_path.clone(),
                message: format!("unknown document id {}", document.document_id),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxa_types::BiologicalEntity;

    #[test]
    fn test_mock_loader_serves_documents() {
        let loader = MockDocumentLoader::new().with_document(
            1,
            TaxonDocument::new(vec![BiologicalEntity::new("leaf")]),
        );

        let doc = loader.load(&RankedDocument::new(1, 0.9, 1, "1.xml")).unwrap();
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn test_mock_loader_unknown_and_failing() {
        let loader = MockDocumentLoader::new()
            .with_document(2, TaxonDocument::default())
            .with_failure(2);

        assert!(loader.load(&RankedDocument::new(1, 0.9, 1, "1.xml")).is_err());
        assert!(loader.load(&RankedDocument::new(2, 0.8, 2, "2.xml")).is_err());
        assert_eq!(loader.load_count(), 2);
    }
}
