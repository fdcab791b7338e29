//! Ranked documents produced by the upstream vector-space search.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// One entry of a vector-space ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    /// Position obtained in the vector ranking (1-based)
    pub position: u32,

    /// Cosine similarity against the vector query
    pub similarity: f64,

    /// Document identifier within the collection
    pub document_id: u64,

    /// Path of the document markup, relative to the collection or absolute
    pub document_path: String,

    /// Taxon name recorded in the document
    #[serde(default)]
    pub taxon_name: String,

    /// Taxon rank recorded in the document (e.g. "species")
    #[serde(default)]
    pub taxon_rank: String,
}

impl RankedDocument {
    /// Create a ranked document with empty taxon metadata.
    pub fn new(
        position: u32,
        similarity: f64,
        document_id: u64,
        document_path: impl Into<String>,
    ) -> Self {
        Self {
            position,
            similarity,
            document_id,
            document_path: document_path.into(),
            taxon_name: String::new(),
            taxon_rank: String::new(),
        }
    }

    /// Attach taxon name and rank.
    pub fn with_taxon(mut self, name: impl Into<String>, rank: impl Into<String>) -> Self {
        self.taxon_name = name.into();
        self.taxon_rank = rank.into();
        self
    }
}

/// Result of a vector-space search, as exported by the vector search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchResult {
    /// When the vector query ran
    pub search_timestamp: DateTime<Utc>,

    /// Where this result is stored; set from the path on load
    #[serde(default)]
    pub result_path: String,

    /// Collection the ranking was computed over
    pub collection_path: String,

    /// Raw vector query text
    pub query: String,

    /// Documents in ranking order
    pub ranking: Vec<RankedDocument>,
}

impl VectorSearchResult {
    /// Read a vector search export from a JSON file.
    ///
    /// The returned result's `result_path` is the path it was read from.
    pub fn load(path: &Path) -> Result<Self, TypesError> {
        let bytes = fs::read(path).map_err(|source| TypesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut result = Self::from_bytes(&bytes)?;
        result.result_path = path.to_string_lossy().to_string();
        Ok(result)
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        serde_json::to_vec_pretty(self).map_err(TypesError::from)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        serde_json::from_slice(bytes).map_err(TypesError::from)
    }
}
