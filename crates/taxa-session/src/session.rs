//! Structured search session.
//!
//! A session starts from a vector search result, parses a structured query
//! into clauses and prunes the copied ranking with them. It is executed at
//! most once:
//!
//! ```text
//! Unfiltered --execute--> Filtered
//! ```
//!
//! Parsing and filtering happen on local copies inside `execute`, so there is
//! no parsed-but-unfiltered state: callers see either the untouched session
//! or the fully filtered one.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use taxa_query::{ClauseParser, DocumentLoader, FilterOptions, FilterStats, RankingFilter};
use taxa_types::{Clause, RankedDocument, VectorSearchResult};

use crate::error::SessionError;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Constructed, no clauses yet
    Unfiltered,
    /// Clauses parsed and ranking pruned; terminal
    Filtered,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Unfiltered => write!(f, "unfiltered"),
            SessionState::Filtered => write!(f, "filtered"),
        }
    }
}

/// Where a session's vector search result comes from.
#[derive(Debug, Clone)]
pub enum SessionSource {
    /// A vector search export on disk
    FromPath(PathBuf),
    /// An in-memory vector search result
    FromValue(VectorSearchResult),
}

/// A structured search over a vector search ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    /// When the structured search was created
    pub structured_query_timestamp: DateTime<Utc>,

    /// When the underlying vector query ran
    pub vector_query_timestamp: DateTime<Utc>,

    /// Path of the vector search result file
    pub vector_result_path: String,

    /// Document collection the ranking refers to
    pub collection_path: String,

    /// Raw vector query text
    pub vector_query: String,

    clauses: Vec<Clause>,

    ranking: Vec<RankedDocument>,

    /// Where this session is stored, once imported or exported
    #[serde(skip)]
    pub(crate) storage_path: Option<PathBuf>,

    #[serde(skip, default = "persisted_state")]
    state: SessionState,
}

/// Sessions read back from storage are never executed again.
fn persisted_state() -> SessionState {
    SessionState::Filtered
}

/// Counts describing a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub state: SessionState,
    pub structured_query_timestamp: DateTime<Utc>,
    pub vector_query: String,
    pub clauses: Vec<String>,
    pub surviving_documents: usize,
    pub storage_path: Option<PathBuf>,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "State: {}", self.state)?;
        writeln!(
            f,
            "Structured query: {}",
            self.structured_query_timestamp.to_rfc3339()
        )?;
        writeln!(f, "Vector query: {}", self.vector_query)?;
        writeln!(f, "Clauses ({}):", self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "  - {}", clause)?;
        }
        write!(f, "Surviving documents: {}", self.surviving_documents)?;
        if let Some(path) = &self.storage_path {
            write!(f, "\nStored at: {}", path.display())?;
        }
        Ok(())
    }
}

impl SearchSession {
    /// Create an unfiltered session from a vector search source.
    pub fn create(source: SessionSource) -> Result<Self, SessionError> {
        let result = match source {
            SessionSource::FromPath(path) => VectorSearchResult::load(&path)?,
            SessionSource::FromValue(result) => result,
        };
        Ok(Self::from_vector_result(result))
    }

    /// Create an unfiltered session copying a vector search result.
    pub fn from_vector_result(result: VectorSearchResult) -> Self {
        Self {
            structured_query_timestamp: Utc::now(),
            vector_query_timestamp: result.search_timestamp,
            vector_result_path: result.result_path,
            collection_path: result.collection_path,
            vector_query: result.query,
            clauses: Vec::new(),
            ranking: result.ranking,
            storage_path: None,
            state: SessionState::Unfiltered,
        }
    }

    /// Create a session and execute a structured query on it.
    pub fn run<L: DocumentLoader + ?Sized>(
        source: SessionSource,
        raw_query: &str,
        loader: &L,
        options: FilterOptions,
    ) -> Result<Self, SessionError> {
        let mut session = Self::create(source)?;
        session.execute(raw_query, loader, options)?;
        Ok(session)
    }

    /// Parse `raw_query` and prune the ranking with the resulting clauses.
    ///
    /// On failure the session is left unchanged and can be executed again.
    pub fn execute<L: DocumentLoader + ?Sized>(
        &mut self,
        raw_query: &str,
        loader: &L,
        options: FilterOptions,
    ) -> Result<FilterStats, SessionError> {
        if self.state != SessionState::Unfiltered {
            return Err(SessionError::AlreadyExecuted);
        }

        let clauses = ClauseParser::new().parse(raw_query)?;

        let mut ranking = self.ranking.clone();
        let stats = RankingFilter::new(loader)
            .with_options(options)
            .apply(&mut ranking, &clauses)?;

        info!(
            query = raw_query,
            clauses = clauses.len(),
            before = self.ranking.len(),
            after = ranking.len(),
            loads = stats.documents_loaded,
            "Executed structured query"
        );

        self.clauses = clauses;
        self.ranking = ranking;
        self.state = SessionState::Filtered;
        Ok(stats)
    }

    /// Parsed clauses, in query order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Surviving documents, in ranking order.
    pub fn ranking(&self) -> &[RankedDocument] {
        &self.ranking
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Where this session was last imported from or exported to.
    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    /// Summarize the session for display.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            structured_query_timestamp: self.structured_query_timestamp,
            vector_query: self.vector_query.clone(),
            clauses: self.clauses.iter().map(|c| c.to_string()).collect(),
            surviving_documents: self.ranking.len(),
            storage_path: self.storage_path.clone(),
        }
    }
}
