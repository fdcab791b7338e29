//! Ranking filter.
//!
//! Applies clauses one after another, removing every ranked document that
//! fails the current clause. Removal is stable: survivors keep their
//! relative order.

use std::collections::HashMap;

use tracing::debug;

use taxa_types::{Clause, RankedDocument, TaxonDocument};

use crate::error::QueryError;
use crate::loader::DocumentLoader;
use crate::matcher::matches;

/// Options for a filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Load each document once per run instead of once per clause pass
    pub cache_attributes: bool,
}

/// Counters describing a filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Clause passes performed
    pub passes: usize,

    /// Documents loaded from the loader
    pub documents_loaded: usize,

    /// Ranking entries removed
    pub removed: usize,
}

/// Filters a ranking with structured query clauses.
pub struct RankingFilter<'a, L: DocumentLoader + ?Sized> {
    loader: &'a L,
    options: FilterOptions,
}

impl<'a, L: DocumentLoader + ?Sized> RankingFilter<'a, L> {
    /// Create a filter loading documents through `loader`.
    pub fn new(loader: &'a L) -> Self {
        Self {
            loader,
            options: FilterOptions::default(),
        }
    }

    /// Set filter options.
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// Remove from `ranking` every document failing at least one clause.
    ///
    /// A document load failure aborts the run. The pass that failed leaves
    /// the ranking as it was before that pass; earlier passes stay applied.
    pub fn apply(
        &self,
        ranking: &mut Vec<RankedDocument>,
        clauses: &[Clause],
    ) -> Result<FilterStats, QueryError> {
        let mut stats = FilterStats::default();
        let mut cache: HashMap<u64, TaxonDocument> = HashMap::new();

        for clause in clauses {
            let before = ranking.len();

            let keep = ranking
                .iter()
                .map(|doc| self.check(doc, clause, &mut cache, &mut stats))
                .collect::<Result<Vec<bool>, QueryError>>()?;

            let mut keep = keep.into_iter();
            ranking.retain(|_| keep.next().unwrap_or(false));

            stats.passes += 1;
            stats.removed += before - ranking.len();

            debug!(
                clause = %clause,
                before,
                after = ranking.len(),
                "Applied clause"
            );
        }

        Ok(stats)
    }

    fn check(
        &self,
        doc: &RankedDocument,
        clause: &Clause,
        cache: &mut HashMap<u64, TaxonDocument>,
        stats: &mut FilterStats,
    ) -> Result<bool, QueryError> {
        if !self.options.cache_attributes {
            stats.documents_loaded += 1;
            return Ok(matches(&self.loader.load(doc)?, clause));
        }

        if let Some(loaded) = cache.get(&doc.document_id) {
            return Ok(matches(loaded, clause));
        }

        let loaded = self.loader.load(doc)?;
        stats.documents_loaded += 1;
        let result = matches(&loaded, clause);
        cache.insert(doc.document_id, loaded);
        Ok(result)
    }
}
