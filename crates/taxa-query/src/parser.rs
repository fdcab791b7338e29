//! Structured query parsing.
//!
//! A structured query is a comma separated list of clauses, each made of one
//! to three whitespace separated terms:
//!
//! ```text
//! leaf color green, stem length, petal
//! ```
//!
//! Terms are word tokens or decimal numbers (`12`, `1,5`). Commas are
//! normalized to a single `", "` separator before tokenizing, so a decimal
//! comma written without spaces is split like any other separator. Groups
//! never exceed three terms: a fourth term starts a new clause. A group may
//! join terms with any single whitespace character, but only spaces split it
//! into terms, so `leaf\tcolor` is one entity name.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use taxa_types::Clause;

use crate::error::QueryError;

/// Any comma followed by optional whitespace.
const SEPARATOR_PATTERN: &str = r",\s*";

/// One to three single-whitespace separated terms.
const CLAUSE_GROUP_PATTERN: &str = r"((\d*\d,?\d+)|(\w+))(\s((\d*\d,?\d+)|(\w+))){0,2}";

/// Canonical clause separator.
const CANONICAL_SEPARATOR: &str = ", ";

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SEPARATOR_PATTERN).expect("separator pattern is valid"));

static CLAUSE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLAUSE_GROUP_PATTERN).expect("clause pattern is valid"));

/// Parser for raw structured queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseParser;

impl ClauseParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw structured query into clauses in source order.
    ///
    /// Fails with [`QueryError::Format`] when the query contains no clause
    /// group at all (empty or punctuation-only input).
    pub fn parse(&self, raw_query: &str) -> Result<Vec<Clause>, QueryError> {
        let normalized = normalize_separators(raw_query);

        let clauses = CLAUSE_GROUP
            .find_iter(&normalized)
            .map(|group| build_clause(group.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        if clauses.is_empty() {
            return Err(QueryError::Format(format!(
                "structured query contains no clauses: {:?}",
                raw_query
            )));
        }

        debug!(
            query = raw_query,
            clauses = clauses.len(),
            "Parsed structured query"
        );
        Ok(clauses)
    }
}

/// Rewrite every comma (and the whitespace after it) to `", "`.
fn normalize_separators(raw_query: &str) -> String {
    SEPARATOR
        .replace_all(raw_query, CANONICAL_SEPARATOR)
        .into_owned()
}

/// Build a clause from one matched clause group.
fn build_clause(group: &str) -> Result<Clause, QueryError> {
    let group = group.to_lowercase();
    // Terms are separated by single spaces; other whitespace stays in the term
    let terms: Vec<&str> = group.split(' ').filter(|t| !t.is_empty()).collect();

    match terms.as_slice() {
        [] => Err(QueryError::Format(format!(
            "clause has invalid shape: {:?}",
            group
        ))),
        [entity] => Ok(Clause::entity(entity)),
        [entity, name] => Ok(Clause::new(entity, name, "")),
        [entity, name, value, ..] => Ok(Clause::new(entity, name, value)),
    }
}
