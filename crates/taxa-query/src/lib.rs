//! # taxa-query
//!
//! Structured query engine for Taxa: refines a vector-space ranking with
//! clauses over the biological entities recorded in each document.
//!
//! ## Core Concepts
//!
//! - **Clause grammar**: `leaf color green, stem length` parses into ordered 1-3 term clauses
//! - **Matching**: a clause is checked against the first occurrence of its entity
//! - **Filtering**: clauses are ANDed; each pass removes failing documents in place
//!
//! ## Usage
//!
//! ```rust,ignore
//! use taxa_query::{ClauseParser, RankingFilter, XmlDocumentLoader};
//!
//! let clauses = ClauseParser::new().parse("leaf color green, stem")?;
//! let loader = XmlDocumentLoader::new("/data/flora");
//! RankingFilter::new(&loader).apply(&mut ranking, &clauses)?;
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: Clause grammar
//! - [`matcher`]: Clause matching against a loaded document
//! - [`filter`]: Ranking filter
//! - [`loader`]: Document loader trait and in-memory mock
//! - [`xml_loader`]: Loader for taxon treatment markup

pub mod error;
pub mod filter;
pub mod loader;
pub mod matcher;
pub mod parser;
pub mod xml_loader;

pub use error::QueryError;
pub use filter::{FilterOptions, FilterStats, RankingFilter};
pub use loader::{DocumentLoader, MockDocumentLoader};
pub use matcher::matches;
pub use parser::ClauseParser;
pub use xml_loader::{parse_document, XmlDocumentLoader};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use taxa_types::{BiologicalEntity, RankedDocument, TaxonDocument};

    /// Parse a query and filter a ranking with it.
    #[test]
    fn test_parse_then_filter() {
        let loader = MockDocumentLoader::new()
            .with_document(
                10,
                TaxonDocument::new(vec![
                    BiologicalEntity::new("leaf").with_character("color", "green"),
                    BiologicalEntity::new("stem").with_character("length", "5"),
                ]),
            )
            .with_document(
                11,
                TaxonDocument::new(vec![
                    BiologicalEntity::new("leaf").with_character("color", "red"),
                    BiologicalEntity::new("stem").with_character("length", "5"),
                ]),
            )
            .with_document(
                12,
                TaxonDocument::new(vec![BiologicalEntity::new("leaf").with_character("color", "green")]),
            );

        let mut ranking = vec![
            RankedDocument::new(1, 0.9, 10, "10.xml"),
            RankedDocument::new(2, 0.8, 11, "11.xml"),
            RankedDocument::new(3, 0.7, 12, "12.xml"),
        ];

        let clauses = ClauseParser::new()
            .parse("Leaf Color Green, stem length")
            .unwrap();
        assert_eq!(clauses.len(), 2);

        RankingFilter::new(&loader).apply(&mut ranking, &clauses).unwrap();

        let ids: Vec<u64> = ranking.iter().map(|d| d.document_id).collect();
        assert_eq!(ids, vec![10]);
    }
}
