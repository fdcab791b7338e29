//! # taxa-types
//!
//! Shared domain types for the Taxa structured search system.
//!
//! This crate defines the core data structures used throughout the system:
//! - Clauses: Parsed 1-3 term predicates over biological entities
//! - Ranking: Documents ranked by an upstream vector-space search
//! - Documents: Entity/character data extracted from a taxon treatment
//! - Settings: Configuration types
//!
//! ## Usage
//!
//! ```rust
//! use taxa_types::Clause;
//!
//! let clause = Clause::new("Leaf", "Color", "Green");
//! assert_eq!(clause.entity, "leaf");
//! ```

pub mod clause;
pub mod config;
pub mod document;
pub mod error;
pub mod ranking;

pub use clause::Clause;
pub use config::Settings;
pub use document::{BiologicalEntity, Character, TaxonDocument};
pub use error::TypesError;
pub use ranking::{RankedDocument, VectorSearchResult};
