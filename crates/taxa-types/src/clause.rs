//! Structured query clause.
//!
//! A clause is a predicate over the biological entities recorded in a
//! document: an entity name, optionally narrowed by a character (attribute)
//! name, optionally narrowed further by the character's value.

use serde::{Deserialize, Serialize};

/// A 1-3 term predicate parsed from a structured query.
///
/// All terms are lower-cased on construction. A non-empty `attribute_value`
/// always comes with a non-empty `attribute_name`; the clause grammar never
/// produces a value without a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    /// Biological entity name (e.g. "leaf")
    pub entity: String,

    /// Character name on the entity (e.g. "color"), empty if not given
    #[serde(default)]
    pub attribute_name: String,

    /// Character value (e.g. "green"), empty if not given
    #[serde(default)]
    pub attribute_value: String,
}

impl Clause {
    /// Create a clause, lower-casing every term.
    pub fn new(
        entity: impl AsRef<str>,
        attribute_name: impl AsRef<str>,
        attribute_value: impl AsRef<str>,
    ) -> Self {
        Self {
            entity: entity.as_ref().to_lowercase(),
            attribute_name: attribute_name.as_ref().to_lowercase(),
            attribute_value: attribute_value.as_ref().to_lowercase(),
        }
    }

    /// Create an entity-only clause.
    pub fn entity(entity: impl AsRef<str>) -> Self {
        Self::new(entity, "", "")
    }

    /// Number of terms in the clause (1-3).
    pub fn term_count(&self) -> usize {
        if !self.attribute_value.is_empty() {
            3
        } else if !self.attribute_name.is_empty() {
            2
        } else {
            1
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entity)?;
        if !self.attribute_name.is_empty() {
            write!(f, " {}", self.attribute_name)?;
        }
        if !self.attribute_value.is_empty() {
            write!(f, " {}", self.attribute_value)?;
        }
        Ok(())
    }
}
