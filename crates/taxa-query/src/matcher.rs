//! Clause matching against a loaded document.
//!
//! Only the first occurrence of the clause's entity is consulted, and within
//! it only the first character examined decides the outcome. A document whose
//! first `leaf` character is `(color, red)` does not satisfy
//! `leaf color green` even if a later character is `(color, green)`.

use taxa_types::{Clause, TaxonDocument};

/// Check whether `document` satisfies `clause`.
///
/// Entity, character name and character value comparisons are
/// case-insensitive; the clause terms are already lower-cased.
pub fn matches(document: &TaxonDocument, clause: &Clause) -> bool {
    for entity_name in document.entity_names() {
        if entity_name.to_lowercase() != clause.entity {
            continue;
        }

        // Entity-only clause
        if clause.attribute_name.is_empty() {
            return true;
        }

        // First character decides
        if let Some(character) = document.characters(entity_name).next() {
            if character.name.to_lowercase() != clause.attribute_name {
                return false;
            }
            return clause.attribute_value.is_empty()
                || character.value.to_lowercase() == clause.attribute_value;
        }
        // Occurrence without characters: keep scanning entity names
    }

    false
}
