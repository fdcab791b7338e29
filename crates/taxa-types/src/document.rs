//! Entity/character data extracted from a taxon treatment document.

use serde::{Deserialize, Serialize};

/// A `(name, value)` character describing an entity occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub value: String,
}

impl Character {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A biological entity occurrence (e.g. a "leaf") with its characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiologicalEntity {
    pub name: String,
    #[serde(default)]
    pub characters: Vec<Character>,
}

impl BiologicalEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characters: Vec::new(),
        }
    }

    /// Append a character, builder style.
    pub fn with_character(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.characters.push(Character::new(name, value));
        self
    }
}

/// A loaded document: entity occurrences in document order plus description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonDocument {
    /// Entity occurrences in document order
    pub entities: Vec<BiologicalEntity>,

    /// Free-text taxon description
    #[serde(default)]
    pub description: String,
}

impl TaxonDocument {
    pub fn new(entities: Vec<BiologicalEntity>) -> Self {
        Self {
            entities,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Entity names in document order, one per occurrence.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    /// Characters of every occurrence named exactly `entity_name`, in
    /// document order.
    pub fn characters<'a>(
        &'a self,
        entity_name: &'a str,
    ) -> impl Iterator<Item = &'a Character> + 'a {
        self.entities
            .iter()
            .filter(move |e| e.name == entity_name)
            .flat_map(|e| e.characters.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> TaxonDocument {
        TaxonDocument::new(vec![
            BiologicalEntity::new("leaf").with_character("color", "green"),
            BiologicalEntity::new("stem").with_character("length", "5"),
            BiologicalEntity::new("leaf").with_character("shape", "ovate"),
        ])
    }

    #[test]
    fn test_entity_names_in_order() {
        let doc = sample_document();
        let names: Vec<&str> = doc.entity_names().collect();
        assert_eq!(names, vec!["leaf", "stem", "leaf"]);
    }

    #[test]
    fn test_characters_span_occurrences() {
        let doc = sample_document();
        let chars: Vec<&str> = doc.characters("leaf").map(|c| c.name.as_str()).collect();
        assert_eq!(chars, vec!["color", "shape"]);
    }

    #[test]
    fn test_characters_with_owned_lookup_name() {
        let doc = sample_document();
        let name = String::from("stem");
        let values: Vec<&str> = doc.characters(&name).map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["5"]);
    }

    #[test]
    fn test_characters_unknown_entity() {
        assert_eq!(sample_document().characters("petal").count(), 0);
    }
}
