//! Document loader for taxon treatment markup.
//!
//! Treatments record the structures described in each statement as
//! `biological_entity` elements carrying `character` children:
//!
//! ```xml
//! <description type="morphology">
//!   <statement id="d0_s1">
//!     <text>Leaves red to green.</text>
//!     <biological_entity name="leaf" type="structure">
//!       <character name="coloration" value="red" />
//!       <character name="coloration" value="green" />
//!     </biological_entity>
//!   </statement>
//! </description>
//! ```
//!
//! Element names are compared without namespace prefix.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use tracing::trace;

use taxa_types::{BiologicalEntity, Character, RankedDocument, TaxonDocument};

use crate::error::QueryError;
use crate::loader::DocumentLoader;

/// Loads ranked documents from XML files in a collection directory.
#[derive(Debug, Clone)]
pub struct XmlDocumentLoader {
    collection_dir: PathBuf,
}

impl XmlDocumentLoader {
    /// Create a loader resolving relative document paths against
    /// `collection_dir`.
    pub fn new(collection_dir: impl Into<PathBuf>) -> Self {
        Self {
            collection_dir: collection_dir.into(),
        }
    }

    /// Resolve a ranked document path to a file path.
    pub fn resolve(&self, document_path: &str) -> PathBuf {
        let path = Path::new(document_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.collection_dir.join(path)
        }
    }
}

impl DocumentLoader for XmlDocumentLoader {
    fn load(&self, document: &RankedDocument) -> Result<TaxonDocument, QueryError> {
        let path = self.resolve(&document.document_path);
        trace!(document_id = document.document_id, path = ?path, "Loading document");

        let load_error = |message: String| QueryError::DocumentLoad {
            path: path.to_string_lossy().to_string(),
            message,
        };

        let xml = fs::read_to_string(&path).map_err(|e| load_error(e.to_string()))?;
        parse_document(&xml).map_err(|e| load_error(e.to_string()))
    }
}

/// Parse treatment markup into entity occurrences and description text.
pub fn parse_document(xml: &str) -> Result<TaxonDocument, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut entities = Vec::new();
    let mut open_entity: Option<BiologicalEntity> = None;
    let mut description_depth = 0usize;
    let mut description_parts = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => match start.local_name().as_ref() {
                b"biological_entity" => {
                    if let Some(entity) = open_entity.take() {
                        entities.push(entity);
                    }
                    open_entity = Some(BiologicalEntity::new(attribute(&start, b"name")?));
                }
                b"character" => push_character(open_entity.as_mut(), &start)?,
                b"description" => description_depth += 1,
                _ => {}
            },
            Event::Empty(empty) => match empty.local_name().as_ref() {
                b"biological_entity" => {
                    entities.push(BiologicalEntity::new(attribute(&empty, b"name")?));
                }
                b"character" => push_character(open_entity.as_mut(), &empty)?,
                _ => {}
            },
            Event::End(end) => match end.local_name().as_ref() {
                b"biological_entity" => {
                    if let Some(entity) = open_entity.take() {
                        entities.push(entity);
                    }
                }
                b"description" => description_depth = description_depth.saturating_sub(1),
                _ => {}
            },
            Event::Text(text) if description_depth > 0 => {
                let text = text.unescape()?;
                description_parts.push(text.trim().to_string());
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(entity) = open_entity.take() {
        entities.push(entity);
    }

    Ok(TaxonDocument::new(entities).with_description(description_parts.join(" ")))
}

fn push_character(
    entity: Option<&mut BiologicalEntity>,
    element: &BytesStart<'_>,
) -> Result<(), quick_xml::Error> {
    // Characters outside an entity describe nothing we can match
    if let Some(entity) = entity {
        entity.characters.push(Character::new(
            attribute(element, b"name")?,
            attribute(element, b"value")?,
        ));
    }
    Ok(())
}

/// Unescaped value of an attribute, empty if absent.
fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<String, quick_xml::Error> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREATMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bio:treatment xmlns:bio="http://www.github.com/biosemantics">
  <taxon_identification status="ACCEPTED">
    <taxon_name rank="species">Aster alpinus</taxon_name>
  </taxon_identification>
  <description type="morphology">
    <statement id="d0_s0">
      <text>Leaves red to green, ovate.</text>
      <biological_entity id="o1" name="leaf" type="structure">
        <character name="coloration" value="red" />
        <character name="coloration" value="green" />
        <character name="shape" value="ovate" />
      </biological_entity>
    </statement>
    <statement id="d0_s1">
      <text>Stems 5 cm &amp; hairy.</text>
      <biological_entity id="o2" name="stem" type="structure">
        <character name="length" value="5 cm" />
      </biological_entity>
      <biological_entity id="o3" name="root" type="structure" />
    </statement>
  </description>
</bio:treatment>
"#;

    #[test]
    fn test_parse_entities_in_order() {
        let doc = parse_document(TREATMENT).unwrap();
        let names: Vec<&str> = doc.entity_names().collect();
        assert_eq!(names, vec!["leaf", "stem", "root"]);
    }

    #[test]
    fn test_parse_characters() {
        let doc = parse_document(TREATMENT).unwrap();
        let leaf: Vec<(&str, &str)> = doc
            .characters("leaf")
            .map(|c| (c.name.as_str(), c.value.as_str()))
            .collect();
        assert_eq!(
            leaf,
            vec![
                ("coloration", "red"),
                ("coloration", "green"),
                ("shape", "ovate")
            ]
        );
        assert_eq!(doc.characters("root").count(), 0);
    }

    #[test]
    fn test_parse_description_text() {
        let doc = parse_document(TREATMENT).unwrap();
        assert_eq!(
            doc.description,
            "Leaves red to green, ovate. Stems 5 cm & hairy."
        );
    }

    #[test]
    fn test_parse_malformed_markup() {
        assert!(parse_document("<description><text>open</description>").is_err());
    }

    #[test]
    fn test_load_relative_to_collection() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("17.xml"), TREATMENT).unwrap();

        let loader = XmlDocumentLoader::new(dir.path());
        let doc = loader
            .load(&RankedDocument::new(1, 0.9, 17, "17.xml"))
            .unwrap();
        assert_eq!(doc.entities.len(), 3);
    }

    #[test]
    fn test_load_absolute_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("abs.xml");
        fs::write(&path, TREATMENT).unwrap();

        let loader = XmlDocumentLoader::new("/nonexistent");
        let doc = loader
            .load(&RankedDocument::new(1, 0.9, 5, path.to_string_lossy()))
            .unwrap();
        assert_eq!(doc.entities[0].name, "leaf");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let loader = XmlDocumentLoader::new(dir.path());
        let err = loader
            .load(&RankedDocument::new(1, 0.9, 3, "3.xml"))
            .unwrap_err();
        assert!(matches!(err, QueryError::DocumentLoad { .. }));
    }
}
