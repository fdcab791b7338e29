//! Session persistence.
//!
//! Sessions are stored as pretty-printed JSON. A relative name is resolved
//! to `<archives_path>/<name>.json`; an empty relative name on export uses
//! the structured query timestamp. Absolute paths are used as given.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use taxa_types::Settings;

use crate::error::SessionError;
use crate::session::SearchSession;

const SESSION_EXTENSION: &str = "json";

impl SearchSession {
    /// Serialize to JSON bytes for storage
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        serde_json::to_vec_pretty(self).map_err(|e| SessionError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        serde_json::from_slice(bytes).map_err(SessionError::from)
    }

    /// Export the session and remember where it was stored.
    ///
    /// Returns the path written.
    pub fn export_to(
        &mut self,
        path: &str,
        absolute: bool,
        settings: &Settings,
    ) -> Result<PathBuf, SessionError> {
        let target = if !absolute && path.trim().is_empty() {
            let stem = self
                .structured_query_timestamp
                .format("%Y%m%d-%H%M%S")
                .to_string();
            resolve_path(&stem, false, settings)
        } else {
            resolve_path(path, absolute, settings)
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
        }

        let bytes = self.to_bytes()?;
        fs::write(&target, bytes).map_err(|e| SessionError::io(&target, e))?;

        info!(
            path = %target.display(),
            clauses = self.clauses().len(),
            documents = self.ranking().len(),
            "Exported session"
        );

        self.storage_path = Some(target.clone());
        Ok(target)
    }

    /// Import a session previously exported with [`SearchSession::export_to`].
    pub fn import_from(
        path: &str,
        absolute: bool,
        settings: &Settings,
    ) -> Result<Self, SessionError> {
        let source = resolve_path(path, absolute, settings);

        let bytes = fs::read(&source).map_err(|e| SessionError::io(&source, e))?;
        let mut session = Self::from_bytes(&bytes)?;

        info!(
            path = %source.display(),
            clauses = session.clauses().len(),
            documents = session.ranking().len(),
            "Imported session"
        );

        session.storage_path = Some(source);
        Ok(session)
    }
}

/// Resolve a session name or path to a file path.
pub fn resolve_path(path: &str, absolute: bool, settings: &Settings) -> PathBuf {
    if absolute {
        PathBuf::from(path)
    } else {
        settings.archive_file(format!("{}.{}", path, SESSION_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use chrono::Utc;
    use taxa_types::{RankedDocument, VectorSearchResult};

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            archives_path: dir.join("archives").to_string_lossy().to_string(),
            ..Settings::default()
        }
    }

    fn session() -> SearchSession {
        SearchSession::from_vector_result(VectorSearchResult {
            search_timestamp: Utc::now(),
            result_path: "vector.json".to_string(),
            collection_path: "/data/flora".to_string(),
            query: "hairy stems".to_string(),
            ranking: vec![RankedDocument::new(1, 0.5, 8, "8.xml")],
        })
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let settings = Settings {
            archives_path: "/srv/archives".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            resolve_path("run-1", false, &settings),
            PathBuf::from("/srv/archives/run-1.json")
        );
        assert_eq!(
            resolve_path("/tmp/run-1.json", true, &settings),
            PathBuf::from("/tmp/run-1.json")
        );
    }

    #[test]
    fn test_export_creates_archive_dir_and_sets_storage_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let mut session = session();

        let path = session.export_to("run-1", false, &settings).unwrap();
        assert!(path.exists());
        assert_eq!(session.storage_path(), Some(path.as_path()));
    }

    #[test]
    fn test_export_empty_name_uses_timestamp() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let mut session = session();

        let path = session.export_to("", false, &settings).unwrap();
        let expected = format!(
            "{}.json",
            session.structured_query_timestamp.format("%Y%m%d-%H%M%S")
        );
        assert_eq!(path.file_name().unwrap().to_string_lossy(), expected);
    }

    #[test]
    fn test_storage_path_not_persisted() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let mut session = session();
        let path = session.export_to("run-2", false, &settings).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("storage_path"));
        assert!(!raw.contains("run-2"));
    }

    #[test]
    fn test_import_sets_storage_path_and_state() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let mut original = session();
        let path = original.export_to("run-3", false, &settings).unwrap();

        let imported = SearchSession::import_from("run-3", false, &settings).unwrap();
        assert_eq!(imported.storage_path(), Some(path.as_path()));
        assert_eq!(imported.state(), SessionState::Filtered);
        assert_eq!(imported.ranking(), original.ranking());
    }

    #[test]
    fn test_round_trip_keeps_similarity_bits() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let similarities = [
            0.9856906946328695,
            0.1 + 0.2,
            std::f64::consts::FRAC_1_SQRT_2,
            1.0 / 3.0,
            f64::MIN_POSITIVE,
        ];
        let mut original = SearchSession::from_vector_result(VectorSearchResult {
            search_timestamp: Utc::now(),
            result_path: "vector.json".to_string(),
            collection_path: "/data/flora".to_string(),
            query: "hairy stems".to_string(),
            ranking: similarities
                .iter()
                .enumerate()
                .map(|(i, s)| RankedDocument::new(i as u32 + 1, *s, i as u64, format!("{i}.xml")))
                .collect(),
        });
        original.export_to("precise", false, &settings).unwrap();

        let imported = SearchSession::import_from("precise", false, &settings).unwrap();
        let bits: Vec<u64> = imported
            .ranking()
            .iter()
            .map(|d| d.similarity.to_bits())
            .collect();
        let expected: Vec<u64> = similarities.iter().map(|s| s.to_bits()).collect();
        assert_eq!(bits, expected);
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let err = SearchSession::import_from("absent", false, &settings).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn test_import_malformed_file_is_deserialization_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, br#"{"clauses": "not a list"}"#).unwrap();

        let err = SearchSession::import_from(
            &path.to_string_lossy(),
            true,
            &settings_in(dir.path()),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::Deserialization(_)));
    }

    #[test]
    fn test_export_to_unwritable_path_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let target = blocker.join("session.json");

        let err = session()
            .export_to(&target.to_string_lossy(), true, &settings_in(dir.path()))
            .unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }
}
