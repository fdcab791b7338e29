//! Configuration loading for taxa.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/taxa/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TypesError;

/// Main application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the document collection markup
    #[serde(default = "default_collection_path")]
    pub collection_path: String,

    /// Default directory for exported sessions and generated reports
    #[serde(default = "default_archives_path")]
    pub archives_path: String,

    /// Run prefix used to name generated report files
    #[serde(default = "default_prefix")]
    pub default_prefix: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Reuse a document's attributes across clause passes of one filter
    #[serde(default)]
    pub cache_attributes: bool,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "taxa")
}

fn default_collection_path() -> String {
    project_dirs()
        .map(|p| p.data_local_dir().join("collection"))
        .unwrap_or_else(|| PathBuf::from("./collection"))
        .to_string_lossy()
        .to_string()
}

fn default_archives_path() -> String {
    project_dirs()
        .map(|p| p.data_local_dir().join("archives"))
        .unwrap_or_else(|| PathBuf::from("./archives"))
        .to_string_lossy()
        .to_string()
}

fn default_prefix() -> String {
    "PRE-1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collection_path: default_collection_path(),
            archives_path: default_archives_path(),
            default_prefix: default_prefix(),
            log_level: default_log_level(),
            cache_attributes: false,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/taxa/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (TAXA_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, TypesError> {
        let config_dir = project_dirs()
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("collection_path", default_collection_path())
            .map_err(|e| TypesError::Config(e.to_string()))?
            .set_default("archives_path", default_archives_path())
            .map_err(|e| TypesError::Config(e.to_string()))?
            .set_default("default_prefix", default_prefix())
            .map_err(|e| TypesError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| TypesError::Config(e.to_string()))?
            .set_default("cache_attributes", false)
            .map_err(|e| TypesError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // TAXA_ARCHIVES_PATH, TAXA_DEFAULT_PREFIX, ...
        builder = builder.add_source(
            Environment::with_prefix("TAXA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| TypesError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| TypesError::Config(e.to_string()))
    }

    /// Collection directory with `~` expanded
    pub fn collection_dir(&self) -> PathBuf {
        expand_home(&self.collection_path)
    }

    /// Archives directory with `~` expanded
    pub fn archives_dir(&self) -> PathBuf {
        expand_home(&self.archives_path)
    }

    /// Resolve a relative archive name to a file under the archives directory.
    pub fn archive_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.archives_dir().join(name)
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
