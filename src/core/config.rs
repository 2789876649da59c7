//! Configuration with layered hierarchy
//!
//! Database location resolves in priority order: the `--db` flag, the
//! `POISED_DB` environment variable, the user config file, then a per-user
//! data directory default.

use serde::Deserialize;
use std::path::PathBuf;

/// Poised configuration loaded from the user config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the project database
    pub database: Option<PathBuf>,

    /// Default output format (tsv, json, csv)
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/poised/config.yaml)
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&path) {
                    if let Ok(user) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(user);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(db) = std::env::var("POISED_DB") {
            config.database = Some(PathBuf::from(db));
        }

        config
    }

    /// Resolve the database path, applying the default location last
    pub fn database_path(&self, flag: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = flag {
            return path.clone();
        }
        if let Some(ref path) = self.database {
            return path.clone();
        }
        Self::default_database_path()
    }

    /// Per-user default: <data dir>/poised/poised.db
    fn default_database_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "poised")
            .map(|dirs| dirs.data_dir().join("poised.db"))
            .unwrap_or_else(|| PathBuf::from("poised.db"))
    }

    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "poised")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_takes_precedence() {
        let config = Config {
            database: Some(PathBuf::from("/from/config.db")),
            default_format: None,
        };
        let flag = PathBuf::from("/from/flag.db");
        assert_eq!(config.database_path(Some(&flag)), flag);
        assert_eq!(
            config.database_path(None),
            PathBuf::from("/from/config.db")
        );
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            database: Some(PathBuf::from("/a.db")),
            default_format: Some("tsv".to_string()),
        };
        base.merge(Config {
            database: Some(PathBuf::from("/b.db")),
            default_format: None,
        });
        assert_eq!(base.database, Some(PathBuf::from("/b.db")));
        assert_eq!(base.default_format, Some("tsv".to_string()));
    }
}
