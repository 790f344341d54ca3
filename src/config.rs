use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::StartupError;

/// Service settings, resolved once at startup and handed to
/// [`CatalogService::connect`](crate::CatalogService::connect).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub database: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5000,
            database: PathBuf::from("catalog.db"),
        }
    }
}

impl Config {
    /// Reads a JSON configuration file, or falls back to the defaults when no
    /// file is given. Keys left out of the file keep their default value.
    pub fn load(path: Option<&Path>) -> Result<Config, StartupError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let config_string = fs::read_to_string(path).map_err(|source| StartupError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_str(&config_string)?)
    }

    pub fn with_overrides(mut self, database: Option<PathBuf>, port: Option<u16>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.database, PathBuf::from("catalog.db"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "/var/lib/catalog/catalog.db"}}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.database, PathBuf::from("/var/lib/catalog/catalog.db"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "port = 8080").unwrap();

        assert!(matches!(
            Config::load(Some(file.path())),
            Err(StartupError::ParseConfig(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(StartupError::ReadConfig { .. })
        ));
    }

    #[test]
    fn command_line_wins() {
        let config = Config::default().with_overrides(Some(PathBuf::from("test_catalog.db")), Some(8080));
        assert_eq!(
            config,
            Config {
                port: 8080,
                database: PathBuf::from("test_catalog.db"),
            }
        );
        assert_eq!(Config::default().with_overrides(None, None), Config::default());
    }
}
