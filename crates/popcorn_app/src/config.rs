//! Startup configuration, read from a RON file with an environment override
//! for the API key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use popcorn_engine::{ApiSettings, DEFAULT_API_BASE_URL};
use popcorn_logging::LogDestination;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "popcorn.ron";
pub const API_KEY_ENV: &str = "POPCORN_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("no movie database API key; set `search_api_key` in the config or POPCORN_API_KEY")]
    MissingApiKey,
    #[error("invalid arguments: {0}")]
    Args(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search_api_key: String,
    pub api_base_url: String,
    /// Directory holding the persisted watched list.
    pub data_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogTarget,
    pub log_file: PathBuf,
    pub verbose: bool,
    /// Query to search for right after startup.
    pub initial_query: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: PathBuf::from("popcorn_data"),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            log_destination: LogTarget::File,
            log_file: PathBuf::from("popcorn.log"),
            verbose: false,
            initial_query: String::new(),
        }
    }
}

impl AppConfig {
    /// Loads `path` if it exists, then applies `POPCORN_API_KEY`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, std::env::var(API_KEY_ENV).ok())
    }

    fn load_with_env(path: &Path, env_key: Option<String>) -> Result<Self, ConfigError> {
        let from_file = match fs::read_to_string(path) {
            Ok(text) => Some(Self::parse(path, &text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::resolve(from_file, env_key)
    }

    fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    fn resolve(from_file: Option<Self>, env_key: Option<String>) -> Result<Self, ConfigError> {
        let mut config = from_file.unwrap_or_default();
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            config.search_api_key = key;
        }
        config.search_api_key = config.search_api_key.trim().to_string();
        if config.search_api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(config)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ApiSettings::new(self.search_api_key.clone())
        }
    }
}

/// Accepts either no arguments or `--config <path>`.
pub fn config_path_from_args(
    mut args: impl Iterator<Item = String>,
) -> Result<PathBuf, ConfigError> {
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(PathBuf::from(DEFAULT_CONFIG_FILENAME)),
        (Some(flag), Some(path), None) if flag == "--config" => Ok(PathBuf::from(path)),
        (Some(flag), ..) => Err(ConfigError::Args(format!(
            "unexpected {flag:?}; usage: popcorn [--config <path>]"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_partial_file_with_defaults() {
        let text = r#"(
            search_api_key: "abc123",
            data_dir: "/tmp/popcorn",
            log_destination: Both,
        )"#;
        let config = AppConfig::parse(Path::new("popcorn.ron"), text).unwrap();
        assert_eq!(config.search_api_key, "abc123");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/popcorn"));
        assert_eq!(config.log_destination, LogTarget::Both);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = AppConfig::parse(Path::new("popcorn.ron"), "(search_api_key: 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let file = AppConfig {
            search_api_key: "from-file".to_string(),
            ..AppConfig::default()
        };
        let config = AppConfig::resolve(Some(file.clone()), Some("from-env".to_string())).unwrap();
        assert_eq!(config.search_api_key, "from-env");

        let config = AppConfig::resolve(Some(file), Some("   ".to_string())).unwrap();
        assert_eq!(config.search_api_key, "from-file");
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = AppConfig::resolve(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("absent.ron");
        let config = AppConfig::load_with_env(&path, Some("k".to_string())).unwrap();
        assert_eq!(config.search_api_key, "k");
        assert_eq!(config.data_dir, PathBuf::from("popcorn_data"));
    }

    #[test]
    fn file_on_disk_is_loaded() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("popcorn.ron");
        fs::write(&path, r#"(search_api_key: "disk", initial_query: "Titanic")"#).unwrap();
        let config = AppConfig::load_with_env(&path, None).unwrap();
        assert_eq!(config.search_api_key, "disk");
        assert_eq!(config.initial_query, "Titanic");
    }

    #[test]
    fn api_settings_carry_key_and_timeouts() {
        let config = AppConfig {
            search_api_key: "k".to_string(),
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        let settings = config.api_settings();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn argument_parsing() {
        assert_eq!(
            config_path_from_args(args(&[])).unwrap(),
            PathBuf::from(DEFAULT_CONFIG_FILENAME)
        );
        assert_eq!(
            config_path_from_args(args(&["--config", "x.ron"])).unwrap(),
            PathBuf::from("x.ron")
        );
        assert!(config_path_from_args(args(&["--nope"])).is_err());
        assert!(config_path_from_args(args(&["--config"])).is_err());
    }
}
