// Configuration loading and parsing (scout.toml).
//
// Every field is optional: a missing file or a partial file falls back to
// defaults that match the reference behavior (150 ms quiet period, 2-char
// query floor). The file is looked up in the working directory first, then
// in the user config directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued.
    pub debounce_ms: u64,
    /// Hard floor: shorter trimmed queries never hit the network.
    pub min_query_len: usize,
    /// Client-side cap on the suggestion panel; mirrors the backend's limit.
    pub max_suggestions: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:5000".into(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: 150,
            min_query_len: 2,
            max_suggestions: 12,
        }
    }
}

impl Config {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from the first `scout.toml` found: working directory,
/// then user config directory. Falls back to defaults when neither exists.
pub fn load_config() -> Result<Config, ConfigError> {
    for path in candidate_paths() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("scout.toml")];
    if let Some(dirs) = directories::ProjectDirs::from("", "", "scout") {
        paths.push(dirs.config_dir().join("scout.toml"));
    }
    paths
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_owned(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_owned(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if config.search.min_query_len < 1 {
        return Err(ConfigError::ValidationError {
            field: "search.min_query_len".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.search.debounce_ms > 5_000 {
        return Err(ConfigError::ValidationError {
            field: "search.debounce_ms".into(),
            message: "must be at most 5000".into(),
        });
    }
    if config.search.max_suggestions < 1 {
        return Err(ConfigError::ValidationError {
            field: "search.max_suggestions".into(),
            message: "must be at least 1".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.max_suggestions, 12);
        assert_eq!(config.quiet_period(), Duration::from_millis(150));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.search.debounce_ms, 150);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = parse(
            r#"
            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[test]
    fn full_file_parses() {
        let config = parse(
            r#"
            [api]
            base_url = "http://10.0.0.5:5000"

            [search]
            debounce_ms = 100
            min_query_len = 3
            max_suggestions = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.search.min_query_len, 3);
        assert_eq!(config.search.max_suggestions, 8);
    }

    #[test]
    fn empty_base_url_rejected() {
        let err = parse(
            r#"
            [api]
            base_url = " "
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.base_url"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_min_query_len_rejected() {
        let err = parse(
            r#"
            [search]
            min_query_len = 0
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "search.min_query_len")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_debounce_rejected() {
        let err = parse(
            r#"
            [search]
            debounce_ms = 60000
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "search.debounce_ms")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("[search\ndebounce_ms = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
