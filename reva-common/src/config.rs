//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default bind address when nothing else is configured
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// TOML configuration file contents
///
/// All fields are optional; missing values fall back to environment
/// variables and compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Address the HTTP server binds to (e.g. "127.0.0.1:8080")
    pub bind_address: Option<String>,
    /// Path (or sqlite: URL) of the reviews database
    pub database_path: Option<String>,
    /// Sentiment classifier service settings
    #[serde(default)]
    pub classifier: ClassifierToml,
    /// Key-point generator service settings
    #[serde(default)]
    pub generator: GeneratorToml,
}

/// `[classifier]` section of the TOML config
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClassifierToml {
    /// Inference endpoint base URL
    pub base_url: Option<String>,
    /// Model identifier submitted to the endpoint
    pub model: Option<String>,
    /// Label vocabulary the model emits: "binary" or "stars"
    pub label_scheme: Option<String>,
    /// Optional bearer token for the inference endpoint
    pub api_token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// `[generator]` section of the TOML config
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneratorToml {
    /// Generative API base URL
    pub base_url: Option<String>,
    /// Model identifier (e.g. "gemini-pro")
    pub model: Option<String>,
    /// API key; the GEMINI_API_KEY environment variable takes priority
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Default configuration file path for the platform
///
/// `~/.config/reva/reva.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reva").join("reva.toml"))
}

/// Default database location under the platform data directory
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("reva").join("reviews.db"))
        .unwrap_or_else(|| PathBuf::from("./reva_data/reviews.db"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load configuration from an explicit path or the platform default
///
/// An explicitly requested file must exist and parse. A missing file at the
/// default location is not an error; defaults apply.
pub fn load_config(cli_path: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = cli_path {
        return load_toml_config(path);
    }

    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_toml_config(&path);
        }
    }

    Ok(TomlConfig::default())
}

/// Resolve the database path: CLI > DATABASE_URL > TOML > default
pub fn resolve_database_path(cli_arg: Option<&str>, toml: &TomlConfig) -> PathBuf {
    if let Some(value) = cli_arg {
        return database_url_to_path(value);
    }

    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return database_url_to_path(&url);
        }
    }

    if let Some(value) = &toml.database_path {
        return database_url_to_path(value);
    }

    default_database_path()
}

/// Resolve the bind address: CLI > REVA_BIND > TOML > default
pub fn resolve_bind_address(cli_arg: Option<&str>, toml: &TomlConfig) -> String {
    if let Some(addr) = cli_arg {
        return addr.to_string();
    }

    if let Ok(addr) = std::env::var("REVA_BIND") {
        if !addr.trim().is_empty() {
            return addr;
        }
    }

    if let Some(addr) = &toml.bind_address {
        return addr.clone();
    }

    DEFAULT_BIND_ADDRESS.to_string()
}

/// Accept either a plain filesystem path or a sqlite: URL
///
/// `DATABASE_URL` conventionally carries a URL ("sqlite:///var/lib/reva.db");
/// the scheme prefix is stripped so both spellings work.
fn database_url_to_path(value: &str) -> PathBuf {
    let path = value
        .strip_prefix("sqlite://")
        .or_else(|| value.strip_prefix("sqlite:"))
        .unwrap_or(value);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_prefix_stripped() {
        assert_eq!(
            database_url_to_path("sqlite:///var/lib/reva/reviews.db"),
            PathBuf::from("/var/lib/reva/reviews.db")
        );
        assert_eq!(
            database_url_to_path("sqlite:reviews.db"),
            PathBuf::from("reviews.db")
        );
        assert_eq!(
            database_url_to_path("/data/reviews.db"),
            PathBuf::from("/data/reviews.db")
        );
    }

    #[test]
    fn toml_sections_parse() {
        let config: TomlConfig = toml::from_str(
            r#"
            bind_address = "0.0.0.0:9090"

            [classifier]
            model = "nlptown/bert-base-multilingual-uncased-sentiment"
            label_scheme = "stars"

            [generator]
            model = "gemini-pro"
            api_key = "test-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0:9090"));
        assert_eq!(config.classifier.label_scheme.as_deref(), Some("stars"));
        assert_eq!(config.generator.api_key.as_deref(), Some("test-key"));
        assert!(config.database_path.is_none());
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert!(config.bind_address.is_none());
        assert!(config.classifier.model.is_none());
        assert!(config.generator.api_key.is_none());
    }
}
