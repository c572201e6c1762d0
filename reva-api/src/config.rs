//! Configuration resolution for reva-api
//!
//! Assembles the runtime configuration from CLI arguments, environment
//! variables, and the TOML config file, priority in that order.

use clap::Parser;
use reva_common::config::{self, TomlConfig};
use reva_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::services::{gemini_generator, hf_classifier, LabelScheme};

/// Default per-request timeout for both external services
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "reva-api",
    about = "Product Review Analyzer API service",
    version
)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database file path (overrides DATABASE_URL and the config file)
    #[arg(long)]
    pub database: Option<String>,

    /// Bind address, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub bind: Option<String>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_path: PathBuf,
    pub classifier: ClassifierConfig,
    pub generator: GeneratorConfig,
}

/// Resolved sentiment classifier settings
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    pub scheme: LabelScheme,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

/// Resolved key-point generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl AppConfig {
    /// Resolve the full runtime configuration
    ///
    /// Fails when a required setting is missing (generator API key) or
    /// invalid (unknown label scheme).
    pub fn resolve(cli: &Cli, toml: &TomlConfig) -> Result<Self> {
        let bind_address = config::resolve_bind_address(cli.bind.as_deref(), toml);
        let database_path = config::resolve_database_path(cli.database.as_deref(), toml);

        // One label vocabulary active per deployment, selected here
        let scheme = match &toml.classifier.label_scheme {
            Some(value) => value.parse()?,
            None => LabelScheme::Binary,
        };

        let classifier = ClassifierConfig {
            base_url: toml
                .classifier
                .base_url
                .clone()
                .unwrap_or_else(|| hf_classifier::DEFAULT_BASE_URL.to_string()),
            model: toml
                .classifier
                .model
                .clone()
                .unwrap_or_else(|| hf_classifier::DEFAULT_MODEL.to_string()),
            scheme,
            api_token: toml.classifier.api_token.clone(),
            timeout: Duration::from_secs(
                toml.classifier.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };

        let generator = GeneratorConfig {
            base_url: toml
                .generator
                .base_url
                .clone()
                .unwrap_or_else(|| gemini_generator::DEFAULT_BASE_URL.to_string()),
            model: toml
                .generator
                .model
                .clone()
                .unwrap_or_else(|| gemini_generator::DEFAULT_MODEL.to_string()),
            api_key: resolve_gemini_api_key(toml)?,
            timeout: Duration::from_secs(
                toml.generator.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };

        Ok(Self {
            bind_address,
            database_path,
            classifier,
            generator,
        })
    }
}

/// Resolve the Gemini API key
///
/// Priority: GEMINI_API_KEY environment variable, then the config file.
pub fn resolve_gemini_api_key(toml: &TomlConfig) -> Result<String> {
    let env_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = toml
        .generator
        .api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!("Gemini API key found in both environment and config file. Using environment (highest priority).");
    }

    if let Some(key) = env_key {
        info!("Gemini API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("Gemini API key loaded from config file");
        return Ok(key);
    }

    Err(Error::Config(
        "Gemini API key not configured. Supply it using one of:\n\
         1. Environment: GEMINI_API_KEY=your-key-here\n\
         2. TOML config: ~/.config/reva/reva.toml ([generator] api_key = \"your-key\")"
            .to_string(),
    ))
}

/// Validate API key (non-empty, non-whitespace)
fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reva_common::config::GeneratorToml;
    use serial_test::serial;

    fn cli_empty() -> Cli {
        Cli {
            config: None,
            database: None,
            bind: None,
        }
    }

    fn toml_with_key(key: &str) -> TomlConfig {
        TomlConfig {
            generator: GeneratorToml {
                api_key: Some(key.to_string()),
                ..GeneratorToml::default()
            },
            ..TomlConfig::default()
        }
    }

    #[test]
    #[serial]
    fn env_key_beats_toml_key() {
        std::env::set_var("GEMINI_API_KEY", "from-env");
        let key = resolve_gemini_api_key(&toml_with_key("from-toml")).unwrap();
        std::env::remove_var("GEMINI_API_KEY");

        assert_eq!(key, "from-env");
    }

    #[test]
    #[serial]
    fn toml_key_used_when_env_unset() {
        std::env::remove_var("GEMINI_API_KEY");
        let key = resolve_gemini_api_key(&toml_with_key("from-toml")).unwrap();
        assert_eq!(key, "from-toml");
    }

    #[test]
    #[serial]
    fn missing_key_is_a_config_error() {
        std::env::remove_var("GEMINI_API_KEY");
        assert!(resolve_gemini_api_key(&TomlConfig::default()).is_err());
    }

    #[test]
    #[serial]
    fn whitespace_key_is_rejected() {
        std::env::set_var("GEMINI_API_KEY", "   ");
        let result = resolve_gemini_api_key(&TomlConfig::default());
        std::env::remove_var("GEMINI_API_KEY");

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn defaults_fill_unset_sections() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("REVA_BIND");

        let config = AppConfig::resolve(&cli_empty(), &toml_with_key("k")).unwrap();

        assert_eq!(config.classifier.model, hf_classifier::DEFAULT_MODEL);
        assert_eq!(config.classifier.scheme, LabelScheme::Binary);
        assert_eq!(config.generator.model, gemini_generator::DEFAULT_MODEL);
        assert_eq!(
            config.classifier.timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    #[serial]
    fn star_scheme_selected_from_toml() {
        std::env::remove_var("GEMINI_API_KEY");
        let mut toml = toml_with_key("k");
        toml.classifier.label_scheme = Some("stars".to_string());
        toml.classifier.model =
            Some("nlptown/bert-base-multilingual-uncased-sentiment".to_string());

        let config = AppConfig::resolve(&cli_empty(), &toml).unwrap();
        assert_eq!(config.classifier.scheme, LabelScheme::StarRating);
    }

    #[test]
    #[serial]
    fn unknown_scheme_is_rejected() {
        std::env::remove_var("GEMINI_API_KEY");
        let mut toml = toml_with_key("k");
        toml.classifier.label_scheme = Some("quantum".to_string());

        assert!(AppConfig::resolve(&cli_empty(), &toml).is_err());
    }
}
