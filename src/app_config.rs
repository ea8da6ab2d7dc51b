/*!
 * Application configuration module.
 *
 * Handles loading, validating and saving configuration settings.
 */

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::language_utils;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1, must be in the supported set)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1, must be in the supported set)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Quality scoring config
    #[serde(default)]
    pub quality: QualityConfig,

    /// Dataset store config
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProviderKind {
    // @provider: Deterministic local mock (no network)
    #[default]
    Mock,
    // @provider: Google Cloud Translation v2
    Google,
}

impl TranslationProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Mock => "Mock",
            Self::Google => "Google",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Mock => "mock".to_string(),
            Self::Google => "google".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "google" => Ok(Self::Google),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProviderKind,

    /// API key (required for the Google provider)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (empty uses the provider default)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Maximum texts per request and per concurrent chunk
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Per-call request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProviderKind::default(),
            api_key: String::new(),
            endpoint: String::new(),
            max_batch_size: default_max_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Embedding backend type for semantic scoring
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackendKind {
    // @backend: Deterministic character-trigram feature hashing (no model file)
    #[default]
    Hash,
    // @backend: Remote sentence-embedding server over HTTP
    Remote,
}

impl std::fmt::Display for EmbeddingBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash => write!(f, "hash"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

impl std::str::FromStr for EmbeddingBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "remote" => Ok(Self::Remote),
            _ => Err(anyhow!("Invalid embedding backend: {}", s)),
        }
    }
}

/// Quality scoring configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QualityConfig {
    /// Embedding backend for the semantic score
    #[serde(default)]
    pub embedding: EmbeddingBackendKind,

    /// Embedding server endpoint (remote backend only)
    #[serde(default = "default_embedding_endpoint")]
    pub embedding_endpoint: String,

    /// Embedding vector dimension
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            embedding: EmbeddingBackendKind::default(),
            embedding_endpoint: default_embedding_endpoint(),
            embedding_dimension: default_embedding_dimension(),
        }
    }
}

/// Dataset store configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Database file path (None uses the default data directory)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    language_utils::DEFAULT_SOURCE_LANG.to_string()
}

fn default_target_language() -> String {
    language_utils::DEFAULT_TARGET_LANG.to_string()
}

fn default_max_batch_size() -> usize {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_embedding_endpoint() -> String {
    "http://localhost:8080/embed".to_string()
}

fn default_embedding_dimension() -> usize {
    384
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults if
    /// the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Languages must come from the closed supported set
        language_utils::validate_language(&self.source_language)
            .map_err(|e| anyhow!(e.to_string()))?;
        language_utils::validate_language(&self.target_language)
            .map_err(|e| anyhow!(e.to_string()))?;

        if self.source_language == self.target_language {
            return Err(anyhow!("Source and target language must differ"));
        }

        if self.translation.max_batch_size == 0 {
            return Err(anyhow!("max_batch_size must be greater than zero"));
        }

        // Google requires an API key; the mock provider does not
        if self.translation.provider == TranslationProviderKind::Google
            && self.translation.api_key.is_empty()
        {
            return Err(anyhow!("Translation API key is required for the Google provider"));
        }

        if self.quality.embedding_dimension == 0 {
            return Err(anyhow!("embedding_dimension must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            quality: QualityConfig::default(),
            database: DatabaseConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaultConfig_shouldValidate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_language, "ko");
        assert_eq!(config.target_language, "en");
        assert_eq!(config.translation.max_batch_size, 100);
    }

    #[test]
    fn test_validate_sameLanguagePair_shouldFail() {
        let mut config = Config::default();
        config.target_language = config.source_language.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unsupportedLanguage_shouldFail() {
        let mut config = Config::default();
        config.source_language = "ru".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_googleWithoutApiKey_shouldFail() {
        let mut config = Config::default();
        config.translation.provider = TranslationProviderKind::Google;
        assert!(config.validate().is_err());

        config.translation.api_key = "key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_providerKind_roundTrip_shouldParse() {
        let parsed: TranslationProviderKind = "google".parse().unwrap();
        assert_eq!(parsed, TranslationProviderKind::Google);
        assert_eq!(parsed.to_string(), "google");
        assert!("nonsense".parse::<TranslationProviderKind>().is_err());
    }

    #[test]
    fn test_config_serdeRoundTrip_shouldPreserveFields() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.source_language, config.source_language);
        assert_eq!(restored.translation.max_batch_size, config.translation.max_batch_size);
        assert_eq!(restored.quality.embedding_dimension, config.quality.embedding_dimension);
    }

    #[test]
    fn test_loadOrDefault_missingFile_shouldReturnDefaults() {
        let config = Config::load_or_default("/nonexistent/backtrans-conf.json").unwrap();
        assert_eq!(config.translation.provider, TranslationProviderKind::Mock);
    }
}
