use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Provider used for quick definition lookups
    #[serde(default = "ProviderConfig::default_quick")]
    pub quick_provider: ProviderConfig,

    /// Provider used for deep context lookups
    #[serde(default = "ProviderConfig::default_deep")]
    pub deep_provider: ProviderConfig,

    /// Where the vocabulary snapshot lives; defaults to the platform data dir
    #[serde(default)]
    pub vocabulary_file: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Analysis provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisProviderKind {
    /// Free dictionary HTTP API
    #[default]
    Dictionary,
    /// Local Ollama server
    Ollama,
    /// Anthropic API
    Anthropic,
}

impl AnalysisProviderKind {
    /// Capitalized provider name for display
    pub fn display_name(&self) -> &str {
        match self {
            Self::Dictionary => "Dictionary",
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }
}

impl std::fmt::Display for AnalysisProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Dictionary => "dictionary",
            Self::Ollama => "ollama",
            Self::Anthropic => "anthropic",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for AnalysisProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dictionary" => Ok(Self::Dictionary),
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Configuration for one analysis provider slot
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: AnalysisProviderKind,

    /// Model name (LLM providers only)
    #[serde(default)]
    pub model: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Service URL
    #[serde(default)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Provider config with per-type defaults
    pub fn new(provider_type: AnalysisProviderKind) -> Self {
        match provider_type {
            AnalysisProviderKind::Dictionary => Self {
                provider_type,
                model: String::new(),
                api_key: String::new(),
                endpoint: default_dictionary_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            AnalysisProviderKind::Ollama => Self {
                provider_type,
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_ollama_timeout_secs(),
            },
            AnalysisProviderKind::Anthropic => Self {
                provider_type,
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }

    fn default_quick() -> Self {
        Self::new(AnalysisProviderKind::Dictionary)
    }

    fn default_deep() -> Self {
        Self::new(AnalysisProviderKind::Ollama)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_dictionary_endpoint() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

impl Config {
    /// Load a configuration file, or create a default one when it is missing
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if FileManager::file_exists(path) {
            Self::from_file(path)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Read and validate a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        FileManager::write_to_file(&path, &content)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for (slot, provider) in [
            ("quick_provider", &self.quick_provider),
            ("deep_provider", &self.deep_provider),
        ] {
            if provider.provider_type == AnalysisProviderKind::Anthropic
                && provider.api_key.is_empty()
            {
                return Err(anyhow!("An API key is required for Anthropic ({})", slot));
            }

            if provider.provider_type != AnalysisProviderKind::Anthropic
                && provider.endpoint.is_empty()
            {
                return Err(anyhow!("An endpoint is required for {}", slot));
            }

            if !provider.endpoint.is_empty() {
                Url::parse(&provider.endpoint).with_context(|| {
                    format!("Invalid endpoint URL for {}: {}", slot, provider.endpoint)
                })?;
            }
        }

        Ok(())
    }

    /// Resolve the vocabulary snapshot path, falling back to the platform
    /// data directory
    pub fn vocabulary_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.vocabulary_file {
            return Ok(path.clone());
        }

        let base = dirs::data_dir().ok_or_else(|| anyhow!("Could not locate a data directory"))?;
        Ok(base.join("lexiread").join("vocabulary.json"))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            quick_provider: ProviderConfig::default_quick(),
            deep_provider: ProviderConfig::default_deep(),
            vocabulary_file: None,
            log_level: LogLevel::default(),
        }
    }
}
