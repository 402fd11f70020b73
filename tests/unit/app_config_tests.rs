/*!
 * Tests for application configuration functionality
 */

use lexiread::app_config::{AnalysisProviderKind, Config, LogLevel, ProviderConfig};
use tempfile::TempDir;

#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(
        config.quick_provider.provider_type,
        AnalysisProviderKind::Dictionary
    );
    assert!(config
        .quick_provider
        .endpoint
        .contains("dictionaryapi.dev"));

    assert_eq!(
        config.deep_provider.provider_type,
        AnalysisProviderKind::Ollama
    );
    assert_eq!(config.deep_provider.endpoint, "http://localhost:11434");
    assert_eq!(config.deep_provider.model, "llama3.2");

    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.vocabulary_file.is_none());
}

#[test]
fn test_config_saveAndReload_shouldRoundTrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.log_level = LogLevel::Debug;
    config.deep_provider.model = "mistral".to_string();
    config.save(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.log_level, LogLevel::Debug);
    assert_eq!(reloaded.deep_provider.model, "mistral");
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldCreateDefaultConfig() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    assert!(!path.exists());

    let config = Config::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(
        config.quick_provider.provider_type,
        AnalysisProviderKind::Dictionary
    );
}

#[test]
fn test_validate_shouldRequireKeysAndEndpointsPerProvider() {
    // Anthropic without a key is rejected
    let mut config = Config::default();
    config.quick_provider = ProviderConfig::new(AnalysisProviderKind::Anthropic);
    assert!(config.validate().is_err());

    config.quick_provider.api_key = "sk-test".to_string();
    assert!(config.validate().is_ok());

    // Ollama without an endpoint is rejected
    let mut config = Config::default();
    config.deep_provider.endpoint = String::new();
    assert!(config.validate().is_err());

    // A malformed endpoint URL is rejected
    let mut config = Config::default();
    config.deep_provider.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_fromFile_withUnparseableJson_shouldError() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}
