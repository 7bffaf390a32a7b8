/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use srtlingo::app_config::{Config, LogLevel, TranslationProvider};
use srtlingo::translation::TranslationMode;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, None);
    assert_eq!(config.target_language, None);
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.endpoint, "http://localhost:11434");
    assert_eq!(config.translation.concurrent_requests, 1);
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.translation.max_retries, 3);
    assert!(!config.parsing.validate_time_order);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = Some("en".to_string());
    config.target_language = Some("fr".to_string());
    assert!(config.validate().is_ok());

    config.source_language = Some("xx".to_string());
    assert!(config.validate().is_err());
    config.source_language = Some("eng".to_string());
    assert!(config.validate().is_ok());

    config.translation.concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.concurrent_requests = 4;

    config.translation.endpoint = "http://[::1".to_string();
    assert!(config.validate().is_err());

    // The mock backend has no endpoint to check
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());
}

/// Test that language codes are rewritten to their two-letter form when one exists
#[test]
fn test_normalize_language_codes_withThreeLetterCodes_shouldShorten() -> Result<()> {
    let mut config = Config::default();
    config.source_language = Some("ENG".to_string());
    config.target_language = Some("fre".to_string());

    config.normalize_language_codes()?;

    assert_eq!(config.source_language.as_deref(), Some("en"));
    assert_eq!(config.target_language.as_deref(), Some("fr"));

    config.target_language = Some("xx".to_string());
    assert!(config.normalize_language_codes().is_err());
    Ok(())
}

/// Test that the parse options follow the configuration
#[test]
fn test_parse_options_withConcurrency_shouldSelectMode() {
    let mut config = Config::default();
    assert_eq!(config.parse_options().translation_mode, TranslationMode::Sequential);

    config.translation.concurrent_requests = 6;
    config.parsing.validate_time_order = true;
    let options = config.parse_options();

    assert_eq!(options.translation_mode, TranslationMode::Concurrent { max_in_flight: 6 });
    assert!(options.validate_time_order);
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert_eq!(Config::load_or_create(&path)?, config);
    Ok(())
}

/// Test loading a partial config file
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "source_language": "en",
            "target_language": "de",
            "translation": { "provider": "mock", "concurrent_requests": 3 },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.source_language.as_deref(), Some("en"));
    assert_eq!(config.target_language.as_deref(), Some("de"));
    assert_eq!(config.translation.provider, TranslationProvider::Mock);
    assert_eq!(config.translation.concurrent_requests, 3);
    assert_eq!(config.translation.model, Config::default().translation.model);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that malformed JSON is reported as a config error
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let err = Config::load_or_create(&path).unwrap_err();

    assert!(err.to_string().contains("Configuration error"));
    Ok(())
}

/// Test provider name parsing
#[test]
fn test_translation_provider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("Ollama".parse::<TranslationProvider>().unwrap(), TranslationProvider::Ollama);
    assert_eq!("mock".parse::<TranslationProvider>().unwrap(), TranslationProvider::Mock);
    assert!("openai".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Ollama.to_string(), "ollama");
}

/// Test that the mock backend can be built without any network
#[tokio::test]
async fn test_build_translator_withMockProvider_shouldTranslate() -> Result<()> {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;

    let translator = config.translation.build_translator()?;
    translator.check_availability().await?;
    let translated = translator.translate("Hello", "en", "fr").await?;

    assert_eq!(translated, "[en->fr] Hello");
    Ok(())
}
