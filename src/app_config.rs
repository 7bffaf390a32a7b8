use anyhow::{Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppError;
use crate::language_utils;
use crate::parser::ParseOptions;
use crate::providers::{MockTranslator, Ollama, OllamaTranslator};
use crate::translation::{TranslationMode, Translator};

/// Application configuration module
/// This module handles loading, validating and saving the JSON configuration.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code (ISO); translation needs both languages
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language code (ISO)
    #[serde(default)]
    pub target_language: Option<String>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Parsing config
    #[serde(default)]
    pub parsing: ParsingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: In-process mock, output is tagged input
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::Mock => "Mock",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    // @field: Backend type
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: Service URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_ollama_model")]
    pub model: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retries per request inside the backend
    #[serde(default = "default_retry_count")]
    pub max_retries: u32,

    // @field: Base backoff, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Requests in flight; 1 keeps strict one-at-a-time order
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Model temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: System prompt with {source_language}/{target_language} placeholders
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: default_ollama_endpoint(),
            model: default_ollama_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            concurrent_requests: default_concurrent_requests(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl TranslationConfig {
    /// Scheduling mode derived from `concurrent_requests`
    pub fn translation_mode(&self) -> TranslationMode {
        TranslationMode::from_concurrency(self.concurrent_requests)
    }

    /// Build the configured translator
    pub fn build_translator(&self) -> Result<Arc<dyn Translator>> {
        match self.provider {
            TranslationProvider::Ollama => {
                let client = Ollama::new(
                    &self.endpoint,
                    Duration::from_secs(self.timeout_secs),
                    self.max_retries,
                    self.retry_backoff_ms,
                )?;
                Ok(Arc::new(OllamaTranslator::new(
                    client,
                    self.model.clone(),
                    self.system_prompt.clone(),
                    self.temperature,
                )))
            }
            TranslationProvider::Mock => Ok(Arc::new(MockTranslator::working())),
        }
    }
}

/// Parsing behavior
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ParsingConfig {
    /// Reject captions whose start time is not before their end time
    #[serde(default)]
    pub validate_time_order: bool,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional subtitle translator. Translate the user's text from {source_language} to {target_language}. Keep the line breaks. Reply with the translation only.".to_string()
}

impl Config {
    /// Load a config file, or write and return the defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .map_err(|e| AppError::Config(format!("Failed to open config file {}: {}", path.display(), e)))?;
            return serde_json::from_reader(BufReader::new(file))
                .map_err(|e| AppError::Config(format!("Failed to parse config file {}: {}", path.display(), e)));
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| AppError::Config(format!("Failed to serialize default config: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(config)
    }

    /// Options handed to the parser
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            validate_time_order: self.parsing.validate_time_order,
            translation_mode: self.translation.translation_mode(),
        }
    }

    /// Rewrite configured language codes to their shortest ISO form ("fre" -> "fr")
    pub fn normalize_language_codes(&mut self) -> Result<()> {
        for code in [&mut self.source_language, &mut self.target_language].into_iter().flatten() {
            *code = language_utils::normalize_to_part1_or_part2t(code)?;
        }
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for code in [&self.source_language, &self.target_language].into_iter().flatten() {
            language_utils::validate_language_code(code)?;
        }

        match (&self.source_language, &self.target_language) {
            (Some(source), Some(target)) if language_utils::language_codes_match(source, target) => {
                warn!("Source and target language are both '{}'", source);
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("Only one language configured; captions will not be translated");
            }
            _ => {}
        }

        if self.translation.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        if self.translation.provider == TranslationProvider::Ollama {
            let endpoint = self.translation.endpoint.trim();
            let with_scheme = if endpoint.contains("://") {
                endpoint.to_string()
            } else {
                format!("http://{}", endpoint)
            };
            url::Url::parse(&with_scheme)
                .map_err(|e| anyhow!("Invalid translation endpoint '{}': {}", endpoint, e))?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: None,
            target_language: None,
            translation: TranslationConfig::default(),
            parsing: ParsingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
