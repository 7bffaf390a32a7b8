use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::{ProviderError, TranslationError};
use crate::language_utils;
use crate::providers::Provider;
use crate::translation::Translator;

/// Ollama client for interacting with the Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API, without trailing slash
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Generate request for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
        });
        self
    }
}

impl Ollama {
    /// Create a client for `endpoint` (e.g. `http://localhost:11434` or `localhost:11434`)
    pub fn new(
        endpoint: &str,
        timeout: Duration,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        let base_url = normalize_endpoint(endpoint)?;
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(e: reqwest::Error) -> ProviderError {
        if e.is_connect() || e.is_timeout() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

/// Parse an endpoint into a base URL, adding `http://` when no scheme is given
fn normalize_endpoint(endpoint: &str) -> Result<String, ProviderError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(ProviderError::ConnectionError("Endpoint cannot be empty".to_string()));
    }

    let with_scheme = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| ProviderError::ConnectionError(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
    if url.host_str().is_none() {
        return Err(ProviderError::ConnectionError(format!("Invalid host in endpoint: {}", endpoint)));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    /// Generate text with retry on network and server errors
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let mut attempt = 0;

        loop {
            let error = match self.client.post(&url).json(&request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await.map_err(Self::map_send_error)?;
                        return serde_json::from_str::<GenerationResponse>(&body)
                            .map_err(|e| ProviderError::ParseError(e.to_string()));
                    }

                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());

                    match status {
                        s if s == StatusCode::UNAUTHORIZED || s == StatusCode::FORBIDDEN => {
                            return Err(ProviderError::AuthenticationError(message));
                        }
                        s if s.is_server_error() => ProviderError::ApiError {
                            status_code: s.as_u16(),
                            message,
                        },
                        s => {
                            // Client error - don't retry
                            return Err(ProviderError::ApiError {
                                status_code: s.as_u16(),
                                message,
                            });
                        }
                    }
                }
                Err(e) => Self::map_send_error(e),
            };

            attempt += 1;
            error!("Ollama request failed: {} - attempt {}/{}", error, attempt, self.max_retries + 1);
            if attempt > self.max_retries {
                return Err(error);
            }

            let backoff_ms = self.backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(16));
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(Self::map_send_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.trim().to_string()
    }
}

/// Translator backed by an Ollama model
#[derive(Debug, Clone)]
pub struct OllamaTranslator {
    client: Ollama,
    model: String,
    system_prompt: String,
    temperature: f32,
}

impl OllamaTranslator {
    /// `system_prompt` may contain `{source_language}` and `{target_language}` placeholders
    pub fn new(client: Ollama, model: impl Into<String>, system_prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: system_prompt.into(),
            temperature,
        }
    }

    fn build_request(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<GenerationRequest, TranslationError> {
        let name = |code: &str| {
            language_utils::get_language_name(code)
                .map_err(|_| TranslationError::Unsupported(format!("unknown language code '{}'", code)))
        };
        let system = self
            .system_prompt
            .replace("{source_language}", &name(source_language)?)
            .replace("{target_language}", &name(target_language)?);

        Ok(GenerationRequest::new(&self.model, text)
            .system(system)
            .temperature(self.temperature))
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = self.build_request(text, source_language, target_language)?;
        let response = self.client.complete(request).await?;
        let translated = Ollama::extract_text(&response);
        debug!("Ollama {} translated {} chars", response.model, text.len());

        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }
        Ok(translated)
    }

    async fn check_availability(&self) -> Result<(), TranslationError> {
        self.client.test_connection().await?;
        debug!("Ollama reachable at {}", self.client.base_url());
        Ok(())
    }
}
