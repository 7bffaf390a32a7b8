/*!
 * Translator implementations.
 *
 * - Ollama: local LLM server driven over its HTTP API
 * - Mock: deterministic in-process translator for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for HTTP backends
///
/// A backend speaks its own request/response types; a `Translator` adapter
/// turns caption text into a request and the response back into text.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod mock;
pub mod ollama;

pub use self::mock::{MockBehavior, MockTranslator};
pub use self::ollama::{Ollama, OllamaTranslator};
