/*!
 * Mock translator for testing and dry runs.
 *
 * Behaviors:
 * - `MockTranslator::working()` - Always succeeds with `[src->tgt] text`
 * - `MockTranslator::failing()` - Always fails with a provider error
 * - `MockTranslator::fail_at(n)` - Fails on the n-th call (1-based), succeeds otherwise
 * - `MockTranslator::empty()` - Succeeds with an empty string
 *
 * Every call is recorded so tests can assert call count and order.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{ProviderError, TranslationError};
use crate::translation::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Fails on the given call number (1-based)
    FailAt { call: usize },
    /// Returns an empty translation
    Empty,
    /// Succeeds after sleeping, for concurrency tests
    Slow { delay_ms: u64 },
}

/// Deterministic translator that never leaves the process
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_at(call: usize) -> Self {
        Self::new(MockBehavior::FailAt { call })
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// The text produced by a working mock
    pub fn expected(text: &str, source_language: &str, target_language: &str) -> String {
        format!("[{}->{}] {}", source_language, target_language, text)
    }

    /// Number of translate calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Texts received, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }

        match self.behavior {
            MockBehavior::Working => Ok(Self::expected(text, source_language, target_language)),
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string()).into()),
            MockBehavior::FailAt { call: fail_call } if call == fail_call => {
                Err(ProviderError::ApiError {
                    status_code: 503,
                    message: format!("Simulated failure on call {}", call),
                }
                .into())
            }
            MockBehavior::FailAt { .. } => Ok(Self::expected(text, source_language, target_language)),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(Self::expected(text, source_language, target_language))
            }
        }
    }
}
