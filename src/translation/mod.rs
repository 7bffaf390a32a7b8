/*!
 * Translation hook for parsed captions.
 *
 * The parser does not know how text gets translated; it is handed a
 * `Translator` and calls it once per caption. This module defines that seam
 * and the two ways of driving it:
 *
 * - `TranslationMode::Sequential`: one call at a time, in source order (default)
 * - `TranslationMode::Concurrent`: up to N calls in flight, results still
 *   delivered in source order
 *
 * In both modes the first failure aborts the whole parse.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::errors::TranslationError;

pub mod batch;

pub use self::batch::translate_in_order;

/// A capability that converts text from one language to another
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `text` - Normalized caption text, possibly multi-line
    /// * `source_language` - Short language code of the text
    /// * `target_language` - Short language code to translate into
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;

    /// Check that the backend can serve requests; in-process translators always can
    async fn check_availability(&self) -> Result<(), TranslationError> {
        Ok(())
    }
}

/// Source and target language codes of a translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Build a pair only when both languages are given.
    ///
    /// A single language means "no translation".
    pub fn from_options(source: Option<&str>, target: Option<&str>) -> Option<Self> {
        match (source, target) {
            (Some(source), Some(target)) => Some(Self::new(source, target)),
            _ => None,
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// How translator calls are scheduled across captions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum TranslationMode {
    /// One blocking call per caption, strictly in order
    #[default]
    Sequential,
    /// Up to `max_in_flight` calls at once, results kept in source order
    Concurrent { max_in_flight: usize },
}

impl TranslationMode {
    /// Mode for a configured number of concurrent requests; 1 or less is sequential
    pub fn from_concurrency(concurrent_requests: usize) -> Self {
        if concurrent_requests <= 1 {
            Self::Sequential
        } else {
            Self::Concurrent {
                max_in_flight: concurrent_requests,
            }
        }
    }
}
