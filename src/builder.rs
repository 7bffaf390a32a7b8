use std::sync::Arc;

use log::warn;

use crate::caption::{Caption, parse_timestamp};
use crate::errors::ParserError;
use crate::segmenter::Segment;
use crate::text;
use crate::timing::{self, TimeRange};
use crate::translation::{LanguagePair, Translator};

// @module: Assembly of captions from segmented blocks

/// Timing and normalized text of one block, ready to become a caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionDraft {
    /// 1-based position of the block in the source
    pub block: usize,
    pub times: TimeRange,
    pub text: String,
}

/// Builds captions, optionally replacing their text through a translator
#[derive(Debug, Clone, Default)]
pub struct CaptionBuilder {
    translation: Option<(LanguagePair, Arc<dyn Translator>)>,
    validate_time_order: bool,
}

impl CaptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate every caption's text with `translator` for `languages`
    pub fn with_translation(mut self, languages: LanguagePair, translator: Arc<dyn Translator>) -> Self {
        self.translation = Some((languages, translator));
        self
    }

    /// Reject captions whose start time does not precede their end time
    pub fn validate_time_order(mut self, enabled: bool) -> Self {
        self.validate_time_order = enabled;
        self
    }

    /// Extract times and normalize text for one segmented block
    pub fn prepare(&self, block: usize, segment: &Segment) -> Result<CaptionDraft, ParserError> {
        let times = timing::extract_times(&segment.timing_line).ok_or_else(|| ParserError::Parse {
            block,
            line: segment.timing_line.clone(),
        })?;

        if self.validate_time_order {
            check_time_order(block, &times)?;
        }

        Ok(CaptionDraft {
            block,
            times,
            text: text::normalize(&segment.text_body),
        })
    }

    /// Build a caption without translation, whatever the builder is configured with
    pub fn build_untranslated(&self, draft: CaptionDraft) -> Caption {
        Caption::new(draft.times.start_time, draft.times.end_time, draft.text)
    }

    /// Build a caption, calling the translator once when one is configured
    pub async fn build(&self, draft: CaptionDraft) -> Result<Caption, ParserError> {
        let Some((languages, translator)) = &self.translation else {
            return Ok(self.build_untranslated(draft));
        };

        let translated = translator
            .translate(&draft.text, &languages.source, &languages.target)
            .await
            .map_err(|source| ParserError::Translation {
                block: draft.block,
                source,
            })?;

        if translated.trim().is_empty() && !draft.text.trim().is_empty() {
            warn!("Translator returned empty text for block {} ({})", draft.block, languages);
        }

        Ok(Caption::new(draft.times.start_time, draft.times.end_time, translated))
    }
}

fn check_time_order(block: usize, times: &TimeRange) -> Result<(), ParserError> {
    let invalid = || ParserError::InvalidTimeRange {
        block,
        start: times.start_time.clone(),
        end: times.end_time.clone(),
    };

    let start = parse_timestamp(&times.start_time).map_err(|_| invalid())?;
    let end = parse_timestamp(&times.end_time).map_err(|_| invalid())?;

    if start >= end {
        return Err(invalid());
    }
    Ok(())
}
