/*!
 * Parse orchestration: load a SubRip blob once, parse it as often as needed.
 *
 * ```text
 * raw text -> segment -> (extract_times + normalize) per block -> CaptionBuilder -> Vec<Caption>
 * ```
 *
 * A parse is a pure function of the loaded text, the optional language pair
 * and the options. Any error ends the parse and nothing is returned.
 */

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::builder::{CaptionBuilder, CaptionDraft};
use crate::caption::Caption;
use crate::errors::ParserError;
use crate::file_utils::FileManager;
use crate::segmenter;
use crate::translation::{LanguagePair, TranslationMode, Translator, translate_in_order};

/// Knobs applied on every parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject captions whose start time does not precede their end time
    pub validate_time_order: bool,
    /// Scheduling of translator calls
    pub translation_mode: TranslationMode,
}

/// SubRip parser holding one loaded text blob
#[derive(Debug, Clone)]
pub struct SrtParser {
    data: String,
    translator: Option<Arc<dyn Translator>>,
    options: ParseOptions,
}

impl SrtParser {
    /// Load the raw text from a file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ParserError> {
        let path = path.as_ref();
        let data = FileManager::read_source(path).map_err(|source| ParserError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded {} bytes from {}", data.len(), path.display());
        Ok(Self::load_string(data))
    }

    /// Use an in-memory string as the raw text
    pub fn load_string(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            translator: None,
            options: ParseOptions::default(),
        }
    }

    /// Inject the translator used when a language pair is requested
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// The loaded raw text
    pub fn raw(&self) -> &str {
        &self.data
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    fn builder(&self) -> CaptionBuilder {
        CaptionBuilder::new().validate_time_order(self.options.validate_time_order)
    }

    /// Parse without any translation
    pub fn parse_untranslated(&self) -> Result<Vec<Caption>, ParserError> {
        let builder = self.builder();
        let captions = self
            .drafts(&builder)?
            .into_iter()
            .map(|draft| builder.build_untranslated(draft))
            .collect::<Vec<_>>();

        debug!("Parsed {} captions", captions.len());
        Ok(captions)
    }

    /// Parse the loaded text, translating every caption when both languages are given.
    ///
    /// With a single language, or none, no translation happens. Requesting a
    /// translation without an injected translator fails with `MissingTranslator`.
    pub async fn parse(
        &self,
        source_language: Option<&str>,
        target_language: Option<&str>,
    ) -> Result<Vec<Caption>, ParserError> {
        let Some(languages) = LanguagePair::from_options(source_language, target_language) else {
            return self.parse_untranslated();
        };

        let translator = self
            .translator
            .clone()
            .ok_or_else(|| ParserError::MissingTranslator(languages.clone()))?;

        debug!("Parsing with translation {}", languages);
        let builder = self.builder().with_translation(languages, translator);

        let captions = match self.options.translation_mode {
            mode @ TranslationMode::Sequential => {
                // Each block is parsed right before its translation call
                let blocks: Vec<(usize, segmenter::Segment)> =
                    segmenter::segment(&self.data).into_iter().enumerate().collect();
                translate_in_order(blocks, mode, |(i, segment)| {
                    let builder = &builder;
                    async move {
                        let draft = builder.prepare(i + 1, &segment)?;
                        builder.build(draft).await
                    }
                })
                .await?
            }
            mode @ TranslationMode::Concurrent { .. } => {
                let drafts = self.drafts(&builder)?;
                translate_in_order(drafts, mode, |draft| builder.build(draft)).await?
            }
        };

        debug!("Parsed and translated {} captions", captions.len());
        Ok(captions)
    }

    fn drafts(&self, builder: &CaptionBuilder) -> Result<Vec<CaptionDraft>, ParserError> {
        segmenter::segment(&self.data)
            .iter()
            .enumerate()
            .map(|(i, segment)| builder.prepare(i + 1, segment))
            .collect()
    }
}

/// Parse a SubRip string without translation
pub fn parse_str(raw: &str) -> Result<Vec<Caption>, ParserError> {
    SrtParser::load_string(raw).parse_untranslated()
}
