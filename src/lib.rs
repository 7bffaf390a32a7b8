/*!
 * # srtlingo - SubRip parsing with an optional translation pass
 *
 * Turns a SubRip (`.srt`) text blob into an ordered list of captions
 * (start time, end time, text) and, when asked, replaces each caption's text
 * with its translation.
 *
 * ## Example
 *
 * ```
 * let raw = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n";
 * let captions = srtlingo::parse_str(raw).unwrap();
 *
 * assert_eq!(captions.len(), 2);
 * assert_eq!(captions[0].start_time(), "00:00:01,000");
 * assert_eq!(captions[1].text(), "World");
 * ```
 *
 * ## Architecture
 *
 * The pipeline runs leaves first:
 * - `segmenter`: splits raw text into caption blocks (line state machine)
 * - `timing`: pulls start/end timestamps out of a timing line
 * - `text`: trims and normalizes a caption's text body
 * - `builder`: assembles captions, calling the translator when configured
 * - `parser`: loads the raw text and drives the pipeline
 *
 * Around it:
 * - `translation`: the `Translator` seam and ordered scheduling of calls
 * - `providers`: translator implementations (Ollama, mock)
 * - `app_config`: JSON configuration
 * - `language_utils`: ISO language code utilities
 * - `file_utils`: file system operations
 * - `errors`: error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod builder;
pub mod caption;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod parser;
pub mod providers;
pub mod segmenter;
pub mod text;
pub mod timing;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption::Caption;
pub use errors::{AppError, ParserError, ProviderError, TranslationError};
pub use parser::{ParseOptions, SrtParser, parse_str};
pub use translation::{LanguagePair, TranslationMode, Translator};
