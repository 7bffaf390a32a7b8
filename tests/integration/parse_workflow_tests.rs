/*!
 * End-to-end tests: file on disk -> captions -> rendered output
 */

use std::sync::Arc;

use anyhow::Result;
use srtlingo::app_config::{Config, TranslationProvider};
use srtlingo::caption::{self, Caption};
use srtlingo::errors::ParserError;
use srtlingo::file_utils::FileManager;
use srtlingo::parser::{SrtParser, parse_str};
use srtlingo::providers::MockTranslator;
use crate::common;

/// Test loading and parsing a file from disk
#[tokio::test]
async fn test_load_file_withValidSrt_shouldParseCaptions() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let crlf = common::with_line_endings(common::THREE_BLOCKS, "\r\n");
    let path = common::create_test_file(temp_dir.path(), "movie.srt", &format!("\u{feff}{}", crlf))?;

    let parser = SrtParser::load_file(&path)?;
    let captions = parser.parse(None, None).await?;

    assert_eq!(captions, parse_str(common::THREE_BLOCKS)?);
    Ok(())
}

/// Test that a missing file is reported before any parsing
#[test]
fn test_load_file_withMissingFile_shouldReturnSourceNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("absent.srt");

    match SrtParser::load_file(&path) {
        Err(ParserError::SourceNotFound { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected source not found, got {:?}", other),
    }
    Ok(())
}

/// Test that rendered SubRip output parses back to the same captions
#[test]
fn test_to_srt_withParsedCaptions_shouldParseBackIdentically() -> Result<()> {
    let source = "5\n00:00:01,000 --> 00:00:02,500\nFirst\nline\n\n9\n00:01:00,000 --> 00:01:01,000\nSecond\n";
    let captions = parse_str(source)?;

    let rendered = caption::to_srt(&captions);

    assert!(rendered.starts_with("1\n00:00:01,000 --> 00:00:02,500\nFirst\nline\n\n2\n"));
    assert_eq!(parse_str(&rendered)?, captions);
    Ok(())
}

/// Test the full translate-and-write flow driven by the configuration
#[tokio::test]
async fn test_translate_workflow_withMockConfig_shouldWriteTranslatedSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "episode.srt", common::TWO_BLOCKS)?;

    let mut config = Config::default();
    config.source_language = Some("en".to_string());
    config.target_language = Some("fr".to_string());
    config.translation.provider = TranslationProvider::Mock;
    config.translation.concurrent_requests = 2;
    config.validate()?;

    let parser = SrtParser::load_file(&input)?
        .with_options(config.parse_options())
        .with_translator(config.translation.build_translator()?);
    let captions = parser
        .parse(config.source_language.as_deref(), config.target_language.as_deref())
        .await?;

    let output = FileManager::generate_output_path(&input, temp_dir.path(), "fr", "srt");
    FileManager::write_to_file(&output, &caption::to_srt(&captions))?;

    let written = parse_str(&FileManager::read_source(&output)?)?;
    assert_eq!(
        written,
        vec![
            Caption::new("00:00:01,000", "00:00:02,000", "[en->fr] Hello"),
            Caption::new("00:00:03,000", "00:00:04,000", "[en->fr] World"),
        ]
    );
    Ok(())
}

/// Test that a single loaded file can be parsed with and without translation
#[tokio::test]
async fn test_parse_sameParser_shouldServeBothModes() -> Result<()> {
    let translator = MockTranslator::working();
    let parser = SrtParser::load_string(common::TWO_BLOCKS).with_translator(Arc::new(translator.clone()));

    let plain = parser.parse(Some("en"), None).await?;
    let translated = parser.parse(Some("en"), Some("it")).await?;

    assert_eq!(plain[0].text(), "Hello");
    assert_eq!(translated[0].text(), "[en->it] Hello");
    assert_eq!(plain[0].start_time(), translated[0].start_time());
    assert_eq!(translator.call_count(), 2);
    Ok(())
}
