/*!
 * Tests for the SubRip parsing pipeline
 */

use regex::Regex;

use srtlingo::errors::ParserError;
use srtlingo::parser::{ParseOptions, SrtParser, parse_str};
use srtlingo::text;
use srtlingo::Caption;
use crate::common;

/// Test the canonical two block example
#[test]
fn test_parse_withTwoBlocks_shouldReturnCaptionsInOrder() {
    let captions = parse_str(common::TWO_BLOCKS).unwrap();

    assert_eq!(
        captions,
        vec![
            Caption::new("00:00:01,000", "00:00:02,000", "Hello"),
            Caption::new("00:00:03,000", "00:00:04,000", "World"),
        ]
    );
}

/// Test caption count and multi-line text
#[test]
fn test_parse_withThreeBlocks_shouldReturnOneCaptionPerBlock() {
    let captions = parse_str(common::THREE_BLOCKS).unwrap();

    assert_eq!(captions.len(), 3);
    assert_eq!(captions[0].text(), "This is a test subtitle.");
    assert_eq!(captions[1].text(), "It contains\nmultiple lines.");
    assert_eq!(captions[2].start_time(), "00:00:10,000");
    assert_eq!(captions[2].end_time(), "00:00:14,000");
}

/// Test that every timestamp keeps the HH:MM:SS,mmm shape
#[test]
fn test_parse_withValidInput_shouldProduceWellFormedTimestamps() {
    let pattern = Regex::new(r"^\d\d:\d\d:\d\d,\d\d\d$").unwrap();
    let captions = parse_str(common::THREE_BLOCKS).unwrap();

    for caption in &captions {
        assert!(pattern.is_match(caption.start_time()), "{}", caption.start_time());
        assert!(pattern.is_match(caption.end_time()), "{}", caption.end_time());
    }
}

/// Test that line ending conventions do not change the result
#[test]
fn test_parse_withEachLineEndingConvention_shouldProduceIdenticalCaptions() {
    let expected = parse_str(common::THREE_BLOCKS).unwrap();

    let crlf = common::with_line_endings(common::THREE_BLOCKS, "\r\n");
    let cr = common::with_line_endings(common::THREE_BLOCKS, "\r");
    let mixed = "1\r\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\r\r\n\
                 2\n00:00:05,000 --> 00:00:09,000\rIt contains\r\nmultiple lines.\n\r\
                 3\r\n00:00:10,000 --> 00:00:14,000\nFor testing purposes.\r";

    assert_eq!(parse_str(&crlf).unwrap(), expected);
    assert_eq!(parse_str(&cr).unwrap(), expected);
    assert_eq!(parse_str(mixed).unwrap(), expected);
}

/// Test that control-character-only content is dropped
#[test]
fn test_parse_withControlOnlyPreamble_shouldExcludeIt() {
    let raw = format!("\u{0001}\u{0002}\u{feff}\n\n{}", common::TWO_BLOCKS);
    let captions = parse_str(&raw).unwrap();

    assert_eq!(captions.len(), 2);
}

/// Test that control characters inside text are stripped
#[test]
fn test_parse_withControlCharactersInText_shouldStripThem() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nHel\u{200b}lo\u{0007}\tthere\n";
    let captions = parse_str(raw).unwrap();

    assert_eq!(captions[0].text(), "Hello\tthere");
}

/// Test the malformed arrow example
#[test]
fn test_parse_withMissingDashInFirstBlock_shouldReturnParseError() {
    let raw = "1\n00:00:01,000 -> 00:00:02,000\nHello\n\n";

    match parse_str(raw) {
        Err(ParserError::Parse { block, line }) => {
            assert_eq!(block, 1);
            assert_eq!(line, "00:00:01,000 -> 00:00:02,000");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

/// Test that timestamps written with non-ASCII digits are rejected
#[test]
fn test_parse_withUnicodeDigitTimestamps_shouldReturnParseError() {
    let arabic_indic = "1\n٠٠:٠٠:٠١,٠٠٠ --> ٠٠:٠٠:٠٢,٠٠٠\nHi\n";
    let fullwidth = "1\n００:00:01,000 --> 00:00:02,000\nHi\n";

    assert!(matches!(parse_str(arabic_indic), Err(ParserError::Parse { block: 1, .. })));
    assert!(matches!(parse_str(fullwidth), Err(ParserError::Parse { block: 1, .. })));

    let strict = SrtParser::load_string(arabic_indic).with_options(ParseOptions {
        validate_time_order: true,
        ..Default::default()
    });
    assert!(matches!(strict.parse_untranslated(), Err(ParserError::Parse { block: 1, .. })));
}

/// Test that a malformed timing line later in the file is reported with its block
#[test]
fn test_parse_withMissingDashInSecondBlock_shouldReportSecondBlock() {
    let raw = common::TWO_BLOCKS.replace("00:00:03,000 -->", "00:00:03,000 ->");

    assert!(matches!(parse_str(&raw), Err(ParserError::Parse { block: 2, .. })));
}

/// Test that stray text before the first block is not silently accepted
#[test]
fn test_parse_withTextBeforeFirstBlock_shouldReturnParseError() {
    let raw = format!("WEBVTT\n\n{}", common::TWO_BLOCKS);

    assert!(matches!(parse_str(&raw), Err(ParserError::Parse { block: 1, .. })));
}

/// Test blocks that carry no text
#[test]
fn test_parse_withEmptyBody_shouldYieldEmptyText() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let captions = parse_str(raw).unwrap();

    assert_eq!(captions.len(), 2);
    assert_eq!(captions[0].text(), "");
    assert_eq!(captions[1].text(), "World");

    let captions = parse_str("1\n00:00:01,000 --> 00:00:02,000").unwrap();
    assert_eq!(captions, vec![Caption::new("00:00:01,000", "00:00:02,000", "")]);
}

/// Test trimming of trailing whitespace and preservation of interior blank lines
#[test]
fn test_parse_withInteriorBlankLine_shouldKeepItAndTrimEnd() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nA  \n\nB\t\n\n\n";
    let captions = parse_str(raw).unwrap();

    assert_eq!(captions.len(), 1);
    assert_eq!(captions[0].text(), "A  \n\nB");
}

/// Test that captions come out already normalized
#[test]
fn test_parse_outputText_shouldBeStableUnderNormalization() {
    let crlf = common::with_line_endings(common::THREE_BLOCKS, "\r\n");
    for caption in parse_str(&crlf).unwrap() {
        assert_eq!(text::normalize(caption.text()), caption.text());
    }
}

/// Test empty input
#[test]
fn test_parse_withEmptyInput_shouldReturnNoCaptions() {
    assert!(parse_str("").unwrap().is_empty());
    assert!(parse_str("\r\n\n  \n").unwrap().is_empty());
}

/// Test that parsing the same blob twice gives the same result
#[test]
fn test_parse_calledTwice_shouldBeRepeatable() {
    let parser = SrtParser::load_string(common::THREE_BLOCKS);

    let first = parser.parse_untranslated().unwrap();
    let second = parser.parse_untranslated().unwrap();
    assert_eq!(first, second);
    assert_eq!(parser.raw(), common::THREE_BLOCKS);
}

/// Test that the async entry point without languages is the plain parse
#[test]
fn test_parse_withoutLanguages_shouldMatchUntranslatedParse() {
    let parser = SrtParser::load_string(common::THREE_BLOCKS);

    let captions = tokio_test::block_on(parser.parse(None, None)).unwrap();

    assert_eq!(captions, parser.parse_untranslated().unwrap());
}

/// Test the optional time order validation
#[test]
fn test_parse_withReversedTimes_shouldOnlyFailWhenValidationEnabled() {
    let raw = "1\n00:00:05,000 --> 00:00:01,000\nBackwards\n";

    assert_eq!(parse_str(raw).unwrap().len(), 1);

    let strict = SrtParser::load_string(raw).with_options(ParseOptions {
        validate_time_order: true,
        ..Default::default()
    });
    match strict.parse_untranslated() {
        Err(ParserError::InvalidTimeRange { block, start, end }) => {
            assert_eq!(block, 1);
            assert_eq!(start, "00:00:05,000");
            assert_eq!(end, "00:00:01,000");
        }
        other => panic!("expected invalid time range, got {:?}", other),
    }
}

/// Test trailing settings after the end timestamp
#[test]
fn test_parse_withCoordinatesAfterTiming_shouldKeepTimestampsOnly() {
    let raw = "7\n00:01:00,250 --> 00:01:02,750  X1:40 X2:600 Y1:20 Y2:50\n<i>Styled</i>\n";
    let captions = parse_str(raw).unwrap();

    assert_eq!(captions[0].start_time(), "00:01:00,250");
    assert_eq!(captions[0].end_time(), "00:01:02,750");
    assert_eq!(captions[0].text(), "<i>Styled</i>");
}
