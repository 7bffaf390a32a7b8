/*!
 * Segmentation of raw SubRip text into caption blocks.
 *
 * A block starts where a standalone sequence-number line is immediately
 * followed by a line opening with an `HH:MM:SS,mmm` timestamp. The sequence
 * number is dropped; the timestamp line becomes the block's timing line and
 * everything up to the next boundary is its text body.
 *
 * The grammar is driven by a small line state machine:
 *
 * ```text
 * ExpectIndex -> ExpectTiming -> ExpectBody <-> ExpectBlankOrEnd
 *      ^                                             |
 *      +------------------ boundary -----------------+
 * ```
 */

use std::borrow::Cow;

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

// @const: Every Unicode "other" (control, format, private use, unassigned) character that is not whitespace
static CONTROL_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\PC\s]").expect("control character pattern is valid")
});

// @const: Line opening with an SRT start timestamp, ASCII digits like the sequence number
static TIMING_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}").expect("timing start pattern is valid")
});

/// One caption block split into its timing line and text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Line expected to hold `start --> end`
    pub timing_line: String,
    /// Remaining lines with their original line endings, trailing separator excluded
    pub text_body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first boundary
    ExpectIndex,
    /// Sequence number consumed, timing line next
    ExpectTiming,
    /// Inside the text body
    ExpectBody,
    /// Saw a blank line; either more body follows or the block ends
    ExpectBlankOrEnd,
}

/// A physical line with control characters removed
struct Line<'a> {
    content: Cow<'a, str>,
    ending: &'a str,
}

impl Line<'_> {
    fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    fn is_index(&self) -> bool {
        let trimmed = self.content.trim();
        !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Block being assembled by the state machine
#[derive(Default)]
struct PendingBlock<'a, 'b> {
    timing_line: String,
    body: Vec<&'b Line<'a>>,
    trailing_blanks: Vec<&'b Line<'a>>,
}

impl PendingBlock<'_, '_> {
    fn into_segment(self) -> Segment {
        let mut text_body = String::new();
        let last = self.body.len().saturating_sub(1);
        for (i, line) in self.body.iter().enumerate() {
            text_body.push_str(&line.content);
            if i < last {
                text_body.push_str(line.ending);
            }
        }

        Segment {
            timing_line: self.timing_line,
            text_body,
        }
    }
}

/// Remove control characters while keeping printable characters and whitespace
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    CONTROL_CHARS_REGEX.replace_all(text, "")
}

/// Split raw text into lines, accepting `\r\n`, `\r` and `\n` in any mixture
fn split_lines(raw: &str) -> Vec<Line<'_>> {
    let bytes = raw.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let ending_len = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            b'\r' | b'\n' => 1,
            _ => {
                i += 1;
                continue;
            }
        };

        lines.push(Line {
            content: strip_control_chars(&raw[start..i]),
            ending: &raw[i..i + ending_len],
        });
        i += ending_len;
        start = i;
    }

    if start < bytes.len() {
        lines.push(Line {
            content: strip_control_chars(&raw[start..]),
            ending: "",
        });
    }

    lines
}

fn is_boundary(lines: &[Line<'_>], i: usize) -> bool {
    lines[i].is_index()
        && lines
            .get(i + 1)
            .is_some_and(|next| TIMING_START_REGEX.is_match(&next.content))
}

/// Segment raw SubRip text into ordered (timing line, text body) pairs.
///
/// Text preceding the first boundary forms its own block when it is not blank;
/// its first non-blank line stands in as the timing line.
pub fn segment(raw: &str) -> Vec<Segment> {
    let lines = split_lines(raw);
    let mut segments = Vec::new();
    let mut state = State::ExpectIndex;
    let mut current: Option<PendingBlock> = None;

    for (i, line) in lines.iter().enumerate() {
        if state != State::ExpectTiming && is_boundary(&lines, i) {
            if let Some(block) = current.take() {
                segments.push(block.into_segment());
            }
            state = State::ExpectTiming;
            continue;
        }

        match state {
            State::ExpectIndex => {
                if line.is_blank() {
                    continue;
                }
                trace!("Text before first caption boundary: {:?}", line.content);
                current = Some(PendingBlock {
                    timing_line: line.content.to_string(),
                    ..Default::default()
                });
                state = State::ExpectBody;
            }
            State::ExpectTiming => {
                current = Some(PendingBlock {
                    timing_line: line.content.to_string(),
                    ..Default::default()
                });
                state = State::ExpectBody;
            }
            State::ExpectBody => {
                if let Some(block) = current.as_mut() {
                    if line.is_blank() {
                        block.trailing_blanks.push(line);
                        state = State::ExpectBlankOrEnd;
                    } else {
                        block.body.push(line);
                    }
                }
            }
            State::ExpectBlankOrEnd => {
                if let Some(block) = current.as_mut() {
                    if line.is_blank() {
                        block.trailing_blanks.push(line);
                    } else {
                        // Interior blank lines belong to the body after all
                        let blanks = std::mem::take(&mut block.trailing_blanks);
                        block.body.extend(blanks);
                        block.body.push(line);
                        state = State::ExpectBody;
                    }
                }
            }
        }
    }

    if let Some(block) = current.take() {
        segments.push(block.into_segment());
    }

    trace!("Segmented {} caption blocks", segments.len());
    segments
}
