use once_cell::sync::Lazy;
use regex::Regex;

// @module: Timestamp extraction from timing lines

// @const: SRT timing regex, start and end captured verbatim (ASCII digits and whitespace only)
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})(?-u:\s)-->(?-u:\s)([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})")
        .expect("timing pattern is valid")
});

/// Start and end timestamps pulled from a timing line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

/// Find the first `HH:MM:SS,mmm --> HH:MM:SS,mmm` in a timing line.
///
/// Returns `None` when the line holds no such range; the caller decides how to
/// report it.
pub fn extract_times(timing_line: &str) -> Option<TimeRange> {
    let caps = TIMING_REGEX.captures(timing_line)?;
    Some(TimeRange {
        start_time: caps.get(1)?.as_str().to_string(),
        end_time: caps.get(2)?.as_str().to_string(),
    })
}
