use std::fmt;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

// @module: Caption records produced by the parser

// @struct: Single parsed caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    // @field: Start timestamp, HH:MM:SS,mmm
    start_time: String,

    // @field: End timestamp, HH:MM:SS,mmm
    end_time: String,

    // @field: Caption text, lines separated by '\n'
    text: String,
}

impl Caption {
    /// Creates a caption from already extracted fields
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>, text: impl Into<String>) -> Self {
        Caption {
            start_time: start_time.into(),
            end_time: end_time.into(),
            text: text.into(),
        }
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start time in milliseconds
    pub fn start_ms(&self) -> Result<u64> {
        parse_timestamp(&self.start_time)
    }

    /// End time in milliseconds
    pub fn end_ms(&self) -> Result<u64> {
        parse_timestamp(&self.end_time)
    }

    /// Display duration in milliseconds, zero when end does not follow start
    pub fn duration_ms(&self) -> Result<u64> {
        Ok(self.end_ms()?.saturating_sub(self.start_ms()?))
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.start_time, self.end_time)?;
        writeln!(f, "{}", self.text)
    }
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
        .ok_or_else(|| anyhow!("Timestamp out of range: {}", timestamp))
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Render captions as an SRT document, numbering them from 1 in order
pub fn to_srt(captions: &[Caption]) -> String {
    let mut out = String::new();
    for (i, caption) in captions.iter().enumerate() {
        out.push_str(&format!("{}\n{}\n", i + 1, caption));
    }
    out
}
