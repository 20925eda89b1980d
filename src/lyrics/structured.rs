//! JSON lyrics: `{ "title", "artist", "duration", "lines": [{ "text", "startTime", "endTime" }] }`.

use serde::Deserialize;
use serde_json::Value;

use super::{LyricsFormat, LyricsParser};
use crate::types::{LyricsDocument, LyricsLine};

/// Loose top-level shape; every field is optional and mistyped fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    title: Value,
    #[serde(default)]
    artist: Value,
    #[serde(default)]
    duration: Value,
    #[serde(default)]
    lines: Value,
}

/// Parser for structured (JSON) lyrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredParser;

impl LyricsParser for StructuredParser {
    fn validate(&self, content: &str) -> bool {
        serde_json::from_str::<Value>(content).is_ok()
    }

    fn parse(&self, content: &str) -> LyricsDocument {
        // Valid JSON that is not an object (a bare number, an array) yields
        // an empty document rather than an error.
        let raw: RawDocument = match serde_json::from_str(content) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Structured lyrics did not match the expected shape: {e}");
                RawDocument::default()
            }
        };

        let mut lines: Vec<LyricsLine> = raw
            .lines
            .as_array()
            .map(|items| items.iter().filter_map(parse_line).collect())
            .unwrap_or_default();
        lines.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        LyricsDocument::new(lines)
            .with_title(raw.title.as_str().map(str::to_string))
            .with_artist(raw.artist.as_str().map(str::to_string))
            .with_duration(raw.duration.as_f64().filter(|d| d.is_finite() && *d > 0.0))
    }

    fn format(&self) -> LyricsFormat {
        LyricsFormat::Structured
    }
}

/// Accept a line only if it has non-empty text and a valid time window.
fn parse_line(item: &Value) -> Option<LyricsLine> {
    let text = item.get("text")?.as_str()?.trim();
    let start = item.get("startTime")?.as_f64()?;
    let end = item.get("endTime")?.as_f64()?;

    if text.is_empty() || !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
        tracing::debug!("Dropping malformed structured line: {item}");
        return None;
    }

    Some(LyricsLine::new(text, start, end))
}
