//! Untimed plain-text lyrics.

use super::{LyricsFormat, LyricsParser};
use crate::constants::parsing::PLAIN_LINE_SECS;
use crate::types::{LyricsDocument, LyricsLine};

/// Universal fallback: one fixed slot per non-blank line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextParser;

impl LyricsParser for PlainTextParser {
    fn validate(&self, content: &str) -> bool {
        !content.trim().is_empty()
    }

    #[allow(clippy::cast_precision_loss)]
    fn parse(&self, content: &str) -> LyricsDocument {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, text)| {
                let slot = i as f64;
                LyricsLine::new(text, slot * PLAIN_LINE_SECS, (slot + 1.0) * PLAIN_LINE_SECS)
            })
            .collect();

        LyricsDocument::new(lines)
    }

    fn format(&self) -> LyricsFormat {
        LyricsFormat::Plain
    }
}
