//! Core lyric and animation types.
//!
//! A [`LyricsDocument`] is built once per parse and never mutated afterwards;
//! the builder-style `with_*` methods consume the document and return a new one.
//! [`AnimationIntent`] is a plain snapshot with no identity.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{palette, sync};

/// One timed unit of lyric text, active on `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsLine {
    /// Lyric text, trimmed and non-empty.
    pub text: String,
    /// Start of the window in seconds.
    pub start_time: f64,
    /// End of the window in seconds (exclusive).
    pub end_time: f64,
}

impl LyricsLine {
    /// Create a new line.
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self { text: text.into(), start_time, end_time }
    }

    /// Whether `time` falls inside this line's window.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

/// Current line plus a preview of the one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caption<'a> {
    /// Text of the active line.
    pub current: &'a str,
    /// Text of the following line, if any.
    pub next: Option<&'a str>,
}

/// A parsed lyrics document: optional metadata plus time-ordered lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricsDocument {
    /// Song title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Performing artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Total duration in seconds, when the source states it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Lines ordered ascending by start time.
    #[serde(default)]
    pub lines: Vec<LyricsLine>,
}

impl LyricsDocument {
    /// Create a document with no metadata.
    pub const fn new(lines: Vec<LyricsLine>) -> Self {
        Self { title: None, artist: None, duration: None, lines }
    }

    /// Set the title; empty strings count as absent.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    /// Set the artist; empty strings count as absent.
    #[must_use]
    pub fn with_artist(mut self, artist: Option<String>) -> Self {
        self.artist = artist.filter(|a| !a.trim().is_empty());
        self
    }

    /// Set the stated duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Option<f64>) -> Self {
        self.duration = duration;
        self
    }

    /// Use `title` only if the document has none of its own.
    #[must_use]
    pub fn with_title_fallback(self, title: Option<&str>) -> Self {
        if self.title.is_some() {
            return self;
        }
        let title = title.map(str::to_string);
        self.with_title(title)
    }

    /// Number of lyric lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when nothing usable was found.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`.
    pub fn line(&self, index: usize) -> Option<&LyricsLine> {
        self.lines.get(index)
    }

    /// Index of the first line whose window contains `time`.
    ///
    /// First match wins, which defines the result for overlapping lines.
    pub fn active_index(&self, time: f64) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(time))
    }

    /// Index of the first line that has not started yet at `time`.
    pub fn next_index(&self, time: f64) -> Option<usize> {
        self.lines.iter().position(|line| time < line.start_time)
    }

    /// Caption for the line at `index`, with the following line as preview.
    pub fn caption(&self, index: usize) -> Option<Caption<'_>> {
        let current = self.lines.get(index)?;
        Some(Caption {
            current: &current.text,
            next: self.lines.get(index + 1).map(|l| l.text.as_str()),
        })
    }

    /// Fraction of lines reached, `(index + 1) / len`, or 0 with no active line.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, index: Option<usize>) -> f64 {
        match index {
            Some(i) if !self.lines.is_empty() => ((i + 1) as f64 / self.lines.len() as f64).min(1.0),
            _ => 0.0,
        }
    }

    /// Stated duration, or the end of the last line.
    pub fn end_time(&self) -> f64 {
        self.duration
            .or_else(|| self.lines.last().map(|l| l.end_time))
            .unwrap_or(0.0)
    }
}

/// File kinds accepted at the upload boundary.
///
/// The extension is a user-facing filter only; it never picks the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LyricsFileKind {
    /// `.lrc` timestamped lyrics.
    Lrc,
    /// `.txt` plain text.
    Txt,
    /// `.json` structured lyrics.
    Json,
    /// `.srt` subtitles.
    Srt,
}

impl LyricsFileKind {
    /// Recognize a file by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "lrc" => Some(Self::Lrc),
            "txt" => Some(Self::Txt),
            "json" => Some(Self::Json),
            "srt" => Some(Self::Srt),
            _ => None,
        }
    }

    /// The extension without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Lrc => "lrc",
            Self::Txt => "txt",
            Self::Json => "json",
            Self::Srt => "srt",
        }
    }

    /// Whether `path` carries an accepted lyrics extension.
    pub fn is_accepted(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

/// Expressive state requested from the avatar renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Resting; used when paused or between lines.
    #[default]
    Idle,
    /// General dancing, also the default for unclassified lyrics.
    Dancing,
    /// Vocal focus.
    Singing,
    /// Joyful bouncing.
    Excited,
    /// Rock/metal head movement.
    Headbanging,
    /// Rotation.
    Spinning,
}

impl Mood {
    /// All moods in display order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Idle,
            Self::Dancing,
            Self::Singing,
            Self::Excited,
            Self::Headbanging,
            Self::Spinning,
        ]
    }

    /// Lower-case name as used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dancing => "dancing",
            Self::Singing => "singing",
            Self::Excited => "excited",
            Self::Headbanging => "headbanging",
            Self::Spinning => "spinning",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The (mood, intensity, color) triple derived for one sync pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationIntent {
    /// Requested mood.
    pub mood: Mood,
    /// Energy in `[0, 1]`.
    pub intensity: f64,
    /// Hex color such as `#FF69B4`.
    pub color: String,
}

impl AnimationIntent {
    /// Create an intent.
    pub fn new(mood: Mood, intensity: f64, color: impl Into<String>) -> Self {
        Self { mood, intensity, color: color.into() }
    }

    /// Resting intent: idle, low intensity, base pink.
    pub fn idle() -> Self {
        Self::new(Mood::Idle, sync::IDLE_INTENSITY, palette::DEFAULT_PINK)
    }

    /// Short override emitted when an emphatic line becomes active.
    pub fn accent() -> Self {
        Self::new(Mood::Excited, sync::ACCENT_INTENSITY, palette::GOLD)
    }

    /// Decode the hex color into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

impl Default for AnimationIntent {
    fn default() -> Self {
        Self::idle()
    }
}

/// Parse `#RRGGBB` into components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
