//! Lyrics parsing.
//!
//! Three format parsers share the [`LyricsParser`] capability set, and
//! [`LyricsParserService`] picks between them in a fixed precedence order.

mod plain;
mod service;
mod structured;
mod timestamped;

pub use plain::PlainTextParser;
pub use service::{load_content, load_file, load_file_with_format, LyricsParserService};
pub use structured::StructuredParser;
pub use timestamped::TimestampedParser;

use serde::{Deserialize, Serialize};

use crate::types::LyricsDocument;

/// Which parser variant produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LyricsFormat {
    /// `[MM:SS.CC]` timestamped lines.
    Timestamped,
    /// JSON with `title`, `artist`, `lines`.
    Structured,
    /// Untimed text, one line per slot.
    Plain,
}

impl LyricsFormat {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Timestamped => "timestamped",
            Self::Structured => "structured",
            Self::Plain => "plain text",
        }
    }
}

/// A lyrics format parser.
///
/// `validate` decides whether the parser accepts the content at all;
/// `parse` never fails and drops what it cannot use.
pub trait LyricsParser: Send + Sync {
    /// Whether this parser recognizes `content`.
    fn validate(&self, content: &str) -> bool;

    /// Parse `content` into a document.
    fn parse(&self, content: &str) -> LyricsDocument;

    /// The format this parser handles.
    fn format(&self) -> LyricsFormat;
}
