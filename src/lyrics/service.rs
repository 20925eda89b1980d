//! Parser selection and loading.

use std::path::Path;

use super::{LyricsFormat, LyricsParser, PlainTextParser, StructuredParser, TimestampedParser};
use crate::error::{Error, Result};
use crate::types::{LyricsDocument, LyricsFileKind};

/// Picks a parser by validation, in a fixed precedence order.
///
/// Timestamped lyrics are checked before structured data, so a file that
/// carries `[MM:SS.CC]` markers is never read as JSON. Plain text accepts any
/// non-blank content and closes the chain.
pub struct LyricsParserService {
    parsers: Vec<Box<dyn LyricsParser>>,
}

impl Default for LyricsParserService {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricsParserService {
    /// Create the service with the standard precedence order.
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(TimestampedParser),
                Box::new(StructuredParser),
                Box::new(PlainTextParser),
            ],
        }
    }

    /// Formats in the order they are tried.
    pub fn precedence(&self) -> Vec<LyricsFormat> {
        self.parsers.iter().map(|p| p.format()).collect()
    }

    /// The first parser that accepts `content`, if any.
    pub fn detect(&self, content: &str) -> Option<&dyn LyricsParser> {
        self.parsers
            .iter()
            .find(|parser| parser.validate(content))
            .map(|parser| parser.as_ref())
    }

    /// Parse `content` with the first accepting parser.
    ///
    /// Never fails. Content nobody accepts (empty or whitespace-only) goes to
    /// the plain-text parser directly and comes back with no lines.
    pub fn parse_from_content(&self, content: &str) -> LyricsDocument {
        self.parse_with_format(content).1
    }

    /// Like [`Self::parse_from_content`], also reporting which format was used.
    pub fn parse_with_format(&self, content: &str) -> (LyricsFormat, LyricsDocument) {
        match self.detect(content) {
            Some(parser) => {
                let document = parser.parse(content);
                tracing::debug!(
                    "Parsed {} lines as {}",
                    document.len(),
                    parser.format().name()
                );
                (parser.format(), document)
            }
            None => (LyricsFormat::Plain, PlainTextParser.parse(content)),
        }
    }
}

/// Parse pasted content, rejecting results with no lines.
///
/// `source_name` labels the content in the error ("clipboard", ...).
pub fn load_content(
    service: &LyricsParserService,
    content: &str,
    source_name: &str,
    title: Option<&str>,
) -> Result<LyricsDocument> {
    if content.trim().is_empty() {
        return Err(Error::no_lyrics(source_name));
    }

    let document = service.parse_from_content(content);
    if document.is_empty() {
        return Err(Error::no_lyrics(source_name));
    }

    Ok(document.with_title_fallback(title))
}

/// Read and parse a lyrics file.
///
/// Only `.lrc`, `.txt`, `.json` and `.srt` files are accepted, but the
/// extension does not influence which parser handles the content. Documents
/// without a title take the file stem.
pub fn load_file(service: &LyricsParserService, path: &Path) -> Result<LyricsDocument> {
    load_file_with_format(service, path).map(|(_, document)| document)
}

/// Like [`load_file`], also reporting which format was detected.
pub fn load_file_with_format(
    service: &LyricsParserService,
    path: &Path,
) -> Result<(LyricsFormat, LyricsDocument)> {
    if !LyricsFileKind::is_accepted(path) {
        return Err(Error::unsupported_file(path));
    }

    let content = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
    if content.trim().is_empty() {
        return Err(Error::no_lyrics(name));
    }

    let (format, document) = service.parse_with_format(&content);
    if document.is_empty() {
        return Err(Error::no_lyrics(name));
    }

    let stem = path.file_stem().and_then(|s| s.to_str());
    tracing::info!(
        "Loaded {} lyric lines from {} as {}",
        document.len(),
        path.display(),
        format.name()
    );
    Ok((format, document.with_title_fallback(stem)))
}
