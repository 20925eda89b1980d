//! Application error types.
//!
//! Parsing itself never fails; these errors cover the surfaces around it
//! (files, clipboard, configuration, terminal) with actionable context.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File extension outside the accepted lyrics set
    #[error("Unsupported lyrics file {path:?}: please select a .lrc, .txt, .json, or .srt file")]
    UnsupportedFile {
        /// The rejected file.
        path: PathBuf,
    },

    /// Content parsed, but no lyric lines came out of it
    #[error("No lyrics found in {source_name}. Please check the format.")]
    NoLyrics {
        /// Where the content came from (file name, "clipboard", ...).
        source_name: String,
    },

    /// Lyrics library lookup error
    #[error("Library error: {0}")]
    Library(String),

    /// Clipboard access error
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create an unsupported-file error
    pub fn unsupported_file(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFile { path: path.into() }
    }

    /// Create an empty-result error for the named source
    pub fn no_lyrics(source_name: impl Into<String>) -> Self {
        Self::NoLyrics { source_name: source_name.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<arboard::Error> for Error {
    fn from(e: arboard::Error) -> Self {
        Self::Clipboard(e.to_string())
    }
}
