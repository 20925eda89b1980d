//! Tracing subscriber setup.
//!
//! The terminal player owns the screen, so it only logs when `LYRICSYNC_LOG`
//! names a file. Command-line tools log to stderr.

use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use crate::error::{Error, Result};

/// Send log output to `path`, appending to an existing file.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(e, path.to_path_buf()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|e| Error::Msg(format!("Failed to install logger: {e}")))?;

    tracing::info!("Logging to {}", path.display());
    Ok(())
}

/// Send warnings and errors to stderr; `verbose` lowers the level to debug.
pub fn init_stderr_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init()
        .map_err(|e| Error::Msg(format!("Failed to install logger: {e}")))
}
