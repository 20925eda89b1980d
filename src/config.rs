//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{player, sync};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory searched when a lyrics query is not a path
    pub lyrics_dir: Option<PathBuf>,
    /// Playback-time update cadence
    pub tick_interval: Duration,
    /// Delay before an accent gives way to the normal intent
    pub impulse_delay: Duration,
    /// Seconds skipped per seek key press
    pub seek_step: f64,
    /// File receiving log output, if logging is enabled
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            lyrics_dir: None,
            tick_interval: Duration::from_millis(sync::DEFAULT_TICK_MS),
            impulse_delay: Duration::from_millis(sync::DEFAULT_ACCENT_DELAY_MS),
            seek_step: player::DEFAULT_SEEK_STEP_SECS,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = lookup("SYNC_TICK_MS").and_then(|v| parse_millis(&v)) {
            config.tick_interval = ms;
        }

        if let Some(ms) = lookup("IMPULSE_DELAY_MS").and_then(|v| parse_millis(&v)) {
            config.impulse_delay = ms;
        }

        if let Some(step) = lookup("SEEK_STEP_SECS").and_then(|v| v.trim().parse::<f64>().ok()) {
            if step.is_finite() && step > 0.0 {
                config.seek_step = step;
            }
        }

        config.log_file = lookup("LYRICSYNC_LOG").map(|path| expand_path(&path));

        // Lyrics directory: env var override, or default ~/Music/Lyrics
        config.lyrics_dir = lookup("LYRICS_DIR").map_or_else(
            || {
                dirs::home_dir()
                    .map(|h| h.join("Music/Lyrics"))
                    .filter(|p| p.is_dir())
            },
            |path| {
                let p = expand_path(&path);
                p.is_dir().then_some(p)
            },
        );

        config
    }

    /// The lyrics directory, or an error explaining how to set one.
    pub fn require_lyrics_dir(&self) -> Result<&PathBuf> {
        self.lyrics_dir.as_ref().ok_or_else(|| {
            Error::config(
                "No lyrics directory found",
                "Set LYRICS_DIR or pass a path to a lyrics file",
            )
        })
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.impulse_delay, Duration::from_millis(500));
        assert!((config.seek_step - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.app_name(), "lyricsync");
    }

    #[test]
    fn reads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();
        let config = Config::from_lookup(lookup_from(&[
            ("SYNC_TICK_MS", "50"),
            ("IMPULSE_DELAY_MS", " 250 "),
            ("SEEK_STEP_SECS", "2.5"),
            ("LYRICS_DIR", &dir_str),
            ("LYRICSYNC_LOG", "/tmp/lyricsync.log"),
        ]));
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.impulse_delay, Duration::from_millis(250));
        assert!((config.seek_step - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.lyrics_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/lyricsync.log")));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("SYNC_TICK_MS", "fast"),
            ("IMPULSE_DELAY_MS", "0"),
            ("SEEK_STEP_SECS", "-3"),
            ("LYRICS_DIR", "/nonexistent/lyricsync/dir"),
        ]));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.impulse_delay, Duration::from_millis(500));
        assert!((config.seek_step - 5.0).abs() < f64::EPSILON);
        assert!(config.lyrics_dir.is_none());
        assert!(config.require_lyrics_dir().is_err());
    }
}
