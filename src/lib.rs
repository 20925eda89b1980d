//! `lyricsync` - lyrics parsing and playback-synchronized avatar animation.
//!
//! Parses timestamped (LRC), structured (JSON) and plain-text lyrics into a
//! [`types::LyricsDocument`], then turns playback time into animation intent
//! (mood, intensity, color) for a karaoke avatar through [`sync::SyncEngine`].

pub mod animation;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod library;
pub mod logging;
pub mod lyrics;
pub mod sync;
pub mod types;
pub mod ui;
