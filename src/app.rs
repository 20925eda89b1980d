//! Player state for the terminal front end.
//!
//! `App` owns the loaded document, a simulated playback clock and the sync
//! engine. The UI reads from it; the main loop feeds it key commands, clock
//! ticks and deferred accent events.

use std::path::Path;
use std::time::Duration;

use arboard::Clipboard;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::player::CHANNEL_BUFFER_SIZE;
use crate::error::{Error, Result};
use crate::input::PlayerCommand;
use crate::lyrics::{load_content, load_file, LyricsParserService};
use crate::sync::{SyncEngine, SyncEvent, TokioAccentScheduler};
use crate::types::{AnimationIntent, LyricsDocument};

/// Simulated playback position.
///
/// Time only moves when [`PlaybackClock::advance`] is called, so the caller
/// decides the tick cadence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackClock {
    position: f64,
    duration: f64,
    playing: bool,
}

impl PlaybackClock {
    /// A paused clock at zero running up to `duration` seconds.
    pub const fn new(duration: f64) -> Self {
        Self { position: 0.0, duration, playing: false }
    }

    /// Current playback time in seconds.
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Length of the loaded lyrics in seconds.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether time is advancing.
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start or pause. Playing from the end starts over.
    pub fn toggle(&mut self) {
        if !self.playing && self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing = !self.playing;
    }

    /// Stop advancing.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Move by `delta` seconds, clamped to the track.
    pub fn seek(&mut self, delta: f64) {
        self.position = (self.position + delta).clamp(0.0, self.duration.max(0.0));
    }

    /// Back to zero, paused.
    pub fn restart(&mut self) {
        self.position = 0.0;
        self.playing = false;
    }

    /// Advance by `elapsed` if playing. Reaching the end pauses the clock.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.position += elapsed.as_secs_f64();
        if self.position >= self.duration {
            self.position = self.duration;
            self.playing = false;
        }
    }

    /// Fraction of the track played, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.position / self.duration).clamp(0.0, 1.0)
    }
}

/// Terminal player state.
pub struct App {
    /// Loaded configuration
    pub config: Config,
    /// Lyrics being played, if any
    pub document: Option<LyricsDocument>,
    /// Where the current document came from (file name or "clipboard").
    pub source_name: Option<String>,
    /// Simulated playback position
    pub clock: PlaybackClock,
    /// Intent the avatar panel renders.
    pub intent: AnimationIntent,
    /// Last line announced by the engine; drives the caption.
    pub announced_line: Option<usize>,
    /// Error overlay text
    pub error_message: Option<String>,
    /// Informational overlay text
    pub status_message: Option<String>,
    /// Whether the key help overlay is open
    pub show_help: bool,
    /// Set once the user asked to leave
    pub should_quit: bool,
    parser: LyricsParserService,
    engine: SyncEngine<TokioAccentScheduler>,
    sync_rx: mpsc::Receiver<SyncEvent>,
}

impl App {
    /// Create a player with nothing loaded.
    pub fn new(config: Config) -> Self {
        let (sync_tx, sync_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let engine = SyncEngine::new(TokioAccentScheduler::new(sync_tx))
            .with_accent_delay(config.impulse_delay);

        Self {
            config,
            document: None,
            source_name: None,
            clock: PlaybackClock::default(),
            intent: AnimationIntent::idle(),
            announced_line: None,
            error_message: None,
            status_message: None,
            show_help: false,
            should_quit: false,
            parser: LyricsParserService::new(),
            engine,
            sync_rx,
        }
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Load a lyrics file from disk, replacing the current document.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let document = load_file(&self.parser, path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.set_document(document, name);
        Ok(())
    }

    /// Parse pasted text, replacing the current document.
    pub fn load_text(&mut self, content: &str) -> Result<()> {
        let document = load_content(&self.parser, content, "clipboard", None)?;
        self.set_document(document, "clipboard".to_string());
        Ok(())
    }

    fn set_document(&mut self, document: LyricsDocument, source_name: String) {
        self.engine.reset();
        self.clock = PlaybackClock::new(document.end_time());
        self.intent = AnimationIntent::idle();
        self.announced_line = None;
        self.status_message = Some(format!(
            "Loaded {} lines from {source_name}. Press Space to play.",
            document.len()
        ));
        tracing::debug!("Document from {source_name} replaces the previous one");
        self.document = Some(document);
        self.source_name = Some(source_name);
    }

    /// Apply a command from the keyboard.
    ///
    /// While a help or message overlay is shown only `Dismiss`, `ToggleHelp`
    /// and `Quit` get through.
    pub fn handle_command(&mut self, command: PlayerCommand) {
        if command == PlayerCommand::Quit {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(command, PlayerCommand::ToggleHelp | PlayerCommand::Dismiss) {
                self.show_help = false;
            }
            return;
        }

        if self.error_message.is_some() || self.status_message.is_some() {
            if command == PlayerCommand::Dismiss {
                self.error_message = None;
                self.status_message = None;
                return;
            }
            if self.error_message.is_some() {
                return;
            }
            // Status messages are informational; any command clears them.
            self.status_message = None;
        }

        match command {
            PlayerCommand::TogglePlayback => {
                if self.document.is_none() {
                    self.error_message =
                        Some("No lyrics loaded. Press p to paste lyrics from the clipboard.".to_string());
                    return;
                }
                self.clock.toggle();
                self.sync();
            }
            PlayerCommand::SeekForward => self.seek(self.config.seek_step),
            PlayerCommand::SeekBackward => self.seek(-self.config.seek_step),
            PlayerCommand::Restart => {
                self.clock.restart();
                self.sync();
            }
            PlayerCommand::PasteLyrics => self.paste_from_clipboard(),
            PlayerCommand::ToggleHelp => self.show_help = true,
            PlayerCommand::Dismiss | PlayerCommand::Quit => {}
        }
    }

    fn seek(&mut self, delta: f64) {
        self.clock.seek(delta);
        self.sync();
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(text) => text,
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!("Clipboard read failed: {err}");
                self.error_message = Some(err.to_string());
                return;
            }
        };

        self.clock.pause();
        if let Err(e) = self.load_text(&text) {
            self.error_message = Some(e.to_string());
        }
        self.sync();
    }

    /// Advance the clock by `elapsed` and run a sync pass.
    pub fn tick(&mut self, elapsed: Duration) {
        self.clock.advance(elapsed);
        self.sync();
    }

    fn sync(&mut self) {
        let events = self.engine.update(
            self.document.as_ref(),
            self.clock.position(),
            self.clock.is_playing(),
        );
        for event in events {
            self.apply_event(event);
        }
    }

    /// Drain deferred events delivered by the accent scheduler.
    pub fn handle_updates(&mut self) {
        loop {
            match self.sync_rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    tracing::debug!("Accent channel closed");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Animation(intent) => self.intent = intent,
            SyncEvent::ActiveLineChanged { index, previous } => {
                tracing::debug!("Caption moves to line {index} (from {previous:?})");
                self.announced_line = Some(index);
            }
        }
    }

    /// Line active at the current clock position, independent of playback.
    pub fn display_index(&self) -> Option<usize> {
        self.document.as_ref()?.active_index(self.clock.position())
    }

    /// Line coming up next at the current clock position.
    pub fn upcoming_index(&self) -> Option<usize> {
        self.document.as_ref()?.next_index(self.clock.position())
    }
}
