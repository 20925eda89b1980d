//! Input handling.
//!
//! Maps key events to player commands so the key bindings can be tested
//! without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A player action requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Start or pause playback.
    TogglePlayback,
    /// Jump forward by the seek step.
    SeekForward,
    /// Jump backward by the seek step.
    SeekBackward,
    /// Back to the start, paused.
    Restart,
    /// Replace the lyrics with clipboard content.
    PasteLyrics,
    /// Show or hide the key help.
    ToggleHelp,
    /// Dismiss the error or status message.
    Dismiss,
    /// Leave the application.
    Quit,
}

impl PlayerCommand {
    /// Key bindings shown in the status bar, as (key, description) pairs.
    pub const fn bindings() -> &'static [(&'static str, &'static str)] {
        &[
            ("Space", "Play/Pause"),
            ("←/→", "Seek"),
            ("r", "Restart"),
            ("p", "Paste lyrics"),
            ("?", "Help"),
            ("q", "Quit"),
        ]
    }
}

/// Translate a key event into a command.
///
/// Key releases are ignored so terminals that report them do not double up.
pub fn command_for_key(key: KeyEvent) -> Option<PlayerCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(PlayerCommand::Quit),
            KeyCode::Char('v') => Some(PlayerCommand::PasteLyrics),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => Some(PlayerCommand::TogglePlayback),
        KeyCode::Right | KeyCode::Char('l') => Some(PlayerCommand::SeekForward),
        KeyCode::Left | KeyCode::Char('h') => Some(PlayerCommand::SeekBackward),
        KeyCode::Char('r' | 'R') => Some(PlayerCommand::Restart),
        KeyCode::Char('p' | 'P') => Some(PlayerCommand::PasteLyrics),
        KeyCode::Char('?') | KeyCode::F(1) => Some(PlayerCommand::ToggleHelp),
        KeyCode::Esc => Some(PlayerCommand::Dismiss),
        KeyCode::Char('q' | 'Q') => Some(PlayerCommand::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_playback_keys() {
        assert_eq!(command_for_key(make_key(KeyCode::Char(' '))), Some(PlayerCommand::TogglePlayback));
        assert_eq!(command_for_key(make_key(KeyCode::Right)), Some(PlayerCommand::SeekForward));
        assert_eq!(command_for_key(make_key(KeyCode::Left)), Some(PlayerCommand::SeekBackward));
        assert_eq!(command_for_key(make_key(KeyCode::Char('r'))), Some(PlayerCommand::Restart));
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ctrl_v = KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(ctrl_c), Some(PlayerCommand::Quit));
        assert_eq!(command_for_key(ctrl_v), Some(PlayerCommand::PasteLyrics));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(command_for_key(make_key(KeyCode::Char('x'))), None);
        assert_eq!(command_for_key(make_key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = make_key(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(key), None);
    }
}
