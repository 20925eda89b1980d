//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Lyrics parsing constants.
pub mod parsing {
    /// Seconds a final timestamped line stays active when nothing follows it.
    pub const TRAILING_LINE_SECS: f64 = 5.0;

    /// Fixed slot length for each line of untimed plain text.
    pub const PLAIN_LINE_SECS: f64 = 4.0;
}

/// Synchronization engine constants.
pub mod sync {
    /// Intensity emitted while idle (paused, or between lines).
    pub const IDLE_INTENSITY: f64 = 0.3;

    /// Intensity of the accent override on emphatic lines.
    pub const ACCENT_INTENSITY: f64 = 1.0;

    /// Default delay before the accent override is replaced by the normal intent.
    pub const DEFAULT_ACCENT_DELAY_MS: u64 = 500;

    /// Default playback-time update cadence (10 Hz).
    pub const DEFAULT_TICK_MS: u64 = 100;
}

/// Intensity calculator constants.
pub mod intensity {
    /// Starting point before keyword bonuses.
    pub const BASE: f64 = 0.5;

    /// Bonus for mild positive words.
    pub const MILD_BONUS: f64 = 0.2;

    /// Bonus for high-energy words.
    pub const HIGH_ENERGY_BONUS: f64 = 0.3;

    /// Bonus for extreme or aggressive words.
    pub const EXTREME_BONUS: f64 = 0.4;

    /// Amplitude of the in-line oscillation.
    pub const OSCILLATION_AMPLITUDE: f64 = 0.2;

    /// Angular frequency of the in-line oscillation (radians per second).
    pub const OSCILLATION_FREQUENCY: f64 = 2.0;

    /// Lower clamp.
    pub const MIN: f64 = 0.2;

    /// Upper clamp.
    pub const MAX: f64 = 1.0;
}

/// Hex colors handed to the renderer.
pub mod palette {
    /// Base pink, used while idle.
    pub const DEFAULT_PINK: &str = "#F472B6";
    /// Love/heart override.
    pub const HOT_PINK: &str = "#FF69B4";
    /// Happy/joy override, excited mood and the accent color.
    pub const GOLD: &str = "#FFD700";
    /// Sad/blue override.
    pub const SKY_BLUE: &str = "#87CEEB";
    /// Angry/mad override and headbanging mood.
    pub const RED_ORANGE: &str = "#FF4500";
    /// Cool/chill override.
    pub const TURQUOISE: &str = "#40E0D0";
    /// Fire/hot override.
    pub const TOMATO: &str = "#FF6347";
    /// Nature/green override.
    pub const PALE_GREEN: &str = "#98FB98";
    /// Magic/purple override.
    pub const PLUM: &str = "#DDA0DD";
    /// Dancing mood.
    pub const DEEP_PINK: &str = "#FF1493";
    /// Spinning mood.
    pub const MEDIUM_PURPLE: &str = "#9370DB";
    /// Singing mood.
    pub const LIGHT_PINK: &str = "#FFB6C1";
}

/// Terminal player constants.
pub mod player {
    /// Default seek step in seconds.
    pub const DEFAULT_SEEK_STEP_SECS: f64 = 5.0;

    /// Channel buffer size for deferred accent events.
    pub const CHANNEL_BUFFER_SIZE: usize = 16;

    /// How long to wait for a terminal event before advancing the clock.
    pub const EVENT_POLL_MS: u64 = 20;
}

/// Lyrics library constants.
pub mod library {
    /// Maximum number of candidates returned by a fuzzy lookup.
    pub const MAX_MATCHES: usize = 10;

    /// Minimum fuzzy score accepted for a file name match.
    pub const MIN_FUZZY_SCORE: i64 = 50;
}
