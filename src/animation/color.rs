//! Color selection: emotional keywords first, then a per-mood palette.

use super::mood::contains_any;
use crate::constants::palette;
use crate::types::Mood;

/// Keyword overrides in priority order.
const COLOR_OVERRIDES: &[(&[&str], &str)] = &[
    (&["love", "heart"], palette::HOT_PINK),
    (&["happy", "joy"], palette::GOLD),
    (&["sad", "blue"], palette::SKY_BLUE),
    (&["angry", "mad"], palette::RED_ORANGE),
    (&["cool", "chill"], palette::TURQUOISE),
    (&["fire", "hot"], palette::TOMATO),
    (&["nature", "green"], palette::PALE_GREEN),
    (&["magic", "purple"], palette::PLUM),
];

/// Pick a hex color for a line.
///
/// An emotional keyword in the lyric wins over the generic mood color.
pub fn map_color(mood: Mood, text: &str) -> &'static str {
    let text = text.to_lowercase();
    COLOR_OVERRIDES
        .iter()
        .find(|(words, _)| contains_any(&text, words))
        .map_or_else(|| mood_color(mood), |&(_, color)| color)
}

/// The fallback color for a mood.
pub const fn mood_color(mood: Mood) -> &'static str {
    match mood {
        Mood::Dancing => palette::DEEP_PINK,
        Mood::Headbanging => palette::RED_ORANGE,
        Mood::Spinning => palette::MEDIUM_PURPLE,
        Mood::Singing => palette::LIGHT_PINK,
        Mood::Excited => palette::GOLD,
        Mood::Idle => palette::DEFAULT_PINK,
    }
}
