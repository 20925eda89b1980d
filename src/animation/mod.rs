//! Animation intent derived from lyric text.
//!
//! Mood, intensity and color each rescan the text on their own so they can be
//! tested independently; [`derive_intent`] just combines them.

mod color;
mod intensity;
mod mood;

pub use color::{map_color, mood_color};
pub use intensity::calculate_intensity;
pub use mood::classify_mood;

use crate::types::AnimationIntent;

/// Motion words that trigger a short accent when their line becomes active.
const IMPULSE_WORDS: &[&str] = &["jump", "fly"];

/// Combine the three classifiers for one line at `time_since_line_start`.
pub fn derive_intent(text: &str, time_since_line_start: f64) -> AnimationIntent {
    let mood = classify_mood(text);
    AnimationIntent::new(
        mood,
        calculate_intensity(text, time_since_line_start),
        map_color(mood, text),
    )
}

/// Whether a line is emphatic enough to deserve an accent.
pub fn has_impulse(text: &str) -> bool {
    mood::contains_any(&text.to_lowercase(), IMPULSE_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::palette;
    use crate::types::Mood;

    #[test]
    fn derive_intent_combines_classifiers() {
        let intent = derive_intent("Dance with love", 0.0);
        assert_eq!(intent.mood, Mood::Dancing);
        assert_eq!(intent.color, palette::HOT_PINK);
        assert!((intent.intensity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn impulse_words() {
        assert!(has_impulse("JUMP up"));
        assert!(has_impulse("we can fly"));
        assert!(!has_impulse("stay still"));
    }
}
