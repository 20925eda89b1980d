//! Dance intensity from lyric text and time into the line.

use super::mood::contains_any;
use crate::constants::intensity::{
    BASE, EXTREME_BONUS, HIGH_ENERGY_BONUS, MAX, MILD_BONUS, MIN, OSCILLATION_AMPLITUDE,
    OSCILLATION_FREQUENCY,
};

const MILD_WORDS: &[&str] = &["love", "heart", "amazing"];
const HIGH_ENERGY_WORDS: &[&str] = &["dance", "jump", "party"];
const EXTREME_WORDS: &[&str] = &["rock", "wild", "crazy"];

/// Compute intensity in `[0.2, 1.0]`.
///
/// Keyword tier bonuses add up, and a `0.2 * sin(2t)` term keeps a held line
/// from looking static. Non-finite offsets contribute no oscillation.
pub fn calculate_intensity(text: &str, time_since_line_start: f64) -> f64 {
    let text = text.to_lowercase();

    let bonus: f64 = [
        (MILD_WORDS, MILD_BONUS),
        (HIGH_ENERGY_WORDS, HIGH_ENERGY_BONUS),
        (EXTREME_WORDS, EXTREME_BONUS),
    ]
    .iter()
    .filter(|(words, _)| contains_any(&text, words))
    .map(|&(_, bonus)| bonus)
    .sum();

    let oscillation = if time_since_line_start.is_finite() {
        OSCILLATION_AMPLITUDE * (OSCILLATION_FREQUENCY * time_since_line_start).sin()
    } else {
        0.0
    };

    (BASE + bonus + oscillation).clamp(MIN, MAX)
}
