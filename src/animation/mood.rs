//! Mood classification from lyric text.

use crate::types::Mood;

const DANCE_WORDS: &[&str] = &["dance", "party", "jump", "beat", "pump"];
const ROCK_WORDS: &[&str] = &["rock", "metal", "bang", "scream", "wild"];
const SPIN_WORDS: &[&str] = &["spin", "turn", "round", "twirl", "circle"];
const VOCAL_WORDS: &[&str] = &["sing", "voice", "song", "melody", "harmony"];
const JOY_WORDS: &[&str] = &["happy", "joy", "love", "amazing", "wonderful", "excited"];

/// Keyword sets in priority order; the first set with a hit decides.
const MOOD_RULES: &[(&[&str], Mood)] = &[
    (DANCE_WORDS, Mood::Dancing),
    (ROCK_WORDS, Mood::Headbanging),
    (SPIN_WORDS, Mood::Spinning),
    (VOCAL_WORDS, Mood::Singing),
    (JOY_WORDS, Mood::Excited),
];

/// Classify a line's mood.
///
/// Matching is case-insensitive substring search. Lines with no keyword
/// still dance rather than idle.
pub fn classify_mood(text: &str) -> Mood {
    let text = text.to_lowercase();
    MOOD_RULES
        .iter()
        .find(|(words, _)| contains_any(&text, words))
        .map_or(Mood::Dancing, |&(_, mood)| mood)
}

/// Whether lower-cased `text` contains any of `words`.
pub(crate) fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_keyword_set_maps_to_its_mood() {
        assert_eq!(classify_mood("Dance all night"), Mood::Dancing);
        assert_eq!(classify_mood("ROCK the stage"), Mood::Headbanging);
        assert_eq!(classify_mood("twirl me"), Mood::Spinning);
        assert_eq!(classify_mood("a sweet melody"), Mood::Singing);
        assert_eq!(classify_mood("so happy today"), Mood::Excited);
    }

    #[test]
    fn unclassified_lines_default_to_dancing() {
        assert_eq!(classify_mood("quiet moment"), Mood::Dancing);
        assert_eq!(classify_mood(""), Mood::Dancing);
    }

    #[test]
    fn priority_order_breaks_ties() {
        assert_eq!(classify_mood("sing and dance"), Mood::Dancing);
        assert_eq!(classify_mood("metal voices spin"), Mood::Headbanging);
        assert_eq!(classify_mood("turn up the love"), Mood::Spinning);
        assert_eq!(classify_mood("love song"), Mood::Singing);
    }

    #[test]
    fn matches_inside_words() {
        assert_eq!(classify_mood("singing loud"), Mood::Singing);
        assert_eq!(classify_mood("all around"), Mood::Spinning);
    }
}
