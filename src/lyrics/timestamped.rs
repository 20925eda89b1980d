//! LRC-style `[MM:SS.CC]` lyrics.

use std::sync::LazyLock;

use regex::Regex;

use super::{LyricsFormat, LyricsParser};
use crate::constants::parsing::TRAILING_LINE_SECS;
use crate::types::{LyricsDocument, LyricsLine};

/// Regex matching a `[MM:SS.CC]` marker followed by the line text.
#[allow(clippy::expect_used)]
static RE_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{2}):(\d{2})\.(\d{2})\](.*)").expect("valid regex: RE_TIMESTAMP")
});

/// Regex matching the `[ti:...]` title tag.
#[allow(clippy::expect_used)]
static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[ti:(.*)\]").expect("valid regex: RE_TITLE")
});

/// Regex matching the `[ar:...]` artist tag.
#[allow(clippy::expect_used)]
static RE_ARTIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[ar:(.*)\]").expect("valid regex: RE_ARTIST")
});

/// Parser for timestamped (LRC) lyrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampedParser;

impl LyricsParser for TimestampedParser {
    fn validate(&self, content: &str) -> bool {
        RE_TIMESTAMP.is_match(content)
    }

    fn parse(&self, content: &str) -> LyricsDocument {
        let mut title = None;
        let mut artist = None;
        // Every timestamped line, including empty ones, since an empty
        // marker still ends the line before it.
        let mut stamps: Vec<(f64, &str)> = Vec::new();

        for line in content.lines() {
            if let Some(stamp) = parse_timestamp_line(line) {
                stamps.push(stamp);
            } else if let Some(value) = capture_tag(&RE_TITLE, line) {
                title = Some(value);
            } else if let Some(value) = capture_tag(&RE_ARTIST, line) {
                artist = Some(value);
            }
        }

        // Stable, so lines sharing a timestamp keep their file order.
        stamps.sort_by(|a, b| a.0.total_cmp(&b.0));

        let lines: Vec<LyricsLine> = stamps
            .iter()
            .enumerate()
            .filter(|(_, (_, text))| !text.is_empty())
            .map(|(i, &(start, text))| {
                // Lines sharing a timestamp all run until the next later one.
                let end = stamps[i + 1..]
                    .iter()
                    .find(|&&(next_start, _)| next_start > start)
                    .map_or(start + TRAILING_LINE_SECS, |&(next_start, _)| next_start);
                LyricsLine::new(text, start, end)
            })
            .collect();

        tracing::debug!("Parsed {} timestamped lines", lines.len());

        LyricsDocument::new(lines).with_title(title).with_artist(artist)
    }

    fn format(&self) -> LyricsFormat {
        LyricsFormat::Timestamped
    }
}

/// Split a `[MM:SS.CC]text` line into (seconds, trimmed text).
fn parse_timestamp_line(line: &str) -> Option<(f64, &str)> {
    let caps = RE_TIMESTAMP.captures(line)?;
    let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u32 = caps.get(2)?.as_str().parse().ok()?;
    let centis: u32 = caps.get(3)?.as_str().parse().ok()?;
    let text = caps.get(4).map_or("", |m| m.as_str().trim());
    Some((timestamp_seconds(minutes, seconds, centis), text))
}

/// `MM*60 + SS + CC/100`.
fn timestamp_seconds(minutes: u32, seconds: u32, centis: u32) -> f64 {
    f64::from(minutes * 60 + seconds) + f64::from(centis) / 100.0
}

fn capture_tag(re: &Regex, line: &str) -> Option<String> {
    let value = re.captures(line)?.get(1)?.as_str().trim();
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "[ti:Example Song]\n\
                          [ar:Artist Name]\n\
                          [00:12.50]This is how LRC format works\n\
                          [00:16.80]Each line has a timestamp\n\
                          [00:21.20]Like this example\n";

    #[test]
    fn validates_only_with_a_marker() {
        assert!(TimestampedParser.validate(SAMPLE));
        assert!(TimestampedParser.validate("intro\n[01:02.03] late start"));
        assert!(!TimestampedParser.validate("[1:02.03] single digit minutes"));
        assert!(!TimestampedParser.validate("[01:02] no centiseconds"));
        assert!(!TimestampedParser.validate("just words"));
    }

    #[test]
    fn start_times_are_exact() {
        let doc = TimestampedParser.parse("[00:12.50]a\n[01:02.03]b\n[10:59.99]c");
        assert!((doc.lines[0].start_time - 12.5).abs() < f64::EPSILON);
        assert!((doc.lines[1].start_time - 62.03).abs() < 1e-9);
        assert!((doc.lines[2].start_time - 659.99).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn any_valid_marker_gives_exact_start(mm in 0u32..100, ss in 0u32..100, cc in 0u32..100) {
            let content = format!("[{mm:02}:{ss:02}.{cc:02}]line");
            let doc = TimestampedParser.parse(&content);
            let expected = f64::from(mm * 60 + ss) + f64::from(cc) / 100.0;
            prop_assert_eq!(doc.lines.len(), 1);
            prop_assert!((doc.lines[0].start_time - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn out_of_order_stamps_are_sorted() {
        let doc = TimestampedParser.parse("[00:10.00]later\n[00:05.00]earlier\n[00:12.00]end");
        let texts: Vec<_> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["earlier", "later", "end"]);
        assert!((doc.lines[0].end_time - 10.0).abs() < f64::EPSILON);
        assert!((doc.lines[1].end_time - 12.0).abs() < f64::EPSILON);
        assert!(doc.lines.iter().all(|l| l.end_time > l.start_time));
        assert_eq!(doc.active_index(11.0), Some(1));
    }

    #[test]
    fn repeated_stamps_share_a_real_window() {
        let doc = TimestampedParser.parse(
            "[00:10.00]later\n[00:05.00]earlier\n[00:05.00]dup a\n[00:05.00]dup b\n[00:12.00]end",
        );
        let texts: Vec<_> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["earlier", "dup a", "dup b", "later", "end"]);
        for line in &doc.lines[..3] {
            assert!((line.start_time - 5.0).abs() < f64::EPSILON);
            assert!((line.end_time - 10.0).abs() < f64::EPSILON);
        }
        assert!(doc.lines.windows(2).all(|w| w[0].start_time <= w[1].start_time));
        assert!(doc.lines.iter().all(|l| l.end_time > l.start_time));
    }

    #[test]
    fn end_time_chains_to_next_line_and_trails_last() {
        let doc = TimestampedParser.parse(SAMPLE);
        assert_eq!(doc.lines.len(), 3);
        assert!((doc.lines[0].end_time - 16.8).abs() < 1e-9);
        assert!((doc.lines[1].end_time - 21.2).abs() < 1e-9);
        assert!((doc.lines[2].end_time - (21.2 + TRAILING_LINE_SECS)).abs() < 1e-9);
    }

    #[test]
    fn metadata_lines_set_title_and_artist() {
        let doc = TimestampedParser.parse(SAMPLE);
        assert_eq!(doc.title.as_deref(), Some("Example Song"));
        assert_eq!(doc.artist.as_deref(), Some("Artist Name"));
        assert_eq!(doc.lines[0].text, "This is how LRC format works");
    }

    #[test]
    fn unrecognized_lines_are_skipped() {
        let doc = TimestampedParser.parse("garbage\n[00:01.00]one\n\n[xx:yy.zz]bad\n[00:03.00]two");
        let texts: Vec<_> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
        assert!((doc.lines[0].end_time - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn next_timestamp_is_found_past_skipped_lines() {
        let doc = TimestampedParser.parse("[00:01.00]one\n# comment\n[00:04.00]two");
        assert!((doc.lines[0].end_time - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_marker_ends_previous_line_without_emitting_one() {
        let doc = TimestampedParser.parse("[00:01.00]sing\n[00:03.00]\n[00:10.00]again");
        assert_eq!(doc.lines.len(), 2);
        assert!((doc.lines[0].end_time - 3.0).abs() < f64::EPSILON);
        assert!((doc.lines[1].start_time - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let doc = TimestampedParser.parse("[ti:Song]\r\n[00:01.00]hello\r\n[00:02.00]world\r\n");
        assert_eq!(doc.title.as_deref(), Some("Song"));
        assert_eq!(doc.lines[0].text, "hello");
        assert_eq!(doc.lines[1].text, "world");
    }
}
