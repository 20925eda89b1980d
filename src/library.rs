//! Lyrics file discovery and lookup.
//!
//! Indexes the accepted lyrics files under a directory and resolves a
//! command-line query against them: an existing path wins, then an exact
//! file-stem match, then the best fuzzy match.

use std::path::{Path, PathBuf};
use std::time::Instant;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use walkdir::WalkDir;

use crate::config::Config;
use crate::constants::library::{MAX_MATCHES, MIN_FUZZY_SCORE};
use crate::error::{Error, Result};
use crate::types::LyricsFileKind;

/// A lyrics file found in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsEntry {
    /// File name without extension
    pub file_name: String,
    /// Lowercase variant of `file_name`
    file_name_lower: String,
    /// Recognized file kind
    pub kind: LyricsFileKind,
    /// Absolute path on disk
    pub full_path: PathBuf,
}

/// Index of lyrics files under one directory.
#[derive(Debug)]
pub struct LyricsLibrary {
    root: PathBuf,
    entries: Vec<LyricsEntry>,
}

impl LyricsLibrary {
    /// Walk `root` and index every accepted lyrics file.
    pub fn build(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::Library(format!(
                "Lyrics path does not exist or is not a directory: {}",
                root.display()
            )));
        }

        let start = Instant::now();
        let mut entries: Vec<LyricsEntry> = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|entry| {
                let kind = LyricsFileKind::from_path(entry.path())?;
                let stem = entry.path().file_stem()?.to_str()?;
                Some(LyricsEntry {
                    file_name: stem.to_string(),
                    file_name_lower: stem.to_lowercase(),
                    kind,
                    full_path: entry.path().to_path_buf(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.file_name_lower.cmp(&b.file_name_lower));

        let count = entries.len();
        let elapsed = start.elapsed();
        tracing::info!("Indexed {count} lyrics files in {elapsed:?}");

        Ok(Self { root: root.to_path_buf(), entries })
    }

    /// Directory this index was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All indexed files, sorted by name.
    pub fn entries(&self) -> &[LyricsEntry] {
        &self.entries
    }

    /// Files matching `query`, best first.
    ///
    /// Substring hits rank above pure fuzzy hits; `.lrc` files win ties
    /// because they carry real timing.
    pub fn find_matches(&self, query: &str, limit: usize) -> Vec<&LyricsEntry> {
        let matcher = SkimMatcherV2::default();
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(i64, &LyricsEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let mut score = matcher.fuzzy_match(&entry.file_name_lower, &query_lower)?;
                if entry.file_name_lower == query_lower {
                    score += 10_000;
                } else if entry.file_name_lower.contains(&query_lower) {
                    score += 3_000;
                }
                if entry.kind == LyricsFileKind::Lrc {
                    score += 1;
                }
                (score >= MIN_FUZZY_SCORE).then_some((score, entry))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }

    /// The single best match for `query`.
    pub fn resolve(&self, query: &str) -> Option<&LyricsEntry> {
        self.find_matches(query, 1).into_iter().next()
    }
}

/// Turn a command-line argument into a lyrics file path.
///
/// Existing paths are used as-is (after tilde expansion); anything else is
/// looked up in the configured lyrics directory.
pub fn resolve_lyrics_path(arg: &str, config: &Config) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(arg).to_string());
    if expanded.is_file() {
        return Ok(expanded);
    }

    let dir = config.require_lyrics_dir()?;
    let library = LyricsLibrary::build(dir)?;
    let candidates = library.find_matches(arg, MAX_MATCHES);
    tracing::debug!("{} candidates for \"{arg}\" in {}", candidates.len(), dir.display());

    candidates
        .first()
        .map(|entry| entry.full_path.clone())
        .ok_or_else(|| Error::Library(format!("No lyrics file matching \"{arg}\" in {}", dir.display())))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn library_with(files: &[&str]) -> (tempfile::TempDir, LyricsLibrary) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&path, "la la la").unwrap();
        }
        let library = LyricsLibrary::build(dir.path()).unwrap();
        (dir, library)
    }

    #[test]
    fn indexes_only_accepted_extensions() {
        let (_dir, library) = library_with(&[
            "Dancing Queen.lrc",
            "notes.md",
            "nested/Bohemian Rhapsody.txt",
            "cover.png",
            "subs.srt",
        ]);
        let names: Vec<_> = library.entries().iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, ["Bohemian Rhapsody", "Dancing Queen", "subs"]);
    }

    #[test]
    fn exact_name_beats_fuzzy() {
        let (_dir, library) = library_with(&["Queen.txt", "Dancing Queen.lrc"]);
        assert_eq!(library.resolve("queen").unwrap().file_name, "Queen");
    }

    #[test]
    fn fuzzy_lookup_finds_partial_names() {
        let (_dir, library) = library_with(&["Bohemian Rhapsody.lrc", "Yesterday.txt"]);
        assert_eq!(library.resolve("bohemian").unwrap().file_name, "Bohemian Rhapsody");
        assert!(library.resolve("zzzz").is_none());
        assert!(library.find_matches("   ", 5).is_empty());
    }

    #[test]
    fn lrc_wins_ties() {
        let (_dir, library) = library_with(&["Song.txt", "Song.lrc"]);
        assert_eq!(library.resolve("song").unwrap().kind, LyricsFileKind::Lrc);
    }

    #[test]
    fn build_rejects_missing_directory() {
        let err = LyricsLibrary::build(Path::new("/nonexistent/lyricsync/library")).unwrap_err();
        assert!(matches!(err, Error::Library(_)));
    }

    #[test]
    fn resolve_path_prefers_existing_files() {
        let (dir, _library) = library_with(&["Hello.lrc"]);
        let path = dir.path().join("Hello.lrc");
        let resolved = resolve_lyrics_path(&path.to_string_lossy(), &Config::default()).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn resolve_path_searches_lyrics_dir() {
        let (dir, _library) = library_with(&["Hello World.lrc"]);
        let mut config = Config::default();
        config.lyrics_dir = Some(dir.path().to_path_buf());
        let resolved = resolve_lyrics_path("hello", &config).unwrap();
        assert_eq!(resolved, dir.path().join("Hello World.lrc"));
    }

    #[test]
    fn resolve_path_without_lyrics_dir_is_a_config_error() {
        let mut config = Config::default();
        config.lyrics_dir = None;
        let err = resolve_lyrics_path("definitely-not-a-file", &config).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
