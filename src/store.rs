//! # Score Store
//!
//! Persists the live counters, the clef settings and the all-time high scores.
//!
//! ## Layers
//! ```text
//! ScoreStore (trait)            load / save / high scores / settings
//!   └── PrefsScoreStore<P>      maps quiz values onto the GamePrefs keys
//!         └── Prefs (trait)     typed key-value access
//!               ├── MemoryPrefs
//!               └── FilePrefs   JSON object on disk
//! ```
//!
//! ## GamePrefs Layout
//! | key                | type   |
//! |--------------------|--------|
//! | `correctAnswers`   | int    |
//! | `wrongAnswers`     | int    |
//! | `currentStreak`    | int    |
//! | `currentNote`      | string |
//! | `trebleClefOnly`   | bool   |
//! | `bassClefOnly`     | bool   |
//! | `highScoreCorrect` | int    |
//! | `highScoreWrong`   | int    |
//! | `highScoreStreak`  | int    |
//!
//! Missing keys fall back to defaults and are never an error: counters 0,
//! note `C4_Treble`, clef mode Both.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_NOTE;
use crate::error::QuizError;
use crate::note::{ClefMode, Note};
use crate::settings::Settings;

type Result<T> = std::result::Result<T, QuizError>;

pub const CORRECT_ANSWERS: &str = "correctAnswers";
pub const WRONG_ANSWERS: &str = "wrongAnswers";
pub const CURRENT_STREAK: &str = "currentStreak";
pub const CURRENT_NOTE: &str = "currentNote";
pub const TREBLE_CLEF_ONLY: &str = "trebleClefOnly";
pub const BASS_CLEF_ONLY: &str = "bassClefOnly";
pub const HIGH_SCORE_CORRECT: &str = "highScoreCorrect";
pub const HIGH_SCORE_WRONG: &str = "highScoreWrong";
pub const HIGH_SCORE_STREAK: &str = "highScoreStreak";

/// A single stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Typed key-value storage in the style of platform preference stores.
///
/// Reads never fail; a missing key or a value of another type yields the default.
pub trait Prefs {
    fn get(&self, key: &str) -> Option<&PrefValue>;
    fn put(&mut self, key: &str, value: PrefValue);

    /// Make pending writes durable.
    fn flush(&mut self) -> Result<()>;

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(PrefValue::Int(v)) => *v,
            _ => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(PrefValue::Bool(v)) => *v,
            _ => default,
        }
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(PrefValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.put(key, PrefValue::Int(value));
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, PrefValue::Bool(value));
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.put(key, PrefValue::Text(value.to_string()));
    }
}

/// Prefs held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prefs for MemoryPrefs {
    fn get(&self, key: &str) -> Option<&PrefValue> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: PrefValue) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Prefs backed by a JSON object on disk.
///
/// The whole file is read on open and rewritten on [`flush`](Prefs::flush).
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
    dirty: bool,
}

impl FilePrefs {
    /// Open the prefs file at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values: BTreeMap<String, PrefValue> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| QuizError::StoreError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
        } else {
            tracing::info!(path = %path.display(), "no prefs file yet, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Prefs for FilePrefs {
    fn get(&self, key: &str) -> Option<&PrefValue> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: PrefValue) {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        self.dirty = false;

        tracing::debug!(path = %self.path.display(), keys = self.values.len(), "prefs flushed");
        Ok(())
    }
}

/// Game state as it was last saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedGame {
    pub correct: u32,
    pub wrong: u32,
    pub streak: u32,
    pub note: Note,
    pub clef_mode: ClefMode,
}

impl Default for SavedGame {
    fn default() -> Self {
        Self {
            correct: 0,
            wrong: 0,
            streak: 0,
            note: DEFAULT_NOTE,
            clef_mode: ClefMode::Both,
        }
    }
}

/// Best values ever seen for each counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScoreRecord {
    pub best_correct: u32,
    pub best_wrong: u32,
    pub best_streak: u32,
}

/// Persistence contract used by the session layer.
pub trait ScoreStore {
    /// Last saved game, or defaults when nothing was saved.
    fn load(&self) -> SavedGame;

    fn save(&mut self, correct: u32, wrong: u32, streak: u32, note: Note);

    fn load_high_scores(&self) -> HighScoreRecord;

    /// Raise each stored high score to the given value if it is larger.
    fn save_high_scores(&mut self, correct: u32, wrong: u32, streak: u32);

    /// Zero the saved live counters. High scores are kept.
    fn reset_scores(&mut self);

    fn load_settings(&self) -> Settings;

    fn save_settings(&mut self, settings: Settings);

    fn flush(&mut self) -> Result<()>;
}

/// [`ScoreStore`] over any [`Prefs`] backend using the GamePrefs keys
#[derive(Debug, Clone, Default)]
pub struct PrefsScoreStore<P: Prefs> {
    prefs: P,
}

impl<P: Prefs> PrefsScoreStore<P> {
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn into_inner(self) -> P {
        self.prefs
    }

    fn get_count(&self, key: &str) -> u32 {
        let raw = self.prefs.get_int(key, 0);
        u32::try_from(raw).unwrap_or_else(|_| {
            tracing::warn!(key, value = raw, "stored counter out of range, using 0");
            0
        })
    }

    fn put_count(&mut self, key: &str, value: u32) {
        self.prefs.put_int(key, i64::from(value));
    }

    fn raise(&mut self, key: &str, value: u32) {
        if value > self.get_count(key) {
            self.put_count(key, value);
        }
    }
}

impl<P: Prefs> ScoreStore for PrefsScoreStore<P> {
    fn load(&self) -> SavedGame {
        let note = match self.prefs.get_string(CURRENT_NOTE) {
            Some(text) => Note::parse(text).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored note");
                DEFAULT_NOTE
            }),
            None => DEFAULT_NOTE,
        };

        SavedGame {
            correct: self.get_count(CORRECT_ANSWERS),
            wrong: self.get_count(WRONG_ANSWERS),
            streak: self.get_count(CURRENT_STREAK),
            note,
            clef_mode: self.load_settings().clef_mode(),
        }
    }

    fn save(&mut self, correct: u32, wrong: u32, streak: u32, note: Note) {
        self.put_count(CORRECT_ANSWERS, correct);
        self.put_count(WRONG_ANSWERS, wrong);
        self.put_count(CURRENT_STREAK, streak);
        self.prefs.put_string(CURRENT_NOTE, &note.to_string());
        tracing::debug!(correct, wrong, streak, note = %note, "game state saved");
    }

    fn load_high_scores(&self) -> HighScoreRecord {
        HighScoreRecord {
            best_correct: self.get_count(HIGH_SCORE_CORRECT),
            best_wrong: self.get_count(HIGH_SCORE_WRONG),
            best_streak: self.get_count(HIGH_SCORE_STREAK),
        }
    }

    fn save_high_scores(&mut self, correct: u32, wrong: u32, streak: u32) {
        self.raise(HIGH_SCORE_CORRECT, correct);
        self.raise(HIGH_SCORE_WRONG, wrong);
        self.raise(HIGH_SCORE_STREAK, streak);
    }

    fn reset_scores(&mut self) {
        self.put_count(CORRECT_ANSWERS, 0);
        self.put_count(WRONG_ANSWERS, 0);
        self.put_count(CURRENT_STREAK, 0);
    }

    fn load_settings(&self) -> Settings {
        Settings {
            treble_clef_only: self.prefs.get_bool(TREBLE_CLEF_ONLY, false),
            bass_clef_only: self.prefs.get_bool(BASS_CLEF_ONLY, false),
        }
    }

    fn save_settings(&mut self, settings: Settings) {
        self.prefs.put_bool(TREBLE_CLEF_ONLY, settings.treble_clef_only);
        self.prefs.put_bool(BASS_CLEF_ONLY, settings.bass_clef_only);
    }

    fn flush(&mut self) -> Result<()> {
        self.prefs.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> PrefsScoreStore<MemoryPrefs> {
        PrefsScoreStore::new(MemoryPrefs::new())
    }

    #[test]
    fn test_load_from_empty_store() {
        let store = memory_store();
        let saved = store.load();
        assert_eq!(saved.correct, 0);
        assert_eq!(saved.wrong, 0);
        assert_eq!(saved.streak, 0);
        assert_eq!(saved.note.to_string(), "C4_Treble");
        assert_eq!(saved.clef_mode, ClefMode::Both);
        assert_eq!(store.load_high_scores(), HighScoreRecord::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = memory_store();
        let note = Note::parse("F3_Bass").unwrap();
        store.save(5, 2, 3, note);

        let saved = store.load();
        assert_eq!((saved.correct, saved.wrong, saved.streak), (5, 2, 3));
        assert_eq!(saved.note, note);
        assert_eq!(store.prefs().get_string(CURRENT_NOTE), Some("F3_Bass"));
    }

    #[test]
    fn test_high_scores_only_increase() {
        let mut store = memory_store();
        store.save_high_scores(10, 4, 6);
        store.save_high_scores(3, 2, 1);
        assert_eq!(
            store.load_high_scores(),
            HighScoreRecord {
                best_correct: 10,
                best_wrong: 4,
                best_streak: 6
            }
        );

        store.save_high_scores(11, 4, 2);
        assert_eq!(
            store.load_high_scores(),
            HighScoreRecord {
                best_correct: 11,
                best_wrong: 4,
                best_streak: 6
            }
        );
    }

    #[test]
    fn test_reset_keeps_high_scores() {
        let mut store = memory_store();
        store.save(7, 1, 4, DEFAULT_NOTE);
        store.save_high_scores(7, 1, 4);
        store.reset_scores();

        let saved = store.load();
        assert_eq!((saved.correct, saved.wrong, saved.streak), (0, 0, 0));
        assert_eq!(store.load_high_scores().best_correct, 7);
    }

    #[test]
    fn test_settings_drive_clef_mode() {
        let mut store = memory_store();
        store.save_settings(Settings::from(ClefMode::Bass));
        assert_eq!(store.load().clef_mode, ClefMode::Bass);
        assert!(store.prefs().get_bool(BASS_CLEF_ONLY, false));
        assert!(!store.prefs().get_bool(TREBLE_CLEF_ONLY, true));
    }

    #[test]
    fn test_bad_stored_values_fall_back_to_defaults() {
        let mut prefs = MemoryPrefs::new();
        prefs.put_int(CORRECT_ANSWERS, -4);
        prefs.put_string(WRONG_ANSWERS, "three");
        prefs.put_string(CURRENT_NOTE, "not a note");
        let store = PrefsScoreStore::new(prefs);

        let saved = store.load();
        assert_eq!(saved.correct, 0);
        assert_eq!(saved.wrong, 0);
        assert_eq!(saved.note, DEFAULT_NOTE);
    }

    #[test]
    fn test_parseable_foreign_note_is_kept() {
        let mut prefs = MemoryPrefs::new();
        prefs.put_string(CURRENT_NOTE, "B4_Treble");
        let store = PrefsScoreStore::new(prefs);
        assert_eq!(store.load().note.to_string(), "B4_Treble");
    }

    #[test]
    fn test_file_prefs_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePrefs::open(dir.path().join("GamePrefs.json")).unwrap();
        assert_eq!(prefs.get_int(CORRECT_ANSWERS, 0), 0);
        assert!(!prefs.path().exists());
    }

    #[test]
    fn test_file_prefs_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("GamePrefs.json");

        let mut store = PrefsScoreStore::new(FilePrefs::open(&path).unwrap());
        store.save(3, 1, 2, Note::parse("D5_Treble").unwrap());
        store.save_high_scores(3, 1, 2);
        store.save_settings(Settings::from(ClefMode::Treble));
        store.flush().unwrap();

        let reopened = PrefsScoreStore::new(FilePrefs::open(&path).unwrap());
        let saved = reopened.load();
        assert_eq!((saved.correct, saved.wrong, saved.streak), (3, 1, 2));
        assert_eq!(saved.note.to_string(), "D5_Treble");
        assert_eq!(saved.clef_mode, ClefMode::Treble);
        assert_eq!(reopened.load_high_scores().best_streak, 2);
    }

    #[test]
    fn test_file_prefs_layout_uses_game_pref_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GamePrefs.json");

        let mut prefs = FilePrefs::open(&path).unwrap();
        prefs.put_int(CORRECT_ANSWERS, 12);
        prefs.put_bool(TREBLE_CLEF_ONLY, true);
        prefs.put_string(CURRENT_NOTE, "C4_Treble");
        prefs.flush().unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["correctAnswers"], 12);
        assert_eq!(json["trebleClefOnly"], true);
        assert_eq!(json["currentNote"], "C4_Treble");
    }

    #[test]
    fn test_failed_flush_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GamePrefs.json");

        let mut prefs = FilePrefs::open(&path).unwrap();
        prefs.put_int(CORRECT_ANSWERS, 5);
        // A directory in the way makes the final rename fail.
        fs::create_dir(&path).unwrap();

        assert!(prefs.flush().is_err());
        assert!(!dir.path().join("GamePrefs.json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_file_prefs_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GamePrefs.json");
        fs::write(&path, "{ not json").unwrap();

        let result = FilePrefs::open(&path);
        assert!(matches!(result, Err(QuizError::StoreError { .. })));
    }
}
