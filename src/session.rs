//! # Quiz Session
//!
//! Caller-owned glue between a presentation host, the [`QuizEngine`] and a
//! [`ScoreStore`].
//!
//! ## Lifecycle
//! ```text
//! resume()  -> settings + saved game restored, fresh note drawn
//! key_pressed(k) -> scored, high scores raised, next note drawn
//! suspend() -> game state and high scores written and flushed
//! ```
//!
//! The engine never advances on its own; the session draws the next note after
//! every answer, on resume, on restart and whenever the clef mode changes.
//!
//! ## Example
//! ```rust
//! use notequiz::{MemoryPrefs, PrefsScoreStore, QuizEngine, Session};
//!
//! let store = PrefsScoreStore::new(MemoryPrefs::new());
//! let mut session = Session::new(store, QuizEngine::with_seed(1));
//!
//! let board = session.resume();
//! assert_eq!(board.correct, 0);
//!
//! let key = i32::from(board.note.key_index().value());
//! assert!(session.key_pressed(key).is_correct());
//! session.suspend()?;
//! # Ok::<(), notequiz::QuizError>(())
//! ```

use std::fmt;

use crate::engine::{Outcome, QuizEngine};
use crate::error::QuizError;
use crate::note::{ClefMode, Note};
use crate::settings::Settings;
use crate::store::{HighScoreRecord, ScoreStore};

/// What the quiz screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub note: Note,
    pub correct: u32,
    pub wrong: u32,
    pub streak: u32,
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correct: {}", self.correct)?;
        writeln!(f, "Incorrect: {}", self.wrong)?;
        write!(f, "Streak: {}", self.streak)
    }
}

/// What the stats screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats(pub HighScoreRecord);

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Highest correct: {}", self.0.best_correct)?;
        writeln!(f, "Highest incorrect: {}", self.0.best_wrong)?;
        write!(f, "Longest streak: {}", self.0.best_streak)
    }
}

pub struct Session<S: ScoreStore> {
    store: S,
    engine: QuizEngine,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(store: S, engine: QuizEngine) -> Self {
        Self { store, engine }
    }

    /// Restore settings and the saved game, then draw a fresh note.
    pub fn resume(&mut self) -> Scoreboard {
        let saved = self.store.load();
        self.engine.set_clef_mode(saved.clef_mode);
        self.engine
            .restore_state(saved.correct, saved.wrong, saved.streak, saved.note);
        tracing::info!(
            correct = saved.correct,
            wrong = saved.wrong,
            streak = saved.streak,
            note = %saved.note,
            clef_mode = %saved.clef_mode,
            "session resumed"
        );

        self.engine.next_note();
        self.scoreboard()
    }

    /// Score a key press and move on to the next note.
    pub fn key_pressed(&mut self, key: i32) -> Outcome {
        let outcome = self.engine.submit_key_press(key);
        self.store.save_high_scores(
            self.engine.correct_count(),
            self.engine.wrong_count(),
            self.engine.current_streak(),
        );
        self.engine.next_note();
        outcome
    }

    /// Draw a new note without answering the current one.
    pub fn next_note(&mut self) -> Note {
        self.engine.next_note()
    }

    /// Persist the game state and high scores.
    pub fn suspend(&mut self) -> Result<(), QuizError> {
        let state = self.engine.state();
        self.store
            .save(state.correct, state.wrong, state.streak, state.current_note);
        self.store
            .save_high_scores(state.correct, state.wrong, state.streak);
        self.store.flush()?;
        tracing::info!(
            correct = state.correct,
            wrong = state.wrong,
            streak = state.streak,
            "session suspended"
        );
        Ok(())
    }

    /// Zero the counters, in memory and in the store, and draw a new note.
    pub fn restart(&mut self) -> Result<Scoreboard, QuizError> {
        self.store.reset_scores();
        self.store.flush()?;
        self.engine.restart();
        self.engine.next_note();
        tracing::info!("score counters restarted");
        Ok(self.scoreboard())
    }

    /// Persist a new clef mode and draw a note that matches it.
    pub fn set_clef_mode(&mut self, mode: ClefMode) -> Note {
        self.apply_settings(Settings::from(mode))
    }

    pub fn toggle_treble_only(&mut self) -> Settings {
        let mut settings = self.store.load_settings();
        settings.toggle_treble();
        self.apply_settings(settings);
        settings
    }

    pub fn toggle_bass_only(&mut self) -> Settings {
        let mut settings = self.store.load_settings();
        settings.toggle_bass();
        self.apply_settings(settings);
        settings
    }

    fn apply_settings(&mut self, settings: Settings) -> Note {
        self.store.save_settings(settings);
        self.engine.set_clef_mode(settings.clef_mode());
        self.engine.next_note()
    }

    pub fn settings(&self) -> Settings {
        self.store.load_settings()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let state = self.engine.state();
        Scoreboard {
            note: state.current_note,
            correct: state.correct,
            wrong: state.wrong,
            streak: state.streak,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats(self.store.load_high_scores())
    }

    pub fn current_note(&self) -> Note {
        self.engine.current_note()
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Clef;
    use crate::store::{MemoryPrefs, Prefs, PrefsScoreStore, CORRECT_ANSWERS, CURRENT_STREAK};

    fn session() -> Session<PrefsScoreStore<MemoryPrefs>> {
        Session::new(
            PrefsScoreStore::new(MemoryPrefs::new()),
            QuizEngine::with_seed(21),
        )
    }

    fn answer(session: &Session<PrefsScoreStore<MemoryPrefs>>) -> i32 {
        i32::from(session.current_note().key_index().value())
    }

    #[test]
    fn test_resume_on_empty_store() {
        let mut session = session();
        let board = session.resume();
        assert_eq!((board.correct, board.wrong, board.streak), (0, 0, 0));
        assert_eq!(session.engine().clef_mode(), ClefMode::Both);
    }

    #[test]
    fn test_key_pressed_at_counter_limit() {
        let mut prefs = MemoryPrefs::new();
        prefs.put_int(CORRECT_ANSWERS, i64::from(u32::MAX));
        prefs.put_int(CURRENT_STREAK, i64::from(u32::MAX));
        let mut session = Session::new(PrefsScoreStore::new(prefs), QuizEngine::with_seed(21));
        session.resume();

        let key = answer(&session);
        assert_eq!(
            session.key_pressed(key),
            Outcome::Correct {
                correct: u32::MAX,
                streak: u32::MAX
            }
        );
        assert_eq!(session.stats().0.best_streak, u32::MAX);
    }

    #[test]
    fn test_key_pressed_raises_high_scores_and_advances() {
        let mut session = session();
        session.resume();

        for _ in 0..3 {
            let key = answer(&session);
            assert!(session.key_pressed(key).is_correct());
        }
        session.key_pressed(-1);

        let stats = session.stats();
        assert_eq!(stats.0.best_correct, 3);
        assert_eq!(stats.0.best_wrong, 1);
        assert_eq!(stats.0.best_streak, 3);
        assert_eq!(session.scoreboard().streak, 0);
    }

    #[test]
    fn test_suspend_and_resume_in_new_session() {
        let mut first = session();
        first.resume();
        let key = answer(&first);
        first.key_pressed(key);
        first.key_pressed(-1);
        let note = first.current_note();
        first.suspend().unwrap();

        let mut second = Session::new(first.into_store(), QuizEngine::with_seed(22));
        let board = second.resume();
        assert_eq!((board.correct, board.wrong, board.streak), (1, 1, 0));
        assert_eq!(second.store().load().note, note);
    }

    #[test]
    fn test_restart_keeps_high_scores() {
        let mut session = session();
        session.resume();
        let key = answer(&session);
        session.key_pressed(key);
        session.suspend().unwrap();

        let board = session.restart().unwrap();
        assert_eq!((board.correct, board.wrong, board.streak), (0, 0, 0));
        assert_eq!(session.store().load().correct, 0);
        assert_eq!(session.stats().0.best_correct, 1);
    }

    #[test]
    fn test_set_clef_mode_persists_and_redraws() {
        let mut session = session();
        session.resume();
        let note = session.set_clef_mode(ClefMode::Bass);
        assert_eq!(note.clef, Clef::Bass);
        assert_eq!(session.settings().clef_mode(), ClefMode::Bass);

        for _ in 0..100 {
            session.key_pressed(0);
            assert_eq!(session.current_note().clef, Clef::Bass);
        }
    }

    #[test]
    fn test_toggles() {
        let mut session = session();
        session.resume();

        let settings = session.toggle_treble_only();
        assert_eq!(settings.clef_mode(), ClefMode::Treble);
        assert_eq!(session.current_note().clef, Clef::Treble);

        let settings = session.toggle_bass_only();
        assert!(!settings.treble_clef_only);
        assert_eq!(session.engine().clef_mode(), ClefMode::Bass);

        let settings = session.toggle_bass_only();
        assert_eq!(settings.clef_mode(), ClefMode::Both);
    }

    #[test]
    fn test_display_text() {
        let board = Scoreboard {
            note: crate::catalog::DEFAULT_NOTE,
            correct: 4,
            wrong: 2,
            streak: 1,
        };
        assert_eq!(board.to_string(), "Correct: 4\nIncorrect: 2\nStreak: 1");

        let stats = Stats(HighScoreRecord {
            best_correct: 9,
            best_wrong: 3,
            best_streak: 5,
        });
        assert_eq!(
            stats.to_string(),
            "Highest correct: 9\nHighest incorrect: 3\nLongest streak: 5"
        );
    }
}
