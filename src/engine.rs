//! # Quiz Engine
//!
//! Owns the live quiz state and is the only thing allowed to change it.
//!
//! ## State
//! ```text
//! QuizState
//!   ├── current_note: Note
//!   ├── correct / wrong: u32
//!   ├── streak: u32 (reset to 0 by any wrong answer)
//!   └── clef_mode: ClefMode
//! ```
//!
//! ## Reducer
//! Besides the individual operations, [`QuizEngine::apply`] accepts an [`Event`]
//! so a host can drive the engine as `(state, event) -> (state, outcome)`.
//!
//! ## Advancing
//! Answering never picks a new note by itself. The caller decides when to call
//! [`QuizEngine::next_note`]; the session layer does so after every answer.
//!
//! ## Example
//! ```rust
//! use notequiz::{ClefMode, Outcome, QuizEngine};
//!
//! let mut engine = QuizEngine::with_seed(7);
//! let note = engine.start(ClefMode::Treble);
//!
//! let outcome = engine.submit_key_press(i32::from(note.key_index().value()));
//! assert_eq!(outcome, Outcome::Correct { correct: 1, streak: 1 });
//! ```

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::catalog::{self, DEFAULT_NOTE};
use crate::note::{ClefMode, Note};

/// Result of a single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Key matched the current note
    Correct { correct: u32, streak: u32 },
    /// Key did not match; the streak is always 0 here
    Wrong { wrong: u32, streak: u32 },
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct { .. })
    }
}

/// Inputs the engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyPress(i32),
    SetClef(ClefMode),
    NextNote,
    Restart,
    Restore {
        correct: u32,
        wrong: u32,
        streak: u32,
        note: Note,
    },
}

/// Snapshot of the live quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizState {
    pub current_note: Note,
    pub correct: u32,
    pub wrong: u32,
    pub streak: u32,
    pub clef_mode: ClefMode,
}

impl Default for QuizState {
    fn default() -> Self {
        Self {
            current_note: DEFAULT_NOTE,
            correct: 0,
            wrong: 0,
            streak: 0,
            clef_mode: ClefMode::Both,
        }
    }
}

pub struct QuizEngine {
    state: QuizState,
    rng: StdRng,
}

impl QuizEngine {
    /// Engine seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine with a reproducible note sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: QuizState::default(),
            rng,
        }
    }

    /// Reset the counters, switch to `clef_mode` and pick a first note.
    pub fn start(&mut self, clef_mode: ClefMode) -> Note {
        self.state.clef_mode = clef_mode;
        self.restart();
        self.next_note()
    }

    /// Change which clefs are drawn from. The note on display stays until the
    /// next call to [`next_note`](Self::next_note).
    pub fn set_clef_mode(&mut self, mode: ClefMode) {
        tracing::debug!(mode = %mode, "clef mode changed");
        self.state.clef_mode = mode;
    }

    /// Pick a note uniformly at random from the current clef mode. Repeats are allowed.
    pub fn next_note(&mut self) -> Note {
        let candidates = catalog::notes_for_clef(self.state.clef_mode);
        let note = candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(self.state.current_note);
        self.state.current_note = note;
        note
    }

    /// Score a key press against the current note.
    ///
    /// Any key that is not the current note's index counts as wrong, including
    /// black keys and values outside 0-11.
    pub fn submit_key_press(&mut self, key: i32) -> Outcome {
        let expected = catalog::key_index_of(&self.state.current_note);
        if key == i32::from(expected.value()) {
            self.state.correct = self.state.correct.saturating_add(1);
            self.state.streak = self.state.streak.saturating_add(1);
            tracing::debug!(
                note = %self.state.current_note,
                correct = self.state.correct,
                streak = self.state.streak,
                "correct answer"
            );
            Outcome::Correct {
                correct: self.state.correct,
                streak: self.state.streak,
            }
        } else {
            self.state.wrong = self.state.wrong.saturating_add(1);
            self.state.streak = 0;
            tracing::debug!(
                note = %self.state.current_note,
                key,
                expected = expected.value(),
                wrong = self.state.wrong,
                "wrong answer"
            );
            Outcome::Wrong {
                wrong: self.state.wrong,
                streak: self.state.streak,
            }
        }
    }

    /// Zero the counters. Clef mode and current note are left alone.
    pub fn restart(&mut self) {
        self.state.correct = 0;
        self.state.wrong = 0;
        self.state.streak = 0;
    }

    /// Overwrite the counters and note with previously saved values.
    ///
    /// The note is taken as is, even if it is not in the catalog or does not
    /// match the clef mode.
    pub fn restore_state(&mut self, correct: u32, wrong: u32, streak: u32, note: Note) {
        self.state.correct = correct;
        self.state.wrong = wrong;
        self.state.streak = streak;
        self.state.current_note = note;
    }

    /// Apply a single event.
    pub fn apply(&mut self, event: Event) -> Option<Outcome> {
        match event {
            Event::KeyPress(key) => Some(self.submit_key_press(key)),
            Event::SetClef(mode) => {
                self.set_clef_mode(mode);
                None
            }
            Event::NextNote => {
                self.next_note();
                None
            }
            Event::Restart => {
                self.restart();
                None
            }
            Event::Restore {
                correct,
                wrong,
                streak,
                note,
            } => {
                self.restore_state(correct, wrong, streak, note);
                None
            }
        }
    }

    pub fn correct_count(&self) -> u32 {
        self.state.correct
    }

    pub fn wrong_count(&self) -> u32 {
        self.state.wrong
    }

    pub fn current_streak(&self) -> u32 {
        self.state.streak
    }

    pub fn current_note(&self) -> Note {
        self.state.current_note
    }

    pub fn clef_mode(&self) -> ClefMode {
        self.state.clef_mode
    }

    pub fn state(&self) -> QuizState {
        self.state
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}
