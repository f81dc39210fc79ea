//! Clef practice settings.
//!
//! Two toggles, "treble clef only" and "bass clef only", that can never both be on.

use crate::note::ClefMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub treble_clef_only: bool,
    pub bass_clef_only: bool,
}

impl Settings {
    /// Flip the treble toggle. Turning it on turns bass off.
    pub fn toggle_treble(&mut self) {
        if self.treble_clef_only {
            self.treble_clef_only = false;
        } else {
            self.treble_clef_only = true;
            self.bass_clef_only = false;
        }
    }

    /// Flip the bass toggle. Turning it on turns treble off.
    pub fn toggle_bass(&mut self) {
        if self.bass_clef_only {
            self.bass_clef_only = false;
        } else {
            self.bass_clef_only = true;
            self.treble_clef_only = false;
        }
    }

    /// Treble wins if a hand-edited store has both toggles set.
    pub fn clef_mode(&self) -> ClefMode {
        if self.treble_clef_only {
            ClefMode::Treble
        } else if self.bass_clef_only {
            ClefMode::Bass
        } else {
            ClefMode::Both
        }
    }
}

impl From<ClefMode> for Settings {
    fn from(mode: ClefMode) -> Self {
        Self {
            treble_clef_only: mode == ClefMode::Treble,
            bass_clef_only: mode == ClefMode::Bass,
        }
    }
}
