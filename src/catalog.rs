//! # Note Catalog
//!
//! The fixed set of notes the quiz can show, one entry per note image.
//!
//! Bass notes run C2 up to E4 and treble notes run C4 up to C6, white keys only.
//! Octave numbers follow the labels of the note images: within a clef the
//! octave number steps up at A, so `G2_Bass` is followed by `A3_Bass`.
//! There are no sharps or flats, so every catalog entry resolves to one of the
//! seven white-key indices `{0, 2, 4, 5, 7, 9, 11}`.

use crate::note::{Clef, ClefMode, KeyIndex, Letter, Note};

/// Note shown before anything has been selected or restored.
pub const DEFAULT_NOTE: Note = Note::new(Letter::C, 4, Clef::Treble);

const fn bass(letter: Letter, octave: u8) -> Note {
    Note::new(letter, octave, Clef::Bass)
}

const fn treble(letter: Letter, octave: u8) -> Note {
    Note::new(letter, octave, Clef::Treble)
}

static CATALOG: [Note; 33] = [
    bass(Letter::C, 2),
    bass(Letter::D, 2),
    bass(Letter::E, 2),
    bass(Letter::F, 2),
    bass(Letter::G, 2),
    bass(Letter::A, 3),
    bass(Letter::B, 3),
    bass(Letter::C, 3),
    bass(Letter::D, 3),
    bass(Letter::E, 3),
    bass(Letter::F, 3),
    bass(Letter::G, 3),
    bass(Letter::A, 4),
    bass(Letter::B, 4),
    bass(Letter::C, 4),
    bass(Letter::D, 4),
    bass(Letter::E, 4),
    treble(Letter::A, 4),
    treble(Letter::C, 4),
    treble(Letter::D, 4),
    treble(Letter::E, 4),
    treble(Letter::F, 4),
    treble(Letter::G, 4),
    treble(Letter::A, 5),
    treble(Letter::B, 5),
    treble(Letter::C, 5),
    treble(Letter::D, 5),
    treble(Letter::E, 5),
    treble(Letter::F, 5),
    treble(Letter::G, 5),
    treble(Letter::A, 6),
    treble(Letter::B, 6),
    treble(Letter::C, 6),
];

/// All 33 quizzable notes.
pub fn all_notes() -> &'static [Note] {
    &CATALOG
}

/// The notes a quiz in `mode` may draw from.
pub fn notes_for_clef(mode: ClefMode) -> Vec<Note> {
    CATALOG
        .iter()
        .copied()
        .filter(|note| mode.admits(note.clef))
        .collect()
}

/// Key the user must press for `note`.
pub fn key_index_of(note: &Note) -> KeyIndex {
    note.key_index()
}

pub fn contains(note: &Note) -> bool {
    CATALOG.contains(note)
}
