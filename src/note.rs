//! # Note Types
//!
//! Structured value types for the notes the quiz shows.
//!
//! ## Type Hierarchy
//! ```text
//! Note
//!   ├── letter: Letter (A-G, naturals only)
//!   ├── octave: u8
//!   └── clef: Clef (Treble | Bass)
//!
//! KeyIndex (0-11, chromatic position within one octave)
//! ClefMode (Treble | Bass | Both, filters which notes are quizzed)
//! ```
//!
//! ## Identifier Format
//! Notes travel through the store and the host as identifiers of the form
//! `{Letter}{Octave}_{Clef}`, e.g. `C4_Treble` or `A3_Bass`. [`Note::parse`] and the
//! `Display` impl are exact inverses, and serde uses the same text form.
//!
//! ## Key Indices
//! ```text
//! C  C# D  D# E  F  F# G  G# A  A# B
//! 0  1  2  3  4  5  6  7  8  9  10 11
//! ```
//! Only the white keys are reachable from a [`Letter`]; there are no sharps in the
//! catalog, so 1, 3, 6, 8 and 10 never match.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::QuizError;

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Letter {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Parse a letter, accepting either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Semitone offset from C, i.e. the white key this letter is played on.
    pub fn key_index(self) -> KeyIndex {
        let semitone = match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        };
        KeyIndex(semitone)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Clef a note is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clef {
    Treble,
    Bass,
}

impl Clef {
    pub fn as_str(self) -> &'static str {
        match self {
            Clef::Treble => "Treble",
            Clef::Bass => "Bass",
        }
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which clefs the quiz draws notes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClefMode {
    Treble,
    Bass,
    #[default]
    Both,
}

impl ClefMode {
    /// Whether a note written in `clef` may be quizzed under this mode.
    pub fn admits(self, clef: Clef) -> bool {
        match self {
            ClefMode::Treble => clef == Clef::Treble,
            ClefMode::Bass => clef == Clef::Bass,
            ClefMode::Both => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClefMode::Treble => "Treble",
            ClefMode::Bass => "Bass",
            ClefMode::Both => "Both",
        }
    }
}

impl fmt::Display for ClefMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClefMode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "treble" => Ok(ClefMode::Treble),
            "bass" => Ok(ClefMode::Bass),
            "both" => Ok(ClefMode::Both),
            _ => Err(QuizError::InvalidClefMode(s.to_string())),
        }
    }
}

/// Chromatic key position within one octave (0 = C, 11 = B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyIndex(u8);

impl KeyIndex {
    /// Validate a key typed or tapped by the host.
    pub fn new(value: i64) -> Result<Self, QuizError> {
        if (0..12).contains(&value) {
            Ok(KeyIndex(value as u8))
        } else {
            Err(QuizError::InvalidKey(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A natural note at a given octave, written in a given clef
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub letter: Letter,
    pub octave: u8,
    pub clef: Clef,
}

impl Note {
    pub const fn new(letter: Letter, octave: u8, clef: Clef) -> Self {
        Self {
            letter,
            octave,
            clef,
        }
    }

    /// Parse an identifier such as `"C4_Treble"`.
    ///
    /// # Example
    /// ```
    /// use notequiz::{Clef, Letter, Note};
    ///
    /// let note = Note::parse("A3_Bass").unwrap();
    /// assert_eq!(note, Note::new(Letter::A, 3, Clef::Bass));
    /// assert_eq!(note.to_string(), "A3_Bass");
    /// ```
    pub fn parse(s: &str) -> Result<Self, QuizError> {
        let invalid = || QuizError::InvalidNote(s.to_string());

        let (pitch, clef) = s.split_once('_').ok_or_else(invalid)?;
        let clef = match clef {
            "Treble" => Clef::Treble,
            "Bass" => Clef::Bass,
            _ => return Err(invalid()),
        };

        let mut chars = pitch.chars();
        let letter = chars
            .next()
            .filter(|c| c.is_ascii_uppercase())
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;

        let octave = chars.as_str();
        // No leading zeros, so every identifier has exactly one spelling.
        if octave.is_empty()
            || !octave.chars().all(|c| c.is_ascii_digit())
            || (octave.len() > 1 && octave.starts_with('0'))
        {
            return Err(invalid());
        }
        let octave: u8 = octave.parse().map_err(|_| invalid())?;

        Ok(Self::new(letter, octave, clef))
    }

    /// The key this note is answered with.
    pub fn key_index(&self) -> KeyIndex {
        self.letter.key_index()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}_{}", self.letter, self.octave, self.clef)
    }
}

impl FromStr for Note {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::parse(s)
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Note::parse(&text).map_err(de::Error::custom)
    }
}
