//! # Error Types
//!
//! This module defines all error types for the note quiz.
//!
//! The quiz engine itself never fails: key presses are total (any mismatch is a
//! wrong answer) and catalog lookups are total over the structured [`Note`] type.
//! Errors only appear at the boundaries where text or files come in.
//!
//! ## Error Types
//! - `InvalidNote` - a note identifier like `"C4_Treble"` that does not parse
//! - `InvalidClefMode` - a clef mode other than Treble, Bass or Both
//! - `InvalidKey` - a key index outside 0-11 typed by the host
//! - `StoreError` - the prefs file exists but could not be used
//! - `Io` / `Serialization` - raw I/O and JSON failures from the prefs file
//! - `ConfigError` - invalid YAML configuration
//!
//! ## Usage
//! ```rust
//! use notequiz::{Note, QuizError};
//!
//! match "H4_Treble".parse::<Note>() {
//!     Ok(note) => println!("Parsed {}", note),
//!     Err(QuizError::InvalidNote(text)) => eprintln!("Not a note: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`Note`]: crate::note::Note

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    /// Note identifier that is not `{A-G}{octave}_{Treble|Bass}`.
    ///
    /// # Example
    /// ```
    /// # use notequiz::QuizError;
    /// let err = QuizError::InvalidNote("C#4_Treble".to_string());
    /// assert_eq!(err.to_string(), "Invalid note identifier: C#4_Treble");
    /// ```
    #[error("Invalid note identifier: {0}")]
    InvalidNote(String),

    /// Clef mode text that is not Treble, Bass or Both.
    ///
    /// # Example
    /// ```
    /// # use notequiz::QuizError;
    /// let err = QuizError::InvalidClefMode("Alto".to_string());
    /// assert_eq!(err.to_string(), "Invalid clef mode: Alto (expected Treble, Bass or Both)");
    /// ```
    #[error("Invalid clef mode: {0} (expected Treble, Bass or Both)")]
    InvalidClefMode(String),

    /// Key index outside the twelve keys of one octave.
    #[error("Invalid key index: {0} (expected 0-11)")]
    InvalidKey(i64),

    /// Persistent store could not be read or written.
    #[error("Store error at {path}: {message}")]
    StoreError { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration file.
    ///
    /// # Example
    /// ```
    /// # use notequiz::QuizError;
    /// let err = QuizError::ConfigError("log-level must be one of error, warn, info, debug, trace".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid configuration: log-level must be one of error, warn, info, debug, trace"
    /// );
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
