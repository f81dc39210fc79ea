pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod note;
pub mod session;
pub mod settings;
pub mod store;

pub use catalog::{all_notes, key_index_of, notes_for_clef, DEFAULT_NOTE};
pub use config::Config;
pub use engine::{Event, Outcome, QuizEngine, QuizState};
pub use error::*;
pub use note::{Clef, ClefMode, KeyIndex, Letter, Note};
pub use session::{Scoreboard, Session, Stats};
pub use settings::Settings;
pub use store::{
    FilePrefs, HighScoreRecord, MemoryPrefs, Prefs, PrefsScoreStore, SavedGame, ScoreStore,
};

/// Session over the file-backed store named in `config`.
pub type FileSession = Session<PrefsScoreStore<FilePrefs>>;

/// Open the store from `config` and resume the saved game.
/// This is the main entry point for hosts.
pub fn open_session(config: &Config) -> Result<FileSession, QuizError> {
    let prefs = FilePrefs::open(&config.store_path)?;
    let engine = match config.seed {
        Some(seed) => QuizEngine::with_seed(seed),
        None => QuizEngine::new(),
    };

    let mut session = Session::new(PrefsScoreStore::new(prefs), engine);
    session.resume();
    if let Some(mode) = config.clef_mode {
        session.set_clef_mode(mode);
    }
    Ok(session)
}
