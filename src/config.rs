//! Host configuration, read from a YAML file.
//!
//! ```yaml
//! store-path: ~/.local/share/notequiz/GamePrefs.json
//! clef-mode: Bass
//! seed: 42
//! log-level: debug
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::QuizError;
use crate::note::ClefMode;

pub const DEFAULT_STORE_PATH: &str = "notequiz.json";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub store_path: Option<String>,
    pub clef_mode: Option<String>,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store_path: PathBuf,
    /// Overrides the stored clef settings at startup when set
    pub clef_mode: Option<ClefMode>,
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            clef_mode: None,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self, QuizError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(source).map_err(|e| QuizError::ConfigError(e.to_string()))?;
        Self::try_from(raw)
    }

    pub fn load(path: &Path) -> Result<Self, QuizError> {
        let source = fs::read_to_string(path).map_err(|e| {
            QuizError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&source)
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = QuizError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let defaults = Config::default();

        let clef_mode = match raw.clef_mode {
            Some(text) => Some(text.parse::<ClefMode>().map_err(|_| {
                QuizError::ConfigError(format!(
                    "clef-mode must be Treble, Bass or Both, got '{}'",
                    text
                ))
            })?),
            None => None,
        };

        let log_level = match raw.log_level {
            Some(level) => {
                let level = level.trim().to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(QuizError::ConfigError(format!(
                        "log-level must be one of {}, got '{}'",
                        LOG_LEVELS.join(", "),
                        level
                    )));
                }
                level
            }
            None => defaults.log_level,
        };

        Ok(Config {
            store_path: raw.store_path.map(PathBuf::from).unwrap_or(defaults.store_path),
            clef_mode,
            seed: raw.seed,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_config() {
        let source = r#"
store-path: /tmp/quiz/GamePrefs.json
clef-mode: bass
seed: 42
log-level: DEBUG
"#;
        let config = Config::from_yaml(source).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/quiz/GamePrefs.json"));
        assert_eq!(config.clef_mode, Some(ClefMode::Bass));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_clef_mode() {
        let result = Config::from_yaml("clef-mode: alto");
        assert!(result.is_err());
        if let Err(QuizError::ConfigError(message)) = result {
            assert!(message.contains("clef-mode"));
        }
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(matches!(
            Config::from_yaml("log-level: loud"),
            Err(QuizError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_yaml("volume: 11").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(QuizError::ConfigError(_))));
    }
}
