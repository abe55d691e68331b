use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use vocab_core::GameTimings;

const DEFAULT_DATABASE_FILES: &str = "database 1-4.json,database 5-10.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("VOCAB_DATABASE_FILES lists no files")]
    NoDatabaseFiles,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_files: Vec<PathBuf>,
    pub timings: GameTimings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let files = lookup("VOCAB_DATABASE_FILES")
            .unwrap_or_else(|| DEFAULT_DATABASE_FILES.to_string());
        let database_files: Vec<PathBuf> = files
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(PathBuf::from)
            .collect();
        if database_files.is_empty() {
            return Err(ConfigError::NoDatabaseFiles);
        }

        let defaults = GameTimings::default();
        let millis = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidNumber { var, value }),
            }
        };

        let timings = GameTimings {
            flashcard_reveal: millis("VOCAB_FLIP_DELAY_MS", defaults.flashcard_reveal)?,
            quiz_advance: millis("VOCAB_QUIZ_DELAY_MS", defaults.quiz_advance)?,
            memory_mismatch: millis("VOCAB_MISMATCH_DELAY_MS", defaults.memory_mismatch)?,
            memory_victory: millis("VOCAB_VICTORY_DELAY_MS", defaults.memory_victory)?,
            typing_advance: millis("VOCAB_TYPING_DELAY_MS", defaults.typing_advance)?,
        };

        Ok(Self {
            database_files,
            timings,
        })
    }
}
