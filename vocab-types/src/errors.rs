use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::GameType;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("Not enough words for this game! Please select a lesson with more words.")]
    NotEnoughWords {
        game: GameType,
        required: usize,
        available: usize,
    },
    #[error("cannot sample {requested} distinct words from {available} candidates")]
    SamplingExhausted { requested: usize, available: usize },
    #[error("selection {index} is out of range (0..{len})")]
    InvalidSelection { index: usize, len: usize },
    #[error("no game is running")]
    NoActiveGame,
    #[error("{action} is not supported by {game}")]
    ActionNotSupported { game: GameType, action: String },
}
