use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::{Language, WordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameType {
    Flashcards,
    Quiz,
    Memory,
    Typing,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        GameType::Flashcards,
        GameType::Quiz,
        GameType::Memory,
        GameType::Typing,
    ];

    /// Quiz needs one target plus three distractors; memory and typing share
    /// the same floor.
    pub fn min_words(self) -> usize {
        match self {
            GameType::Flashcards => 1,
            GameType::Quiz | GameType::Memory | GameType::Typing => 4,
        }
    }

    pub fn uses_keyboard(self) -> bool {
        matches!(self, GameType::Flashcards)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Flashcards => "flashcards",
            GameType::Quiz => "quiz",
            GameType::Memory => "memory",
            GameType::Typing => "typing",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flashcards" | "flashcard" => Ok(GameType::Flashcards),
            "quiz" => Ok(GameType::Quiz),
            "memory" => Ok(GameType::Memory),
            "typing" => Ok(GameType::Typing),
            other => Err(format!("Unknown game: {}", other)),
        }
    }
}

/// What the single display region currently shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HostView {
    Selection,
    Playing(SessionView),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionView {
    Flashcard(FlashcardView),
    Quiz(QuizView),
    Memory(MemoryView),
    Typing(TypingView),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlashcardView {
    pub flipped: bool,
    /// Empty until the delayed content update has landed.
    pub front: String,
    pub back: String,
    pub example: String,
    pub counter: String,
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OptionMark {
    Open,
    Correct,
    Wrong,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizOption {
    pub word: WordId,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizView {
    pub score: u32,
    pub question_number: u32,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub answered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CardState {
    Hidden,
    Revealed,
    /// Part of a mismatched pair, waiting to be hidden again.
    Incorrect,
    Matched,
}

impl CardState {
    pub fn is_face_up(self) -> bool {
        !matches!(self, CardState::Hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemoryCardView {
    /// `None` while the card is face down.
    #[ts(optional)]
    pub text: Option<String>,
    pub language: Language,
    pub state: CardState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemoryView {
    pub cards: Vec<MemoryCardView>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub locked: bool,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TypingFeedback {
    Correct,
    Incorrect { answer: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TypingView {
    pub prompt: String,
    pub streak: u32,
    pub input: String,
    #[ts(optional)]
    pub feedback: Option<TypingFeedback>,
}
