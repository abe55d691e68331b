use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Input forwarded from the display layer to the mounted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum UserAction {
    Flip,
    Next,
    Previous,
    Answer { option: usize },
    RevealCard { index: usize },
    SubmitAnswer { text: String },
    Hint,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::Flip => "flip",
            UserAction::Next => "next",
            UserAction::Previous => "previous",
            UserAction::Answer { .. } => "answer",
            UserAction::RevealCard { .. } => "reveal_card",
            UserAction::SubmitAnswer { .. } => "submit_answer",
            UserAction::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Other,
}
