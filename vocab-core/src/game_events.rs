use vocab_types::{GameType, SessionId, WordId};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WordsUpdated {
        word_count: usize,
    },
    GameStarted {
        session_id: SessionId,
        game_type: GameType,
        word_count: usize,
    },
    StartRejected {
        game_type: GameType,
        required: usize,
        available: usize,
    },
    GameStopped {
        session_id: SessionId,
        game_type: GameType,
    },
    CardFlipped {
        session_id: SessionId,
        position: usize,
        showing_back: bool,
    },
    QuestionAsked {
        session_id: SessionId,
        question_number: u32,
    },
    QuizAnswered {
        session_id: SessionId,
        question_number: u32,
        correct: bool,
        score: u32,
    },
    PairMatched {
        session_id: SessionId,
        pair_key: WordId,
        moves: u32,
    },
    PairMismatched {
        session_id: SessionId,
        moves: u32,
    },
    MemoryVictory {
        session_id: SessionId,
        moves: u32,
    },
    TypingChecked {
        session_id: SessionId,
        correct: bool,
        streak: u32,
    },
    /// A timer outlived the session that scheduled it and was dropped.
    StaleTimerIgnored {
        token: u64,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            GameEvent::GameStarted { session_id, .. }
            | GameEvent::GameStopped { session_id, .. }
            | GameEvent::CardFlipped { session_id, .. }
            | GameEvent::QuestionAsked { session_id, .. }
            | GameEvent::QuizAnswered { session_id, .. }
            | GameEvent::PairMatched { session_id, .. }
            | GameEvent::PairMismatched { session_id, .. }
            | GameEvent::MemoryVictory { session_id, .. }
            | GameEvent::TypingChecked { session_id, .. } => Some(*session_id),
            GameEvent::WordsUpdated { .. }
            | GameEvent::StartRejected { .. }
            | GameEvent::StaleTimerIgnored { .. } => None,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
