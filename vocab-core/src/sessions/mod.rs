pub mod flashcard;
pub mod memory;
pub mod quiz;
pub mod typing;

pub use flashcard::FlashcardSession;
pub use memory::{MEMORY_PAIRS, MemoryCard, MemorySession};
pub use quiz::{QUIZ_OPTIONS, QuizSession};
pub use typing::TypingSession;

use std::time::Duration;

use tracing::debug;
use vocab_types::{GameError, GameType, Key, SessionId, SessionView, UserAction};

use crate::{
    GameEvent, GameEventBus, KeyboardSubscription, RandomSource, SessionToken, TimerKind,
    TimerQueue, WordPool,
};

/// Pacing delays. None of them affect correctness, only when the display
/// catches up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTimings {
    pub flashcard_reveal: Duration,
    pub quiz_advance: Duration,
    pub memory_mismatch: Duration,
    pub memory_victory: Duration,
    pub typing_advance: Duration,
}

impl Default for GameTimings {
    fn default() -> Self {
        Self {
            flashcard_reveal: Duration::from_millis(150),
            quiz_advance: Duration::from_millis(1500),
            memory_mismatch: Duration::from_millis(1000),
            memory_victory: Duration::from_millis(500),
            typing_advance: Duration::from_millis(1000),
        }
    }
}

/// Everything a session may touch outside its own state while handling one
/// event: the clock, the event bus and the random source.
pub struct SessionContext<'a> {
    session_id: SessionId,
    token: SessionToken,
    timings: &'a GameTimings,
    timers: &'a mut TimerQueue,
    events: &'a mut GameEventBus,
    rng: &'a mut dyn RandomSource,
}

impl<'a> SessionContext<'a> {
    pub fn new(
        session_id: SessionId,
        token: SessionToken,
        timings: &'a GameTimings,
        timers: &'a mut TimerQueue,
        events: &'a mut GameEventBus,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            session_id,
            token,
            timings,
            timers,
            events,
            rng,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn timings(&self) -> &GameTimings {
        self.timings
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        &mut *self.rng
    }

    pub fn schedule(&mut self, delay: Duration, kind: TimerKind) {
        debug!(
            "Session {} scheduled {:?} in {:?}",
            self.session_id, kind, delay
        );
        self.timers.schedule(self.token, delay, kind);
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.events.publish(event);
    }
}

/// One running game. Exactly one exists at a time, owned by the host.
#[derive(Debug)]
pub enum Session {
    Flashcard(FlashcardSession),
    Quiz(QuizSession),
    Memory(MemorySession),
    Typing(TypingSession),
}

impl Session {
    /// Builds the session for `game_type` over a snapshot of the pool.
    /// `keyboard` is only kept by games that listen for key presses.
    pub fn create(
        game_type: GameType,
        pool: WordPool,
        keyboard: Option<KeyboardSubscription>,
        ctx: &mut SessionContext<'_>,
    ) -> Result<Self, GameError> {
        if pool.len() < game_type.min_words() {
            return Err(GameError::NotEnoughWords {
                game: game_type,
                required: game_type.min_words(),
                available: pool.len(),
            });
        }

        let session = match game_type {
            GameType::Flashcards => {
                Session::Flashcard(FlashcardSession::new(pool, keyboard, ctx))
            }
            GameType::Quiz => Session::Quiz(QuizSession::new(pool, ctx)?),
            GameType::Memory => Session::Memory(MemorySession::new(&pool, ctx)),
            GameType::Typing => Session::Typing(TypingSession::new(pool, ctx)?),
        };
        Ok(session)
    }

    pub fn game_type(&self) -> GameType {
        match self {
            Session::Flashcard(_) => GameType::Flashcards,
            Session::Quiz(_) => GameType::Quiz,
            Session::Memory(_) => GameType::Memory,
            Session::Typing(_) => GameType::Typing,
        }
    }

    pub fn handle_action(
        &mut self,
        action: UserAction,
        ctx: &mut SessionContext<'_>,
    ) -> Result<(), GameError> {
        match (self, action) {
            (Session::Flashcard(game), UserAction::Flip) => game.flip(ctx),
            (Session::Flashcard(game), UserAction::Next) => game.next(ctx),
            (Session::Flashcard(game), UserAction::Previous) => game.prev(ctx),
            (Session::Quiz(game), UserAction::Answer { option }) => game.answer(option, ctx)?,
            (Session::Memory(game), UserAction::RevealCard { index }) => game.reveal(index, ctx)?,
            (Session::Typing(game), UserAction::SubmitAnswer { text }) => game.submit(&text, ctx),
            (Session::Typing(game), UserAction::Hint) => game.hint(),
            (session, action) => {
                return Err(GameError::ActionNotSupported {
                    game: session.game_type(),
                    action: action.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: Key, ctx: &mut SessionContext<'_>) {
        if let Session::Flashcard(game) = self {
            game.handle_key(key, ctx);
        }
    }

    pub fn on_timer(
        &mut self,
        kind: TimerKind,
        ctx: &mut SessionContext<'_>,
    ) -> Result<(), GameError> {
        match (self, kind) {
            (Session::Flashcard(game), TimerKind::FlashcardReveal { index }) => {
                game.reveal_content(index)
            }
            (Session::Quiz(game), TimerKind::QuizAdvance) => game.next_question(ctx)?,
            (Session::Memory(game), TimerKind::MemoryRevert) => game.revert_mismatch(),
            (Session::Memory(game), TimerKind::MemoryVictory) => game.announce_victory(ctx),
            (Session::Typing(game), TimerKind::TypingAdvance) => game.next_word(ctx)?,
            (session, kind) => {
                debug!("{} session ignored timer {:?}", session.game_type(), kind);
            }
        }
        Ok(())
    }

    pub fn view(&self) -> SessionView {
        match self {
            Session::Flashcard(game) => SessionView::Flashcard(game.view()),
            Session::Quiz(game) => SessionView::Quiz(game.view()),
            Session::Memory(game) => SessionView::Memory(game.view()),
            Session::Typing(game) => SessionView::Typing(game.view()),
        }
    }
}
