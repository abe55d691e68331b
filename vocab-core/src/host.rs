use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;
use vocab_types::{GameError, GameType, HostView, Key, SessionId, UserAction, WordEntry};

use crate::{
    EntropyRandom, GameEvent, GameEventBus, GameEventHandler, GameTimings, KeyboardListeners,
    RandomSource, Session, SessionContext, SessionToken, TimerQueue, WordPool,
};

#[derive(Debug)]
struct ActiveSession {
    id: SessionId,
    token: SessionToken,
    session: Session,
}

/// Owns the display region and the one session mounted into it.
///
/// Words handed over with `set_words` only apply to the next `start`; a
/// running session keeps the snapshot it was started with.
pub struct GameHost {
    words: WordPool,
    active: Option<ActiveSession>,
    last_token: SessionToken,
    timers: TimerQueue,
    keyboard: KeyboardListeners,
    event_bus: GameEventBus,
    rng: Box<dyn RandomSource>,
    timings: GameTimings,
}

impl GameHost {
    pub fn new() -> Self {
        Self::with_random(EntropyRandom::new())
    }

    pub fn with_random(rng: impl RandomSource + 'static) -> Self {
        Self {
            words: WordPool::default(),
            active: None,
            last_token: SessionToken::NONE,
            timers: TimerQueue::new(),
            keyboard: KeyboardListeners::new(),
            event_bus: GameEventBus::new(),
            rng: Box::new(rng),
            timings: GameTimings::default(),
        }
    }

    pub fn with_timings(mut self, timings: GameTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn timings(&self) -> &GameTimings {
        &self.timings
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn words(&self) -> &WordPool {
        &self.words
    }

    pub fn set_words(&mut self, words: Vec<WordEntry>) {
        info!("GameHost received {} words", words.len());
        self.words = WordPool::new(words);
        self.event_bus.publish(GameEvent::WordsUpdated {
            word_count: self.words.len(),
        });
    }

    pub fn active_game(&self) -> Option<GameType> {
        self.active.as_ref().map(|a| a.session.game_type())
    }

    pub fn active_session_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn active_token(&self) -> Option<SessionToken> {
        self.active.as_ref().map(|a| a.token)
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    pub fn keyboard_listeners(&self) -> usize {
        self.keyboard.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_timer_in(&self) -> Option<Duration> {
        self.timers.next_due_in()
    }

    /// Mounts a new session for `game_type`. The new session is built before
    /// the old one is torn down, so a rejected start (a pool that is too
    /// small) leaves any running session untouched.
    pub fn start(&mut self, game_type: GameType) -> Result<SessionId, GameError> {
        let available = self.words.len();
        let token = self.last_token.next();
        self.last_token = token;
        let id = Uuid::new_v4();
        let keyboard = game_type
            .uses_keyboard()
            .then(|| self.keyboard.subscribe(token));

        let created = {
            let mut ctx = SessionContext::new(
                id,
                token,
                &self.timings,
                &mut self.timers,
                &mut self.event_bus,
                self.rng.as_mut(),
            );
            Session::create(game_type, self.words.clone(), keyboard, &mut ctx)
        };
        let session = match created {
            Ok(session) => session,
            Err(e) => {
                warn!("Refusing to start {}: {}", game_type, e);
                self.event_bus.publish(GameEvent::StartRejected {
                    game_type,
                    required: game_type.min_words(),
                    available,
                });
                return Err(e);
            }
        };

        self.teardown();
        info!("Started {} session {} with {} words", game_type, id, available);
        self.active = Some(ActiveSession { id, token, session });
        self.event_bus.publish(GameEvent::GameStarted {
            session_id: id,
            game_type,
            word_count: available,
        });
        Ok(id)
    }

    /// Tears down the running session and returns to the selection view.
    pub fn stop(&mut self) {
        if !self.teardown() {
            debug!("stop() with no running game");
        }
    }

    fn teardown(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        let game_type = active.session.game_type();
        info!("Stopped {} session {}", game_type, active.id);
        // Dropping the session releases its keyboard subscription
        drop(active.session);
        self.event_bus.publish(GameEvent::GameStopped {
            session_id: active.id,
            game_type,
        });
        true
    }

    pub fn dispatch(&mut self, action: UserAction) -> Result<(), GameError> {
        let Some(active) = self.active.as_mut() else {
            return Err(GameError::NoActiveGame);
        };
        debug!("Session {} handling {}", active.id, action.name());

        let mut ctx = SessionContext::new(
            active.id,
            active.token,
            &self.timings,
            &mut self.timers,
            &mut self.event_bus,
            self.rng.as_mut(),
        );
        active.session.handle_action(action, &mut ctx)
    }

    /// Delivers a key press to the mounted session if it is listening.
    /// Returns whether anyone received it.
    pub fn key_press(&mut self, key: Key) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !self.keyboard.is_subscribed(active.token) {
            return false;
        }

        let mut ctx = SessionContext::new(
            active.id,
            active.token,
            &self.timings,
            &mut self.timers,
            &mut self.event_bus,
            self.rng.as_mut(),
        );
        active.session.handle_key(key, &mut ctx);
        true
    }

    /// Moves the clock forward and fires every timer that came due. Timers
    /// scheduled by a session that is no longer mounted do nothing.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(timer) = self.timers.pop_due(until) {
            let current = self.active.as_ref().map(|a| a.token) == Some(timer.token);
            if !current {
                debug!(
                    "Ignoring {:?} from session token {}",
                    timer.kind,
                    timer.token.value()
                );
                self.event_bus.publish(GameEvent::StaleTimerIgnored {
                    token: timer.token.value(),
                });
                continue;
            }
            let Some(active) = self.active.as_mut() else {
                continue;
            };

            let mut ctx = SessionContext::new(
                active.id,
                active.token,
                &self.timings,
                &mut self.timers,
                &mut self.event_bus,
                self.rng.as_mut(),
            );
            if let Err(e) = active.session.on_timer(timer.kind, &mut ctx) {
                warn!("Session {} failed to handle {:?}: {}", active.id, timer.kind, e);
            }
        }
        self.timers.settle(until);
    }

    pub fn view(&self) -> HostView {
        match &self.active {
            Some(active) => HostView::Playing(active.session.view()),
            None => HostView::Selection,
        }
    }
}

impl Default for GameHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceRandom;
    use crate::sessions::test_support::{EventLog, sample_words};
    use vocab_types::SessionView;

    fn create_test_host(words: usize) -> (GameHost, EventLog) {
        let log = EventLog::default();
        let mut host = GameHost::with_random(SequenceRandom::new(vec![0.0, 0.35, 0.8, 0.1, 0.55]));
        host.add_handler(Box::new(log.clone()));
        host.set_words(sample_words(words));
        (host, log)
    }

    #[test]
    fn test_start_rejected_without_state_change() {
        let (mut host, log) = create_test_host(3);

        for game in [GameType::Quiz, GameType::Memory, GameType::Typing] {
            let result = host.start(game);
            assert!(matches!(result, Err(GameError::NotEnoughWords { .. })));
            assert_eq!(host.view(), HostView::Selection);
        }
        assert_eq!(
            log.count(|e| matches!(e, GameEvent::StartRejected { .. })),
            3
        );

        // Flashcards work with any non-empty pool
        assert!(host.start(GameType::Flashcards).is_ok());
    }

    #[test]
    fn test_rejection_keeps_running_session() {
        let (mut host, log) = create_test_host(5);
        let running = host.start(GameType::Flashcards).unwrap();
        let token = host.active_token();
        host.set_words(sample_words(2));

        assert!(host.start(GameType::Quiz).is_err());
        assert_eq!(host.active_game(), Some(GameType::Flashcards));
        assert_eq!(host.active_session_id(), Some(running));
        assert_eq!(host.active_token(), token);
        assert_eq!(host.keyboard_listeners(), 1);
        assert_eq!(log.count(|e| matches!(e, GameEvent::GameStopped { .. })), 0);
        assert_eq!(
            log.count(|e| matches!(e, GameEvent::StartRejected { .. })),
            1
        );

        // The flashcard session still takes input and fires its own timers
        host.advance(Duration::from_millis(200));
        assert!(host.key_press(Key::ArrowRight));
        let HostView::Playing(SessionView::Flashcard(card)) = host.view() else {
            panic!("flashcards not mounted");
        };
        assert!(!card.front.is_empty());
    }

    #[test]
    fn test_rejected_keyboard_game_releases_subscription() {
        let (mut host, _log) = create_test_host(0);
        assert!(host.start(GameType::Flashcards).is_err());
        assert_eq!(host.keyboard_listeners(), 0);
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.view(), HostView::Selection);
    }

    #[test]
    fn test_empty_pool_rejects_flashcards() {
        let (mut host, _log) = create_test_host(0);
        assert_eq!(
            host.start(GameType::Flashcards),
            Err(GameError::NotEnoughWords {
                game: GameType::Flashcards,
                required: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_stop_restores_selection() {
        let (mut host, log) = create_test_host(8);
        host.start(GameType::Memory).unwrap();
        assert!(matches!(host.view(), HostView::Playing(SessionView::Memory(_))));

        host.stop();
        assert_eq!(host.view(), HostView::Selection);
        assert!(host.active_game().is_none());
        assert_eq!(log.count(|e| matches!(e, GameEvent::GameStopped { .. })), 1);

        // Second stop is harmless
        host.stop();
        assert_eq!(log.count(|e| matches!(e, GameEvent::GameStopped { .. })), 1);
    }

    #[test]
    fn test_dispatch_without_game() {
        let (mut host, _log) = create_test_host(4);
        assert_eq!(host.dispatch(UserAction::Next), Err(GameError::NoActiveGame));
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let (mut host, _log) = create_test_host(6);
        host.start(GameType::Quiz).unwrap();
        let first = host.active_token().unwrap();
        host.start(GameType::Typing).unwrap();
        let second = host.active_token().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_set_words_does_not_touch_running_session() {
        let (mut host, _log) = create_test_host(4);
        host.start(GameType::Quiz).unwrap();
        let Some(Session::Quiz(quiz)) = host.session() else {
            panic!("quiz not mounted");
        };
        let prompt = quiz.view().prompt;

        host.set_words(vec![WordEntry::new("Ente", "kachna"); 10]);
        let Some(Session::Quiz(quiz)) = host.session() else {
            panic!("quiz not mounted");
        };
        assert_eq!(quiz.view().prompt, prompt);
        assert_eq!(host.words().len(), 10);
    }
}
