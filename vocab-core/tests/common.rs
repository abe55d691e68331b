#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use vocab_core::{GameEvent, GameEventHandler, GameHost, SequenceRandom, EntropyRandom};
use vocab_types::{HostView, SessionView, WordEntry};

/// The four-word pool used throughout the end-to-end tests
pub fn create_small_pool() -> Vec<WordEntry> {
    vec![
        WordEntry::new("Hund", "pes"),
        WordEntry::new("Katze", "kočka"),
        WordEntry::new("Baum", "strom"),
        WordEntry::new("Buch", "kniha"),
    ]
}

/// Creates `count` distinct entries
pub fn create_words(count: usize) -> Vec<WordEntry> {
    (0..count)
        .map(|i| WordEntry::new(format!("Wort{}", i), format!("slovo{}", i)))
        .collect()
}

/// Creates a host with seeded randomness and an attached event collector
pub fn create_test_host(words: Vec<WordEntry>) -> (GameHost, EventCollector) {
    let collector = EventCollector::new();
    let mut host = GameHost::with_random(EntropyRandom::seeded(2024));
    host.add_handler(Box::new(collector.clone()));
    host.set_words(words);
    collector.clear();
    (host, collector)
}

/// Creates a host whose randomness always yields zero
pub fn create_deterministic_host(words: Vec<WordEntry>) -> (GameHost, EventCollector) {
    let collector = EventCollector::new();
    let mut host = GameHost::with_random(SequenceRandom::zeros());
    host.add_handler(Box::new(collector.clone()));
    host.set_words(words);
    collector.clear();
    (host, collector)
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn count_matching(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn quiz_view(host: &GameHost) -> vocab_types::QuizView {
    match host.view() {
        HostView::Playing(SessionView::Quiz(view)) => view,
        other => panic!("Expected quiz view, got {:?}", other),
    }
}

pub fn memory_view(host: &GameHost) -> vocab_types::MemoryView {
    match host.view() {
        HostView::Playing(SessionView::Memory(view)) => view,
        other => panic!("Expected memory view, got {:?}", other),
    }
}

pub fn flashcard_view(host: &GameHost) -> vocab_types::FlashcardView {
    match host.view() {
        HostView::Playing(SessionView::Flashcard(view)) => view,
        other => panic!("Expected flashcard view, got {:?}", other),
    }
}

pub fn typing_view(host: &GameHost) -> vocab_types::TypingView {
    match host.view() {
        HostView::Playing(SessionView::Typing(view)) => view,
        other => panic!("Expected typing view, got {:?}", other),
    }
}
