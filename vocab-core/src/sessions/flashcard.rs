use tracing::debug;
use vocab_types::{FlashcardView, Key, Language, WordId};

use crate::{GameEvent, KeyboardSubscription, SessionContext, TimerKind, WordPool};

/// Browse a shuffled deck one card at a time. Going forward past the last
/// card loops back to the first; going back stops at the first.
#[derive(Debug)]
pub struct FlashcardSession {
    pool: WordPool,
    deck: Vec<WordId>,
    cursor: usize,
    flipped: bool,
    /// Deck position whose text is on screen. Lags `cursor` by the reveal
    /// delay so the flip-back animation never shows the next card's answer.
    displayed: Option<usize>,
    _keyboard: Option<KeyboardSubscription>,
}

impl FlashcardSession {
    pub fn new(
        pool: WordPool,
        keyboard: Option<KeyboardSubscription>,
        ctx: &mut SessionContext<'_>,
    ) -> Self {
        let deck = pool.shuffled_copy(ctx.rng());
        let mut session = Self {
            pool,
            deck,
            cursor: 0,
            flipped: false,
            displayed: None,
            _keyboard: keyboard,
        };
        session.update_card(ctx);
        session
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn current_word(&self) -> Option<WordId> {
        self.deck.get(self.cursor).copied()
    }

    pub fn flip(&mut self, ctx: &mut SessionContext<'_>) {
        self.flipped = !self.flipped;
        ctx.publish(GameEvent::CardFlipped {
            session_id: ctx.session_id(),
            position: self.cursor,
            showing_back: self.flipped,
        });
    }

    pub fn next(&mut self, ctx: &mut SessionContext<'_>) {
        if self.deck.is_empty() {
            return;
        }
        self.cursor = if self.cursor + 1 < self.deck.len() {
            self.cursor + 1
        } else {
            0
        };
        self.update_card(ctx);
    }

    pub fn prev(&mut self, ctx: &mut SessionContext<'_>) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.update_card(ctx);
    }

    pub fn handle_key(&mut self, key: Key, ctx: &mut SessionContext<'_>) {
        match key {
            Key::ArrowRight => self.next(ctx),
            Key::ArrowLeft => self.prev(ctx),
            Key::Space | Key::Enter => self.flip(ctx),
            Key::Other => {}
        }
    }

    /// Delayed half of `update_card`.
    pub fn reveal_content(&mut self, index: usize) {
        if index < self.deck.len() {
            self.displayed = Some(index);
        }
    }

    fn update_card(&mut self, ctx: &mut SessionContext<'_>) {
        self.flipped = false;
        let delay = ctx.timings().flashcard_reveal;
        ctx.schedule(delay, TimerKind::FlashcardReveal { index: self.cursor });
        debug!("Flashcard moved to {}/{}", self.cursor + 1, self.deck.len());
    }

    pub fn view(&self) -> FlashcardView {
        let entry = self
            .displayed
            .and_then(|index| self.deck.get(index))
            .map(|id| self.pool.entry(*id));

        FlashcardView {
            flipped: self.flipped,
            front: entry
                .map(|e| e.text(Language::German).to_string())
                .unwrap_or_default(),
            back: entry
                .map(|e| e.text(Language::Czech).to_string())
                .unwrap_or_default(),
            example: entry.map(|e| e.example_text().to_string()).unwrap_or_default(),
            counter: match self.displayed {
                Some(index) => format!("{} / {}", index + 1, self.deck.len()),
                None => String::new(),
            },
            position: self.cursor,
            total: self.deck.len(),
        }
    }
}
