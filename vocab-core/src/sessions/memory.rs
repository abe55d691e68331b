use rand::seq::SliceRandom;
use tracing::{debug, info};
use vocab_types::{CardState, GameError, Language, MemoryCardView, MemoryView, WordId};

use crate::{GameEvent, SessionContext, SourceRng, TimerKind, WordPool};

/// Pairs on a full board. Smaller pools produce a smaller board.
pub const MEMORY_PAIRS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCard {
    /// Shared by the two cards made from the same entry.
    pub pair_key: WordId,
    pub text: String,
    pub language: Language,
    pub state: CardState,
}

/// Turn over two cards at a time looking for the German/Czech pairs.
///
/// At most two cards are face up and unmatched at any moment; while a pair is
/// being evaluated the board is locked and clicks are dropped.
#[derive(Debug)]
pub struct MemorySession {
    cards: Vec<MemoryCard>,
    selection: Vec<usize>,
    locked: bool,
    moves: u32,
    victory_scheduled: bool,
    victory_announced: bool,
}

impl MemorySession {
    pub fn new(pool: &WordPool, ctx: &mut SessionContext<'_>) -> Self {
        let chosen = pool.sample_subset(MEMORY_PAIRS, ctx.rng());

        let mut cards = Vec::with_capacity(chosen.len() * 2);
        for id in chosen {
            let entry = pool.entry(id);
            for language in [Language::German, Language::Czech] {
                cards.push(MemoryCard {
                    pair_key: id,
                    text: entry.text(language).to_string(),
                    language,
                    state: CardState::Hidden,
                });
            }
        }
        cards.shuffle(&mut SourceRng::new(ctx.rng()));

        debug!("Memory board dealt with {} cards", cards.len());
        Self {
            cards,
            selection: Vec::with_capacity(2),
            locked: false,
            moves: 0,
            victory_scheduled: false,
            victory_announced: false,
        }
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.state == CardState::Matched)
            .count()
            / 2
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_won(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.state == CardState::Matched)
    }

    pub fn victory_announced(&self) -> bool {
        self.victory_announced
    }

    /// Turns a card face up. Clicks on a locked board, a matched card or a
    /// card that is already face up are ignored.
    pub fn reveal(&mut self, index: usize, ctx: &mut SessionContext<'_>) -> Result<(), GameError> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(GameError::InvalidSelection { index, len })?;

        if self.locked || card.state != CardState::Hidden {
            debug!("Memory click on card {} ignored", index);
            return Ok(());
        }

        card.state = CardState::Revealed;
        self.selection.push(index);

        if self.selection.len() == 2 {
            self.evaluate(ctx);
        }
        Ok(())
    }

    fn evaluate(&mut self, ctx: &mut SessionContext<'_>) {
        self.locked = true;
        self.moves += 1;
        let (first, second) = (self.selection[0], self.selection[1]);
        let pair_key = self.cards[first].pair_key;

        if pair_key == self.cards[second].pair_key {
            self.cards[first].state = CardState::Matched;
            self.cards[second].state = CardState::Matched;
            self.selection.clear();
            self.locked = false;

            ctx.publish(GameEvent::PairMatched {
                session_id: ctx.session_id(),
                pair_key,
                moves: self.moves,
            });

            if self.is_won() && !self.victory_scheduled {
                self.victory_scheduled = true;
                let delay = ctx.timings().memory_victory;
                ctx.schedule(delay, TimerKind::MemoryVictory);
            }
        } else {
            self.cards[first].state = CardState::Incorrect;
            self.cards[second].state = CardState::Incorrect;

            ctx.publish(GameEvent::PairMismatched {
                session_id: ctx.session_id(),
                moves: self.moves,
            });
            let delay = ctx.timings().memory_mismatch;
            ctx.schedule(delay, TimerKind::MemoryRevert);
        }
    }

    /// Turns a mismatched pair face down again and unlocks the board.
    pub fn revert_mismatch(&mut self) {
        for index in self.selection.drain(..) {
            if let Some(card) = self.cards.get_mut(index) {
                if card.state == CardState::Incorrect {
                    card.state = CardState::Hidden;
                }
            }
        }
        self.locked = false;
    }

    pub fn announce_victory(&mut self, ctx: &mut SessionContext<'_>) {
        if self.victory_announced || !self.is_won() {
            return;
        }
        self.victory_announced = true;
        info!("Memory board cleared in {} moves", self.moves);
        ctx.publish(GameEvent::MemoryVictory {
            session_id: ctx.session_id(),
            moves: self.moves,
        });
    }

    pub fn view(&self) -> MemoryView {
        let cards = self
            .cards
            .iter()
            .map(|card| MemoryCardView {
                text: card.state.is_face_up().then(|| card.text.clone()),
                language: card.language,
                state: card.state,
            })
            .collect();

        MemoryView {
            cards,
            moves: self.moves,
            matched_pairs: self.matched_pairs(),
            total_pairs: self.pair_count(),
            locked: self.locked,
            won: self.victory_announced,
        }
    }
}
