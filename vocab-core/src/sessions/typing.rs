use tracing::debug;
use vocab_types::{GameError, Language, TypingFeedback, TypingView, WordId};

use crate::{AnswerChecker, GameEvent, SessionContext, TimerKind, WordPool};

/// Type the German word for a Czech prompt.
///
/// A wrong answer resets the streak but keeps the same prompt up; only a
/// correct answer moves on to a new word.
#[derive(Debug)]
pub struct TypingSession {
    pool: WordPool,
    target: WordId,
    streak: u32,
    input: String,
    feedback: Option<TypingFeedback>,
    advancing: bool,
}

impl TypingSession {
    pub fn new(pool: WordPool, ctx: &mut SessionContext<'_>) -> Result<Self, GameError> {
        let target = pool.sample_one(ctx.rng())?;
        Ok(Self {
            pool,
            target,
            streak: 0,
            input: String::new(),
            feedback: None,
            advancing: false,
        })
    }

    pub fn target(&self) -> WordId {
        self.target
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn feedback(&self) -> Option<&TypingFeedback> {
        self.feedback.as_ref()
    }

    /// The stored German form. The `???` stand-in is for display only and is
    /// never an accepted answer.
    fn answer(&self) -> &str {
        &self.pool.entry(self.target).german
    }

    pub fn submit(&mut self, text: &str, ctx: &mut SessionContext<'_>) {
        if self.advancing {
            debug!("Typing submission ignored while advancing");
            return;
        }

        self.input = text.trim().to_string();
        let correct = AnswerChecker::is_correct(text, self.answer());
        if correct {
            self.streak += 1;
            self.feedback = Some(TypingFeedback::Correct);
            self.advancing = true;
            let delay = ctx.timings().typing_advance;
            ctx.schedule(delay, TimerKind::TypingAdvance);
        } else {
            self.streak = 0;
            self.feedback = Some(TypingFeedback::Incorrect {
                answer: self.answer().to_string(),
            });
        }

        ctx.publish(GameEvent::TypingChecked {
            session_id: ctx.session_id(),
            correct,
            streak: self.streak,
        });
    }

    /// Prefills the input with the start of the answer. Does not submit.
    pub fn hint(&mut self) {
        self.input = AnswerChecker::hint(self.answer());
    }

    pub fn next_word(&mut self, ctx: &mut SessionContext<'_>) -> Result<(), GameError> {
        self.target = self.pool.sample_one(ctx.rng())?;
        self.input.clear();
        self.feedback = None;
        self.advancing = false;
        Ok(())
    }

    pub fn view(&self) -> TypingView {
        TypingView {
            prompt: self.pool.entry(self.target).text(Language::Czech).to_string(),
            streak: self.streak,
            input: self.input.clone(),
            feedback: self.feedback.clone(),
        }
    }
}
