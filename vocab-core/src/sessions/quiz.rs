use rand::seq::SliceRandom;
use tracing::{debug, info};
use vocab_types::{GameError, Language, OptionMark, QuizOption, QuizView, WordId};

use crate::{GameEvent, SessionContext, SourceRng, TimerKind, WordPool};

/// One target plus three distractors.
pub const QUIZ_OPTIONS: usize = 4;

const PROMPT_LANGUAGE: Language = Language::Czech;

#[derive(Debug, Clone)]
struct Question {
    target: WordId,
    options: Vec<WordId>,
}

#[derive(Debug)]
pub struct QuizSession {
    pool: WordPool,
    score: u32,
    question_number: u32,
    question: Question,
    /// Option picked for the current question; set means the options are locked.
    chosen: Option<usize>,
}

impl QuizSession {
    pub fn new(pool: WordPool, ctx: &mut SessionContext<'_>) -> Result<Self, GameError> {
        let question = Self::draw_question(&pool, ctx)?;
        let session = Self {
            pool,
            score: 0,
            question_number: 1,
            question,
            chosen: None,
        };
        session.announce_question(ctx);
        Ok(session)
    }

    fn draw_question(pool: &WordPool, ctx: &mut SessionContext<'_>) -> Result<Question, GameError> {
        let target = pool.sample_one(ctx.rng())?;
        let mut options = pool.sample_distinct(QUIZ_OPTIONS - 1, &[target], ctx.rng())?;
        options.push(target);
        options.shuffle(&mut SourceRng::new(ctx.rng()));
        Ok(Question { target, options })
    }

    fn announce_question(&self, ctx: &mut SessionContext<'_>) {
        debug!(
            "Quiz question {} asks for {}",
            self.question_number, self.question.target
        );
        ctx.publish(GameEvent::QuestionAsked {
            session_id: ctx.session_id(),
            question_number: self.question_number,
        });
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    pub fn target(&self) -> WordId {
        self.question.target
    }

    pub fn options(&self) -> &[WordId] {
        &self.question.options
    }

    pub fn correct_option(&self) -> usize {
        self.question
            .options
            .iter()
            .position(|id| *id == self.question.target)
            .unwrap_or_default()
    }

    pub fn is_locked(&self) -> bool {
        self.chosen.is_some()
    }

    /// Locks the options, scores the pick and schedules the next question.
    /// Answers arriving while locked are ignored.
    pub fn answer(&mut self, option: usize, ctx: &mut SessionContext<'_>) -> Result<(), GameError> {
        if option >= self.question.options.len() {
            return Err(GameError::InvalidSelection {
                index: option,
                len: self.question.options.len(),
            });
        }
        if self.is_locked() {
            debug!("Quiz answer ignored, question {} is locked", self.question_number);
            return Ok(());
        }

        self.chosen = Some(option);
        let correct = self.question.options[option] == self.question.target;
        if correct {
            self.score += 1;
        }

        info!(
            "Quiz question {} answered {}, score {}",
            self.question_number,
            if correct { "correctly" } else { "incorrectly" },
            self.score
        );
        ctx.publish(GameEvent::QuizAnswered {
            session_id: ctx.session_id(),
            question_number: self.question_number,
            correct,
            score: self.score,
        });

        let delay = ctx.timings().quiz_advance;
        ctx.schedule(delay, TimerKind::QuizAdvance);
        Ok(())
    }

    pub fn next_question(&mut self, ctx: &mut SessionContext<'_>) -> Result<(), GameError> {
        self.question = Self::draw_question(&self.pool, ctx)?;
        self.question_number += 1;
        self.chosen = None;
        self.announce_question(ctx);
        Ok(())
    }

    fn mark(&self, index: usize) -> OptionMark {
        let Some(chosen) = self.chosen else {
            return OptionMark::Open;
        };
        if self.question.options[index] == self.question.target {
            OptionMark::Correct
        } else if index == chosen {
            OptionMark::Wrong
        } else {
            OptionMark::Locked
        }
    }

    pub fn view(&self) -> QuizView {
        let options = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(index, id)| QuizOption {
                word: *id,
                text: self.pool.entry(*id).text(PROMPT_LANGUAGE.other()).to_string(),
                mark: self.mark(index),
            })
            .collect();

        QuizView {
            score: self.score,
            question_number: self.question_number,
            prompt: self
                .pool
                .entry(self.question.target)
                .text(PROMPT_LANGUAGE)
                .to_string(),
            options,
            answered: self.is_locked(),
        }
    }
}
