use std::time::Duration;

use tracing::{debug, info};
use vocab_core::{GameHost, LessonCatalog, Selection};
use vocab_types::{GameType, WordEntry};

use crate::commands::{Command, parse_command};
use crate::render::{help_text, render_lessons, render_view, render_words};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Terminal front end: lesson selection on one side, the game host on the
/// other.
pub struct App {
    host: GameHost,
    catalog: LessonCatalog,
    selection: Selection,
    words: Vec<WordEntry>,
}

impl App {
    pub fn new(host: GameHost, catalog: LessonCatalog) -> Self {
        Self {
            host,
            catalog,
            selection: Selection::Nothing,
            words: Vec::new(),
        }
    }

    pub fn host(&self) -> &GameHost {
        &self.host
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn active_game(&self) -> Option<GameType> {
        self.host.active_game()
    }

    pub fn next_timer_in(&self) -> Option<Duration> {
        self.host.next_timer_in()
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let command = match parse_command(line, self.host.active_game()) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue(String::new()),
            Err(e) => return Outcome::Continue(e.to_string()),
        };
        debug!("Handling command {:?}", command);

        let message = match command {
            Command::Quit => return Outcome::Quit,
            Command::Help => help_text(),
            Command::Lessons => render_lessons(self.catalog.lessons()),
            Command::Words => render_words(&self.words),
            Command::SelectLesson { lesson, page } => self.select(lesson, page),
            Command::Play(game) => match self.host.start(game) {
                Ok(_) => render_view(&self.host.view()),
                Err(e) => e.to_string(),
            },
            Command::Back => {
                self.host.stop();
                render_view(&self.host.view())
            }
            Command::Action(action) => match self.host.dispatch(action) {
                Ok(()) => render_view(&self.host.view()),
                Err(e) => e.to_string(),
            },
            Command::Key(key) => {
                if self.host.key_press(key) {
                    render_view(&self.host.view())
                } else {
                    "Keys only work in flashcards.".to_string()
                }
            }
        };
        Outcome::Continue(message)
    }

    fn select(&mut self, lesson: u32, page: Option<usize>) -> String {
        let Some(found) = self.catalog.lesson(lesson) else {
            return format!("No lesson {}", lesson);
        };
        let selection = match page {
            Some(page) if page >= found.pages.len() => {
                return format!("Lesson {} has no page {}", lesson, page + 1);
            }
            Some(page) => Selection::Page { lesson, page },
            None => Selection::Lesson(lesson),
        };

        self.selection = selection;
        self.words = self.catalog.words_for(selection);
        info!("Selected {:?} with {} words", selection, self.words.len());
        self.host.set_words(self.words.clone());
        format!("{} words selected", self.words.len())
    }

    /// Lets timers run. Returns a fresh rendering only when the screen
    /// changed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<String> {
        let before = self.host.view();
        self.host.advance(elapsed);
        let after = self.host.view();
        (before != after).then(|| render_view(&after))
    }
}
