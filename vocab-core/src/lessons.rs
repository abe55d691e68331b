use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};
use vocab_types::{Lesson, LessonDatabase, Page, WordEntry};

/// What the user picked in the lesson/page selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Nothing,
    /// Every page of the lesson.
    Lesson(u32),
    /// One page, by its position inside the lesson.
    Page { lesson: u32, page: usize },
}

/// All lessons from every loaded database, ordered by lesson number.
#[derive(Debug, Clone, Default)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn parse_database(json: &str) -> Result<LessonDatabase> {
        serde_json::from_str(json).context("Invalid lesson database")
    }

    /// Concatenates the lessons of every database and sorts them by number.
    /// The sort is stable, so lessons sharing a number keep their file order.
    pub fn merge(databases: impl IntoIterator<Item = LessonDatabase>) -> Self {
        let mut lessons: Vec<Lesson> = databases.into_iter().flat_map(|d| d.lessons).collect();
        lessons.sort_by_key(Lesson::sort_key);
        Self { lessons }
    }

    /// Loads every file that can be read and parsed. Individual failures are
    /// logged and skipped; it is only an error when nothing loads at all.
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut databases = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match Self::load_file(path) {
                Ok(database) => {
                    info!(
                        "Loaded {} lessons from {}",
                        database.lessons.len(),
                        path.display()
                    );
                    databases.push(database);
                }
                Err(e) => warn!("Failed to load {}: {:#}", path.display(), e),
            }
        }

        if databases.is_empty() {
            return Err(anyhow!("No valid database files loaded."));
        }
        Ok(Self::merge(databases))
    }

    fn load_file(path: &Path) -> Result<LessonDatabase> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_database(&contents)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn lesson(&self, number: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.number == Some(number))
    }

    pub fn page(&self, lesson: u32, page: usize) -> Option<&Page> {
        self.lesson(lesson).and_then(|l| l.pages.get(page))
    }

    /// Flattens a selection into the word list handed to the game host.
    pub fn words_for(&self, selection: Selection) -> Vec<WordEntry> {
        match selection {
            Selection::Nothing => Vec::new(),
            Selection::Lesson(number) => self
                .lesson(number)
                .map(|l| l.pages.iter().flat_map(|p| p.words.iter().cloned()).collect())
                .unwrap_or_default(),
            Selection::Page { lesson, page } => self
                .page(lesson, page)
                .map(|p| p.words.clone())
                .unwrap_or_default(),
        }
    }
}
