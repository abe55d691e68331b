use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Shown in place of a missing German or Czech form.
pub const MISSING_TEXT: &str = "???";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Language {
    German,
    Czech,
}

impl Language {
    pub fn other(self) -> Self {
        match self {
            Language::German => Language::Czech,
            Language::Czech => Language::German,
        }
    }
}

/// Position of an entry inside the pool snapshot it was loaded into.
/// Two entries with identical text still have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordId(pub usize);

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordEntry {
    #[serde(default)]
    pub german: String,
    #[serde(default)]
    pub czech: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub plural: Option<String>,
}

impl WordEntry {
    pub fn new(german: impl Into<String>, czech: impl Into<String>) -> Self {
        Self {
            german: german.into(),
            czech: czech.into(),
            example: None,
            plural: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Display text for one side of the entry, falling back to `???` when the
    /// source data left it empty.
    pub fn text(&self, language: Language) -> &str {
        let raw = match language {
            Language::German => &self.german,
            Language::Czech => &self.czech,
        };
        if raw.trim().is_empty() {
            MISSING_TEXT
        } else {
            raw
        }
    }

    pub fn example_text(&self) -> &str {
        self.example.as_deref().unwrap_or("")
    }

    pub fn plural_label(&self) -> Option<String> {
        self.plural
            .as_deref()
            .filter(|plural| !plural.trim().is_empty())
            .map(|plural| format!("(Pl. {})", plural))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page {
    #[serde(default)]
    #[ts(optional)]
    pub number: Option<u32>,
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lesson {
    #[serde(default)]
    #[ts(optional)]
    pub number: Option<u32>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Lesson {
    /// Lessons without a number sort first.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(0)
    }
}

/// One database file. `lessons` is required; a file without it is not a
/// lesson database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LessonDatabase {
    pub lessons: Vec<Lesson>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let entry: WordEntry = serde_json::from_str(r#"{"german": "Haus"}"#).unwrap();
        assert_eq!(entry.text(Language::German), "Haus");
        assert_eq!(entry.text(Language::Czech), MISSING_TEXT);
        assert_eq!(entry.example_text(), "");
        assert!(entry.plural_label().is_none());
    }

    #[test]
    fn test_plural_label() {
        let entry = WordEntry::new("Haus", "dům").with_plural("Häuser");
        assert_eq!(entry.plural_label().as_deref(), Some("(Pl. Häuser)"));
    }

    #[test]
    fn test_database_requires_lessons() {
        let parsed = serde_json::from_str::<LessonDatabase>(r#"{"pages": []}"#);
        assert!(parsed.is_err());

        let parsed: LessonDatabase = serde_json::from_str(
            r#"{"lessons": [{"number": 2, "pages": [{"number": 1, "words": [{"german": "Hund", "czech": "pes"}]}]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.lessons[0].sort_key(), 2);
        assert_eq!(parsed.lessons[0].pages[0].words[0].czech, "pes");
    }

    #[test]
    fn test_language_other() {
        assert_eq!(Language::German.other(), Language::Czech);
        assert_eq!(Language::Czech.other(), Language::German);
    }
}
