/// Characters of the answer revealed by a typing hint.
pub const HINT_PREFIX_CHARS: usize = 3;

pub struct AnswerChecker;

impl AnswerChecker {
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Case-insensitive comparison of a typed answer with the expected form.
    pub fn is_correct(input: &str, expected: &str) -> bool {
        let input = Self::normalize(input);
        !input.is_empty() && input == Self::normalize(expected)
    }

    /// The first few characters of the answer followed by an ellipsis.
    pub fn hint(answer: &str) -> String {
        let prefix: String = answer.chars().take(HINT_PREFIX_CHARS).collect();
        format!("{}...", prefix)
    }
}
