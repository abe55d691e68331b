use std::fmt::Write;

use vocab_types::{
    CardState, FlashcardView, HostView, Lesson, MemoryView, OptionMark, QuizView, SessionView,
    TypingFeedback, TypingView, WordEntry,
};

const MEMORY_COLUMNS: usize = 4;

pub fn help_text() -> String {
    [
        "Commands:",
        "  lessons              list lessons and pages",
        "  lesson <n> [page]    select a lesson, or one page of it",
        "  words                show the selected words",
        "  play <game>          flashcards | quiz | memory | typing",
        "  back                 return to game selection",
        "  quit                 leave",
        "In a game:",
        "  flashcards           Enter/space/f flip, right/n next, left/p previous",
        "  quiz                 1-4 pick an answer",
        "  memory               card number to turn it over",
        "  typing               type the German word, :hint for help",
    ]
    .join("\n")
}

pub fn render_lessons(lessons: &[Lesson]) -> String {
    if lessons.is_empty() {
        return "No lessons loaded.".to_string();
    }
    let mut out = String::new();
    for lesson in lessons {
        let label = lesson
            .number
            .map(|n| format!("Lesson {}", n))
            .unwrap_or_else(|| "Lesson ?".to_string());
        let pages: Vec<String> = lesson
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| match page.number {
                Some(n) => format!("{}: p.{} ({} words)", i + 1, n, page.words.len()),
                None => format!("{}: ({} words)", i + 1, page.words.len()),
            })
            .collect();
        let _ = writeln!(out, "{}  [{}]", label, pages.join(", "));
    }
    out.trim_end().to_string()
}

pub fn render_words(words: &[WordEntry]) -> String {
    if words.is_empty() {
        return "No words selected.".to_string();
    }
    let mut out = String::new();
    for word in words {
        let _ = write!(out, "{} = {}", word.german, word.czech);
        if let Some(plural) = word.plural_label() {
            let _ = write!(out, " {}", plural);
        }
        if !word.example_text().is_empty() {
            let _ = write!(out, "  \"{}\"", word.example_text());
        }
        out.push('\n');
    }
    let _ = write!(out, "{} words", words.len());
    out
}

pub fn render_view(view: &HostView) -> String {
    match view {
        HostView::Selection => "Choose a game: play flashcards | quiz | memory | typing".to_string(),
        HostView::Playing(SessionView::Flashcard(card)) => render_flashcard(card),
        HostView::Playing(SessionView::Quiz(quiz)) => render_quiz(quiz),
        HostView::Playing(SessionView::Memory(memory)) => render_memory(memory),
        HostView::Playing(SessionView::Typing(typing)) => render_typing(typing),
    }
}

fn render_flashcard(card: &FlashcardView) -> String {
    let mut out = format!("[{}]\n", card.counter);
    if card.flipped {
        let _ = write!(out, "  {}", card.back);
        if !card.example.is_empty() {
            let _ = write!(out, "\n  \"{}\"", card.example);
        }
    } else {
        let _ = write!(out, "  {}", card.front);
    }
    out
}

fn render_quiz(quiz: &QuizView) -> String {
    let mut out = format!(
        "Question {}  Score: {}\nWhat is \"{}\" in German?\n",
        quiz.question_number, quiz.score, quiz.prompt
    );
    for (i, option) in quiz.options.iter().enumerate() {
        let mark = match option.mark {
            OptionMark::Open | OptionMark::Locked => "",
            OptionMark::Correct => "  ✓",
            OptionMark::Wrong => "  ✗",
        };
        let _ = writeln!(out, "  {}) {}{}", i + 1, option.text, mark);
    }
    out.trim_end().to_string()
}

fn render_memory(memory: &MemoryView) -> String {
    let mut out = format!(
        "Moves: {}  Pairs: {}/{}\n",
        memory.moves, memory.matched_pairs, memory.total_pairs
    );
    for (row, cards) in memory.cards.chunks(MEMORY_COLUMNS).enumerate() {
        let cells: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(col, card)| {
                let number = row * MEMORY_COLUMNS + col + 1;
                let face = match (&card.text, card.state) {
                    (Some(text), CardState::Matched) => format!("[{}]", text),
                    (Some(text), CardState::Incorrect) => format!("!{}!", text),
                    (Some(text), _) => text.clone(),
                    (None, _) => "?".to_string(),
                };
                format!("{:>2}: {:<16}", number, face)
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }
    if memory.won {
        let _ = writeln!(out, "You won in {} moves!", memory.moves);
    }
    out.trim_end().to_string()
}

fn render_typing(typing: &TypingView) -> String {
    let mut out = format!(
        "Streak: {}\nType the German for \"{}\"",
        typing.streak, typing.prompt
    );
    if !typing.input.is_empty() {
        let _ = write!(out, "\n> {}", typing.input);
    }
    match &typing.feedback {
        Some(TypingFeedback::Correct) => out.push_str("\nCorrect!"),
        Some(TypingFeedback::Incorrect { answer }) => {
            let _ = write!(out, "\nWrong. Answer: {}", answer);
        }
        None => {}
    }
    out
}
