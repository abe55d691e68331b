use thiserror::Error;
use vocab_types::{GameType, Key, UserAction};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Lessons,
    /// `page` is the zero-based position inside the lesson; `None` means all pages.
    SelectLesson { lesson: u32, page: Option<usize> },
    Words,
    Play(GameType),
    Back,
    Action(UserAction),
    Key(Key),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),
    #[error("Not a valid number: {0}")]
    InvalidNumber(String),
    #[error("{0}")]
    UnknownGame(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line. Menu commands work everywhere; anything else is
/// read as input for the game currently running.
pub fn parse_command(line: &str, active: Option<GameType>) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or("").to_lowercase();

    let command = match head.as_str() {
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        "back" => Some(Command::Back),
        "lessons" => Some(Command::Lessons),
        "words" => Some(Command::Words),
        "lesson" => {
            let lesson = parts
                .next()
                .ok_or(CommandError::Usage("lesson <number> [page]"))
                .and_then(parse_number::<u32>)?;
            let page = parts
                .next()
                .map(|p| parse_position(p, usize::MAX))
                .transpose()?;
            Some(Command::SelectLesson { lesson, page })
        }
        "play" => {
            let game = parts
                .next()
                .ok_or(CommandError::Usage("play <flashcards|quiz|memory|typing>"))?;
            Some(Command::Play(
                game.parse::<GameType>().map_err(CommandError::UnknownGame)?,
            ))
        }
        _ => None,
    };
    if command.is_some() {
        return Ok(command);
    }

    match active {
        Some(GameType::Flashcards) => parse_flashcard_input(trimmed).map(Some),
        Some(GameType::Quiz) if !trimmed.is_empty() => {
            let option = parse_position(trimmed, 4)?;
            Ok(Some(Command::Action(UserAction::Answer { option })))
        }
        Some(GameType::Memory) if !trimmed.is_empty() => {
            let index = parse_position(trimmed, usize::MAX)?;
            Ok(Some(Command::Action(UserAction::RevealCard { index })))
        }
        Some(GameType::Typing) if trimmed == ":hint" => Ok(Some(Command::Action(UserAction::Hint))),
        Some(GameType::Typing) if !trimmed.is_empty() => Ok(Some(Command::Action(
            UserAction::SubmitAnswer {
                text: trimmed.to_string(),
            },
        ))),
        _ if trimmed.is_empty() => Ok(None),
        _ => Err(CommandError::Unknown(trimmed.to_string())),
    }
}

fn parse_flashcard_input(input: &str) -> Result<Command, CommandError> {
    let command = match input.to_lowercase().as_str() {
        // A bare Enter flips, like the Enter key on the card
        "" | "enter" => Command::Key(Key::Enter),
        "space" => Command::Key(Key::Space),
        "left" => Command::Key(Key::ArrowLeft),
        "right" => Command::Key(Key::ArrowRight),
        "f" | "flip" => Command::Action(UserAction::Flip),
        "n" | "next" => Command::Action(UserAction::Next),
        "p" | "prev" | "previous" => Command::Action(UserAction::Previous),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, CommandError> {
    text.parse::<T>()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}

/// One-based position on screen to zero-based index, capped at `max`.
fn parse_position(text: &str, max: usize) -> Result<usize, CommandError> {
    let position: usize = parse_number(text)?;
    if position == 0 || position > max {
        return Err(CommandError::InvalidNumber(text.to_string()));
    }
    Ok(position - 1)
}
