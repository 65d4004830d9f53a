use std::str::FromStr;

use quiz_core::model::QuizId;
use thiserror::Error;

/// One line of user input, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show(QuizId),
    Add,
    Delete(QuizId),
    Edit(QuizId),
    Test(QuizId),
    Play,
    Credits,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing <id> parameter for {command}")]
    MissingParameter { command: &'static str },
    #[error("the <id> parameter is not a number: {raw}")]
    NotANumber { raw: String },
}

impl Command {
    /// Parse a command line. Command words are case-insensitive; `h`, `p`
    /// and `q` alias `help`, `play` and `quit`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Empty` for blank lines, `Unknown` for
    /// unrecognized command words, and `MissingParameter`/`NotANumber` for
    /// a bad or absent `<id>` argument.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };

        match head.to_lowercase().as_str() {
            "h" | "help" => Ok(Self::Help),
            "list" => Ok(Self::List),
            "show" => Ok(Self::Show(parse_id("show", parts.next())?)),
            "add" => Ok(Self::Add),
            "delete" => Ok(Self::Delete(parse_id("delete", parts.next())?)),
            "edit" => Ok(Self::Edit(parse_id("edit", parts.next())?)),
            "test" => Ok(Self::Test(parse_id("test", parts.next())?)),
            "p" | "play" => Ok(Self::Play),
            "credits" => Ok(Self::Credits),
            "q" | "quit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

/// Check a raw id token: present, and an integer.
///
/// # Errors
///
/// `MissingParameter` if the token is absent, `NotANumber` if it does not
/// parse as an unsigned integer.
pub fn parse_id(command: &'static str, raw: Option<&str>) -> Result<QuizId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingParameter { command })?;
    QuizId::from_str(raw).map_err(|_| CommandError::NotANumber {
        raw: raw.to_string(),
    })
}
