//! The conversation that collects game parameters, one reply at a time.
//!
//! The transport keeps a [`ParameterPrompt`] per chat, sends its
//! [`ParameterPrompt::prompt`], and feeds the next reply to
//! [`ParameterPrompt::advance`].

use crate::error::{Field, ValidationError};
use crate::policy::{GameParameters, Policy};

pub const HELP_TEXT: &str = "Available commands:\n/help - Get this message\n/play - Play new game";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Start,
    Help,
    Play
}

impl Command {
    /// Recognises `/start`, `/help` and `/play`, with or without an
    /// `@botname` suffix.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = word.split_once('@').map_or(word, |(name, _)| name);

        match name {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "play" => Some(Command::Play),
            _ => None
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ParameterPrompt {
    #[default]
    AwaitingWidth,
    AwaitingHeight {
        width: usize
    },
    AwaitingMineCount {
        width: usize,
        height: usize
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PromptStep {
    Next(ParameterPrompt),
    Done(GameParameters)
}

impl ParameterPrompt {

    pub const fn prompt(&self) -> &'static str {
        match self {
            ParameterPrompt::AwaitingWidth => "Enter minefield width:",
            ParameterPrompt::AwaitingHeight { .. } => "Enter minefield height:",
            ParameterPrompt::AwaitingMineCount { .. } => "Enter mines count:"
        }
    }

    /// Consumes a reply. Sizes are checked as soon as they are entered; the
    /// mine count is checked together with the rest once it arrives.
    pub fn advance(self, reply: &str, policy: &Policy) -> Result<PromptStep, ValidationError> {
        let number = reply.trim().parse::<usize>();

        match self {
            ParameterPrompt::AwaitingWidth => {
                let width = number.map_err(|_| policy.size_error(Field::Width))?;
                let width = policy.validate_width(width)?;

                Ok(PromptStep::Next(ParameterPrompt::AwaitingHeight { width }))
            }
            ParameterPrompt::AwaitingHeight { width } => {
                let height = number.map_err(|_| policy.size_error(Field::Height))?;
                let height = policy.validate_height(height)?;

                Ok(PromptStep::Next(ParameterPrompt::AwaitingMineCount { width, height }))
            }
            ParameterPrompt::AwaitingMineCount { width, height } => {
                let mines = number.map_err(|_| ValidationError::new(Field::MineCount, "Invalid mines count"))?;

                policy.validate(GameParameters::new(width, height, mines))
                        .map(PromptStep::Done)
            }
        }
    }
}
