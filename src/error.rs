use thiserror::Error;

/// The game parameter a [`ValidationError`] refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    Width,
    Height,
    MineCount
}

/// A user-correctable problem with the requested game parameters. Displays as
/// its reason, which is meant to be shown to the user as is.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    #[error("grid cannot be {width} by {height} with {mines} mines")]
    InvalidParameters {
        width: usize,
        height: usize,
        mines: usize
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("malformed cell tag {0:?}")]
    MalformedTag(String)
}

impl Error {
    /// The text to show the user, if this error is theirs to fix.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Error::Validation(error) => Some(&error.reason),
            _ => None
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
