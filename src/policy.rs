use crate::board::BoardSize;
use crate::error::{Error, Field, Result, ValidationError};
use serde::{Deserialize, Serialize};

/// What the user asked for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameParameters {
    pub width: usize,
    pub height: usize,
    pub mines: usize
}

impl GameParameters {
    pub const fn new(width: usize, height: usize, mines: usize) -> Self {
        Self { width, height, mines }
    }
}

/// Bounds a game must fit in before a grid is generated for it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub min_size: usize,
    pub max_size: usize,
    pub min_mines: usize,
    /// Upper bound on mines as a percentage of the grid area, rounded down.
    pub max_mine_percent: usize
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_size: 4,
            max_size: 8,
            min_mines: 1,
            max_mine_percent: 80
        }
    }
}

impl Policy {

    pub fn max_mines(&self, width: usize, height: usize) -> usize {
        width.saturating_mul(height).saturating_mul(self.max_mine_percent) / 100
    }

    /// Rejects policies that would let a degenerate grid through validation.
    pub fn check(&self) -> std::result::Result<(), &'static str> {
        if self.min_size == 0 {
            return Err("minimum size must be positive")
        }
        if self.min_size > self.max_size {
            return Err("minimum size is larger than maximum size")
        }
        if self.min_mines == 0 {
            return Err("minimum mine count must be positive")
        }
        if self.max_mine_percent >= 100 {
            return Err("mines must leave at least one safe cell")
        }
        if self.max_mines(self.max_size, self.max_size) < self.min_mines {
            return Err("no grid size admits the minimum mine count")
        }
        Ok(())
    }

    pub fn validate_width(&self, width: usize) -> std::result::Result<usize, ValidationError> {
        if (self.min_size..=self.max_size).contains(&width) {
            Ok(width)
        } else {
            Err(self.size_error(Field::Width))
        }
    }

    pub fn validate_height(&self, height: usize) -> std::result::Result<usize, ValidationError> {
        if (self.min_size..=self.max_size).contains(&height) {
            Ok(height)
        } else {
            Err(self.size_error(Field::Height))
        }
    }

    /// Checks width, height, the minimum and then the maximum mine count, and
    /// reports the first one that fails.
    pub fn validate(&self, parameters: GameParameters) -> std::result::Result<GameParameters, ValidationError> {
        let GameParameters { width, height, mines } = parameters;

        self.validate_width(width)?;
        self.validate_height(height)?;

        if mines < self.min_mines {
            return Err(ValidationError::new(
                Field::MineCount,
                format!("Mines count should be at least `{}`", self.min_mines)
            ))
        }

        let max_mines = self.max_mines(width, height);
        if mines > max_mines {
            return Err(ValidationError::new(
                Field::MineCount,
                format!("Max mines count for `{width}` by `{height}` minefield is `{max_mines}`, you entered `{mines}`")
            ))
        }

        Ok(parameters)
    }

    /// The engine's own check: anything outside the policy is a contract
    /// violation here, not something to explain to the user.
    pub fn board_size(&self, parameters: GameParameters) -> Result<BoardSize> {
        let GameParameters { width, height, mines } = parameters;

        if self.validate(parameters).is_err() {
            return Err(Error::InvalidParameters { width, height, mines })
        }

        BoardSize::new(width, height, mines)
    }

    pub(crate) fn size_error(&self, field: Field) -> ValidationError {
        let name = match field {
            Field::Width => "Width",
            Field::Height => "Height",
            Field::MineCount => "Mines count"
        };

        ValidationError::new(field, format!("{name} should be in between `{}` and `{}`", self.min_size, self.max_size))
    }
}
