//! Minesweeper for chat bots: a grid engine, a concurrency-safe store of live
//! games keyed by the message that displays them, and the orchestration that
//! turns taps on that message into reveals and re-renders.

use std::fmt::{Display, Formatter};

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod policy;
pub mod prompt;
pub mod render;
pub mod session;
pub mod store;

pub use board::{Board, BoardSize, Point};
pub use config::{Config, ConfigError};
pub use error::{Error, Field, Result, ValidationError};
pub use grid::Grid;
pub use policy::{GameParameters, Policy};
pub use prompt::{Command, ParameterPrompt, PromptStep};
pub use render::{render_cell, render_grid, CellTag, RenderedCell, RenderedView, Token};
pub use session::{GameResult, Games, Outcome, PendingGame};
pub use store::{SessionKey, SessionStore, SharedGrid};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub visibility: Visibility
}

impl Cell {
    pub const CLOSED_EMPTY: Cell = Cell::new(CellKind::Empty, Visibility::Closed);

    pub const fn new(kind: CellKind, visibility: Visibility) -> Self {
        Self {
            kind,
            visibility
        }
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.visibility, Visibility::Open)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.visibility) {
            (_, Visibility::Closed) => write!(f, "▩"),
            (_, Visibility::Flagged) => write!(f, "!"),
            (CellKind::Empty, Visibility::Open) => write!(f, " "),
            (CellKind::Numbered(number), Visibility::Open) => write!(f, "{number}"),
            (CellKind::Mine, Visibility::Open) => write!(f, "*")
        }
    }
}

/// What a cell holds. Fixed when the grid is generated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CellKind {
    Empty,
    Mine,
    /// Number of adjacent mines, always in `1..=8`.
    Numbered(u8)
}

impl CellKind {
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => CellKind::Empty,
            count => CellKind::Numbered(count)
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Visibility {
    Closed, Flagged, Open
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameStatus {
    Running, Won, Lost
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}
