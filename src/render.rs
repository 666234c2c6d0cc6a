use crate::board::Point;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::{Cell, CellKind, Visibility};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Transport-neutral name for what a cell currently shows.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    Closed,
    Flag,
    Mine,
    Blank,
    Digit(u8)
}

impl Token {
    /// Glyph for chat keyboards.
    pub const fn symbol(self) -> &'static str {
        match self {
            Token::Closed => "⬜️",
            Token::Flag => "ℹ️",
            Token::Mine => "⚫️",
            Token::Blank => " ",
            Token::Digit(1) => "1️⃣",
            Token::Digit(2) => "2️⃣",
            Token::Digit(3) => "3️⃣",
            Token::Digit(4) => "4️⃣",
            Token::Digit(5) => "5️⃣",
            Token::Digit(6) => "6️⃣",
            Token::Digit(7) => "7️⃣",
            Token::Digit(8) => "8️⃣",
            Token::Digit(_) => "?"
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Closed => write!(f, "closed"),
            Token::Flag => write!(f, "flag"),
            Token::Mine => write!(f, "mine"),
            Token::Blank => write!(f, "blank"),
            Token::Digit(number) => write!(f, "digit-{number}")
        }
    }
}

impl Serialize for Token {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn render_cell(cell: Cell) -> Token {
    match (cell.visibility, cell.kind) {
        (Visibility::Flagged, _) => Token::Flag,
        (Visibility::Closed, _) => Token::Closed,
        (Visibility::Open, CellKind::Mine) => Token::Mine,
        (Visibility::Open, CellKind::Empty) => Token::Blank,
        (Visibility::Open, CellKind::Numbered(number)) => Token::Digit(number)
    }
}

/// Where a rendered cell sits. The transport puts [`CellTag::encode`] into the
/// tap payload and hands it back through [`CellTag::decode`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellTag {
    pub row: usize,
    pub col: usize
}

impl CellTag {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn point(self) -> Point {
        (self.row, self.col)
    }

    pub fn encode(self) -> String {
        serde_json::json!({ "row": self.row, "col": self.col }).to_string()
    }

    pub fn decode(data: &str) -> Result<Self> {
        serde_json::from_str(data)
                .map_err(|_| Error::MalformedTag(data.to_owned()))
    }
}

impl From<Point> for CellTag {
    fn from((row, col): Point) -> Self {
        Self::new(row, col)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RenderedCell {
    pub token: Token,
    pub tag: CellTag
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RenderedView {
    pub title: String,
    pub rows: Vec<Vec<RenderedCell>>
}

impl RenderedView {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn token(&self, (row, col): Point) -> Option<Token> {
        Some(self.rows.get(row)?.get(col)?.token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.rows.iter().flatten().map(|cell| cell.token)
    }
}

pub fn render_grid(grid: &Grid, title: impl Into<String>) -> RenderedView {
    let rows = grid.snapshot()
            .rows()
            .enumerate()
            .map(|(row, cells)| cells.iter()
                    .enumerate()
                    .map(|(col, &cell)| RenderedCell {
                        token: render_cell(cell),
                        tag: CellTag::new(row, col)
                    })
                    .collect())
            .collect();

    RenderedView {
        title: title.into(),
        rows
    }
}
