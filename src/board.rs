use crate::error::{Error, Result};
use crate::{Cell, CellKind, GameStatus, Visibility};
use std::fmt::{Display, Formatter};
use std::iter::Flatten;
use std::num::NonZeroUsize;
use std::ops::{Index, IndexMut};

/// A grid of cells. Games hand theirs out only by shared reference, so the
/// engine in [`crate::grid`] is the one thing that mutates it.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Vec<Vec<Cell>>,
    size: BoardSize
}

/// `(row, col)`, both zero-based.
pub type Point = (usize, usize);

impl Board {

    pub fn new(board_size: BoardSize, cell: Cell) -> Self {
        Self {
            grid: vec![vec![cell; board_size.width().into()]; board_size.height().into()],
            size: board_size
        }
    }

    pub fn closed(board_size: BoardSize) -> Self {
        Self::new(board_size, Cell::CLOSED_EMPTY)
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.grid.get(point.0)?.get(point.1)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.into_iter()
    }

    /// Lost as soon as any mine is open, won once every safe cell is open.
    pub fn evaluate(&self) -> GameStatus {
        let mut safe_left = false;

        for cell in self {
            match cell {
                Cell { kind: CellKind::Mine, visibility: Visibility::Open } => return GameStatus::Lost,
                Cell { kind: CellKind::Mine, .. } => {}
                Cell { visibility, .. } if *visibility != Visibility::Open => safe_left = true,
                _ => {}
            }
        }

        if safe_left { GameStatus::Running } else { GameStatus::Won }
    }
}

impl Index<Point> for Board {
    type Output = Cell;

    fn index(&self, index: Point) -> &Self::Output {
        &self.grid[index.0][index.1]
    }
}

impl IndexMut<Point> for Board {
    fn index_mut(&mut self, index: Point) -> &mut Self::Output {
        &mut self.grid[index.0][index.1]
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Cell;
    type IntoIter = Flatten<std::slice::Iter<'a, Vec<Cell>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.grid
                .iter()
                .flatten()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BoardSize {
    width: NonZeroUsize,
    height: NonZeroUsize,
    mines: NonZeroUsize
}

impl BoardSize {
    /// Structural check only: non-empty, at least one mine and at least one
    /// safe cell. Policy bounds live in [`crate::Policy`].
    pub fn new(width: usize, height: usize, mines: usize) -> Result<Self> {
        let invalid = || Error::InvalidParameters { width, height, mines };

        let w = NonZeroUsize::new(width).ok_or_else(invalid)?;
        let h = NonZeroUsize::new(height).ok_or_else(invalid)?;
        let m = NonZeroUsize::new(mines).ok_or_else(invalid)?;

        if mines >= width.saturating_mul(height) {
            return Err(invalid())
        }

        Ok(Self {
            width: w,
            height: h,
            mines: m
        })
    }

    pub fn width(&self) -> NonZeroUsize {
        self.width
    }

    pub fn height(&self) -> NonZeroUsize {
        self.height
    }

    pub fn mines(&self) -> NonZeroUsize {
        self.mines
    }

    pub fn area(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.0 < usize::from(self.height) && point.1 < usize::from(self.width)
    }

    /// The up to 8 cells around `point`, clipped at the edges.
    pub fn neighbours(self, point: Point) -> impl Iterator<Item = Point> {
        let mut neighbours = vec![];

        for row in point.0.saturating_sub(1)..=usize::min(usize::from(self.height) - 1, point.0.saturating_add(1)) {
            for col in point.1.saturating_sub(1)..=usize::min(usize::from(self.width) - 1, point.1.saturating_add(1)) {
                if (row, col) != point {
                    neighbours.push((row, col))
                }
            }
        }

        neighbours.into_iter()
    }

    /// Every point, row by row.
    pub fn points(self) -> impl Iterator<Item = Point> {
        (0..usize::from(self.height))
                .flat_map(move |row| (0..usize::from(self.width))
                        .map(move |col| (row, col)))
    }
}
