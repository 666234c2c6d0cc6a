use crate::board::{Board, BoardSize, Point};
use crate::error::{Error, Result};
use crate::policy::{GameParameters, Policy};
use crate::{Cell, CellKind, GameStatus, Visibility};
use std::collections::{HashSet, VecDeque};

/// One game: the cells plus whether it is still going.
#[derive(Clone, Debug)]
pub struct Grid {
    board: Board,
    status: GameStatus,
    flags: usize
}

impl Grid {

    /// Generates a grid within the default [`Policy`].
    pub fn create(width: usize, height: usize, mines: usize) -> Result<Self> {
        Self::create_with_policy(GameParameters::new(width, height, mines), &Policy::default())
    }

    pub fn create_with_policy(parameters: GameParameters, policy: &Policy) -> Result<Self> {
        let size = policy.board_size(parameters)?;

        Ok(Self::generate(size))
    }

    pub fn generate(size: BoardSize) -> Self {
        Self::generate_with(size, &mut fastrand::Rng::new())
    }

    /// Every position is equally likely to hold a mine.
    pub fn generate_with(size: BoardSize, rng: &mut fastrand::Rng) -> Self {
        let mut points: Vec<Point> = size.points().collect();
        rng.shuffle(&mut points);
        points.truncate(size.mines().into());

        log::debug!("generated {}x{} grid with {} mines", size.width(), size.height(), size.mines());

        Self::place(size, &points)
    }

    /// A grid with mines exactly at `mines`.
    pub fn with_mines(size: BoardSize, mines: &[Point]) -> Result<Self> {
        let invalid = || Error::InvalidParameters {
            width: size.width().into(),
            height: size.height().into(),
            mines: mines.len()
        };

        let distinct: HashSet<_> = mines.iter().copied().collect();
        if distinct.len() != mines.len()
                || mines.len() != usize::from(size.mines())
                || !mines.iter().all(|&point| size.contains(point)) {
            return Err(invalid())
        }

        Ok(Self::place(size, mines))
    }

    fn place(size: BoardSize, mines: &[Point]) -> Self {
        let mut board = Board::closed(size);

        for &point in mines {
            board[point] = Cell::new(CellKind::Mine, Visibility::Closed);
        }

        generate_numbers(&mut board);

        Self {
            board,
            status: GameStatus::Running,
            flags: 0
        }
    }

    pub fn state(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    pub fn snapshot(&self) -> &Board {
        &self.board
    }

    pub fn remaining_mines(&self) -> isize {
        usize::from(self.size().mines()) as isize - self.flags as isize
    }

    /// Opens the cell at `point`, cascading through empty cells.
    ///
    /// Does nothing once the game is over, for points outside the grid, and
    /// for cells that are already open or flagged.
    pub fn reveal(&mut self, point: Point) -> GameStatus {
        if self.status != GameStatus::Running {
            return self.status
        }

        let Some(cell) = self.board.get(point) else {
            log::warn!("reveal outside the grid at {point:?}");
            return self.status
        };

        if cell.visibility != Visibility::Closed {
            return self.status
        }

        self.board[point].visibility = Visibility::Open;

        if self.board[point].kind == CellKind::Empty {
            self.cascade(point);
        }

        self.status = self.board.evaluate();
        self.status
    }

    /// Opens the closed cells connected to `origin` through empty cells,
    /// including the numbered cells on the border. Only empty cells spread.
    fn cascade(&mut self, origin: Point) {
        let size = self.size();
        let mut visited = HashSet::from([origin]);
        let mut pending = VecDeque::from([origin]);
        let mut opened = 0usize;

        while let Some(point) = pending.pop_front() {
            for neighbour in size.neighbours(point) {
                if !visited.insert(neighbour) {
                    continue
                }

                let cell = &mut self.board[neighbour];
                if cell.visibility != Visibility::Closed || cell.is_mine() {
                    continue
                }

                cell.visibility = Visibility::Open;
                opened += 1;

                if cell.kind == CellKind::Empty {
                    pending.push_back(neighbour);
                }
            }
        }

        log::debug!("cascade from {origin:?} opened {opened} more cells");
    }

    /// Flags a closed cell or unflags a flagged one.
    pub fn toggle_flag(&mut self, point: Point) -> GameStatus {
        if self.status != GameStatus::Running {
            return self.status
        }

        let Some(cell) = self.board.get(point) else {
            return self.status
        };

        match cell.visibility {
            Visibility::Closed => {
                self.board[point].visibility = Visibility::Flagged;
                self.flags += 1;
            }
            Visibility::Flagged => {
                self.board[point].visibility = Visibility::Closed;
                self.flags -= 1;
            }
            Visibility::Open => {}
        }

        self.status
    }
}

fn generate_numbers(board: &mut Board) {
    let size = board.size();

    for point in size.points() {
        if board[point].is_mine() {
            continue
        }

        let count = size.neighbours(point)
                .filter(|&neighbour| board[neighbour].is_mine())
                .count();

        board[point].kind = CellKind::from_count(count as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize, mines: &[Point]) -> Grid {
        Grid::with_mines(BoardSize::new(width, height, mines.len()).unwrap(), mines).unwrap()
    }

    fn open_points(grid: &Grid) -> HashSet<Point> {
        grid.size()
                .points()
                .filter(|&point| grid.snapshot()[point].is_open())
                .collect()
    }

    fn assert_consistent(grid: &Grid) {
        let board = grid.snapshot();
        let size = grid.size();

        let mines = board.iter().filter(|cell| cell.is_mine()).count();
        assert_eq!(mines, usize::from(size.mines()));

        for point in size.points() {
            if board[point].is_mine() {
                continue
            }
            let count = size.neighbours(point).filter(|&n| board[n].is_mine()).count();
            assert_eq!(board[point].kind, CellKind::from_count(count as u8), "label at {point:?}");
        }

        let mine_open = board.iter().any(|cell| cell.is_mine() && cell.is_open());
        let safe_closed = board.iter().any(|cell| !cell.is_mine() && !cell.is_open());
        let expected = match (mine_open, safe_closed) {
            (true, _) => GameStatus::Lost,
            (false, false) => GameStatus::Won,
            (false, true) => GameStatus::Running
        };
        assert_eq!(grid.state(), expected);
    }

    #[test]
    fn generated_grids_have_exact_mines_and_labels() {
        let mut rng = fastrand::Rng::with_seed(7);
        let policy = Policy::default();

        for width in 4..=8 {
            for height in 4..=8 {
                for mines in [1, policy.max_mines(width, height) / 2, policy.max_mines(width, height)] {
                    let size = BoardSize::new(width, height, mines).unwrap();
                    let grid = Grid::generate_with(size, &mut rng);

                    assert_consistent(&grid);
                    assert!(grid.snapshot().iter().all(|cell| cell.visibility == Visibility::Closed));
                }
            }
        }
    }

    #[test]
    fn create_applies_policy() {
        assert!(Grid::create(8, 8, 51).is_ok());
        assert_eq!(Grid::create(8, 8, 52).unwrap_err(), Error::InvalidParameters { width: 8, height: 8, mines: 52 });
        assert!(Grid::create(3, 4, 1).is_err());
        assert!(Grid::create(4, 4, 0).is_err());
    }

    #[test]
    fn with_mines_rejects_bad_layouts() {
        let size = BoardSize::new(4, 4, 2).unwrap();

        assert!(Grid::with_mines(size, &[(0, 0)]).is_err());
        assert!(Grid::with_mines(size, &[(0, 0), (0, 0)]).is_err());
        assert!(Grid::with_mines(size, &[(0, 0), (4, 0)]).is_err());
        assert!(Grid::with_mines(size, &[(0, 0), (3, 3)]).is_ok());
    }

    #[test]
    fn cascade_from_far_corner_wins() {
        let mut grid = grid(4, 4, &[(0, 0)]);

        assert_eq!(grid.reveal((3, 3)), GameStatus::Won);
        assert_eq!(open_points(&grid).len(), 15);
        assert!(!grid.snapshot()[(0, 0)].is_open());
        assert_consistent(&grid);
    }

    #[test]
    fn revealing_mine_loses_and_freezes_grid() {
        let mut grid = grid(4, 4, &[(0, 0)]);

        assert_eq!(grid.reveal((0, 0)), GameStatus::Lost);
        let before = open_points(&grid);

        assert_eq!(grid.reveal((1, 1)), GameStatus::Lost);
        assert_eq!(grid.toggle_flag((2, 2)), GameStatus::Lost);
        assert_eq!(open_points(&grid), before);
        assert_eq!(grid.snapshot()[(2, 2)].visibility, Visibility::Closed);
        assert_consistent(&grid);
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut grid = grid(4, 4, &[(0, 0)]);

        assert_eq!(grid.reveal((1, 1)), GameStatus::Running);
        assert_eq!(open_points(&grid), HashSet::from([(1, 1)]));
        assert_eq!(grid.snapshot()[(1, 1)].kind, CellKind::Numbered(1));
    }

    #[test]
    fn reopening_open_or_flagged_cells_changes_nothing() {
        let mut grid = grid(5, 5, &[(0, 0), (4, 4)]);

        grid.reveal((0, 1));
        grid.toggle_flag((4, 4));
        let open = open_points(&grid);

        assert_eq!(grid.reveal((0, 1)), GameStatus::Running);
        assert_eq!(grid.reveal((4, 4)), GameStatus::Running);
        assert_eq!(open_points(&grid), open);
        assert_eq!(grid.snapshot()[(4, 4)].visibility, Visibility::Flagged);
    }

    #[test]
    fn out_of_bounds_reveal_is_ignored() {
        let mut grid = grid(4, 4, &[(0, 0)]);

        assert_eq!(grid.reveal((4, 0)), GameStatus::Running);
        assert_eq!(grid.reveal((0, 4)), GameStatus::Running);
        assert!(open_points(&grid).is_empty());
    }

    #[test]
    fn cascade_opens_exactly_the_empty_region_and_its_border() {
        // wall of mines down column 2 splits the board
        let mines = [(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)];
        let mut grid = grid(6, 5, &mines);

        assert_eq!(grid.reveal((2, 0)), GameStatus::Running);

        let expected: HashSet<Point> = (0..5).flat_map(|row| [(row, 0), (row, 1)]).collect();
        assert_eq!(open_points(&grid), expected);
        assert_consistent(&grid);
    }

    #[test]
    fn cascade_matches_region_search_on_random_grids() {
        let mut rng = fastrand::Rng::with_seed(42);

        for _ in 0..200 {
            let size = BoardSize::new(8, 8, rng.usize(1..=12)).unwrap();
            let mut grid = Grid::generate_with(size, &mut rng);
            let board = grid.snapshot().clone();

            let Some(origin) = size.points().find(|&point| board[point].kind == CellKind::Empty) else {
                continue
            };

            let mut region = HashSet::from([origin]);
            let mut stack = vec![origin];
            while let Some(point) = stack.pop() {
                for neighbour in size.neighbours(point) {
                    if board[neighbour].kind == CellKind::Empty && region.insert(neighbour) {
                        stack.push(neighbour);
                    }
                }
            }
            let border: Vec<Point> = region.iter()
                    .flat_map(|&point| size.neighbours(point))
                    .filter(|&point| !board[point].is_mine())
                    .collect();
            region.extend(border);

            grid.reveal(origin);

            assert_eq!(open_points(&grid), region);
            assert_consistent(&grid);
        }
    }

    #[test]
    fn flagged_cells_block_the_cascade() {
        let mut grid = grid(4, 4, &[(0, 0)]);

        grid.toggle_flag((2, 2));
        assert_eq!(grid.reveal((3, 3)), GameStatus::Running);
        assert_eq!(grid.snapshot()[(2, 2)].visibility, Visibility::Flagged);
        assert_eq!(open_points(&grid).len(), 14);

        grid.toggle_flag((2, 2));
        assert_eq!(grid.reveal((2, 2)), GameStatus::Won);
    }

    #[test]
    fn flags_count_down_remaining_mines() {
        let mut grid = grid(4, 4, &[(0, 0), (3, 3)]);

        assert_eq!(grid.remaining_mines(), 2);
        grid.toggle_flag((0, 0));
        grid.toggle_flag((1, 1));
        grid.toggle_flag((2, 2));
        assert_eq!(grid.remaining_mines(), -1);
        grid.toggle_flag((1, 1));
        assert_eq!(grid.remaining_mines(), 0);

        grid.reveal((0, 3));
        assert_eq!(grid.toggle_flag((0, 3)), GameStatus::Running);
        assert_eq!(grid.snapshot()[(0, 3)].visibility, Visibility::Open);
    }

    #[test]
    fn random_play_keeps_status_consistent() {
        let mut rng = fastrand::Rng::with_seed(3);

        for _ in 0..100 {
            let size = BoardSize::new(rng.usize(4..=8), rng.usize(4..=8), rng.usize(1..=10)).unwrap();
            let mut grid = Grid::generate_with(size, &mut rng);

            while grid.state() == GameStatus::Running {
                let point = (rng.usize(0..usize::from(size.height())), rng.usize(0..usize::from(size.width())));
                if rng.u8(0..4) == 0 {
                    grid.toggle_flag(point);
                } else {
                    grid.reveal(point);
                }
                assert_consistent(&grid);

                if grid.snapshot().iter().all(|cell| cell.is_mine() || cell.visibility == Visibility::Flagged || cell.is_open()) {
                    break
                }
            }
        }
    }
}
