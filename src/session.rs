use crate::board::Point;
use crate::config::Config;
use crate::error::Result;
use crate::grid::Grid;
use crate::policy::{GameParameters, Policy};
use crate::render::{render_grid, RenderedView};
use crate::store::{SessionKey, SessionStore};
use crate::GameStatus;

pub const NEW_GAME_TITLE: &str = "New game";
pub const RUNNING_TITLE: &str = "Minesweeper";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameResult {
    Won, Lost
}

impl GameResult {
    /// Alert text for the tap that ended the game.
    pub const fn notice(self) -> &'static str {
        match self {
            GameResult::Won => "You won!",
            GameResult::Lost => "Game over!"
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The game goes on; edit the message to show this view.
    Continue(RenderedView),
    /// The game ended and its session is gone.
    Terminal {
        result: GameResult,
        view: RenderedView
    },
    /// No live game behind this key.
    Stale
}

/// A generated game waiting for the transport to deliver its first view.
#[derive(Clone, Debug)]
pub struct PendingGame {
    grid: Grid,
    view: RenderedView
}

impl PendingGame {
    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Starts games and routes taps to them.
#[derive(Debug, Default)]
pub struct Games {
    policy: Policy,
    store: SessionStore
}

impl Games {

    pub fn new(config: &Config) -> Self {
        Self {
            policy: config.policy,
            store: SessionStore::with_capacity(config.session_capacity)
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Validates `parameters` and generates a grid for them. Nothing is stored
    /// until the view has been delivered and [`Games::register_session`] is
    /// called with the key of the delivered message.
    pub fn start_game(&self, parameters: GameParameters) -> Result<PendingGame> {
        let parameters = self.policy.validate(parameters)?;

        let grid = Grid::create_with_policy(parameters, &self.policy)
                .inspect_err(|error| log::error!("validated parameters {parameters:?} rejected by grid: {error}"))?;

        let view = render_grid(&grid, NEW_GAME_TITLE);

        Ok(PendingGame { grid, view })
    }

    pub fn register_session(&self, key: SessionKey, grid: Grid) {
        log::info!("session {key} started on a {}x{} grid", grid.size().width(), grid.size().height());

        self.store.put(key, grid);
    }

    /// Reveals `(row, col)` in the game behind `key`.
    pub async fn apply_tap(&self, key: SessionKey, row: usize, col: usize) -> Outcome {
        self.apply(key, (row, col), Grid::reveal).await
    }

    /// Flags or unflags `(row, col)` in the game behind `key`.
    pub async fn apply_flag(&self, key: SessionKey, row: usize, col: usize) -> Outcome {
        self.apply(key, (row, col), Grid::toggle_flag).await
    }

    async fn apply(&self, key: SessionKey, point: Point, action: fn(&mut Grid, Point) -> GameStatus) -> Outcome {
        let Some(session) = self.store.get(key) else {
            log::debug!("tap on unknown session {key}");
            return Outcome::Stale
        };

        let mut grid = session.lock().await;

        // another tap finished this game while we waited for the lock
        if grid.state() != GameStatus::Running {
            return Outcome::Stale
        }

        if !grid.size().contains(point) {
            log::warn!("tap outside the grid at {point:?} in session {key}");
        }

        let result = match action(&mut grid, point) {
            GameStatus::Running => return Outcome::Continue(render_grid(&grid, RUNNING_TITLE)),
            GameStatus::Won => GameResult::Won,
            GameStatus::Lost => GameResult::Lost
        };

        self.store.remove(key);
        log::info!("session {key} finished: {}", result.notice());

        Outcome::Terminal {
            result,
            view: render_grid(&grid, result.notice())
        }
    }
}
