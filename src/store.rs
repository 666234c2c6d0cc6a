use crate::grid::Grid;
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifier of the message that displays a game. Handed out by the
/// transport; never generated here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(pub i64);

impl From<i64> for SessionKey {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live game. Hold the lock for the whole reveal-then-read so the two are
/// atomic with respect to other taps on the same game.
pub type SharedGrid = Arc<tokio::sync::Mutex<Grid>>;

/// Live games by session key.
///
/// The map lock is only held for the lookup itself, never while a grid is
/// locked, so games on different keys never wait on each other.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<LinkedHashMap<SessionKey, SharedGrid>>,
    capacity: Option<NonZeroUsize>
}

impl SessionStore {

    pub fn new() -> Self {
        Self::default()
    }

    /// With `Some(n)`, keeps at most `n` sessions and drops the one touched
    /// longest ago to make room.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            sessions: Default::default(),
            capacity: capacity.and_then(NonZeroUsize::new)
        }
    }

    fn sessions(&self) -> MutexGuard<'_, LinkedHashMap<SessionKey, SharedGrid>> {
        // the map is never left half-updated, so a poisoned lock is still usable
        self.sessions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, key: SessionKey, grid: Grid) -> SharedGrid {
        let grid = Arc::new(tokio::sync::Mutex::new(grid));
        let mut sessions = self.sessions();

        if sessions.insert(key, grid.clone()).is_some() {
            log::warn!("session {key} replaced while still live");
        }

        if let Some(capacity) = self.capacity {
            while sessions.len() > capacity.get() {
                if let Some((evicted, _)) = sessions.pop_front() {
                    log::warn!("session store full, evicted session {evicted}");
                }
            }
        }

        grid
    }

    /// Looks up a session and marks it as recently touched.
    pub fn get(&self, key: SessionKey) -> Option<SharedGrid> {
        let mut sessions = self.sessions();

        let grid = sessions.remove(&key)?;
        sessions.insert(key, grid.clone());

        Some(grid)
    }

    pub fn remove(&self, key: SessionKey) -> Option<SharedGrid> {
        self.sessions().remove(&key)
    }

    pub fn contains(&self, key: SessionKey) -> bool {
        self.sessions().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }
}
