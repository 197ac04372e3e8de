//! Persistent activity result history.
//!
//! Results are keyed by `(scene, activity)` and append-only: availability
//! policies only ever read the full list for one key. Two implementations
//! are provided, an in-memory store for tests and ephemeral sessions and a
//! JSON file store for persistence across host restarts.

mod error;
mod file;
mod memory;

pub use error::HistoryError;
pub use file::FileHistoryStore;
pub use memory::InMemoryHistoryStore;

use probe_core::{ActivityId, ActivityResult, SceneId};

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Append-only store of activity results.
pub trait HistoryStore: Send + Sync {
    /// All results recorded for one activity in one scene, oldest first.
    fn get(&self, scene: &SceneId, activity: &ActivityId) -> Result<Vec<ActivityResult>>;

    /// Appends one result. Never rewrites earlier entries.
    fn append(
        &self,
        scene: &SceneId,
        activity: &ActivityId,
        result: ActivityResult,
    ) -> Result<()>;
}
