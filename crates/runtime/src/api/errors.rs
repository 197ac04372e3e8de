//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from oracle configuration, registry lookups, history
//! stores, and action runners so hosts can bubble them up with consistent
//! context.
use thiserror::Error;

use probe_core::{ActivityId, OracleError};

pub use crate::history::HistoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Configuration(#[from] OracleError),

    #[error("no scene is active")]
    NoActiveScene,

    #[error("activity {0} is not registered")]
    ActivityNotFound(ActivityId),

    #[error("no runner registered for action {action} of activity {activity}")]
    RunnerNotFound {
        activity: ActivityId,
        action: probe_core::ActionId,
    },

    #[error("{kind} {id} does not exist")]
    EntityNotFound { kind: &'static str, id: String },

    #[error("scan requires a selected actor")]
    NoActor,

    #[error("no authority channel is connected")]
    NoAuthority,

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl RuntimeError {
    /// True for lookup failures an executor may skip over rather than abort
    /// the whole activity on.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RuntimeError::ActivityNotFound(_)
                | RuntimeError::RunnerNotFound { .. }
                | RuntimeError::EntityNotFound { .. }
        )
    }
}
