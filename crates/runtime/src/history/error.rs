//! Error types raised by history store implementations.

use thiserror::Error;

/// Errors surfaced by history store implementations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
