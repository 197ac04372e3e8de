use thiserror::Error;

/// Configuration failures: a required host service is not available for the
/// current query (no active scene, no grid, and so on). Fatal to the query,
/// surfaced to the caller, never retried internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("no grid oracle available (scene not loaded?)")]
    GridNotAvailable,

    #[error("no wall oracle available")]
    WallsNotAvailable,

    #[error("no tile oracle available")]
    TilesNotAvailable,
}
