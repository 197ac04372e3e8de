//! Public API surface of the runtime.

pub mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::{ActivitySummary, OracleSet, ProbeHandle, ScanReport};
