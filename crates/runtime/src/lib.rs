//! Runtime orchestration for proximity-driven activities.
//!
//! This crate wires together the core proximity pipeline, activity
//! registration, test prompting, and result history into a cohesive API.
//! Hosts embed a [`ProbeHandle`] to scan for nearby activities and execute
//! them against host-provided action runners.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the handle and error types downstream clients use
//! - [`registry`] tracks registered activities and the active scene
//! - [`executor`] drives the test-then-act pipeline for one activity
//! - [`history`] persists per-scene activity results
//! - [`authority`] routes player executions to an authoritative peer
pub mod api;
pub mod authority;
pub mod executor;
pub mod history;
pub mod registry;
pub mod services;

pub use api::{
    ActivitySummary, OracleSet, ProbeHandle, Result, RuntimeError, ScanReport,
};
pub use authority::{ActivityRequest, AuthorityChannel, LocalAuthority, Role};
pub use executor::{ActivityExecutor, ExecutionStatus};
pub use history::{FileHistoryStore, HistoryError, HistoryStore, InMemoryHistoryStore};
pub use registry::{ActivityRegistry, RegisteredActivity};
pub use services::{ActionContext, ActionOutcome, ActionRunner, TestPromptService};
