//! Bundled activity definitions.
//!
//! This crate houses ready-made activity content for common hidden-feature
//! setups:
//! - Secret doors (wall-attribute scoped reveal with a presence fallback)
//! - Hidden inscriptions (grid-scoped discovery, once per spot per actor)
//!
//! Definitions are plain [`probe_core::ActivityDefinition`] values; the
//! runtime registers them together with host-provided action runners.
//! Content never carries execution state.

pub mod definitions;

pub use definitions::{hidden_inscription_activity, secret_door_activity};
