//! Deterministic proximity-detection core shared by the runtime and tools.
//!
//! `probe-core` defines the geometry and visibility engine (collision
//! primitives, the angular sweep, wall segmentation, grid proximity mapping,
//! hit-area construction) together with the data-driven activity model and
//! its availability policy engine. Everything here is pure and re-entrant:
//! host services are reached only through the oracle traits in [`env`], and
//! the runtime crate layers persistence and execution on top of the types
//! re-exported here.
pub mod activity;
pub mod env;
pub mod geometry;
pub mod hitarea;
pub mod ids;
pub mod proximity;
pub mod segment;
pub mod sweep;

pub use activity::{
    ActionDefinition, ActivityDefinition, ActivityResult, AvailabilityPolicy, LocationFilter,
    PriorityClass, TestOutcome, TestSpec, action_available, activity_available,
};
pub use env::{Env, GridOracle, OracleError, ProbeEnv, TileOracle, TileShape, WallOracle};
pub use geometry::{Bounds, Edge, Point, polygons_intersect, segments_intersect};
pub use hitarea::{HitArea, HitAreaBuilder, ProximityRequest};
pub use ids::{ActionId, ActivityId, ActorId, CellId, SceneId, TileId, WallId};
pub use proximity::{Octant, ProximityShape, affected_cells};
pub use segment::{INACCURACY_TOLERANCE, WallSegment, WallSegmenter};
pub use sweep::{BoundaryPoint, SweepRequest, VisibilityResult, WallRef, sweep_visibility};
