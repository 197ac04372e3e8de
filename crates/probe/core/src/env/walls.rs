use crate::geometry::Bounds;
use crate::ids::WallId;
use crate::sweep::WallRef;

/// Read-only access to the active scene's wall layer.
pub trait WallOracle: std::fmt::Debug + Send + Sync {
    /// Candidate obstructing walls whose bounds overlap a region.
    fn walls_near(&self, region: &Bounds) -> Vec<WallRef>;

    /// Arbitrary host-side attribute of a wall, used by location filters
    /// (for example `"door" -> "secret"`). `None` when the wall vanished or
    /// carries no such attribute.
    fn attribute(&self, wall: &WallId, key: &str) -> Option<String>;
}
