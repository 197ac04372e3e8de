use crate::geometry::Point;
use crate::ids::TileId;

/// Bounding polygon of one placed tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileShape {
    pub id: TileId,
    pub polygon: Vec<Point>,
}

impl TileShape {
    pub fn new(id: impl Into<TileId>, polygon: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            polygon,
        }
    }
}

/// Read-only access to the active scene's tile layer.
pub trait TileOracle: std::fmt::Debug + Send + Sync {
    /// Bounding polygons of every tile in the scene.
    fn tiles(&self) -> Vec<TileShape>;
}
