use crate::geometry::Point;
use crate::ids::CellId;

/// Read-only access to the active scene's square grid.
pub trait GridOracle: std::fmt::Debug + Send + Sync {
    /// Side length of one grid cell in pixels.
    fn cell_size(&self) -> f64;

    /// Cell containing a pixel-space point.
    fn cell_of_point(&self, point: Point) -> CellId {
        let size = self.cell_size();
        CellId::new(
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    /// Pixel-space center of a cell.
    fn cell_center(&self, cell: CellId) -> Point {
        let size = self.cell_size();
        Point::new(
            (cell.x as f64 + 0.5) * size,
            (cell.y as f64 + 0.5) * size,
        )
    }
}
