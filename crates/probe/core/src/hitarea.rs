//! Hit-area construction: the resolved set of cells, walls, and tiles
//! actually within line-of-sight-aware proximity of a token.

use std::collections::BTreeSet;

use crate::env::{OracleError, ProbeEnv};
use crate::geometry::{Bounds, Edge, Point, polygons_intersect, segments_intersect};
use crate::ids::{CellId, TileId, WallId};
use crate::proximity::{Octant, ProximityShape, affected_cells};
use crate::segment::WallSegmenter;
use crate::sweep::{SweepRequest, sweep_visibility};

/// One proximity query. Immutable, constructed per scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityRequest {
    /// Grid cell the scanning token occupies.
    pub origin: CellId,
    /// Facing quantized to a compass octant.
    pub facing: Octant,
    /// Cone ahead of the token, or everything around it.
    pub shape: ProximityShape,
    /// Reach in grid cells.
    pub distance: u32,
}

impl ProximityRequest {
    pub fn new(origin: CellId, facing: Octant, shape: ProximityShape, distance: u32) -> Self {
        Self {
            origin,
            facing,
            shape,
            distance,
        }
    }
}

/// The resolved result of a proximity query. Read-only once returned.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitArea {
    pub cell_ids: BTreeSet<CellId>,
    pub wall_ids: BTreeSet<WallId>,
    pub tile_ids: BTreeSet<TileId>,
    /// Visibility boundary polygon, for rendering and tile hit-testing.
    pub polygon: Vec<Point>,
}

impl HitArea {
    /// True when the scan found nothing at all.
    pub fn is_empty(&self) -> bool {
        self.cell_ids.is_empty() && self.wall_ids.is_empty() && self.tile_ids.is_empty()
    }
}

/// Combines the sweep, the wall segmenter, the grid mapper, and tile
/// collision into one [`HitArea`] per query.
///
/// Building twice with identical inputs against identical map state yields
/// identical output.
pub struct HitAreaBuilder<'a> {
    env: ProbeEnv<'a>,
    segmenter: WallSegmenter,
}

impl<'a> HitAreaBuilder<'a> {
    pub fn new(env: ProbeEnv<'a>) -> Self {
        Self {
            env,
            segmenter: WallSegmenter::new(),
        }
    }

    pub fn with_segmenter(env: ProbeEnv<'a>, segmenter: WallSegmenter) -> Self {
        Self { env, segmenter }
    }

    pub fn build(&self, request: &ProximityRequest) -> Result<HitArea, OracleError> {
        let grid = self.env.grid()?;
        let wall_oracle = self.env.walls()?;
        let tile_oracle = self.env.tiles()?;

        let cell_size = grid.cell_size();
        let origin = grid.cell_center(request.origin);
        // Half a cell of slack so walls flush against the outermost cell
        // centers still occlude them.
        let radius = (request.distance as f64 + 0.5) * cell_size;

        let region = Bounds::around(origin, radius);
        let candidate_walls = wall_oracle.walls_near(&region);

        let visibility = sweep_visibility(&SweepRequest {
            origin,
            facing: request.facing.angle(),
            shape: request.shape,
            radius,
            walls: &candidate_walls,
        });

        let wraparound = request.shape == ProximityShape::Close;
        let segments = self.segmenter.segment(&visibility, wraparound);
        let wall_ids: BTreeSet<WallId> = segments
            .iter()
            .flat_map(|s| s.wall_ids().cloned())
            .collect();

        // A cell is hit unless a boundary wall cuts the line from the origin
        // to its center.
        let cell_ids: BTreeSet<CellId> =
            affected_cells(request.origin, request.facing, request.shape, request.distance)
                .into_iter()
                .filter(|cell| {
                    let sight = Edge::new(origin, grid.cell_center(*cell));
                    !visibility.boundary_walls.iter().any(|wall| {
                        segments_intersect(&sight, &Edge::new(wall.a, wall.b)).is_some()
                    })
                })
                .collect();

        let tile_ids: BTreeSet<TileId> = tile_oracle
            .tiles()
            .into_iter()
            .filter(|tile| polygons_intersect(&tile.polygon, &visibility.polygon))
            .map(|tile| tile.id)
            .collect();

        Ok(HitArea {
            cell_ids,
            wall_ids,
            tile_ids,
            polygon: visibility.polygon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, GridOracle, TileOracle, TileShape, WallOracle};
    use crate::sweep::WallRef;

    #[derive(Debug)]
    struct SquareGrid;

    impl GridOracle for SquareGrid {
        fn cell_size(&self) -> f64 {
            100.0
        }
    }

    #[derive(Debug)]
    struct StaticWalls(Vec<WallRef>);

    impl WallOracle for StaticWalls {
        fn walls_near(&self, region: &Bounds) -> Vec<WallRef> {
            self.0
                .iter()
                .filter(|w| w.bounds().overlaps(region))
                .cloned()
                .collect()
        }

        fn attribute(&self, _wall: &WallId, _key: &str) -> Option<String> {
            None
        }
    }

    #[derive(Debug)]
    struct StaticTiles(Vec<TileShape>);

    impl TileOracle for StaticTiles {
        fn tiles(&self) -> Vec<TileShape> {
            self.0.clone()
        }
    }

    fn request_north(distance: u32) -> ProximityRequest {
        ProximityRequest::new(
            CellId::new(0, 0),
            Octant::North,
            ProximityShape::Cone,
            distance,
        )
    }

    #[test]
    fn missing_grid_is_a_configuration_error() {
        let walls = StaticWalls(Vec::new());
        let tiles = StaticTiles(Vec::new());
        let env: ProbeEnv<'_> = Env::new(None, Some(&walls), Some(&tiles));
        let err = HitAreaBuilder::new(env).build(&request_north(3)).unwrap_err();
        assert_eq!(err, OracleError::GridNotAvailable);
    }

    #[test]
    fn open_cone_hits_the_full_triangular_expansion() {
        let grid = SquareGrid;
        let walls = StaticWalls(Vec::new());
        let tiles = StaticTiles(Vec::new());
        let env = Env::with_all(
            &grid as &dyn GridOracle,
            &walls as &dyn WallOracle,
            &tiles as &dyn TileOracle,
        );
        let area = HitAreaBuilder::new(env).build(&request_north(3)).unwrap();
        assert_eq!(
            area.cell_ids,
            affected_cells(CellId::new(0, 0), Octant::North, ProximityShape::Cone, 3)
        );
        assert!(area.wall_ids.is_empty());
        assert!(area.tile_ids.is_empty());
        assert!(!area.is_empty());
    }

    #[test]
    fn blocking_wall_removes_cell_and_registers_wall() {
        let grid = SquareGrid;
        // Grid line between rows -1 and -2, spanning the origin column.
        let walls = StaticWalls(vec![WallRef::new(
            "w-block",
            Point::new(0.0, -100.0),
            Point::new(100.0, -100.0),
        )]);
        let tiles = StaticTiles(Vec::new());
        let env = Env::with_all(
            &grid as &dyn GridOracle,
            &walls as &dyn WallOracle,
            &tiles as &dyn TileOracle,
        );
        let area = HitAreaBuilder::new(env).build(&request_north(2)).unwrap();
        assert!(!area.cell_ids.contains(&CellId::new(0, -2)), "wall blocks the cell behind it");
        assert!(area.cell_ids.contains(&CellId::new(0, -1)), "cell in front of the wall stays");
        assert!(area.wall_ids.contains(&WallId::from("w-block")));
    }

    #[test]
    fn tile_overlapping_the_polygon_is_hit() {
        let grid = SquareGrid;
        let walls = StaticWalls(Vec::new());
        let tiles = StaticTiles(vec![
            TileShape::new(
                "t-near",
                vec![
                    Point::new(0.0, -100.0),
                    Point::new(100.0, -100.0),
                    Point::new(100.0, -0.0),
                    Point::new(0.0, -0.0),
                ],
            ),
            TileShape::new(
                "t-far",
                vec![
                    Point::new(5000.0, 5000.0),
                    Point::new(5100.0, 5000.0),
                    Point::new(5100.0, 5100.0),
                    Point::new(5000.0, 5100.0),
                ],
            ),
        ]);
        let env = Env::with_all(
            &grid as &dyn GridOracle,
            &walls as &dyn WallOracle,
            &tiles as &dyn TileOracle,
        );
        let area = HitAreaBuilder::new(env).build(&request_north(2)).unwrap();
        assert!(area.tile_ids.contains(&TileId::from("t-near")));
        assert!(!area.tile_ids.contains(&TileId::from("t-far")));
    }

    #[test]
    fn identical_inputs_build_identical_areas() {
        let grid = SquareGrid;
        let walls = StaticWalls(vec![WallRef::new(
            "w1",
            Point::new(-20.0, -150.0),
            Point::new(120.0, -150.0),
        )]);
        let tiles = StaticTiles(Vec::new());
        let env = Env::with_all(
            &grid as &dyn GridOracle,
            &walls as &dyn WallOracle,
            &tiles as &dyn TileOracle,
        );
        let builder = HitAreaBuilder::new(env);
        let a = builder.build(&request_north(3)).unwrap();
        let b = builder.build(&request_north(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_area_reports_empty() {
        assert!(HitArea::default().is_empty());
    }
}
