//! Grouping of boundary walls into connected runs.
//!
//! The sweep reports boundary points in angular order together with the
//! walls touching each point. Walls drawn by hand rarely share exact
//! endpoint coordinates, so connectivity is judged with a proximity
//! tolerance: two walls belong to the same segment when some endpoint pair
//! sits within [`INACCURACY_TOLERANCE`] of each other, closed transitively
//! along the sweep. A full-circle sweep additionally merges the first and
//! last runs when they meet across the angular wraparound.

use crate::geometry::Point;
use crate::ids::WallId;
use crate::sweep::{VisibilityResult, WallRef};

/// Default endpoint distance below which two walls count as connected.
pub const INACCURACY_TOLERANCE: f64 = 5.0;

/// A maximal run of connected boundary walls with the boundary points that
/// discovered them, both in sweep order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSegment {
    pub walls: Vec<WallRef>,
    pub points: Vec<Point>,
}

impl WallSegment {
    pub fn wall_ids(&self) -> impl Iterator<Item = &WallId> {
        self.walls.iter().map(|w| &w.id)
    }

    fn contains_wall(&self, id: &WallId) -> bool {
        self.walls.iter().any(|w| &w.id == id)
    }

    fn shares_wall_with(&self, other: &WallSegment) -> bool {
        other.walls.iter().any(|w| self.contains_wall(&w.id))
    }

    /// Appends another run's walls and points, de-duplicating wall ids.
    fn absorb(&mut self, other: WallSegment) {
        for wall in other.walls {
            if !self.contains_wall(&wall.id) {
                self.walls.push(wall);
            }
        }
        self.points.extend(other.points);
    }
}

/// Splits a sweep's boundary walls into connectivity groups.
#[derive(Clone, Copy, Debug)]
pub struct WallSegmenter {
    tolerance: f64,
}

impl Default for WallSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl WallSegmenter {
    pub fn new() -> Self {
        Self {
            tolerance: INACCURACY_TOLERANCE,
        }
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Builds the ordered segment list for a sweep result.
    ///
    /// `wraparound` should be true for full-circle sweeps so runs meeting
    /// across the -PI/PI seam merge into one.
    pub fn segment(&self, visibility: &VisibilityResult, wraparound: bool) -> Vec<WallSegment> {
        let walls = &visibility.boundary_walls;
        let mut runs: Vec<WallSegment> = Vec::new();
        let mut current: Option<WallSegment> = None;
        let mut previous: Vec<usize> = Vec::new();

        for bp in &visibility.boundary_points {
            if bp.walls.is_empty() {
                // A vertex on the synthetic sweep boundary breaks the run.
                if let Some(run) = current.take() {
                    runs.push(run);
                }
                previous.clear();
                continue;
            }
            let connected = current.is_some()
                && wall_sets_connected(&previous, &bp.walls, walls, self.tolerance);
            if !connected {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            }
            let run = current.get_or_insert_with(WallSegment::default);
            run.points.push(bp.point);
            for &index in &bp.walls {
                let wall = &walls[index];
                if !run.contains_wall(&wall.id) {
                    run.walls.push(wall.clone());
                }
            }
            previous.clone_from(&bp.walls);
        }
        if let Some(run) = current.take() {
            runs.push(run);
        }

        if wraparound && runs.len() > 1 {
            let first = &runs[0];
            let last = &runs[runs.len() - 1];
            if last.shares_wall_with(first)
                || walls_touch(&last.walls, &first.walls, self.tolerance)
            {
                let last = runs.pop().expect("length checked above");
                let mut merged = last;
                merged.absorb(std::mem::take(&mut runs[0]));
                runs[0] = merged;
            }
        }

        // A wall seen in two separated arcs (an occluder splitting its view)
        // would otherwise land in two runs; fold those together so the
        // output partitions the boundary-wall set.
        let mut segments: Vec<WallSegment> = Vec::new();
        for run in runs {
            let related: Vec<usize> = segments
                .iter()
                .enumerate()
                .filter(|(_, s)| s.shares_wall_with(&run))
                .map(|(i, _)| i)
                .collect();
            match related.split_first() {
                None => segments.push(run),
                Some((&target, rest)) => {
                    segments[target].absorb(run);
                    for &index in rest.iter().rev() {
                        let sibling = segments.remove(index);
                        segments[target].absorb(sibling);
                    }
                }
            }
        }
        segments
    }
}

/// Connectivity between the wall sets of two consecutive boundary points:
/// a shared wall, or any endpoint pair within tolerance.
fn wall_sets_connected(
    previous: &[usize],
    current: &[usize],
    walls: &[WallRef],
    tolerance: f64,
) -> bool {
    if current.iter().any(|index| previous.contains(index)) {
        return true;
    }
    let prev_walls: Vec<&WallRef> = previous.iter().map(|&i| &walls[i]).collect();
    let cur_walls: Vec<&WallRef> = current.iter().map(|&i| &walls[i]).collect();
    prev_walls.iter().any(|p| {
        cur_walls
            .iter()
            .any(|c| endpoints_touch(p, c, tolerance))
    })
}

fn walls_touch(a: &[WallRef], b: &[WallRef], tolerance: f64) -> bool {
    a.iter()
        .any(|wa| b.iter().any(|wb| endpoints_touch(wa, wb, tolerance)))
}

fn endpoints_touch(a: &WallRef, b: &WallRef, tolerance: f64) -> bool {
    let tol_sq = tolerance * tolerance;
    [a.a, a.b]
        .into_iter()
        .any(|pa| [b.a, b.b].into_iter().any(|pb| pa.distance_squared(pb) <= tol_sq))
}
