//! Line-of-sight visibility sweep against obstructing walls.
//!
//! The sweep casts rays from the origin toward every relevant wall endpoint
//! (plus a pair of slightly rotated rays per endpoint so edges behind a
//! corner are discovered) and keeps the nearest hit per ray. Sorting the
//! hits by angle yields the visibility polygon; every polygon vertex also
//! records which input walls pass through it, which is what the wall
//! segmenter and the hit-area builder consume downstream.
//!
//! The sweep region itself is bounded by synthetic geometry (an outer ring
//! for full-circle sweeps, an arc for cones). Synthetic edges never appear
//! in the boundary-wall output.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_4, PI};

use crate::geometry::{Bounds, Point, point_to_segment_distance_squared};
use crate::ids::WallId;
use crate::proximity::{ProximityShape, normalize_angle};

/// Angular nudge applied either side of every endpoint ray.
const ANGULAR_EPS: f64 = 1e-5;
/// Squared distance within which an emitted point counts as touching a wall.
const CONTACT_EPS_SQ: f64 = 1e-6;
/// Consecutive hits closer than this collapse into one polygon vertex.
const MERGE_EPS: f64 = 1e-4;
/// Minimum ray parameter; rejects hits at the origin itself.
const T_MIN: f64 = 1e-9;
/// Vertex count of the synthetic outer ring for a full-circle sweep.
const RING_STEPS: usize = 36;
/// Half the angular width of a cone sweep (90 degrees total).
const CONE_HALF_ANGLE: f64 = FRAC_PI_4;

/// A candidate obstructing wall: opaque host identifier plus endpoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallRef {
    pub id: WallId,
    pub a: Point,
    pub b: Point,
}

impl WallRef {
    pub fn new(id: impl Into<WallId>, a: Point, b: Point) -> Self {
        Self {
            id: id.into(),
            a,
            b,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::of(&[self.a, self.b])
    }
}

/// Inputs of one sweep invocation.
#[derive(Clone, Debug)]
pub struct SweepRequest<'a> {
    /// Sweep origin in pixel space.
    pub origin: Point,
    /// Facing angle in radians (ignored for [`ProximityShape::Close`]).
    pub facing: f64,
    /// Cone or full circle.
    pub shape: ProximityShape,
    /// Sweep radius in pixels.
    pub radius: f64,
    /// Candidate obstructing walls near the origin.
    pub walls: &'a [WallRef],
}

/// One emitted vertex of the visibility polygon.
///
/// `walls` holds indices into [`VisibilityResult::boundary_walls`]; a vertex
/// on the synthetic sweep boundary has an empty set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryPoint {
    pub point: Point,
    pub walls: Vec<usize>,
}

/// Output of one sweep: the visibility polygon, its vertices in angular
/// order with per-vertex wall contacts, and the de-duplicated walls that
/// actually bound the visible region.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityResult {
    pub polygon: Vec<Point>,
    pub boundary_points: Vec<BoundaryPoint>,
    pub boundary_walls: Vec<WallRef>,
}

/// Parameter of the nearest hit of a ray against a segment, if any.
fn ray_hit(origin: Point, dx: f64, dy: f64, a: Point, b: Point) -> Option<f64> {
    let s_x = b.x - a.x;
    let s_y = b.y - a.y;
    let denom = dx * s_y - dy * s_x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = ((a.x - origin.x) * s_y - (a.y - origin.y) * s_x) / denom;
    let u = ((a.x - origin.x) * dy - (a.y - origin.y) * dx) / denom;
    if t >= T_MIN && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Synthetic segments bounding the sweep region.
fn synthetic_boundary(origin: Point, facing: f64, shape: ProximityShape, radius: f64) -> Vec<Point> {
    let mut vertices = Vec::new();
    match shape {
        ProximityShape::Close => {
            for i in 0..RING_STEPS {
                let a = -PI + (i as f64) * (2.0 * PI / RING_STEPS as f64);
                vertices.push(Point::new(
                    origin.x + radius * a.cos(),
                    origin.y + radius * a.sin(),
                ));
            }
        }
        ProximityShape::Cone => {
            let steps = RING_STEPS / 4;
            for i in 0..=steps {
                let rel = -CONE_HALF_ANGLE + (i as f64) * (2.0 * CONE_HALF_ANGLE / steps as f64);
                let a = facing + rel;
                vertices.push(Point::new(
                    origin.x + radius * a.cos(),
                    origin.y + radius * a.sin(),
                ));
            }
        }
    }
    vertices
}

/// Performs the radial sweep. Pure function: no state survives a call.
pub fn sweep_visibility(request: &SweepRequest<'_>) -> VisibilityResult {
    let origin = request.origin;
    let reach = Bounds::around(origin, request.radius);

    let candidates: Vec<&WallRef> = request
        .walls
        .iter()
        .filter(|w| w.bounds().overlaps(&reach))
        .collect();

    // Synthetic bounding geometry: ring segments close the circle; the cone
    // arc is left open and the polygon closes through the origin instead.
    let arc = synthetic_boundary(origin, request.facing, request.shape, request.radius);
    let mut synthetic: Vec<(Point, Point)> = Vec::with_capacity(arc.len());
    match request.shape {
        ProximityShape::Close => {
            for i in 0..arc.len() {
                synthetic.push((arc[i], arc[(i + 1) % arc.len()]));
            }
        }
        ProximityShape::Cone => {
            for pair in arc.windows(2) {
                synthetic.push((pair[0], pair[1]));
            }
        }
    }

    // Ray fan: every candidate endpoint and every synthetic vertex, each
    // with a +/- epsilon companion so occluders behind corners are found.
    let mut targets: Vec<Point> = Vec::with_capacity(candidates.len() * 2 + arc.len());
    for wall in &candidates {
        targets.push(wall.a);
        targets.push(wall.b);
    }
    targets.extend(arc.iter().copied());

    // (sort key, absolute angle)
    let mut rays: Vec<(f64, f64)> = Vec::with_capacity(targets.len() * 3);
    for target in &targets {
        if target.distance_squared(origin) < CONTACT_EPS_SQ {
            continue;
        }
        let angle = (target.y - origin.y).atan2(target.x - origin.x);
        for offset in [-ANGULAR_EPS, 0.0, ANGULAR_EPS] {
            let a = angle + offset;
            match request.shape {
                ProximityShape::Close => rays.push((normalize_angle(a), a)),
                ProximityShape::Cone => {
                    let rel = normalize_angle(a - request.facing);
                    if rel.abs() > CONE_HALF_ANGLE + ANGULAR_EPS {
                        continue;
                    }
                    let rel = rel.clamp(-CONE_HALF_ANGLE, CONE_HALF_ANGLE);
                    rays.push((rel, request.facing + rel));
                }
            }
        }
    }
    rays.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    // Nearest hit per ray.
    let mut hits: Vec<Point> = Vec::with_capacity(rays.len());
    for &(_, angle) in &rays {
        let dx = angle.cos();
        let dy = angle.sin();
        let mut nearest = f64::INFINITY;
        for wall in &candidates {
            if let Some(t) = ray_hit(origin, dx, dy, wall.a, wall.b) {
                nearest = nearest.min(t);
            }
        }
        for &(a, b) in &synthetic {
            if let Some(t) = ray_hit(origin, dx, dy, a, b) {
                nearest = nearest.min(t);
            }
        }
        // Belt and braces: if a ray escapes the synthetic boundary through a
        // floating-point gap, cap it at the radius.
        if !nearest.is_finite() {
            nearest = request.radius;
        }
        let hit = Point::new(origin.x + nearest * dx, origin.y + nearest * dy);
        if hits.last().is_none_or(|last| last.distance_to(hit) > MERGE_EPS) {
            hits.push(hit);
        }
    }
    if hits.len() > 1 && hits[0].distance_to(hits[hits.len() - 1]) <= MERGE_EPS {
        hits.pop();
    }

    // Associate every emitted vertex with the walls passing through it.
    let mut boundary_walls: Vec<WallRef> = Vec::new();
    let mut wall_indices: HashMap<usize, usize> = HashMap::new();
    let mut boundary_points: Vec<BoundaryPoint> = Vec::with_capacity(hits.len());
    for hit in &hits {
        let mut touching = Vec::new();
        for (ci, wall) in candidates.iter().enumerate() {
            if point_to_segment_distance_squared(*hit, wall.a, wall.b) <= CONTACT_EPS_SQ {
                let index = *wall_indices.entry(ci).or_insert_with(|| {
                    boundary_walls.push((*wall).clone());
                    boundary_walls.len() - 1
                });
                touching.push(index);
            }
        }
        boundary_points.push(BoundaryPoint {
            point: *hit,
            walls: touching,
        });
    }

    let mut polygon: Vec<Point> = Vec::with_capacity(hits.len() + 1);
    if request.shape == ProximityShape::Cone {
        polygon.push(origin);
    }
    polygon.extend(hits);

    VisibilityResult {
        polygon,
        boundary_points,
        boundary_walls,
    }
}
