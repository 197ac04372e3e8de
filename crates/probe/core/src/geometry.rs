//! Pure 2D collision primitives.
//!
//! Everything in this module is deterministic and side-effect free. Inputs
//! are assumed to be finite; degenerate shapes (zero-length edges, parallel
//! segments) resolve to "no intersection" instead of erroring.

/// Denominator threshold below which two segments are treated as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// A point in pixel space (`y` grows downward, matching the host canvas).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// A line segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: Point,
    pub b: Point,
}

impl Edge {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(self.b)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::of(&[self.a, self.b])
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Tight bounds of a point set. Empty input collapses to the origin.
    pub fn of(points: &[Point]) -> Self {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        if points.is_empty() {
            return Self {
                min: Point::default(),
                max: Point::default(),
            };
        }
        Self { min, max }
    }

    /// Square bounds centered on a point with the given half-extent.
    pub fn around(center: Point, half_extent: f64) -> Self {
        Self {
            min: Point::new(center.x - half_extent, center.y - half_extent),
            max: Point::new(center.x + half_extent, center.y + half_extent),
        }
    }

    pub fn expanded(self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        bounds_overlap(self, other)
    }
}

/// Axis-aligned fast reject for two bounding boxes.
pub fn bounds_overlap(a: &Bounds, b: &Bounds) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Proper crossing test between two segments.
///
/// Returns the crossing point, or `None` for parallel, collinear, or
/// degenerate input (a zero-length edge makes the denominator vanish, which
/// is reported as no intersection rather than a division by zero).
pub fn segments_intersect(e1: &Edge, e2: &Edge) -> Option<Point> {
    let r_x = e1.b.x - e1.a.x;
    let r_y = e1.b.y - e1.a.y;
    let s_x = e2.b.x - e2.a.x;
    let s_y = e2.b.y - e2.a.y;

    let denom = r_x * s_y - r_y * s_x;
    if denom.abs() < PARALLEL_EPS {
        return None;
    }

    let q_x = e2.a.x - e1.a.x;
    let q_y = e2.a.y - e1.a.y;
    let t = (q_x * s_y - q_y * s_x) / denom;
    let u = (q_x * r_y - q_y * r_x) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(e1.a.x + t * r_x, e1.a.y + t * r_y))
    } else {
        None
    }
}

/// Squared distance from a point to the closest spot on a segment.
pub fn point_to_segment_distance_squared(p: Point, a: Point, b: Point) -> f64 {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let len_sq = ab_x * ab_x + ab_y * ab_y;
    if len_sq < PARALLEL_EPS {
        return p.distance_squared(a);
    }
    let t = (((p.x - a.x) * ab_x + (p.y - a.y) * ab_y) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(Point::new(a.x + t * ab_x, a.y + t * ab_y))
}

/// Ray-casting parity test: odd crossing count means inside.
pub fn point_inside_polygon(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let cross_x = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether two polygons overlap: bounds fast-reject, then edge crossing,
/// then full containment in either direction. Symmetric in its arguments.
pub fn polygons_intersect(p1: &[Point], p2: &[Point]) -> bool {
    if p1.len() < 3 || p2.len() < 3 {
        return false;
    }
    if !bounds_overlap(&Bounds::of(p1), &Bounds::of(p2)) {
        return false;
    }
    for i in 0..p1.len() {
        let e1 = Edge::new(p1[i], p1[(i + 1) % p1.len()]);
        for j in 0..p2.len() {
            let e2 = Edge::new(p2[j], p2[(j + 1) % p2.len()]);
            if segments_intersect(&e1, &e2).is_some() {
                return true;
            }
        }
    }
    point_inside_polygon(p1, p2[0]) || point_inside_polygon(p2, p1[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cy: f64, half: f64) -> Vec<Point> {
        vec![
            Point::new(cx - half, cy - half),
            Point::new(cx + half, cy - half),
            Point::new(cx + half, cy + half),
            Point::new(cx - half, cy + half),
        ]
    }

    #[test]
    fn crossing_segments_intersect_at_midpoint() {
        let e1 = Edge::new(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let e2 = Edge::new(Point::new(0.0, -1.0), Point::new(0.0, 1.0));
        let hit = segments_intersect(&e1, &e2).unwrap();
        assert!(hit.distance_to(Point::new(0.0, 0.0)) < 1e-9);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let e1 = Edge::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let e2 = Edge::new(Point::new(0.0, 1.0), Point::new(1.0, 1.0));
        assert_eq!(segments_intersect(&e1, &e2), None);
    }

    #[test]
    fn degenerate_edge_yields_no_intersection() {
        let zero = Edge::new(Point::new(0.5, 0.5), Point::new(0.5, 0.5));
        let e = Edge::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert_eq!(segments_intersect(&zero, &e), None);
        assert_eq!(segments_intersect(&e, &zero), None);
    }

    #[test]
    fn non_touching_segments_do_not_intersect() {
        let e1 = Edge::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let e2 = Edge::new(Point::new(2.0, -1.0), Point::new(2.0, 1.0));
        assert_eq!(segments_intersect(&e1, &e2), None);
    }

    #[test]
    fn bounds_overlap_is_inclusive_of_touching_edges() {
        let a = Bounds::around(Point::new(0.0, 0.0), 1.0);
        let b = Bounds::around(Point::new(2.0, 0.0), 1.0);
        let c = Bounds::around(Point::new(3.0, 0.0), 0.5);
        assert!(bounds_overlap(&a, &b));
        assert!(!bounds_overlap(&a, &c));
    }

    #[test]
    fn point_in_polygon_parity() {
        let poly = square(0.0, 0.0, 1.0);
        assert!(point_inside_polygon(&poly, Point::new(0.0, 0.0)));
        assert!(point_inside_polygon(&poly, Point::new(0.9, -0.9)));
        assert!(!point_inside_polygon(&poly, Point::new(1.5, 0.0)));
        assert!(!point_inside_polygon(&poly, Point::new(-2.0, 2.0)));
    }

    #[test]
    fn overlapping_polygons_intersect_symmetrically() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 1.0, 1.0);
        assert!(polygons_intersect(&a, &b));
        assert!(polygons_intersect(&b, &a));
    }

    #[test]
    fn contained_polygon_intersects_without_edge_crossings() {
        let outer = square(0.0, 0.0, 5.0);
        let inner = square(0.0, 0.0, 1.0);
        assert!(polygons_intersect(&outer, &inner));
        assert!(polygons_intersect(&inner, &outer));
    }

    #[test]
    fn disjoint_polygons_do_not_intersect() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 10.0, 1.0);
        assert!(!polygons_intersect(&a, &b));
        assert!(!polygons_intersect(&b, &a));
    }
}
