//! Grid-space proximity mapping.
//!
//! Maps a token's cell, facing octant, proximity shape, and distance to the
//! discrete set of affected grid cells, independent of any wall occlusion.
//! Wall-aware filtering happens later in the hit-area builder.

use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::ids::CellId;

/// One of the eight compass octants a facing is quantized to.
///
/// Index 0 is north and indices advance clockwise on screen (`y` grows
/// downward in pixel space, so north means decreasing `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Octant {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Octant {
    pub const COUNT: usize = 8;

    const ALL: [Octant; Self::COUNT] = [
        Octant::North,
        Octant::NorthEast,
        Octant::East,
        Octant::SouthEast,
        Octant::South,
        Octant::SouthWest,
        Octant::West,
        Octant::NorthWest,
    ];

    /// Octant for a clockwise-from-north index; wraps modulo 8.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % Self::COUNT as u8) as usize]
    }

    /// Quantizes a pixel-space angle (radians, 0 pointing east, positive
    /// toward south) to the nearest octant.
    pub fn from_angle(angle: f64) -> Self {
        let from_north = normalize_angle(angle + FRAC_PI_2);
        let index = (from_north / FRAC_PI_4).round() as i32;
        Self::from_index(index.rem_euclid(Self::COUNT as i32) as u8)
    }

    /// Unit grid step in this direction. North is `(0, -1)`.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Octant::North => (0, -1),
            Octant::NorthEast => (1, -1),
            Octant::East => (1, 0),
            Octant::SouthEast => (1, 1),
            Octant::South => (0, 1),
            Octant::SouthWest => (-1, 1),
            Octant::West => (-1, 0),
            Octant::NorthWest => (-1, -1),
        }
    }

    /// Pixel-space facing angle in radians.
    pub const fn angle(self) -> f64 {
        match self {
            Octant::North => -FRAC_PI_2,
            Octant::NorthEast => -FRAC_PI_4,
            Octant::East => 0.0,
            Octant::SouthEast => FRAC_PI_4,
            Octant::South => FRAC_PI_2,
            Octant::SouthWest => 3.0 * FRAC_PI_4,
            Octant::West => PI,
            Octant::NorthWest => -3.0 * FRAC_PI_4,
        }
    }

    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Octant::North | Octant::East | Octant::South | Octant::West
        )
    }
}

/// Proximity shape of a scan request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProximityShape {
    /// Directional cone ahead of the token.
    Cone,
    /// Everything around the token, all directions.
    Close,
}

/// Wraps an angle into `(-PI, PI]`.
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Maximum lateral half-width of a cone, in cells.
const CONE_HALF_WIDTH_CAP: i32 = 2;

/// Enumerates the cells affected by a proximity shape, origin cell excluded.
///
/// The result is a set, so cells reachable through several distance rings are
/// counted once. For cones the enumeration reproduces the triangular
/// expansion: at distance 3 facing north the rows ahead carry half-widths
/// 2, 1, 0.
pub fn affected_cells(
    origin: CellId,
    facing: Octant,
    shape: ProximityShape,
    distance: u32,
) -> BTreeSet<CellId> {
    let mut cells = BTreeSet::new();
    let d = distance as i32;
    match shape {
        ProximityShape::Close => {
            for dy in -d..=d {
                for dx in -d..=d {
                    if dx != 0 || dy != 0 {
                        cells.insert(origin.offset(dx, dy));
                    }
                }
            }
        }
        ProximityShape::Cone if facing.is_cardinal() => {
            let (fx, fy) = facing.step();
            // Perpendicular axis, left of the facing direction.
            let (px, py) = (-fy, fx);
            for h in 1..=d {
                let half = (h + 1).min(d - h).min(CONE_HALF_WIDTH_CAP);
                for k in -half..=half {
                    cells.insert(origin.offset(h * fx + k * px, h * fy + k * py));
                }
            }
        }
        ProximityShape::Cone => {
            // Diagonal octants cover the exact 90-degree quadrant between the
            // two adjacent cardinals, bounded by the diagonal (Manhattan) sum.
            let (sx, sy) = facing.step();
            for s in 1..=d {
                let cap = (s + 1).min(d - s + 1).min(CONE_HALF_WIDTH_CAP);
                for a in 0..=s {
                    let b = s - a;
                    if (a - b).abs() <= cap {
                        cells.insert(origin.offset(sx * a, sy * b));
                    }
                }
            }
        }
    }
    cells
}
