//! Identifier newtypes shared across the crate.
//!
//! Wall, tile, actor, scene, and activity identifiers are opaque strings
//! assigned by the host platform. Cells use a structured coordinate id with
//! the canonical `"x:y"` text form that the availability engine and the
//! history store rely on.

use core::fmt;
use core::str::FromStr;

/// Discrete grid cell identifier.
///
/// Grid space follows the host's pixel convention: `x` grows to the right
/// and `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId {
    pub x: i32,
    pub y: i32,
}

impl CellId {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell shifted by the given offset.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// Error produced when parsing a cell id from its `"x:y"` text form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell id {input:?}, expected \"x:y\"")]
pub struct ParseCellIdError {
    pub input: String,
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellIdError {
            input: s.to_owned(),
        };
        let (x, y) = s.split_once(':').ok_or_else(err)?;
        Ok(Self {
            x: x.parse().map_err(|_| err())?,
            y: y.parse().map_err(|_| err())?,
        })
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque wall identifier assigned by the host's wall layer.
    WallId
);
string_id!(
    /// Opaque tile identifier assigned by the host's tile layer.
    TileId
);
string_id!(
    /// Identifier of the token/actor issuing a proximity query.
    ActorId
);
string_id!(
    /// Identifier of a host scene; history is scoped per scene.
    SceneId
);
string_id!(
    /// Identifier of a registered activity definition.
    ActivityId
);
string_id!(
    /// Identifier of an action within an activity.
    ActionId
);
