//! Traits describing the host platform services the core consumes.
//!
//! The host owns the canvas grid, the wall layer, and the tile layer; the
//! core reaches them only through these oracle traits. The [`Env`] aggregate
//! bundles them so the hit-area builder can access everything it needs
//! without hard coupling to concrete host adapters, and reports a
//! configuration error when a required oracle is missing.
mod error;
mod grid;
mod tiles;
mod walls;

pub use error::OracleError;
pub use grid::GridOracle;
pub use tiles::{TileOracle, TileShape};
pub use walls::WallOracle;

/// Aggregates the read-only oracles required by a proximity query.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, G, W, T>
where
    G: GridOracle + ?Sized,
    W: WallOracle + ?Sized,
    T: TileOracle + ?Sized,
{
    grid: Option<&'a G>,
    walls: Option<&'a W>,
    tiles: Option<&'a T>,
}

/// Trait-object form used throughout the runtime.
pub type ProbeEnv<'a> = Env<'a, dyn GridOracle + 'a, dyn WallOracle + 'a, dyn TileOracle + 'a>;

impl<'a, G, W, T> Env<'a, G, W, T>
where
    G: GridOracle + ?Sized,
    W: WallOracle + ?Sized,
    T: TileOracle + ?Sized,
{
    pub fn new(grid: Option<&'a G>, walls: Option<&'a W>, tiles: Option<&'a T>) -> Self {
        Self { grid, walls, tiles }
    }

    pub fn with_all(grid: &'a G, walls: &'a W, tiles: &'a T) -> Self {
        Self::new(Some(grid), Some(walls), Some(tiles))
    }

    pub fn empty() -> Self {
        Self {
            grid: None,
            walls: None,
            tiles: None,
        }
    }

    /// Returns the grid oracle, or [`OracleError::GridNotAvailable`].
    pub fn grid(&self) -> Result<&'a G, OracleError> {
        self.grid.ok_or(OracleError::GridNotAvailable)
    }

    /// Returns the wall oracle, or [`OracleError::WallsNotAvailable`].
    pub fn walls(&self) -> Result<&'a W, OracleError> {
        self.walls.ok_or(OracleError::WallsNotAvailable)
    }

    /// Returns the tile oracle, or [`OracleError::TilesNotAvailable`].
    pub fn tiles(&self) -> Result<&'a T, OracleError> {
        self.tiles.ok_or(OracleError::TilesNotAvailable)
    }
}
