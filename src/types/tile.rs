use std::fmt;

use serde::Serialize;

/// Number of tile columns per UDIM row.
pub const TILES_PER_ROW: u32 = 10;

/// A UDIM tile: `1001 + 10 * v_row + u_col`, with `u_col` in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tile(u32);

impl Tile {
    /// Tile 1001, the unit square `[0,1) x [0,1)`.
    pub const BASE: Tile = Tile(1001);

    /// Build a tile from its grid position. Returns `None` when the column
    /// falls outside the 10-wide row.
    pub fn from_grid(u_col: u32, v_row: u32) -> Option<Tile> {
        if u_col >= TILES_PER_ROW {
            return None;
        }
        v_row
            .checked_mul(TILES_PER_ROW)
            .and_then(|row| row.checked_add(Self::BASE.0 + u_col))
            .map(Tile)
    }

    /// Build a tile from its numeric id (e.g. `1012`).
    pub fn from_id(id: u32) -> Option<Tile> {
        let offset = id.checked_sub(Self::BASE.0)?;
        Self::from_grid(offset % TILES_PER_ROW, offset / TILES_PER_ROW)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    /// Distance from tile 1001.
    pub fn offset(self) -> u32 {
        self.0 - Self::BASE.0
    }

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }

    /// Suffix appended to a material name once it serves this tile.
    pub fn marker(self) -> String {
        format!("_{}", self.0)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned bounding rectangle in UV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvBounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl UvBounds {
    /// An inverted box that any `include` call will overwrite.
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 2],
            max: [f64::NEG_INFINITY; 2],
        }
    }

    pub fn new(min_u: f64, min_v: f64, max_u: f64, max_v: f64) -> Self {
        Self {
            min: [min_u, min_v],
            max: [max_u, max_v],
        }
    }

    /// Grow the box to contain `uv`.
    pub fn include(&mut self, uv: [f64; 2]) {
        self.min[0] = self.min[0].min(uv[0]);
        self.min[1] = self.min[1].min(uv[1]);
        self.max[0] = self.max[0].max(uv[0]);
        self.max[1] = self.max[1].max(uv[1]);
    }

    /// Whether no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0] || self.min[1] > self.max[1]
    }

    /// Extent along U and V.
    pub fn span(&self) -> [f64; 2] {
        [self.max[0] - self.min[0], self.max[1] - self.min[1]]
    }
}
