//! Materialized hexes and the append-only hex mapping

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::hex::AxialCoord;
use crate::terrain::{TerrainLookup, TerrainType};

/// A single materialized hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hex {
    pub coord: AxialCoord,
    pub terrain: TerrainType,
    /// Currently rendered as seen (recomputed every visibility pass)
    pub visible: bool,
    /// Within the player's sight radius this turn (recomputed every pass)
    pub in_range: bool,
    /// Seen at least once; never cleared
    pub discovered: bool,
    /// Occupied by the player at least once; never cleared
    pub visited: bool,
}

impl Hex {
    pub fn new(coord: AxialCoord, terrain: TerrainType) -> Self {
        Self {
            coord,
            terrain,
            visible: false,
            in_range: false,
            discovered: false,
            visited: false,
        }
    }

    pub fn discovered(mut self) -> Self {
        self.discovered = true;
        self.visible = true;
        self
    }
}

/// Hex mapping keyed by coordinate
///
/// Hexes are only ever added; visibility fields change in place on a
/// snapshot's own copy.
pub type HexMap = AHashMap<AxialCoord, Hex>;

impl TerrainLookup for HexMap {
    fn terrain_at(&self, coord: AxialCoord) -> Option<TerrainType> {
        self.get(&coord).map(|h| h.terrain)
    }
}
