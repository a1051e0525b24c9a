//! Terrain types, categories and their effects
//!
//! A terrain type is a specific named terrain; its category is the coarse
//! grouping used by continuity and transition rules.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::WildError;

/// Coarse terrain grouping
///
/// Declaration order is the tie-break order when neighbor categories are
/// equally common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainCategory {
    Forest,
    Plains,
    Mountain,
    Desert,
    Water,
}

impl TerrainCategory {
    pub const ALL: [TerrainCategory; 5] = [
        TerrainCategory::Forest,
        TerrainCategory::Plains,
        TerrainCategory::Mountain,
        TerrainCategory::Desert,
        TerrainCategory::Water,
    ];

    /// Terrain types in this category that normal fill may produce
    pub fn fill_terrains(&self) -> Vec<TerrainType> {
        TerrainType::ALL
            .iter()
            .copied()
            .filter(|t| t.category() == *self && !t.is_linear())
            .collect()
    }
}

/// Specific terrain type of a hex
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    #[default]
    Plains,
    Grasslands,
    Meadow,
    Forest,
    OpenWoods,
    DenseForest,
    OldGrowthForest,
    ForestEdge,
    GalleryForest,
    Hills,
    Rocky,
    Mountains,
    Crags,
    Desert,
    Dunes,
    Scrubland,
    DryRiverbed,
    River,
    Riverbank,
}

impl TerrainType {
    pub const ALL: [TerrainType; 19] = [
        TerrainType::Plains,
        TerrainType::Grasslands,
        TerrainType::Meadow,
        TerrainType::Forest,
        TerrainType::OpenWoods,
        TerrainType::DenseForest,
        TerrainType::OldGrowthForest,
        TerrainType::ForestEdge,
        TerrainType::GalleryForest,
        TerrainType::Hills,
        TerrainType::Rocky,
        TerrainType::Mountains,
        TerrainType::Crags,
        TerrainType::Desert,
        TerrainType::Dunes,
        TerrainType::Scrubland,
        TerrainType::DryRiverbed,
        TerrainType::River,
        TerrainType::Riverbank,
    ];

    pub fn category(&self) -> TerrainCategory {
        match self {
            Self::Plains | Self::Grasslands | Self::Meadow => TerrainCategory::Plains,
            Self::Forest
            | Self::OpenWoods
            | Self::DenseForest
            | Self::OldGrowthForest
            | Self::ForestEdge
            | Self::GalleryForest => TerrainCategory::Forest,
            Self::Hills | Self::Rocky | Self::Mountains | Self::Crags => TerrainCategory::Mountain,
            Self::Desert | Self::Dunes | Self::Scrubland | Self::DryRiverbed => {
                TerrainCategory::Desert
            }
            Self::River | Self::Riverbank => TerrainCategory::Water,
        }
    }

    /// Only produced by linear features, never by neighbor fill
    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            Self::Mountains | Self::Crags | Self::River | Self::DryRiverbed
        )
    }

    /// How many hexes the player can see when standing here
    pub fn sight_radius(&self) -> u32 {
        match self {
            Self::Forest | Self::DenseForest | Self::OldGrowthForest | Self::GalleryForest => 1,
            Self::Hills | Self::Rocky | Self::Mountains | Self::Crags => 3, // Elevation
            Self::Desert | Self::Dunes => 3,
            _ => 2,
        }
    }

    /// Does this terrain block line of sight?
    pub fn blocks_sight(&self) -> bool {
        matches!(
            self,
            Self::Mountains | Self::Crags | Self::DenseForest | Self::OldGrowthForest
        )
    }

    /// Can the player step onto this terrain?
    pub fn is_passable(&self) -> bool {
        !matches!(self, Self::Mountains)
    }

    /// Stable snake_case name, used as the habitat table key
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plains => "plains",
            Self::Grasslands => "grasslands",
            Self::Meadow => "meadow",
            Self::Forest => "forest",
            Self::OpenWoods => "open_woods",
            Self::DenseForest => "dense_forest",
            Self::OldGrowthForest => "old_growth_forest",
            Self::ForestEdge => "forest_edge",
            Self::GalleryForest => "gallery_forest",
            Self::Hills => "hills",
            Self::Rocky => "rocky",
            Self::Mountains => "mountains",
            Self::Crags => "crags",
            Self::Desert => "desert",
            Self::Dunes => "dunes",
            Self::Scrubland => "scrubland",
            Self::DryRiverbed => "dry_riverbed",
            Self::River => "river",
            Self::Riverbank => "riverbank",
        }
    }
}

impl std::fmt::Display for TerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerrainType {
    type Err = WildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| WildError::UnknownTerrain(s.to_string()))
    }
}
