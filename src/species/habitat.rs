//! Habitat spawn table
//!
//! Maps each terrain type to independent per-species spawn chances. The
//! weights are not a categorical distribution: every listed species gets its
//! own Bernoulli trial.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::definition::SpeciesRegistry;
use crate::core::error::{Result, WildError};
use crate::terrain::TerrainType;

const DEFAULT_HABITATS: &str = include_str!("../../data/habitats.toml");

/// Spawn chances for one terrain, keyed by species name
pub type SpawnWeights = BTreeMap<String, f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitatSpawnTable {
    habitats: BTreeMap<TerrainType, SpawnWeights>,
}

impl HabitatSpawnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled habitat table
    pub fn with_defaults() -> Result<Self> {
        Self::parse_toml(DEFAULT_HABITATS)
    }

    /// Parse a table from TOML: one section per terrain name
    pub fn parse_toml(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, SpawnWeights> = toml::from_str(content)?;
        let mut table = Self::new();
        for (terrain_name, weights) in raw {
            let terrain: TerrainType = terrain_name.parse()?;
            for (species, weight) in &weights {
                if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                    return Err(WildError::InvalidSpecies {
                        species: species.clone(),
                        reason: format!("spawn weight {weight} on {terrain} is not a probability"),
                    });
                }
            }
            table.habitats.insert(terrain, weights);
        }
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Check that every species named in the table exists in the registry
    pub fn validate_against(&self, registry: &SpeciesRegistry) -> Result<()> {
        for weights in self.habitats.values() {
            if let Some(unknown) = weights.keys().find(|name| !registry.contains(name)) {
                return Err(WildError::UnknownSpecies(unknown.clone()));
            }
        }
        Ok(())
    }

    /// Set a single spawn chance
    pub fn set_weight(&mut self, terrain: TerrainType, species: &str, weight: f64) {
        self.habitats
            .entry(terrain)
            .or_default()
            .insert(species.to_string(), weight);
    }

    /// Spawn weights for a terrain, if it has any inhabitants
    pub fn weights_for(&self, terrain: TerrainType) -> Option<&SpawnWeights> {
        self.habitats.get(&terrain)
    }

    /// Terrains with at least one listed species
    pub fn terrains(&self) -> impl Iterator<Item = TerrainType> + '_ {
        self.habitats.keys().copied()
    }
}
