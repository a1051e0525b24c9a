//! Lazy per-hex terrain fill
//!
//! A hex's terrain is decided when it is first materialized, from the
//! terrain of whichever neighbors already exist:
//! 1. linear features win outright
//! 2. the very first hex uses the first-hex weights
//! 3. special-case overrides (dense forest, forest edge, highlands, gallery
//!    forest, riverbank), each gated by its own roll
//! 4. category continuity with the neighbor plurality
//! 5. otherwise a category transition through the transition matrix

use rand::Rng;
use std::collections::BTreeMap;

use super::features::LinearFeatures;
use super::rules::{uniform_choice, weighted_choice, TerrainRules};
use super::types::{TerrainCategory, TerrainType};
use crate::hex::AxialCoord;

/// Read access to terrain that has already been generated
pub trait TerrainLookup {
    fn terrain_at(&self, coord: AxialCoord) -> Option<TerrainType>;
}

impl TerrainLookup for std::collections::HashMap<AxialCoord, TerrainType> {
    fn terrain_at(&self, coord: AxialCoord) -> Option<TerrainType> {
        self.get(&coord).copied()
    }
}

impl TerrainLookup for BTreeMap<AxialCoord, TerrainType> {
    fn terrain_at(&self, coord: AxialCoord) -> Option<TerrainType> {
        self.get(&coord).copied()
    }
}

/// Terrain statistics of the existing neighbors of a hex
#[derive(Debug, Clone)]
pub struct NeighborCensus {
    categories: BTreeMap<TerrainCategory, usize>,
    terrains: BTreeMap<TerrainType, usize>,
}

impl NeighborCensus {
    pub fn new(neighbors: &[TerrainType]) -> Self {
        let mut categories = BTreeMap::new();
        let mut terrains = BTreeMap::new();
        for terrain in neighbors {
            *categories.entry(terrain.category()).or_insert(0) += 1;
            *terrains.entry(*terrain).or_insert(0) += 1;
        }
        Self {
            categories,
            terrains,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terrains.is_empty()
    }

    pub fn count(&self, category: TerrainCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    pub fn has(&self, category: TerrainCategory) -> bool {
        self.count(category) > 0
    }

    pub fn has_terrain(&self, terrain: TerrainType) -> bool {
        self.terrains.contains_key(&terrain)
    }

    /// Most common neighbor category
    ///
    /// Ties resolve to the category declared first in `TerrainCategory`.
    pub fn plurality_category(&self) -> Option<TerrainCategory> {
        max_by_count(&self.categories)
    }

    /// Most common terrain type within the plurality category
    ///
    /// Ties resolve to the terrain declared first in `TerrainType`.
    pub fn plurality_terrain(&self) -> Option<TerrainType> {
        let category = self.plurality_category()?;
        let within: BTreeMap<TerrainType, usize> = self
            .terrains
            .iter()
            .filter(|(t, _)| t.category() == category)
            .map(|(t, n)| (*t, *n))
            .collect();
        max_by_count(&within)
    }
}

/// First key with the strictly highest count, in key order
fn max_by_count<K: Copy + Ord>(counts: &BTreeMap<K, usize>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        if best.map_or(true, |(_, n)| *count > n) {
            best = Some((*key, *count));
        }
    }
    best.map(|(k, _)| k)
}

/// Decide the terrain of `coord` given its already-generated neighbors
pub fn generate_terrain<L, R>(
    coord: AxialCoord,
    existing: &L,
    features: &LinearFeatures,
    rules: &TerrainRules,
    rng: &mut R,
) -> TerrainType
where
    L: TerrainLookup + ?Sized,
    R: Rng + ?Sized,
{
    if let Some(terrain) = features.terrain_at(coord) {
        return terrain;
    }

    let neighbors: Vec<TerrainType> = coord
        .neighbors()
        .iter()
        .filter_map(|n| existing.terrain_at(*n))
        .collect();

    let census = NeighborCensus::new(&neighbors);
    let Some(plurality) = census.plurality_category() else {
        return weighted_choice(&rules.first_hex_weights, rng).unwrap_or(TerrainType::Plains);
    };

    if let Some(terrain) = apply_overrides(&census, rules, rng) {
        return terrain;
    }

    if rng.gen::<f64>() < rules.continuity(plurality) {
        let options = plurality.fill_terrains();
        return uniform_choice(&options, rng)
            .or_else(|| census.plurality_terrain())
            .unwrap_or(TerrainType::Plains);
    }

    transition(plurality, rules, rng)
}

/// Special-case neighbor patterns; the first one that fires wins
fn apply_overrides<R: Rng + ?Sized>(
    census: &NeighborCensus,
    rules: &TerrainRules,
    rng: &mut R,
) -> Option<TerrainType> {
    let forest = census.has(TerrainCategory::Forest);
    let river = census.has_terrain(TerrainType::River);

    if census.count(TerrainCategory::Forest) >= rules.dense_forest_min_neighbors {
        let roll = rng.gen::<f64>();
        if roll < rules.dense_forest_chance {
            return Some(TerrainType::DenseForest);
        }
        if roll < rules.dense_forest_chance + rules.old_growth_chance {
            return Some(TerrainType::OldGrowthForest);
        }
    }

    if forest
        && census.has(TerrainCategory::Plains)
        && rng.gen::<f64>() < rules.forest_edge_chance
    {
        return Some(TerrainType::ForestEdge);
    }

    if census.has(TerrainCategory::Mountain) && rng.gen::<f64>() < rules.highland_chance {
        return Some(if rng.gen::<f64>() < rules.rocky_share {
            TerrainType::Rocky
        } else {
            TerrainType::Hills
        });
    }

    if river && forest && rng.gen::<f64>() < rules.gallery_forest_chance {
        return Some(TerrainType::GalleryForest);
    }

    if river && rng.gen::<f64>() < rules.riverbank_chance {
        return Some(TerrainType::Riverbank);
    }

    None
}

/// Move to a new category through the transition matrix
fn transition<R: Rng + ?Sized>(
    from: TerrainCategory,
    rules: &TerrainRules,
    rng: &mut R,
) -> TerrainType {
    let Some(targets) = rules.transitions.targets(from) else {
        return TerrainType::Plains;
    };
    let Some(category) = weighted_choice(&targets, rng) else {
        return TerrainType::Plains;
    };
    uniform_choice(&category.fill_terrains(), rng).unwrap_or(TerrainType::Plains)
}
