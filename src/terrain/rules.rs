//! Tunable terrain generation tables
//!
//! All probabilities the generator uses are collected here so callers can
//! inject their own tables. Defaults reproduce the standard wilderness.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{TerrainCategory, TerrainType};

/// Count, length and meander settings for one kind of linear feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub min_count: u32,
    pub max_count: u32,
    pub min_length: u32,
    pub max_length: u32,
    /// Probability per step that the walk changes direction
    pub meander: f64,
}

/// Categories reachable through the transition matrix, in row/column order
pub const TRANSITION_CATEGORIES: [TerrainCategory; 4] = [
    TerrainCategory::Forest,
    TerrainCategory::Plains,
    TerrainCategory::Mountain,
    TerrainCategory::Desert,
];

/// Category-to-category transition weights (each row sums to 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    pub rows: [[f64; 4]; 4],
}

impl TransitionMatrix {
    /// Weighted targets for a source category, or None if it has no row
    pub fn targets(&self, from: TerrainCategory) -> Option<[(TerrainCategory, f64); 4]> {
        let row = TRANSITION_CATEGORIES.iter().position(|c| *c == from)?;
        let weights = self.rows[row];
        Some(std::array::from_fn(|i| (TRANSITION_CATEGORIES[i], weights[i])))
    }
}

impl Default for TransitionMatrix {
    fn default() -> Self {
        Self {
            //        forest plains mountain desert
            rows: [
                [0.10, 0.60, 0.20, 0.10], // from forest
                [0.50, 0.10, 0.20, 0.20], // from plains
                [0.30, 0.30, 0.10, 0.30], // from mountain
                [0.10, 0.40, 0.30, 0.20], // from desert
            ],
        }
    }
}

/// Complete rule set for linear features and per-hex fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainRules {
    /// Weights for the very first hex of a world
    pub first_hex_weights: Vec<(TerrainType, f64)>,

    pub mountain_range: FeatureSpec,
    pub river: FeatureSpec,
    pub dry_riverbed: FeatureSpec,
    /// Share of mountain-range steps that are Mountains rather than Crags
    pub mountain_primary_chance: f64,

    // Overrides, checked in this order
    pub dense_forest_min_neighbors: usize,
    pub dense_forest_chance: f64,
    pub old_growth_chance: f64,
    pub forest_edge_chance: f64,
    pub highland_chance: f64,
    /// Share of highland overrides that are Rocky rather than Hills
    pub rocky_share: f64,
    pub gallery_forest_chance: f64,
    pub riverbank_chance: f64,

    /// Continuity probability for plains and forest plurality
    pub strong_continuity: f64,
    /// Continuity probability for every other category
    pub weak_continuity: f64,

    pub transitions: TransitionMatrix,
}

impl Default for TerrainRules {
    fn default() -> Self {
        Self {
            first_hex_weights: vec![
                (TerrainType::Plains, 0.40),
                (TerrainType::Grasslands, 0.30),
                (TerrainType::Forest, 0.15),
                (TerrainType::OpenWoods, 0.15),
            ],
            mountain_range: FeatureSpec {
                min_count: 1,
                max_count: 2,
                min_length: 4,
                max_length: 11,
                meander: 0.20,
            },
            river: FeatureSpec {
                min_count: 1,
                max_count: 3,
                min_length: 6,
                max_length: 17,
                meander: 0.25,
            },
            dry_riverbed: FeatureSpec {
                min_count: 0,
                max_count: 2,
                min_length: 4,
                max_length: 13,
                meander: 0.30,
            },
            mountain_primary_chance: 0.8,

            dense_forest_min_neighbors: 4,
            dense_forest_chance: 0.3,
            old_growth_chance: 0.2,
            forest_edge_chance: 0.4,
            highland_chance: 0.4,
            rocky_share: 0.6,
            gallery_forest_chance: 0.6,
            riverbank_chance: 0.25,

            strong_continuity: 0.75,
            weak_continuity: 0.6,

            transitions: TransitionMatrix::default(),
        }
    }
}

impl TerrainRules {
    /// Continuity probability for a plurality category
    pub fn continuity(&self, category: TerrainCategory) -> f64 {
        match category {
            TerrainCategory::Plains | TerrainCategory::Forest => self.strong_continuity,
            _ => self.weak_continuity,
        }
    }
}

/// Cumulative-weight draw over `options`
///
/// Returns None only when `options` is empty. Weights need not sum to 1;
/// non-positive totals fall back to the last option.
pub fn weighted_choice<T: Copy, R: Rng + ?Sized>(options: &[(T, f64)], rng: &mut R) -> Option<T> {
    let (last, _) = options.last()?;
    let total: f64 = options.iter().map(|(_, w)| w.max(0.0)).sum();
    if total.is_nan() || total <= 0.0 {
        return Some(*last);
    }

    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (item, weight) in options {
        cumulative += weight.max(0.0);
        if roll < cumulative {
            return Some(*item);
        }
    }
    Some(*last)
}

/// Uniform pick from a slice
pub fn uniform_choice<T: Copy, R: Rng + ?Sized>(options: &[T], rng: &mut R) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    Some(options[rng.gen_range(0..options.len())])
}
