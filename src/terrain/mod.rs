//! Procedural terrain: linear features and lazy per-hex fill

pub mod features;
pub mod generator;
pub mod rules;
pub mod types;

pub use features::{generate_terrain_features, walk_feature, FeatureHex, FeatureKind, LinearFeatures};
pub use generator::{generate_terrain, NeighborCensus, TerrainLookup};
pub use rules::{FeatureSpec, TerrainRules, TransitionMatrix};
pub use types::{TerrainCategory, TerrainType};
