//! Linear geographic features (rivers, dry riverbeds, mountain ranges)
//!
//! Features are constrained random walks computed once per world, before any
//! hex is filled. Their hexes always win over neighbor-based fill.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rules::{FeatureSpec, TerrainRules};
use super::types::TerrainType;
use crate::hex::{AxialCoord, HexDirection};

/// The kinds of linear feature a world can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    River,
    DryRiverbed,
    MountainRange,
}

impl FeatureKind {
    /// Direction change applied when the walk meanders
    ///
    /// Rivers drift by one sixth of a turn; ranges break sharply.
    fn turn_steps(&self) -> i32 {
        match self {
            FeatureKind::River | FeatureKind::DryRiverbed => 1,
            FeatureKind::MountainRange => 2,
        }
    }
}

/// One hex of a linear feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureHex {
    pub coord: AxialCoord,
    pub terrain: TerrainType,
}

/// All precomputed feature hexes of a world
///
/// When features overlap, the earliest entry for a coordinate wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearFeatures {
    pub hexes: Vec<FeatureHex>,
}

impl LinearFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hexes(hexes: Vec<FeatureHex>) -> Self {
        Self { hexes }
    }

    /// Feature terrain at a coordinate, if any
    pub fn terrain_at(&self, coord: AxialCoord) -> Option<TerrainType> {
        self.hexes
            .iter()
            .find(|h| h.coord == coord)
            .map(|h| h.terrain)
    }

    pub fn extend(&mut self, hexes: impl IntoIterator<Item = FeatureHex>) {
        self.hexes.extend(hexes);
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }
}

/// Walk a single feature
///
/// Each step emits the current coordinate, then meanders with probability
/// `meander`, then advances one hex. With `meander = 0` the result is a
/// straight line of `length` hexes starting at `start`.
pub fn walk_feature<R: Rng + ?Sized>(
    kind: FeatureKind,
    start: AxialCoord,
    direction: HexDirection,
    length: u32,
    meander: f64,
    rules: &TerrainRules,
    rng: &mut R,
) -> Vec<FeatureHex> {
    let mut hexes = Vec::with_capacity(length as usize);
    let mut current = start;
    let mut direction = direction;

    for _ in 0..length {
        let terrain = match kind {
            FeatureKind::River => TerrainType::River,
            FeatureKind::DryRiverbed => TerrainType::DryRiverbed,
            FeatureKind::MountainRange => {
                if rng.gen::<f64>() < rules.mountain_primary_chance {
                    TerrainType::Mountains
                } else {
                    TerrainType::Crags
                }
            }
        };
        hexes.push(FeatureHex {
            coord: current,
            terrain,
        });

        if meander > 0.0 && rng.gen::<f64>() < meander {
            let steps = kind.turn_steps();
            direction = if rng.gen::<bool>() {
                direction.turned(steps)
            } else {
                direction.turned(-steps)
            };
        }
        current = current.step(direction);
    }

    hexes
}

/// Generate every linear feature of a world around `center`
///
/// Mountain ranges first, then rivers, then dry riverbeds.
pub fn generate_terrain_features<R: Rng + ?Sized>(
    center: AxialCoord,
    radius: i32,
    rules: &TerrainRules,
    rng: &mut R,
) -> LinearFeatures {
    let mut features = LinearFeatures::new();

    let passes = [
        (FeatureKind::MountainRange, rules.mountain_range),
        (FeatureKind::River, rules.river),
        (FeatureKind::DryRiverbed, rules.dry_riverbed),
    ];

    for (kind, spec) in passes {
        let count = roll_inclusive(spec.min_count, spec.max_count, rng);
        for _ in 0..count {
            let hexes = seed_feature(kind, &spec, center, radius, rules, rng);
            tracing::debug!(
                "Generated {:?} of {} hexes starting at {}",
                kind,
                hexes.len(),
                hexes.first().map(|h| h.coord).unwrap_or(center)
            );
            features.extend(hexes);
        }
    }

    features
}

fn seed_feature<R: Rng + ?Sized>(
    kind: FeatureKind,
    spec: &FeatureSpec,
    center: AxialCoord,
    radius: i32,
    rules: &TerrainRules,
    rng: &mut R,
) -> Vec<FeatureHex> {
    let radius = radius.max(0);
    let start = AxialCoord::new(
        center.q + rng.gen_range(-radius..=radius),
        center.r + rng.gen_range(-radius..=radius),
    );
    let direction = HexDirection::from_index(rng.gen_range(0..6));
    let length = roll_inclusive(spec.min_length, spec.max_length, rng);
    walk_feature(kind, start, direction, length, spec.meander, rules, rng)
}

fn roll_inclusive<R: Rng + ?Sized>(min: u32, max: u32, rng: &mut R) -> u32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}
