//! Fierceness and agility ratios
//!
//! Both ratios compare a creature against the player. A ratio of 1 or more
//! means the creature has the upper hand: it will hurt the player
//! (fierceness) or get away (agility).

use rand::Rng;

use super::constants::*;
use super::sanitize::{bounded_ratio, finite_or, non_negative_or, positive_or, Diagnostics};
use crate::core::config::WildConfig;
use crate::species::SpeciesDefinition;

/// Uniform behavior jitter in [1 - r, 1 + r]
///
/// A non-positive randomness disables jitter without consuming a draw.
/// NaN counts as zero and r >= 1 is clamped to `MAX_JITTER`, both recorded.
pub fn jitter<R: Rng + ?Sized>(randomness: f64, rng: &mut R, diag: &mut Diagnostics) -> f64 {
    if randomness.is_nan() {
        diag.record("behavior_randomness", randomness, 0.0);
        return 1.0;
    }
    if randomness <= 0.0 {
        return 1.0;
    }
    let r = if randomness >= 1.0 {
        diag.record("behavior_randomness", randomness, MAX_JITTER);
        MAX_JITTER
    } else {
        randomness
    };
    rng.gen_range((1.0 - r)..=(1.0 + r))
}

/// Player combat capability: weight scaled by log fitness
pub fn player_fierceness(player_weight: f64, player_fitness: f64) -> f64 {
    player_weight * player_fitness.max(1.0).log10() / 2.0
}

/// Danger of a creature relative to the player's fierceness
#[allow(clippy::too_many_arguments)]
pub fn fierceness_ratio<R: Rng + ?Sized>(
    player_weight: f64,
    player_fitness: f64,
    species: &SpeciesDefinition,
    size: f64,
    pack_size: u32,
    config: &WildConfig,
    rng: &mut R,
    diag: &mut Diagnostics,
) -> f64 {
    let player_weight = positive_or(player_weight, config.hatchling_weight, "player_weight", diag);
    let player_fitness = finite_or(player_fitness, 1.0, "player_fitness", diag);
    let size = non_negative_or(size, 1.0, "size", diag);
    let danger = non_negative_or(species.danger, 0.0, "danger", diag);
    let pack = f64::from(pack_size.max(1));

    let chance = jitter(config.behavior_randomness, rng, diag);
    let species_danger = danger * (size / pack) * chance;
    let ratio = species_danger / player_fierceness(player_weight, player_fitness).max(1.0);

    bounded_ratio(ratio, 1.0, "fierceness_ratio", diag)
}

/// Player agility from body weight
///
/// Normalized log weight above hatchling size, clamped to [0, 10], decays
/// agility steeply: hatchlings are at 1.0, giants approach the 0.01 floor.
pub fn player_agility(player_weight: f64, hatchling_weight: f64) -> f64 {
    let normalized = (player_weight.log10() - hatchling_weight.log10())
        .clamp(0.0, MAX_NORMALIZED_LOG_WEIGHT);
    (1.0 - (normalized / AGILITY_DECAY_SCALE).powf(AGILITY_DECAY_EXPONENT)).clamp(MIN_AGILITY, 1.0)
}

/// Index into `SIZE_MISMATCH_TIERS` for a prey/player weight ratio
fn size_tier(prey_weight: f64, player_weight: f64) -> Option<usize> {
    let ratio = prey_weight / player_weight;
    SIZE_MISMATCH_TIERS
        .iter()
        .position(|(threshold, _, _)| ratio < *threshold)
}

/// Agility multiplier for chasing prey far smaller than the player
pub fn size_penalty(prey_weight: f64, player_weight: f64) -> f64 {
    size_tier(prey_weight, player_weight).map_or(1.0, |i| SIZE_MISMATCH_TIERS[i].1)
}

/// Meal satisfaction multiplier for prey far smaller than the player
pub fn satisfaction(prey_weight: f64, player_weight: f64) -> f64 {
    size_tier(prey_weight, player_weight).map_or(1.0, |i| SIZE_MISMATCH_TIERS[i].2)
}

/// Difficulty of catching a creature relative to the player's agility
pub fn agility_ratio<R: Rng + ?Sized>(
    player_weight: f64,
    species: &SpeciesDefinition,
    config: &WildConfig,
    rng: &mut R,
    diag: &mut Diagnostics,
) -> f64 {
    let player_weight = positive_or(player_weight, config.hatchling_weight, "player_weight", diag);
    let difficulty = non_negative_or(species.difficulty, 1.0, "difficulty", diag);
    let prey_weight = non_negative_or(species.weight, 0.0, "species_weight", diag);

    let chance = jitter(config.behavior_randomness, rng, diag);
    let agility = player_agility(player_weight, config.hatchling_weight);
    let ratio = difficulty * chance * size_penalty(prey_weight, player_weight) / agility;

    bounded_ratio(ratio, 1.0, "agility_ratio", diag)
}
