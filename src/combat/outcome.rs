//! Hunt odds, injuries and energy gain
//!
//! These functions never fail. Bad numbers are replaced and reported through
//! `Diagnostics`, so every call produces a playable result.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::constants::*;
use super::ratios::{agility_ratio, fierceness_ratio, satisfaction};
use super::sanitize::{non_negative_or, positive_or, Diagnostics};
use crate::core::config::WildConfig;
use crate::species::SpeciesDefinition;

/// Injury points dealt by a creature with the given fierceness ratio
pub fn injuries(fierceness_ratio: f64, diag: &mut Diagnostics) -> f64 {
    non_negative_or(fierceness_ratio, 0.0, "fierceness_ratio", diag) * INJURY_PER_FIERCENESS
}

/// Both ratios for one encounter plus the resulting success chance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HuntOdds {
    pub fierceness: f64,
    pub agility: f64,
    /// Percent, 1..=99
    pub success_chance: u32,
}

/// Success chance in percent from precomputed ratios
///
/// Dangerous prey caps the chance low, elusive prey caps it in the middle,
/// and everything else is an easy catch.
pub fn chance_from_ratios(fierceness: f64, agility: f64, diag: &mut Diagnostics) -> u32 {
    if !fierceness.is_finite() || !agility.is_finite() {
        let bad = if fierceness.is_finite() { agility } else { fierceness };
        diag.record("success_chance", bad, f64::from(UNKNOWN_SPECIES_CHANCE));
        return UNKNOWN_SPECIES_CHANCE;
    }

    let raw = if fierceness >= 1.0 {
        (DANGEROUS_BASE - fierceness * DANGEROUS_SLOPE).max(DANGEROUS_FLOOR)
    } else if agility >= 1.0 {
        (ELUSIVE_BASE - agility * ELUSIVE_SLOPE).max(ELUSIVE_FLOOR)
    } else {
        (EASY_BASE - fierceness * EASY_SLOPE - agility * EASY_SLOPE).max(EASY_FLOOR)
    };

    let clamped = raw.clamp(f64::from(MIN_SUCCESS_CHANCE), f64::from(MAX_SUCCESS_CHANCE));
    // Clamped into 1..=99 above, so the cast cannot truncate
    clamped.round() as u32
}

/// Compute both ratios and the success chance for one encounter
#[allow(clippy::too_many_arguments)]
pub fn assess_hunt<R: Rng + ?Sized>(
    player_weight: f64,
    player_fitness: f64,
    species: &SpeciesDefinition,
    size: f64,
    pack_size: u32,
    config: &WildConfig,
    rng: &mut R,
    diag: &mut Diagnostics,
) -> HuntOdds {
    let fierceness = fierceness_ratio(
        player_weight,
        player_fitness,
        species,
        size,
        pack_size,
        config,
        rng,
        diag,
    );
    let agility = agility_ratio(player_weight, species, config, rng, diag);
    HuntOdds {
        fierceness,
        agility,
        success_chance: chance_from_ratios(fierceness, agility, diag),
    }
}

/// Percent chance that hunting a lone creature succeeds
///
/// Unknown species yield a flat 50.
pub fn success_chance<R: Rng + ?Sized>(
    player_weight: f64,
    player_fitness: f64,
    species: Option<&SpeciesDefinition>,
    size: f64,
    config: &WildConfig,
    rng: &mut R,
    diag: &mut Diagnostics,
) -> u32 {
    match species {
        Some(species) => {
            assess_hunt(player_weight, player_fitness, species, size, 1, config, rng, diag)
                .success_chance
        }
        None => UNKNOWN_SPECIES_CHANCE,
    }
}

/// Feeding efficiency; bigger bodies extract less per kilogram eaten
pub fn feeding_efficiency(player_weight: f64) -> f64 {
    (EFFICIENCY_REFERENCE_WEIGHT / player_weight.max(EFFICIENCY_REFERENCE_WEIGHT))
        .powf(EFFICIENCY_EXPONENT)
        .max(MIN_EFFICIENCY)
}

/// Energy gained from eating a creature, always at least 1
///
/// `size` scales both the nutrition and the prey's body weight, so a
/// juvenile is judged by its own weight for the satisfaction tier.
pub fn energy_gain(
    species: &SpeciesDefinition,
    size: f64,
    player_weight: f64,
    diag: &mut Diagnostics,
) -> u32 {
    let nutrition = non_negative_or(species.nutrition, 0.0, "nutrition", diag);
    let size = non_negative_or(size, 1.0, "size", diag);
    let player_weight = positive_or(player_weight, EFFICIENCY_REFERENCE_WEIGHT, "player_weight", diag);
    let prey_weight = non_negative_or(species.weight, 0.0, "species_weight", diag) * size;

    let base = nutrition * size;
    let gain = base
        * feeding_efficiency(player_weight)
        * satisfaction(prey_weight, player_weight)
        * ENERGY_SCALE;

    if !gain.is_finite() {
        diag.record("energy_gain", gain, f64::from(MIN_ENERGY_GAIN));
        return MIN_ENERGY_GAIN;
    }
    // Saturating float-to-int cast; the floor keeps it at 1 or more
    gain.max(f64::from(MIN_ENERGY_GAIN)).round() as u32
}
