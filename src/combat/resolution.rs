//! Hunt resolution
//!
//! One roll against the success chance. Injuries land whether or not the
//! hunt succeeds; energy is only gained from a kill.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::outcome::{assess_hunt, energy_gain, injuries, HuntOdds};
use super::sanitize::Diagnostics;
use crate::core::config::WildConfig;
use crate::core::types::CreatureId;
use crate::species::{CreatureInstance, SpeciesDefinition};
use crate::world::player::PlayerState;

/// Result of a single hunt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntOutcome {
    pub creature: CreatureId,
    pub species: String,
    pub odds: HuntOdds,
    /// Percentile roll, 0..100; success when below the chance
    pub roll: u32,
    pub success: bool,
    pub injuries: f64,
    pub energy_gained: u32,
    /// Injuries meet or exceed the player's remaining health
    pub lethal: bool,
}

/// Roll a hunt of `creature` by `player`
pub fn resolve_hunt<R: Rng + ?Sized>(
    player: &PlayerState,
    creature: &CreatureInstance,
    species: &SpeciesDefinition,
    config: &WildConfig,
    rng: &mut R,
    diag: &mut Diagnostics,
) -> HuntOutcome {
    let odds = assess_hunt(
        player.weight,
        player.fitness,
        species,
        creature.size,
        creature.pack_size,
        config,
        rng,
        diag,
    );
    let roll = rng.gen_range(0..100);
    let success = roll < odds.success_chance;
    let injuries = injuries(odds.fierceness, diag);
    let energy_gained = if success {
        energy_gain(species, creature.size, player.weight, diag)
    } else {
        0
    };

    tracing::debug!(
        "Hunt {} {}: chance {} roll {} -> {}",
        creature.id,
        species.name,
        odds.success_chance,
        roll,
        if success { "kill" } else { "escaped" }
    );

    HuntOutcome {
        creature: creature.id,
        species: species.name.clone(),
        odds,
        roll,
        success,
        injuries,
        energy_gained,
        lethal: injuries >= player.health,
    }
}

impl HuntOutcome {
    /// Apply injuries, food and the kill tally to the player
    pub fn apply(&self, player: &mut PlayerState, config: &WildConfig) {
        player.take_injuries(self.injuries);
        if self.success {
            player.kills += 1;
            player.eat(self.energy_gained, config);
        }
    }
}
