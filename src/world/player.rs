//! Player state and growth
//!
//! The player only changes through state machine transitions and applied
//! hunt outcomes; terrain and visibility passes never touch it.

use serde::{Deserialize, Serialize};

use crate::combat::ratios::player_agility;
use crate::core::config::WildConfig;
use crate::hex::AxialCoord;

/// Fitness of a freshly hatched player
pub const STARTING_FITNESS: f64 = 10.0;

/// Growth stage, derived from weight as a share of the maximum weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Hatchling,
    Juvenile,
    Subadult,
    Adult,
}

impl GrowthStage {
    /// Upper weight share (exclusive) of each stage below Adult
    const THRESHOLDS: [(GrowthStage, f64); 3] = [
        (GrowthStage::Hatchling, 0.01),
        (GrowthStage::Juvenile, 0.10),
        (GrowthStage::Subadult, 0.50),
    ];

    pub fn for_weight(weight: f64, max_weight: f64) -> Self {
        let share = weight / max_weight;
        Self::THRESHOLDS
            .iter()
            .find(|(_, limit)| share < *limit)
            .map_or(GrowthStage::Adult, |(stage, _)| *stage)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GrowthStage::Hatchling => "hatchling",
            GrowthStage::Juvenile => "juvenile",
            GrowthStage::Subadult => "subadult",
            GrowthStage::Adult => "adult",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: AxialCoord,
    /// Body weight in kg
    pub weight: f64,
    pub fitness: f64,
    pub energy: f64,
    /// 0 when fully fed, 100 when out of energy
    pub hunger: f64,
    pub health: f64,
    /// 0..=100; small bodies sneak better
    pub stealth: f64,
    pub stage: GrowthStage,
    pub kills: u32,
}

impl PlayerState {
    /// A full-health, fully fed hatchling
    pub fn hatchling(position: AxialCoord, config: &WildConfig) -> Self {
        let mut player = Self {
            position,
            weight: config.hatchling_weight,
            fitness: STARTING_FITNESS,
            energy: config.max_energy,
            hunger: 0.0,
            health: config.max_health,
            stealth: 100.0,
            stage: GrowthStage::Hatchling,
            kills: 0,
        };
        player.refresh(config);
        player
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Pay for one move: energy, healing and fitness
    ///
    /// Moving with no energy left costs health instead.
    pub fn spend_move(&mut self, config: &WildConfig) {
        if self.energy > 0.0 {
            self.energy = (self.energy - config.move_energy_cost).max(0.0);
            self.health = (self.health + config.healing_rate).min(config.max_health);
        } else {
            self.health = (self.health - config.move_energy_cost).max(0.0);
        }
        self.fitness += config.fitness_per_move;
        self.refresh(config);
    }

    pub fn take_injuries(&mut self, amount: f64) {
        self.health = (self.health - amount.max(0.0)).max(0.0);
    }

    /// Add energy from a meal; anything above the cap becomes body weight
    ///
    /// Returns the weight gained.
    pub fn eat(&mut self, energy: u32, config: &WildConfig) -> f64 {
        self.energy += f64::from(energy);
        let mut gained = 0.0;
        if self.energy > config.max_energy {
            let surplus = self.energy - config.max_energy;
            self.energy = config.max_energy;
            let grown = (self.weight + surplus * self.weight / config.energy_per_bodyweight)
                .min(config.max_player_weight);
            gained = grown - self.weight;
            self.weight = grown;
        }
        self.refresh(config);
        gained
    }

    /// Recompute the derived fields
    fn refresh(&mut self, config: &WildConfig) {
        self.hunger = 100.0 * (1.0 - self.energy / config.max_energy);
        self.stage = GrowthStage::for_weight(self.weight, config.max_player_weight);
        self.stealth = (100.0 * player_agility(self.weight, config.hatchling_weight)).round();
    }
}
