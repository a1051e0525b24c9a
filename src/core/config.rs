//! Simulation configuration with documented constants
//!
//! Every tunable the core reads lives here. The core never reads a global;
//! callers hand a `WildConfig` to the engine so difficulty can be varied per
//! world.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, WildError};

/// What happens to spawned creatures once the player wanders off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureLifetime {
    /// Creatures vanish as soon as their hex leaves the player's sight range
    #[default]
    DespawnOutOfRange,
    /// Creatures stay on the map until they are hunted
    UntilHunted,
}

/// Configuration for the wilderness simulation
///
/// These values have been tuned so a hatchling can survive its first
/// few dozen turns on small prey. Changing them affects pacing and feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WildConfig {
    // === TIME ===
    /// Number of turns of daylight in one day/night cycle
    pub day_length: u32,

    /// Number of turns of darkness in one day/night cycle
    pub night_length: u32,

    // === COMBAT ===
    /// Half-width of the uniform jitter applied to combat ratios
    ///
    /// At 0.2 every ratio is multiplied by a factor in [0.8, 1.2].
    /// Set to 0.0 for fully deterministic combat math.
    pub behavior_randomness: f64,

    /// Body weight (kg) of a freshly hatched player
    ///
    /// Anchors the agility curve: agility starts at 1.0 at this weight
    /// and decays as log10(weight / hatchling_weight) grows.
    pub hatchling_weight: f64,

    /// Body weight (kg) the player can never grow past
    pub max_player_weight: f64,

    // === PLAYER UPKEEP ===
    /// Health points restored per move
    pub healing_rate: f64,

    /// Health budget of a fully healthy player
    ///
    /// A fierceness ratio of 2.5 yields 100 injury points, so with the
    /// default budget such a fight is lethal.
    pub max_health: f64,

    /// Energy storage cap; energy above this converts into growth
    pub max_energy: f64,

    /// Energy spent per move
    pub move_energy_cost: f64,

    /// Energy needed to grow by one body weight's worth of mass
    ///
    /// At 100.0, a surplus of 100 energy doubles the player's weight.
    pub energy_per_bodyweight: f64,

    /// Fitness gained per move (fitness feeds log10 in the fierceness formula)
    pub fitness_per_move: f64,

    // === WORLD ===
    /// Probability per move that an existing creature wanders to a neighbor hex
    pub roaming_rate: f64,

    /// Radius around the player in which hexes are materialized after a move
    ///
    /// Must be at least the largest terrain sight radius or visibility
    /// will have nothing to mark at the edge of sight.
    pub reveal_radius: u32,

    /// Radius around the world center in which linear features may start
    pub feature_radius: i32,

    /// Creature lifetime policy
    pub creature_lifetime: CreatureLifetime,
}

impl Default for WildConfig {
    fn default() -> Self {
        Self {
            day_length: 12,
            night_length: 6,

            behavior_randomness: 0.2,
            hatchling_weight: 0.2,
            max_player_weight: 1500.0,

            healing_rate: 1.0,
            max_health: 100.0,
            max_energy: 100.0,
            move_energy_cost: 1.0,
            energy_per_bodyweight: 100.0,
            fitness_per_move: 0.1,

            roaming_rate: 0.1,
            reveal_radius: 4,
            feature_radius: 8,
            creature_lifetime: CreatureLifetime::DespawnOutOfRange,
        }
    }
}

impl WildConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WildConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.day_length == 0 {
            return Err(WildError::InvalidConfig("day_length must be positive".into()));
        }

        if !(0.0..1.0).contains(&self.behavior_randomness) {
            return Err(WildError::InvalidConfig(format!(
                "behavior_randomness ({}) must be in [0, 1)",
                self.behavior_randomness
            )));
        }

        if !(self.hatchling_weight > 0.0 && self.hatchling_weight < self.max_player_weight) {
            return Err(WildError::InvalidConfig(format!(
                "hatchling_weight ({}) must be positive and below max_player_weight ({})",
                self.hatchling_weight, self.max_player_weight
            )));
        }

        if self.max_health <= 0.0 || self.max_energy <= 0.0 {
            return Err(WildError::InvalidConfig(
                "max_health and max_energy must be positive".into(),
            ));
        }

        if self.energy_per_bodyweight <= 0.0 {
            return Err(WildError::InvalidConfig(
                "energy_per_bodyweight must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.roaming_rate) {
            return Err(WildError::InvalidConfig(format!(
                "roaming_rate ({}) must be a probability",
                self.roaming_rate
            )));
        }

        if self.reveal_radius == 0 {
            return Err(WildError::InvalidConfig("reveal_radius must be positive".into()));
        }

        Ok(())
    }

    /// Length of a full day/night cycle in turns
    pub fn cycle_length(&self) -> u32 {
        self.day_length + self.night_length
    }
}
