//! Combat math constants - all tunable values in one place

// Injuries
pub const INJURY_PER_FIERCENESS: f64 = 40.0;
/// Fierceness ratio whose injuries empty a full default health budget
pub const LETHAL_FIERCENESS: f64 = 2.5;

// Agility curve
pub const MAX_NORMALIZED_LOG_WEIGHT: f64 = 10.0;
pub const AGILITY_DECAY_SCALE: f64 = 4.0;
pub const AGILITY_DECAY_EXPONENT: f64 = 1.8;
pub const MIN_AGILITY: f64 = 0.01;

/// Prey/player weight thresholds with (agility size penalty, satisfaction)
///
/// Checked in order; prey heavier than the last threshold gets (1.0, 1.0).
pub const SIZE_MISMATCH_TIERS: [(f64, f64, f64); 3] = [
    (0.001, 5.0, 0.1),
    (0.01, 3.0, 0.3),
    (0.1, 1.5, 0.7),
];

// Success chance branches
pub const DANGEROUS_BASE: f64 = 30.0;
pub const DANGEROUS_SLOPE: f64 = 15.0;
pub const DANGEROUS_FLOOR: f64 = 5.0;
pub const ELUSIVE_BASE: f64 = 80.0;
pub const ELUSIVE_SLOPE: f64 = 25.0;
pub const ELUSIVE_FLOOR: f64 = 20.0;
pub const EASY_BASE: f64 = 95.0;
pub const EASY_SLOPE: f64 = 10.0;
pub const EASY_FLOOR: f64 = 70.0;
pub const MIN_SUCCESS_CHANCE: u32 = 1;
pub const MAX_SUCCESS_CHANCE: u32 = 99;
/// Success chance reported when the species is unknown
pub const UNKNOWN_SPECIES_CHANCE: u32 = 50;

// Energy gain
pub const ENERGY_SCALE: f64 = 15.0;
pub const EFFICIENCY_REFERENCE_WEIGHT: f64 = 0.2;
pub const EFFICIENCY_EXPONENT: f64 = 0.3;
pub const MIN_EFFICIENCY: f64 = 0.1;
pub const MIN_ENERGY_GAIN: u32 = 1;

/// Widest jitter half-width; larger randomness is clamped to this
pub const MAX_JITTER: f64 = 0.99;

/// Ceiling for any combat ratio after sanitization
pub const MAX_RATIO: f64 = 1.0e9;
