//! Predator-versus-prey combat math and hunt resolution

pub mod constants;
pub mod outcome;
pub mod ratios;
pub mod resolution;
pub mod sanitize;

pub use outcome::{
    assess_hunt, chance_from_ratios, energy_gain, injuries, success_chance, HuntOdds,
};
pub use ratios::{agility_ratio, fierceness_ratio};
pub use resolution::{resolve_hunt, HuntOutcome};
pub use sanitize::{Diagnostics, Substitution};
