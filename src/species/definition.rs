//! Species reference data
//!
//! Species are plain data keyed by name. The registry is injected into the
//! spawn step and the combat resolver; nothing algorithmic hard-wires a
//! particular species.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::{Result, WildError};

const DEFAULT_SPECIES: &str = include_str!("../../data/species.toml");

/// Broad behavior of a species when encountered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorType {
    #[default]
    Passive,
    Skittish,
    Defensive,
    Aggressive,
    /// Encountered in groups of several individuals
    Pack,
}

/// Static attributes of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    /// Energy value of one adult-sized individual
    pub nutrition: f64,
    /// Raw threat magnitude
    pub danger: f64,
    /// Tendency to fight back (0-1)
    #[serde(default)]
    pub aggression: f64,
    /// How hard the species is to catch
    pub difficulty: f64,
    /// Adult body weight (kg)
    pub weight: f64,
    /// Maturity (0-1) at which an individual counts as adult
    #[serde(default)]
    pub minimum_age: f64,
    #[serde(default)]
    pub behavior: BehaviorType,
}

impl SpeciesDefinition {
    /// Minimal definition, mostly useful in tests and scenarios
    pub fn new(name: &str, nutrition: f64, danger: f64, difficulty: f64, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            emoji: String::new(),
            nutrition,
            danger,
            aggression: 0.0,
            difficulty,
            weight,
            minimum_age: 0.0,
            behavior: BehaviorType::Passive,
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorType) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_minimum_age(mut self, minimum_age: f64) -> Self {
        self.minimum_age = minimum_age;
        self
    }

    /// Display label: emoji if present, name otherwise
    pub fn label(&self) -> &str {
        if self.emoji.is_empty() {
            &self.name
        } else {
            &self.emoji
        }
    }

    /// Can an individual of the given maturity be an adult encounter?
    pub fn is_adult_at(&self, maturity: f64) -> bool {
        maturity >= self.minimum_age
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| WildError::InvalidSpecies {
            species: self.name.clone(),
            reason: reason.to_string(),
        };

        let stats = [
            ("nutrition", self.nutrition),
            ("danger", self.danger),
            ("difficulty", self.difficulty),
            ("weight", self.weight),
        ];
        for (field, value) in stats {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!("{field} must be a finite non-negative number")));
            }
        }
        if !(0.0..=1.0).contains(&self.aggression) {
            return Err(invalid("aggression must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.minimum_age) {
            return Err(invalid("minimum_age must be in [0, 1]"));
        }
        Ok(())
    }
}

/// TOML representation of a species file
#[derive(Debug, Deserialize)]
struct TomlSpecies {
    species: Vec<SpeciesDefinition>,
}

/// All known species, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRegistry {
    species: BTreeMap<String, SpeciesDefinition>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled species set
    pub fn with_defaults() -> Result<Self> {
        Self::parse_toml(DEFAULT_SPECIES)
    }

    /// Parse species from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlSpecies = toml::from_str(content)?;
        let mut registry = Self::new();
        for definition in data.species {
            definition.validate()?;
            registry.insert(definition);
        }
        Ok(registry)
    }

    /// Load species from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Add or replace a species
    pub fn insert(&mut self, definition: SpeciesDefinition) {
        self.species.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&SpeciesDefinition> {
        self.species.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    /// Species in name order
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDefinition> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
