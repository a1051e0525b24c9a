//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::config::WildConfig;

/// Turn counter (one turn per player move)
pub type Turn = u32;

/// Unique identifier for spawned creatures
///
/// Ids are handed out sequentially by the world snapshot so that seeded
/// runs produce identical ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

impl CreatureId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The id that follows this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase of the day/night cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// Time of day at a given turn; each cycle starts with daylight
    pub fn at(turn: Turn, config: &WildConfig) -> Self {
        let cycle = config.cycle_length().max(1);
        if turn % cycle < config.day_length {
            Self::Day
        } else {
            Self::Night
        }
    }
}
