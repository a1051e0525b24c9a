//! Complete world state handed between transitions

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::config::WildConfig;
use crate::core::types::{CreatureId, TimeOfDay, Turn};
use crate::hex::AxialCoord;
use crate::species::CreatureInstance;
use crate::terrain::LinearFeatures;
use crate::visibility::VisibilitySummary;
use crate::world::hex::{Hex, HexMap};
use crate::world::player::PlayerState;

/// World phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorldPhase {
    #[default]
    Initializing, // No terrain yet
    GeneratingFeatures, // Linear features placed, hexes materializing
    Exploring,          // Normal play
    GameOver,           // Terminal
}

impl std::fmt::Display for WorldPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorldPhase::Initializing => "initializing",
            WorldPhase::GeneratingFeatures => "generating features",
            WorldPhase::Exploring => "exploring",
            WorldPhase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Why the game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    KilledBy { species: String },
    Starved,
}

impl std::fmt::Display for EndCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndCause::KilledBy { species } => write!(f, "killed hunting {species}"),
            EndCause::Starved => f.write_str("starved"),
        }
    }
}

/// Creatures on the map, keyed by the hex they stand on
pub type CreatureMap = AHashMap<AxialCoord, Vec<CreatureInstance>>;

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: WorldPhase,
    pub end_cause: Option<EndCause>,

    // Map
    pub hexes: HexMap,
    pub features: LinearFeatures,

    // Inhabitants
    pub player: PlayerState,
    pub creatures: CreatureMap,
    pub next_creature_id: CreatureId,
    /// In-range hexes at the last spawn pass
    pub spawn_frontier: BTreeSet<AxialCoord>,

    // Time
    pub turn: Turn,
    pub moves: u32,
}

impl WorldSnapshot {
    /// An empty world with a hatchling at the origin
    pub fn new(config: &WildConfig) -> Self {
        Self {
            phase: WorldPhase::Initializing,
            end_cause: None,
            hexes: HexMap::default(),
            features: LinearFeatures::new(),
            player: PlayerState::hatchling(AxialCoord::ORIGIN, config),
            creatures: CreatureMap::default(),
            next_creature_id: CreatureId(1),
            spawn_frontier: BTreeSet::new(),
            turn: 0,
            moves: 0,
        }
    }

    pub fn hex(&self, coord: AxialCoord) -> Option<&Hex> {
        self.hexes.get(&coord)
    }

    pub fn creatures_at(&self, coord: AxialCoord) -> &[CreatureInstance] {
        self.creatures.get(&coord).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn creature(&self, id: CreatureId) -> Option<&CreatureInstance> {
        self.creatures.values().flatten().find(|c| c.id == id)
    }

    /// All creatures ordered by id
    pub fn creatures_sorted(&self) -> Vec<&CreatureInstance> {
        let mut all: Vec<&CreatureInstance> = self.creatures.values().flatten().collect();
        all.sort_by_key(|c| c.id);
        all
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.values().map(Vec::len).sum()
    }

    pub(crate) fn remove_creature(&mut self, id: CreatureId) -> Option<CreatureInstance> {
        let coord = self.creature(id)?.coord;
        let list = self.creatures.get_mut(&coord)?;
        let index = list.iter().position(|c| c.id == id)?;
        let creature = list.remove(index);
        if list.is_empty() {
            self.creatures.remove(&coord);
        }
        Some(creature)
    }

    pub(crate) fn place_creature(&mut self, creature: CreatureInstance) {
        self.creatures.entry(creature.coord).or_default().push(creature);
    }

    /// Hex coordinates sorted, for order-sensitive passes
    pub fn sorted_coords(&self) -> Vec<AxialCoord> {
        let mut coords: Vec<AxialCoord> = self.hexes.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn time_of_day(&self, config: &WildConfig) -> TimeOfDay {
        TimeOfDay::at(self.turn, config)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == WorldPhase::GameOver
    }

    pub fn visibility_summary(&self) -> VisibilitySummary {
        VisibilitySummary::of(&self.hexes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainType;

    fn creature(id: u64, coord: AxialCoord) -> CreatureInstance {
        CreatureInstance {
            id: CreatureId(id),
            species: "Frog".into(),
            coord,
            size: 1.0,
            adult: true,
            pack_size: 1,
        }
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = WorldSnapshot::new(&WildConfig::default());
        assert_eq!(world.phase, WorldPhase::Initializing);
        assert!(world.hexes.is_empty());
        assert_eq!(world.creature_count(), 0);
        assert!(world.hex(AxialCoord::ORIGIN).is_none());
        assert!(world.creature(CreatureId(1)).is_none());
    }

    #[test]
    fn test_creature_bookkeeping() {
        let mut world = WorldSnapshot::new(&WildConfig::default());
        let here = AxialCoord::new(1, 0);
        world.place_creature(creature(2, here));
        world.place_creature(creature(1, here));
        world.place_creature(creature(3, AxialCoord::new(0, 1)));

        assert_eq!(world.creature_count(), 3);
        assert_eq!(world.creatures_at(here).len(), 2);
        let ids: Vec<u64> = world.creatures_sorted().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let removed = world.remove_creature(CreatureId(3)).unwrap();
        assert_eq!(removed.coord, AxialCoord::new(0, 1));
        assert!(world.creatures_at(AxialCoord::new(0, 1)).is_empty());
        assert!(!world.creatures.contains_key(&AxialCoord::new(0, 1)));
        assert!(world.remove_creature(CreatureId(3)).is_none());
    }

    #[test]
    fn test_hex_lookup() {
        let mut world = WorldSnapshot::new(&WildConfig::default());
        world
            .hexes
            .insert(AxialCoord::ORIGIN, Hex::new(AxialCoord::ORIGIN, TerrainType::Plains));
        assert_eq!(world.hex(AxialCoord::ORIGIN).unwrap().terrain, TerrainType::Plains);
        assert_eq!(world.sorted_coords(), vec![AxialCoord::ORIGIN]);
    }
}
