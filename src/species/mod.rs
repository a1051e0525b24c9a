//! Species reference data, habitat tables and spawning

pub mod definition;
pub mod habitat;
pub mod spawn;

pub use definition::{BehaviorType, SpeciesDefinition, SpeciesRegistry};
pub use habitat::{HabitatSpawnTable, SpawnWeights};
pub use spawn::{spawn_on_hex, CreatureInstance};
