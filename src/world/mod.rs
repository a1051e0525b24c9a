//! World state: hexes, the player, creatures and the state machine

pub mod hex;
pub mod machine;
pub mod player;
pub mod snapshot;

pub use hex::{Hex, HexMap};
pub use machine::{
    ActionReport, Rejection, Transition, WorldAction, WorldEngine, WorldEvent, WorldEventType,
};
pub use player::{GrowthStage, PlayerState};
pub use snapshot::{CreatureMap, EndCause, WorldPhase, WorldSnapshot};
