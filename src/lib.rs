//! Wildhex - Hex-Grid Wilderness Simulation
//!
//! Procedural terrain, fog of war, wildlife spawning and hunting, driven by a
//! turn-based state machine over explicit world snapshots.

pub mod combat;
pub mod core;
pub mod hex;
pub mod species;
pub mod terrain;
pub mod visibility;
pub mod world;
