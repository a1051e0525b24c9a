//! Hex geometry on axial coordinates

pub mod coord;

pub use coord::{AxialCoord, HexDirection};
