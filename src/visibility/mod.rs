//! Visibility and discovery tracking

pub mod sight;

pub use sight::{
    calculate_visibility, has_line_of_sight, sight_radius, VisibilitySummary,
    DEFAULT_SIGHT_RADIUS,
};
