pub mod config;
pub mod error;
pub mod types;

pub use config::{CreatureLifetime, WildConfig};
pub use error::{Result, WildError};
pub use types::{CreatureId, TimeOfDay, Turn};
