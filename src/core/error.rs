use thiserror::Error;

use crate::world::Rejection;

#[derive(Error, Debug)]
pub enum WildError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown terrain type: {0}")]
    UnknownTerrain(String),

    #[error("Unknown species in habitat table: {0}")]
    UnknownSpecies(String),

    #[error("Invalid species data for {species}: {reason}")]
    InvalidSpecies { species: String, reason: String },

    #[error("Action rejected: {0}")]
    Rejected(#[from] Rejection),
}

pub type Result<T> = std::result::Result<T, WildError>;
