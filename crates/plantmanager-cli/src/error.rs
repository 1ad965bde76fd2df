use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] plantmanager_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Plant ID cannot be empty")]
    EmptyPlantId,
    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidReminderTime(String),
    #[error("Plant {0} is not in your saved plants")]
    PlantNotSaved(String),
    #[error("{0}")]
    RemovalFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
