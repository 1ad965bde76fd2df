//! Data models for PlantManager

mod environment;
mod plant;
mod saved_plant;

pub use environment::{Environment, ALL_ENVIRONMENTS_KEY};
pub use plant::{Frequency, Plant, PlantId, RepeatEvery};
pub use saved_plant::SavedPlant;
