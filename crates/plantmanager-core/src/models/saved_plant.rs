//! Saved plant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Plant, PlantId};

/// A plant the user asked to be reminded about, with its next watering time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlant {
    #[serde(flatten)]
    pub plant: Plant,
    /// Next scheduled watering
    #[serde(rename = "dateTimeNotification")]
    pub date_time_notification: DateTime<Utc>,
}

impl SavedPlant {
    #[must_use]
    pub const fn new(plant: Plant, date_time_notification: DateTime<Utc>) -> Self {
        Self {
            plant,
            date_time_notification,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &PlantId {
        &self.plant.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.plant.name
    }
}
