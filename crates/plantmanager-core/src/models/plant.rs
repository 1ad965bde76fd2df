//! Plant model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a plant in the remote catalog.
///
/// The catalog may send ids as JSON numbers or strings; both normalize to the
/// same string form so they can key the local store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPlantId")]
pub struct PlantId(String);

impl PlantId {
    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlantId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::Error::InvalidInput(
                "Plant ID cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for PlantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlantId {
    Text(String),
    Number(i64),
}

impl From<RawPlantId> for PlantId {
    fn from(raw: RawPlantId) -> Self {
        match raw {
            RawPlantId::Text(text) => Self(text),
            RawPlantId::Number(number) => Self(number.to_string()),
        }
    }
}

/// Period a watering frequency repeats over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatEvery {
    Day,
    Week,
}

/// How often a plant needs water: `times` waterings every `repeat_every`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub times: u32,
    pub repeat_every: RepeatEvery,
}

/// A plant as published by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    /// Descriptive text
    pub about: String,
    pub water_tips: String,
    /// Photo reference (URL)
    pub photo: String,
    /// Keys of the environments this plant fits in
    pub environments: Vec<String>,
    pub frequency: Frequency,
}

impl Plant {
    /// Whether the plant is tagged with the given environment key
    #[must_use]
    pub fn fits_environment(&self, key: &str) -> bool {
        self.environments.iter().any(|environment| environment == key)
    }
}
