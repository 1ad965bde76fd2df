//! Environment model

use serde::{Deserialize, Serialize};

/// Key of the synthetic "every environment" entry
pub const ALL_ENVIRONMENTS_KEY: &str = "all";

const ALL_ENVIRONMENTS_TITLE: &str = "Todos";

/// A placement context plants are grouped by (living room, kitchen, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub key: String,
    pub title: String,
}

impl Environment {
    /// The client-side sentinel that matches every plant.
    ///
    /// It is never part of the remote set.
    #[must_use]
    pub fn all() -> Self {
        Self {
            key: ALL_ENVIRONMENTS_KEY.to_string(),
            title: ALL_ENVIRONMENTS_TITLE.to_string(),
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.key == ALL_ENVIRONMENTS_KEY
    }

    /// Prepend the `all` sentinel to a list of remote environments
    #[must_use]
    pub fn with_all_sentinel(remote: Vec<Self>) -> Vec<Self> {
        let mut environments = Vec::with_capacity(remote.len() + 1);
        environments.push(Self::all());
        environments.extend(remote);
        environments
    }
}
