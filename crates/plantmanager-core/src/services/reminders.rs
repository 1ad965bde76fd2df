//! Shared reminder store service used across clients.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::db::{Database, LibSqlReminderRepository, ReminderRepository};
use crate::models::{Plant, PlantId, SavedPlant};
use crate::schedule::next_watering;
use crate::Result;

/// Thread-safe service for saved plant operations.
#[derive(Clone)]
pub struct ReminderService {
    db: Arc<Mutex<Database>>,
}

impl ReminderService {
    /// Open the reminder store at the given filesystem path.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!("Opening reminder store at {}", db_path.display());
        let db = Database::open(&db_path).await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open an in-memory reminder store (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Compute the next watering for `plant` and persist it.
    ///
    /// `reminder_at` carries the time of day the user wants to be reminded.
    pub async fn schedule_plant(
        &self,
        plant: Plant,
        reminder_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<SavedPlant> {
        let date_time_notification = next_watering(&plant.frequency, reminder_at, now)?;
        let saved = SavedPlant::new(plant, date_time_notification);
        self.save(&saved).await?;
        Ok(saved)
    }
}

impl ReminderRepository for ReminderService {
    async fn list(&self) -> Result<Vec<SavedPlant>> {
        let db = self.db.lock().await;
        let repo = LibSqlReminderRepository::new(db.connection());
        repo.list().await
    }

    async fn get(&self, id: &PlantId) -> Result<Option<SavedPlant>> {
        let db = self.db.lock().await;
        let repo = LibSqlReminderRepository::new(db.connection());
        repo.get(id).await
    }

    async fn save(&self, plant: &SavedPlant) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlReminderRepository::new(db.connection());
        repo.save(plant).await
    }

    async fn remove(&self, id: &PlantId) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlReminderRepository::new(db.connection());
        repo.remove(id).await
    }
}
