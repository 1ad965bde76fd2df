//! Saved plant (reminder) repository
//!
//! Saved plants live in the `key_value` table as one JSON object mapping plant
//! id to saved plant, read and written as a whole. The object keeps insertion
//! order, which is the order `list` reports.

use crate::error::{Error, Result};
use crate::models::{PlantId, SavedPlant};
use libsql::Connection;
use serde_json::{Map, Value};

/// Storage key of the saved plants collection
pub const PLANTS_STORAGE_KEY: &str = "@plantmanager:plants";

/// Trait for saved plant storage operations (async)
#[allow(async_fn_in_trait)]
pub trait ReminderRepository {
    /// All saved plants, in stored order
    async fn list(&self) -> Result<Vec<SavedPlant>>;

    /// A saved plant by id
    async fn get(&self, id: &PlantId) -> Result<Option<SavedPlant>>;

    /// Insert a saved plant, replacing any entry with the same id in place
    async fn save(&self, plant: &SavedPlant) -> Result<()>;

    /// Delete the saved plant with this id
    async fn remove(&self, id: &PlantId) -> Result<()>;
}

type Collection = Map<String, Value>;

/// libSQL implementation of `ReminderRepository`
pub struct LibSqlReminderRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlReminderRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn load_collection(&self) -> Result<Collection> {
        let mut rows = self
            .conn
            .query(
                "SELECT value FROM key_value WHERE key = ?",
                [PLANTS_STORAGE_KEY],
            )
            .await?;

        let Some(row) = rows.next().await? else {
            return Ok(Collection::new());
        };

        let raw: String = row.get(0)?;
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(collection) => Ok(collection),
            other => Err(Error::Database(format!(
                "saved plants collection must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    async fn store_collection(&self, collection: &Collection) -> Result<()> {
        let payload = serde_json::to_string(collection)?;
        let now = chrono::Utc::now().timestamp_millis();
        self.conn
            .execute(
                "INSERT OR REPLACE INTO key_value (key, value, updated_at) VALUES (?, ?, ?)",
                libsql::params![PLANTS_STORAGE_KEY, payload, now],
            )
            .await?;
        Ok(())
    }

    /// Read, modify and write back the collection inside one transaction.
    async fn modify_collection(
        &self,
        apply: impl FnOnce(&mut Collection) -> Result<()>,
    ) -> Result<()> {
        self.conn.execute("BEGIN IMMEDIATE", ()).await?;

        let result = async {
            let mut collection = self.load_collection().await?;
            apply(&mut collection)?;
            self.store_collection(&collection).await
        }
        .await;

        if let Err(e) = result {
            self.conn.execute("ROLLBACK", ()).await.ok();
            return Err(e);
        }

        if let Err(e) = self.conn.execute("COMMIT", ()).await {
            self.conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }

        Ok(())
    }
}

impl ReminderRepository for LibSqlReminderRepository<'_> {
    async fn list(&self) -> Result<Vec<SavedPlant>> {
        let collection = self.load_collection().await?;
        collection
            .into_iter()
            .map(|(_, value)| serde_json::from_value(value).map_err(Error::from))
            .collect()
    }

    async fn get(&self, id: &PlantId) -> Result<Option<SavedPlant>> {
        let mut collection = self.load_collection().await?;
        collection
            .remove(id.as_str())
            .map(serde_json::from_value)
            .transpose()
            .map_err(Error::from)
    }

    async fn save(&self, plant: &SavedPlant) -> Result<()> {
        let value = serde_json::to_value(plant)?;
        let key = plant.id().to_string();

        self.modify_collection(move |collection| {
            collection.insert(key, value);
            Ok(())
        })
        .await?;

        tracing::info!(id = %plant.id(), "Saved plant reminder");
        Ok(())
    }

    async fn remove(&self, id: &PlantId) -> Result<()> {
        self.modify_collection(|collection| {
            collection
                .shift_remove(id.as_str())
                .map(|_| ())
                .ok_or_else(|| Error::NotFound(id.to_string()))
        })
        .await?;

        tracing::info!(%id, "Removed plant reminder");
        Ok(())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Frequency, Plant, RepeatEvery};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn saved(id: &str, name: &str, notify_at: DateTime<Utc>) -> SavedPlant {
        SavedPlant::new(
            Plant {
                id: PlantId::from(id),
                name: name.to_string(),
                about: String::new(),
                water_tips: String::new(),
                photo: String::new(),
                environments: vec!["living_room".to_string()],
                frequency: Frequency {
                    times: 2,
                    repeat_every: RepeatEvery::Week,
                },
            },
            notify_at,
        )
    }

    fn ids(plants: &[SavedPlant]) -> Vec<&str> {
        plants.iter().map(|plant| plant.id().as_str()).collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_empty_store() {
        let db = setup().await;
        let repo = LibSqlReminderRepository::new(db.connection());

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_and_list_keeps_insertion_order() {
        let db = setup().await;
        let repo = LibSqlReminderRepository::new(db.connection());

        repo.save(&saved("9", "Zamioculca", at(9))).await.unwrap();
        repo.save(&saved("1", "Aningapara", at(7))).await.unwrap();
        repo.save(&saved("5", "Imbé", at(8))).await.unwrap();

        let plants = repo.list().await.unwrap();
        assert_eq!(ids(&plants), vec!["9", "1", "5"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_same_id_replaces_in_place() {
        let db = setup().await;
        let repo = LibSqlReminderRepository::new(db.connection());

        repo.save(&saved("1", "Aningapara", at(7))).await.unwrap();
        repo.save(&saved("2", "Peperomia", at(8))).await.unwrap();
        repo.save(&saved("1", "Aningapara", at(20))).await.unwrap();

        let plants = repo.list().await.unwrap();
        assert_eq!(ids(&plants), vec!["1", "2"]);
        assert_eq!(plants[0].date_time_notification, at(20));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get() {
        let db = setup().await;
        let repo = LibSqlReminderRepository::new(db.connection());

        let plant = saved("3", "Imbé", at(10));
        repo.save(&plant).await.unwrap();

        assert_eq!(repo.get(&PlantId::from("3")).await.unwrap(), Some(plant));
        assert_eq!(repo.get(&PlantId::from("4")).await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remove_excludes_id_and_keeps_order() {
        let db = setup().await;
        let repo = LibSqlReminderRepository::new(db.connection());

        for (id, hour) in [("1", 7), ("2", 8), ("3", 9)] {
            repo.save(&saved(id, "Planta", at(hour))).await.unwrap();
        }

        repo.remove(&PlantId::from("1")).await.unwrap();

        let plants = repo.list().await.unwrap();
        assert_eq!(ids(&plants), vec!["2", "3"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remove_missing_id_is_not_found() {
        let db = setup().await;
        let repo = LibSqlReminderRepository::new(db.connection());

        repo.save(&saved("1", "Aningapara", at(7))).await.unwrap();

        let error = repo.remove(&PlantId::from("42")).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(id) if id == "42"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_corrupt_collection_is_reported() {
        let db = setup().await;
        db.connection()
            .execute(
                "INSERT INTO key_value (key, value, updated_at) VALUES (?, ?, 0)",
                [PLANTS_STORAGE_KEY, "[1, 2, 3]"],
            )
            .await
            .unwrap();
        let repo = LibSqlReminderRepository::new(db.connection());

        let error = repo.list().await.unwrap_err();
        assert!(error.to_string().contains("an array"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_reads_collection_written_with_numeric_ids() {
        let db = setup().await;
        let payload = r#"{
            "7": {
                "id": 7,
                "name": "Zamioculca",
                "about": "",
                "water_tips": "",
                "photo": "",
                "environments": ["bedroom"],
                "frequency": { "times": 1, "repeat_every": "week" },
                "dateTimeNotification": "2024-06-01T09:00:00.000Z"
            }
        }"#;
        db.connection()
            .execute(
                "INSERT INTO key_value (key, value, updated_at) VALUES (?, ?, 0)",
                [PLANTS_STORAGE_KEY, payload],
            )
            .await
            .unwrap();
        let repo = LibSqlReminderRepository::new(db.connection());

        let plants = repo.list().await.unwrap();
        assert_eq!(ids(&plants), vec!["7"]);
        assert_eq!(plants[0].date_time_notification, at(9));
    }
}
