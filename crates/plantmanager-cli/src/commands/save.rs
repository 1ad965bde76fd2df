use std::path::Path;

use chrono::Utc;
use plantmanager_core::catalog::PlantCatalog;
use plantmanager_core::config::AppConfig;
use plantmanager_core::relative_time::format_distance;
use plantmanager_core::schedule::today_at;

use crate::commands::common::{
    catalog_client, format_notification_timestamp, open_store, parse_plant_id,
    parse_reminder_time,
};
use crate::error::CliError;

pub async fn run_save(
    config: &AppConfig,
    db_path: &Path,
    id: &str,
    at: Option<&str>,
) -> Result<(), CliError> {
    let plant_id = parse_plant_id(id)?;
    let now = Utc::now();
    let reminder_at = match at {
        Some(raw) => today_at(parse_reminder_time(raw)?, now),
        None => now,
    };

    let catalog = catalog_client(config)?;
    let plant = catalog.fetch_plant(&plant_id).await?;
    let store = open_store(db_path).await?;
    let saved = store.schedule_plant(plant, reminder_at, now).await?;

    tracing::info!(id = %saved.id(), "Saved plant");
    println!(
        "{}  {}  {} ({})",
        saved.id(),
        saved.name(),
        format_notification_timestamp(saved.date_time_notification),
        format_distance(saved.date_time_notification, now, config.locale)
    );
    Ok(())
}
