use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveTime, Utc};
use plantmanager_core::catalog::HttpCatalogClient;
use plantmanager_core::config::AppConfig;
use plantmanager_core::relative_time::{format_distance, Locale};
use plantmanager_core::screens::ConfirmPrompt;
use plantmanager_core::services::ReminderService;
use plantmanager_core::{Environment, Plant, PlantId, SavedPlant};
use serde::Serialize;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "plantmanager.db";

#[derive(Debug, Serialize)]
pub struct PlantListItem {
    pub id: String,
    pub name: String,
    pub about: String,
    pub water_tips: String,
    pub photo: String,
    pub environments: Vec<String>,
    pub frequency: String,
}

#[derive(Debug, Serialize)]
pub struct SavedPlantItem {
    pub id: String,
    pub name: String,
    pub date_time_notification: String,
    pub relative_time: String,
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("plantmanager").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

/// Load the config file (or defaults) and apply environment overrides.
pub fn load_config(explicit_path: Option<&Path>) -> Result<(AppConfig, PathBuf), CliError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let config = AppConfig::load_from_path(&path)?.with_env_overrides(|key| env::var(key).ok())?;
    tracing::debug!("Using config from {}", path.display());
    Ok((config, path))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    cli_db_path
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(DB_FILE_NAME),
        |dir| dir.join("plantmanager").join(DB_FILE_NAME),
    )
}

pub async fn open_store(db_path: &Path) -> Result<ReminderService, CliError> {
    Ok(ReminderService::open_path(db_path.to_path_buf()).await?)
}

pub fn catalog_client(config: &AppConfig) -> Result<HttpCatalogClient, CliError> {
    Ok(HttpCatalogClient::from_config(config)?)
}

pub fn parse_plant_id(id: &str) -> Result<PlantId, CliError> {
    id.parse::<PlantId>().map_err(|_| CliError::EmptyPlantId)
}

/// Parse an `HH:MM` reminder time.
pub fn parse_reminder_time(raw: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| CliError::InvalidReminderTime(raw.to_string()))
}

pub fn describe_frequency(plant: &Plant, locale: Locale) -> String {
    use plantmanager_core::models::RepeatEvery;

    let times = plant.frequency.times;
    match (locale, plant.frequency.repeat_every) {
        (Locale::PtBr, RepeatEvery::Day) => format!("{times}x por dia"),
        (Locale::PtBr, RepeatEvery::Week) => format!("{times}x por semana"),
        (Locale::EnUs, RepeatEvery::Day) => format!("{times}x a day"),
        (Locale::EnUs, RepeatEvery::Week) => format!("{times}x a week"),
    }
}

pub fn plant_to_list_item(plant: &Plant, locale: Locale) -> PlantListItem {
    PlantListItem {
        id: plant.id.to_string(),
        name: plant.name.clone(),
        about: plant.about.clone(),
        water_tips: plant.water_tips.clone(),
        photo: plant.photo.clone(),
        environments: plant.environments.clone(),
        frequency: describe_frequency(plant, locale),
    }
}

pub fn saved_plant_to_item(plant: &SavedPlant, now: DateTime<Utc>, locale: Locale) -> SavedPlantItem {
    SavedPlantItem {
        id: plant.id().to_string(),
        name: plant.name().to_string(),
        date_time_notification: plant.date_time_notification.to_rfc3339(),
        relative_time: format_distance(plant.date_time_notification, now, locale),
    }
}

pub fn format_environment_lines(environments: &[Environment]) -> Vec<String> {
    environments
        .iter()
        .map(|environment| format!("{:<16}  {}", environment.key, environment.title))
        .collect()
}

pub fn format_plant_lines(plants: &[Plant], locale: Locale) -> Vec<String> {
    plants
        .iter()
        .map(|plant| {
            format!(
                "{:<6}  {:<24}  {:<16}  {}",
                plant.id.to_string(),
                plant.name,
                describe_frequency(plant, locale),
                plant.environments.join(", ")
            )
        })
        .collect()
}

pub fn format_saved_plant_lines(
    plants: &[SavedPlant],
    now: DateTime<Utc>,
    locale: Locale,
) -> Vec<String> {
    plants
        .iter()
        .map(|plant| {
            format!(
                "{:<6}  {:<24}  {}  ({})",
                plant.id().to_string(),
                plant.name(),
                format_notification_timestamp(plant.date_time_notification),
                format_distance(plant.date_time_notification, now, locale)
            )
        })
        .collect()
}

pub fn format_notification_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Ask a two-choice question; anything but an explicit yes cancels.
pub fn confirm(
    prompt: &ConfirmPrompt,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    writeln!(output, "{}", prompt.title)?;
    write!(
        output,
        "{} [1] {}  [2] {}: ",
        prompt.message, prompt.cancel_label, prompt.confirm_label
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}

pub fn is_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "2" | "s" | "sim" | "y" | "yes"
    )
}
