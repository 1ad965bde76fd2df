use std::path::Path;

use chrono::Utc;
use plantmanager_core::config::AppConfig;
use plantmanager_core::screens::MyPlantsScreen;

use crate::commands::common::{
    format_saved_plant_lines, open_store, saved_plant_to_item, SavedPlantItem,
};
use crate::error::CliError;

pub async fn run_my_plants(
    config: &AppConfig,
    db_path: &Path,
    as_json: bool,
) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let now = Utc::now();
    let mut screen = MyPlantsScreen::new(config.locale);
    screen.mount(&store, now).await?;

    if as_json {
        let json_items = screen
            .plants()
            .iter()
            .map(|plant| saved_plant_to_item(plant, now, config.locale))
            .collect::<Vec<SavedPlantItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if let Some(next) = screen.next_watering() {
        println!("{}", next.message);
        println!();
    }
    for line in format_saved_plant_lines(screen.plants(), now, config.locale) {
        println!("{line}");
    }

    Ok(())
}
