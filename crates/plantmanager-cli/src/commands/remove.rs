use std::io;
use std::path::Path;

use chrono::Utc;
use plantmanager_core::config::AppConfig;
use plantmanager_core::screens::{MyPlantsScreen, RemovalOutcome};

use crate::commands::common::{confirm, open_store, parse_plant_id};
use crate::error::CliError;

pub async fn run_remove(
    config: &AppConfig,
    db_path: &Path,
    id: &str,
    skip_confirmation: bool,
) -> Result<(), CliError> {
    let plant_id = parse_plant_id(id)?;
    let store = open_store(db_path).await?;
    let now = Utc::now();
    let mut screen = MyPlantsScreen::new(config.locale);
    screen.mount(&store, now).await?;

    let prompt = screen
        .removal_prompt(&plant_id)
        .ok_or_else(|| CliError::PlantNotSaved(plant_id.to_string()))?;

    if !skip_confirmation {
        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();
        if !confirm(&prompt, &mut input, &mut output)? {
            return Ok(());
        }
    }

    match screen.confirm_removal(&store, &plant_id, now).await {
        RemovalOutcome::Removed(removed) => {
            println!("{removed}");
            Ok(())
        }
        RemovalOutcome::Failed { alert } => Err(CliError::RemovalFailed(alert)),
    }
}
