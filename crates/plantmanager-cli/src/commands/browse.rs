use plantmanager_core::config::AppConfig;
use plantmanager_core::screens::{PlantSelectScreen, ScrollPosition};

use crate::commands::common::{catalog_client, format_plant_lines, plant_to_list_item, PlantListItem};
use crate::error::CliError;

// The terminal has no scroll view; every extra page is requested as if the
// list had been scrolled to its very end.
const VIEWPORT_LENGTH: f64 = 1.0;

pub async fn run_browse(
    config: &AppConfig,
    environment: &str,
    pages: u32,
    as_json: bool,
) -> Result<(), CliError> {
    let catalog = catalog_client(config)?;
    let mut screen = PlantSelectScreen::new(config.page_size);
    screen.mount(&catalog).await?;
    screen.select_environment(environment.trim());

    while screen.page() < pages.max(1) && !screen.loaded_all() {
        let fetched = screen
            .on_end_reached(&catalog, ScrollPosition::at_end(VIEWPORT_LENGTH))
            .await?;
        if !fetched {
            break;
        }
    }

    if !screen
        .environments()
        .iter()
        .any(|known| known.key == screen.selected_environment())
    {
        tracing::warn!(
            environment = screen.selected_environment(),
            "Unknown environment, no plant will match"
        );
    }

    if as_json {
        let json_items = screen
            .filtered_plants()
            .iter()
            .map(|plant| plant_to_list_item(plant, config.locale))
            .collect::<Vec<PlantListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    for line in format_plant_lines(screen.filtered_plants(), config.locale) {
        println!("{line}");
    }
    if !screen.loaded_all() {
        eprintln!(
            "Loaded {} page(s); pass --pages {} to load more",
            screen.page(),
            screen.page() + 1
        );
    }

    Ok(())
}
