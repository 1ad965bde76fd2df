use plantmanager_core::catalog::PlantCatalog;
use plantmanager_core::config::AppConfig;
use plantmanager_core::Environment;

use crate::commands::common::{catalog_client, format_environment_lines};
use crate::error::CliError;

pub async fn run_environments(config: &AppConfig, as_json: bool) -> Result<(), CliError> {
    let catalog = catalog_client(config)?;
    let environments = Environment::with_all_sentinel(catalog.fetch_environments().await?);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&environments)?);
    } else {
        for line in format_environment_lines(&environments) {
            println!("{line}");
        }
    }

    Ok(())
}
