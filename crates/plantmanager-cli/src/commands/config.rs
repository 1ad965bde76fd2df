use std::path::Path;

use plantmanager_core::config::AppConfig;
use plantmanager_core::relative_time::Locale;

use crate::cli::ConfigCommands;
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    effective: AppConfig,
    config_path: &Path,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_base_url,
            page_size,
            locale,
            timeout,
        } => run_config_init(config_path, api_base_url, page_size, locale.as_deref(), timeout),
        ConfigCommands::Show => {
            println!("# {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&effective)?);
            Ok(())
        }
    }
}

/// Update the file at `config_path` with the given values. Environment
/// overrides are not written back.
pub fn run_config_init(
    config_path: &Path,
    api_base_url: Option<String>,
    page_size: Option<u32>,
    locale: Option<&str>,
    timeout: Option<u64>,
) -> Result<(), CliError> {
    let config = apply_config_updates(
        AppConfig::load_from_path(config_path)?,
        api_base_url,
        page_size,
        locale,
        timeout,
    )?;
    config.save_to_path(config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

pub fn apply_config_updates(
    mut config: AppConfig,
    api_base_url: Option<String>,
    page_size: Option<u32>,
    locale: Option<&str>,
    timeout: Option<u64>,
) -> Result<AppConfig, CliError> {
    if let Some(url) = api_base_url {
        config.api_base_url = url;
    }
    if let Some(page_size) = page_size {
        config.page_size = page_size;
    }
    if let Some(locale) = locale {
        config.locale = locale
            .parse::<Locale>()
            .map_err(|error| CliError::Config(error.to_string()))?;
    }
    if let Some(secs) = timeout {
        config.request_timeout_secs = (secs > 0).then_some(secs);
    }
    Ok(config.validate()?)
}
