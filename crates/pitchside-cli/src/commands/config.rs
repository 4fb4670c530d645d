use std::path::{Path, PathBuf};

use pitchside_core::config::normalize_origin;
use pitchside_core::StoreKind;

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig, Overrides, Settings};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, overrides: Overrides) -> Result<(), CliError> {
    let path = default_config_path();
    match command {
        ConfigCommands::Init {
            store,
            origin,
            poll_interval,
            db_path,
        } => {
            let config = CliConfig::load_from_path(&path).map_err(CliError::Config)?;
            let config = apply_config_init(config, store, origin.as_deref(), poll_interval, db_path)?;
            config.save_to_path(&path).map_err(CliError::Config)?;
            println!("Saved configuration to {}", path.display());
            Ok(())
        }
        ConfigCommands::Show { json } => {
            let config = CliConfig::load_from_path(&path).map_err(CliError::Config)?;
            let settings = Settings::resolve(overrides, &config).map_err(CliError::Config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                for line in format_settings_lines(&settings, &path) {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

/// Merge `config init` flags into an existing config. Unset flags keep the
/// stored value.
pub fn apply_config_init(
    mut config: CliConfig,
    store: Option<StoreKind>,
    origin: Option<&str>,
    poll_interval: Option<u64>,
    db_path: Option<PathBuf>,
) -> Result<CliConfig, CliError> {
    if let Some(store) = store {
        config.store = Some(store);
    }
    if let Some(origin) = origin {
        config.public_origin = Some(normalize_origin(origin).map_err(CliError::Config)?);
    }
    if let Some(seconds) = poll_interval {
        if seconds == 0 {
            return Err(CliError::Config(
                "poll interval must be at least one second".to_string(),
            ));
        }
        config.poll_interval_secs = Some(seconds);
    }
    if let Some(path) = db_path {
        config.db_path = Some(path);
    }
    Ok(config)
}

pub fn format_settings_lines(settings: &Settings, config_path: &Path) -> Vec<String> {
    vec![
        format!("config:        {}", config_path.display()),
        format!("store:         {}", settings.store),
        format!("db path:       {}", settings.db_path.display()),
        format!("public origin: {}", settings.public_origin),
        format!("poll interval: {}s", settings.poll_interval.as_secs()),
    ]
}
