mod init;
mod presets;
mod schema;

pub use init::{run_init, Preset};
pub use schema::{Config, FilterDefaults};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/conjoint-sim/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("conjoint-sim")
}

/// Get the default config file path (~/.config/conjoint-sim/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// With an explicit `path` the file must exist. Without one, a missing
/// default-path config falls back to the built-in housing preset so the tool
/// works out of the box.
///
/// # Errors
///
/// Returns an error if an explicitly given file does not exist, cannot be
/// read, or the YAML cannot be parsed.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::housing());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}
