use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};

/// Built-in catalog presets shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Residential development finishes and amenities (two options).
    Housing,
    /// Pharmaceutical brand/dosage/price/pack catalog (three options).
    Pharma,
}

impl Preset {
    pub fn config(self) -> Config {
        match self {
            Preset::Housing => Config::housing(),
            Preset::Pharma => Config::pharma(),
        }
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    print!("{} [{}]: ", message, hint);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Write the chosen preset config to disk.
///
/// If `path` is None, uses the default config path. An existing file is only
/// replaced after interactive confirmation. The write is atomic so an
/// interrupted run never leaves a truncated config behind.
pub fn run_init(preset: Preset, path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = preset.config();
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open {} for writing", config_path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    println!("Config written to {}", config_path.display());
    println!("Edit the attribute weights, costs, and options there, then run `conjoint-sim`.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_configs_differ() {
        assert_ne!(Preset::Housing.config(), Preset::Pharma.config());
    }

    #[test]
    fn test_preset_yaml_parses_back() {
        for preset in [Preset::Housing, Preset::Pharma] {
            let yaml = serde_saphyr::to_string(&preset.config()).unwrap();
            let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
            assert_eq!(parsed, preset.config());
        }
    }
}
