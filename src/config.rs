use crate::error::*;

use serde::Deserialize;
use std::env::var;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// Defaults read from `config.toml`. Command line options take precedence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Decode width in bits. `0` uses the declared width of each signal.
    pub bits: u32,
    pub output_dir: PathBuf,
    pub plot: bool,
    pub csv: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bits: 32,
            output_dir: PathBuf::from("."),
            plot: true,
            csv: true,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    config_dir: Option<PathBuf>,
    settings: Settings,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = Self::find_config_dir();
        let settings = match config_dir.as_ref().map(|d| d.join(CONFIG_FILE)) {
            Some(file) if file.exists() => Self::read_settings(&file)?,
            _ => Settings::default(),
        };

        Ok(Self {
            config_dir,
            settings,
        })
    }

    /// Load settings from an explicit file instead of the config directory.
    pub fn load_file(file: impl AsRef<Path>) -> Result<Self> {
        let settings = Self::read_settings(file.as_ref())?;

        Ok(Self {
            config_dir: file.as_ref().parent().map(PathBuf::from),
            settings,
        })
    }

    pub fn test_config() -> Self {
        Self {
            config_dir: Some(PathBuf::from("./")),
            settings: Settings::default(),
        }
    }

    fn read_settings(file: &Path) -> Result<Settings> {
        debug!("reading settings from {}", file.display());
        let text = read_to_string(file)?;
        Ok(toml::from_str(&text)?)
    }

    fn find_config_dir() -> Option<PathBuf> {
        let mut path = PathBuf::new();

        if let Ok(config_home) = var("WAVETRACE_CONFIG_HOME") {
            path.push(&config_home);
        } else if let Ok(xdg_config_home) = var("XDG_CONFIG_HOME") {
            if !xdg_config_home.is_empty() {
                path.push(xdg_config_home);
                path.push("wavetrace");
            }
        } else if let Ok(home) = var("HOME") {
            if !home.is_empty() {
                path.push(home);
                path.push(".config");
                path.push("wavetrace");
            }
        }

        if !path.as_os_str().is_empty() && path.exists() {
            Some(path)
        } else {
            None
        }
    }

    pub fn get_config_dir(&self) -> Option<&PathBuf> {
        self.config_dir.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
