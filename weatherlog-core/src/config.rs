use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Temperature (°C) above which a high-temperature notification is raised.
pub const DEFAULT_HIGH_TEMP_THRESHOLD_C: f64 = 30.0;

/// Top-level configuration, stored on disk as TOML.
///
/// File paths are resolved relative to the working directory unless absolute,
/// so repeated runs from the same directory share one temperature log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// WeatherAPI.com API key.
    pub api_key: String,

    /// Location query, e.g. a city name.
    pub location: String,

    /// Strict lower bound for the notification check (`temp > threshold`).
    pub high_temp_threshold_c: f64,

    /// Append-only temperature log.
    pub log_path: PathBuf,

    /// Append-only log of high-temperature events.
    pub notifications_log_path: PathBuf,

    /// Overwritten each run with the unmodified response body.
    pub raw_snapshot_path: PathBuf,

    /// Overwritten each run with the formatted summary.
    pub processed_snapshot_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            location: "Karachi".to_string(),
            high_temp_threshold_c: DEFAULT_HIGH_TEMP_THRESHOLD_C,
            log_path: PathBuf::from("temperature_log.txt"),
            notifications_log_path: PathBuf::from("notifications.log"),
            raw_snapshot_path: PathBuf::from("raw_weather_data.json"),
            processed_snapshot_path: PathBuf::from("processed_weather_data.txt"),
        }
    }
}

impl MonitorConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: MonitorConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherlog", "weatherlog")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
