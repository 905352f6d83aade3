use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "deploy-wizard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Simulated latency before artifacts appear
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,
    /// Spacing between individual saves when the archive falls back
    #[serde(default = "default_download_stagger_ms")]
    pub download_stagger_ms: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Defaults to `session.json` next to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

fn default_generation_delay_ms() -> u64 {
    2000
}

fn default_download_stagger_ms() -> u64 {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("deployment_files")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generation_delay_ms: default_generation_delay_ms(),
            download_stagger_ms: default_download_stagger_ms(),
            output_dir: default_output_dir(),
            session_file: None,
        }
    }
}

impl Settings {
    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn download_stagger(&self) -> Duration {
        Duration::from_millis(self.download_stagger_ms)
    }
}

impl Config {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, creating default config");
            let config = Self::default();
            if let Err(e) = config.save_to(config_path) {
                warn!("Could not write default config: {:#}", e);
            }
            return Ok(config);
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config: {:?}", config.settings);
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Configured session file, or `session.json` in the config directory
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.settings.session_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::get_config_dir()?.join("session.json")),
        }
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }
}
