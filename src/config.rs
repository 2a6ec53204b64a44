//! Runtime configuration
//!
//! Carries the pedal name, mpv socket path, seek step sizes, and the
//! grab flag. Compiled-in defaults match a stock mpv setup; an optional
//! config file can override any subset of fields.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Exact name the pedal reports in /proc/bus/input/devices
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Path of mpv's IPC socket (mpv --input-ipc-server=<path>)
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,

    /// Seconds to seek backward on a left-button press
    #[serde(default = "default_seek_secs")]
    pub seek_back_secs: f64,

    /// Seconds to seek forward on a right-button press
    #[serde(default = "default_seek_secs")]
    pub seek_fwd_secs: f64,

    /// Grab the pedal exclusively so its clicks don't reach other apps
    #[serde(default = "default_grab_device")]
    pub grab_device: bool,
}

fn default_device_name() -> String {
    "Your Pedal Device Name".to_string()
}

fn default_socket_path() -> PathBuf {
    PathBuf::from("/tmp/mpvsocket")
}

fn default_seek_secs() -> f64 {
    0.5
}

fn default_grab_device() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            socket_path: default_socket_path(),
            seek_back_secs: default_seek_secs(),
            seek_fwd_secs: default_seek_secs(),
            grab_device: default_grab_device(),
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pedal-mpv");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file (or use defaults)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {path:?}"))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {path:?}"))?;
            info!("Loaded config from {:?}", path);
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }
}
