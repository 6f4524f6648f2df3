//! Configuration management.

use anyhow::{Context, Result};
use charmatrix_hw::{WriterOptions, DEFAULT_PID, DEFAULT_VID};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Delay between text packets in milliseconds (floor 10)
    #[serde(default = "default_write_delay")]
    pub write_delay_ms: u64,

    /// Device configuration
    #[serde(default)]
    pub device: DeviceConfig,

    /// Init sequence configuration
    #[serde(default)]
    pub init: InitConfig,
}

/// HID device configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// USB vendor ID
    #[serde(default = "default_vid")]
    pub vid: u16,

    /// USB product ID
    #[serde(default = "default_pid")]
    pub pid: u16,

    /// HID device path; overrides VID/PID when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vid: default_vid(),
            pid: default_pid(),
            path: None,
        }
    }
}

/// Init sequence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    /// Send the init file after opening the device
    #[serde(default = "default_init_enable")]
    pub enable: bool,

    /// Path to the init file
    #[serde(default = "default_init_path")]
    pub path: PathBuf,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            enable: default_init_enable(),
            path: default_init_path(),
        }
    }
}

// Default value functions
fn default_write_delay() -> u64 {
    10
}

fn default_vid() -> u16 {
    DEFAULT_VID
}

fn default_pid() -> u16 {
    DEFAULT_PID
}

fn default_init_enable() -> bool {
    true
}

fn default_init_path() -> PathBuf {
    PathBuf::from("init.txt")
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }

    /// Writer options for opening the device.
    ///
    /// `with_init` is ANDed with `init.enable`.
    pub fn writer_options(&self, with_init: bool) -> WriterOptions {
        WriterOptions {
            vid: self.device.vid,
            pid: self.device.pid,
            path: self.device.path.clone(),
            write_delay: Duration::from_millis(self.write_delay_ms),
            init_file: (with_init && self.init.enable).then(|| self.init.path.clone()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            write_delay_ms: default_write_delay(),
            device: DeviceConfig::default(),
            init: InitConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.device.vid, 0x4098);
        assert_eq!(config.device.pid, 0xBB35);
        assert_eq!(config.write_delay_ms, 10);
        assert!(config.init.enable);
        assert_eq!(config.init.path, PathBuf::from("init.txt"));
    }

    #[test]
    fn test_hex_ids() {
        let config: Config = toml::from_str(
            "write_delay_ms = 20\n[device]\nvid = 0x1234\npid = 0xABCD\n[init]\nenable = false\n",
        )
        .unwrap();
        assert_eq!(config.device.vid, 0x1234);
        assert_eq!(config.device.pid, 0xABCD);
        assert_eq!(config.write_delay_ms, 20);
        assert!(config.writer_options(true).init_file.is_none());
    }

    #[test]
    fn test_writer_options() {
        let config = Config::default();
        let options = config.writer_options(true);
        assert_eq!(options.write_delay, Duration::from_millis(10));
        assert_eq!(options.init_file, Some(PathBuf::from("init.txt")));
        assert!(config.writer_options(false).init_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.device.path = Some("/dev/hidraw3".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.device.path.as_deref(), Some("/dev/hidraw3"));
        assert_eq!(loaded.device.vid, config.device.vid);
    }
}
