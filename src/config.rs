use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lower bound on the memory polling cadence.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "droidtui", "Droid-TUI")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads persisted configuration, falling back to defaults when the
    /// file is missing or unreadable. Only the polling interval persists.
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(Self::default_path);

        let mut config = resolved
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|contents| toml::from_str::<Config>(&contents).ok())
            .unwrap_or_default();

        if config.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            config.poll_interval_ms = MIN_POLL_INTERVAL_MS;
        }

        config
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let resolved = path
            .map(PathBuf::from)
            .or_else(Self::default_path)
            .ok_or_else(|| AppError::Config("No configuration directory available".to_string()))?;

        if let Some(parent) = resolved.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&resolved, contents)?;

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let config = Config::default();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            poll_interval_ms: 2500,
        };
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: Config = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.poll_interval_ms, 2500);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let decoded: Config = toml::from_str("").unwrap();
        assert_eq!(decoded.poll_interval_ms, 1000);
    }
}
