//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default simulation settings for the driver.
    pub simulation: SimulationDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default parameters used when driving a world along a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    /// Frames per second of the fixed-step driver.
    pub fps: u32,

    /// Subject speed (world units per second) that maps to a normalized
    /// velocity of 1.0.
    pub max_speed: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "smoothcam_core=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            fps: 60,
            max_speed: 122.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("smoothcam").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_tuning() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.fps, 60);
        assert_eq!(config.simulation.max_speed, 122.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "simulation": { "fps": 30 } }"#).unwrap();
        assert_eq!(config.simulation.fps, 30);
        assert_eq!(config.simulation.max_speed, 122.0);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_unknown_simulation_keys_are_ignored() {
        // Subject tuning lives in the scene file, not the app config.
        let config: AppConfig =
            serde_json::from_str(r#"{ "simulation": { "velocity_radius": 99.0 } }"#).unwrap();
        assert_eq!(config.simulation.fps, 60);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("velocity_radius"));
    }
}
