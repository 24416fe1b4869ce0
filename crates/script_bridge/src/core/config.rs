//! # Bridge Configuration
//!
//! Settings for the scripting bridge and its reference host, grouped by
//! subsystem. Every section falls back to its defaults when omitted from the
//! file, so an empty TOML document is a valid configuration.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [fly_camera]
//! speed = 25.0
//! look_key = "X"
//!
//! [host]
//! frames = 120
//! fixed_delta = 0.016
//! ```

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;
use crate::input::KeyCode;

/// Top-level configuration for the scripting bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Logging setup
    pub logging: LoggingConfig,
    /// Reference fly-camera script parameters
    pub fly_camera: FlyCameraConfig,
    /// Script host behavior
    pub host: HostConfig,
}

impl Config for BridgeConfig {}

impl BridgeConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.level_filter()?;
        self.fly_camera.validate()?;
        self.host.validate()
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback level when `RUST_LOG` is unset (`off`, `error` .. `trace`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.level)))
    }
}

/// Parameters of the reference fly-camera script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyCameraConfig {
    /// Name of the entity carrying the camera component
    pub camera_entity: String,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Multiplier applied to mouse deltas before they reach yaw/pitch
    pub sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees
    pub pitch_limit: f32,
    /// Initial camera position
    pub position: [f32; 3],
    /// Initial front vector
    pub front: [f32; 3],
    /// Camera up vector
    pub up: [f32; 3],
    /// When set, look and movement only apply while this key is held
    pub look_key: Option<KeyCode>,
}

impl Default for FlyCameraConfig {
    fn default() -> Self {
        Self {
            camera_entity: "Camera".to_string(),
            speed: 10.0,
            sensitivity: 1.0,
            pitch_limit: 89.0,
            position: [-6.0, 2.0, -1.7],
            front: [6.0, 0.47, 1.59],
            up: [0.0, -1.0, 0.0],
            look_key: None,
        }
    }
}

impl FlyCameraConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::Invalid(format!("fly_camera.speed must be >= 0, got {}", self.speed)));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "fly_camera.pitch_limit must be in (0, 90), got {}",
                self.pitch_limit
            )));
        }
        if Vec3::from(self.up).magnitude() == 0.0 {
            return Err(ConfigError::Invalid("fly_camera.up must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Script host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Frames to run in headless mode
    pub frames: u32,
    /// Fixed frame step in seconds; the wall clock is used when unset
    pub fixed_delta: Option<f32>,
    /// Consecutive failed frames after which a script is disabled (0 = never)
    pub max_consecutive_failures: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frames: 60,
            fixed_delta: Some(1.0 / 60.0),
            max_consecutive_failures: 0,
        }
    }
}

impl HostConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.fixed_delta {
            Some(delta) if !(delta.is_finite() && delta > 0.0) => Err(ConfigError::Invalid(format!(
                "host.fixed_delta must be > 0, got {delta}"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use std::path::Path;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = BridgeConfig::from_str_with_format("", ConfigFormat::Toml).expect("empty toml");
        assert_eq!(config, BridgeConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_fields() {
        let text = r#"
            [logging]
            level = "debug"

            [fly_camera]
            speed = 25.0
            look_key = "X"

            [host]
            frames = 5
        "#;
        let config = BridgeConfig::from_str_with_format(text, ConfigFormat::Toml).expect("valid toml");
        assert_eq!(config.logging.level_filter().expect("level"), LevelFilter::Debug);
        assert_eq!(config.fly_camera.speed, 25.0);
        assert_eq!(config.fly_camera.look_key, Some(KeyCode::X));
        assert_eq!(config.fly_camera.camera_entity, "Camera");
        assert_eq!(config.host.frames, 5);
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut config = BridgeConfig::default();
        config.host.fixed_delta = None;
        config.fly_camera.look_key = Some(KeyCode::LeftShift);
        let text = config.to_string_with_format(ConfigFormat::Ron).expect("serialize");
        let parsed = BridgeConfig::from_str_with_format(&text, ConfigFormat::Ron).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_rejects_out_of_range_values() {
        let mut config = BridgeConfig::default();
        config.fly_camera.pitch_limit = 95.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = BridgeConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = BridgeConfig::default();
        config.host.fixed_delta = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            ConfigFormat::from_path(Path::new("bridge.yaml")),
            Err(ConfigError::UnsupportedFormat(path)) if path == "bridge.yaml"
        ));
        assert!(matches!(ConfigFormat::from_path(Path::new("bridge")), Err(ConfigError::UnsupportedFormat(_))));
        assert_eq!(ConfigFormat::from_path(Path::new("bridge.ron")).ok(), Some(ConfigFormat::Ron));
    }

    #[test]
    fn test_load_checks_extension_before_reading() {
        let result = BridgeConfig::load_from_file("does/not/exist/bridge.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let result = BridgeConfig::load_from_file("does/not/exist/bridge.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
