use crate::types::{Range, WaterBounds};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Errors raised while loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which clock advances the fan angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanSpinClock {
    /// Once per drawn frame; spin rate follows the display refresh rate.
    #[default]
    PerFrame,
    /// Once per fixed update tick.
    PerTick,
}

/// Boat motion tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Distance covered per forward/backward command.
    pub speed: f32,
    /// Heading change per turn command, degrees.
    pub turn_step: f32,
    pub bounds: WaterBounds,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            speed: 0.05,
            turn_step: 5.0,
            bounds: WaterBounds::default(),
        }
    }
}

/// Fan, rudder and searchlight tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Fan rate magnitude while a move key is held, degrees per step.
    pub fan_speed: f32,
    /// Rudder deflection while a turn key is held, degrees.
    pub rudder_deflection: f32,
    pub searchlight_step: f32,
    pub searchlight_range: Range,
    pub fan_spin: FanSpinClock,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            fan_speed: 40.0,
            rudder_deflection: 20.0,
            searchlight_step: 7.0,
            searchlight_range: Range::new(-30.0, 30.0),
            fan_spin: FanSpinClock::PerFrame,
        }
    }
}

/// Camera zoom, dolly and projection tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub fov_step: f32,
    pub fov_range: Range,
    pub dolly_step: f32,
    pub dolly_range: Range,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            fov_step: 1.0,
            fov_range: Range::new(5.0, 120.0),
            dolly_step: 0.2,
            dolly_range: Range::new(-4.0, 3.0),
            near: 1.0,
            far: 10.0,
        }
    }
}

/// Desktop window settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Every tunable of the boat scene. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub vehicle: VehicleConfig,
    pub actuators: ActuatorConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
    /// Fixed update period in milliseconds.
    pub tick_period_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleConfig::default(),
            actuators: ActuatorConfig::default(),
            camera: CameraConfig::default(),
            window: WindowConfig::default(),
            tick_period_ms: 16,
        }
    }
}

impl SceneConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let check_range = |name: &str, r: &Range| {
            if !(r.min.is_finite() && r.max.is_finite()) {
                Err(ConfigError::Invalid(format!(
                    "{name} range bounds must be finite ({}, {})",
                    r.min, r.max
                )))
            } else if r.min > r.max {
                Err(ConfigError::Invalid(format!(
                    "{name} range is inverted ({} > {})",
                    r.min, r.max
                )))
            } else {
                Ok(())
            }
        };
        check_range("searchlight", &self.actuators.searchlight_range)?;
        check_range("fov", &self.camera.fov_range)?;
        check_range("dolly", &self.camera.dolly_range)?;

        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be positive".into()));
        }
        if self.vehicle.bounds.half_x <= 0.0 || self.vehicle.bounds.half_z <= 0.0 {
            return Err(ConfigError::Invalid(
                "water bounds must have positive extents".into(),
            ));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far (near={}, far={})",
                self.camera.near, self.camera.far
            )));
        }
        if !self.camera.fov_range.contains(self.camera.fov_degrees) {
            return Err(ConfigError::Invalid(format!(
                "initial fov {} lies outside its range",
                self.camera.fov_degrees
            )));
        }
        // Dolly and searchlight both start at zero.
        if !self.camera.dolly_range.contains(0.0) {
            return Err(ConfigError::Invalid(
                "dolly range must include the starting offset 0".into(),
            ));
        }
        if !self.actuators.searchlight_range.contains(0.0) {
            return Err(ConfigError::Invalid(
                "searchlight range must include the starting angle 0".into(),
            ));
        }
        Ok(())
    }
}
