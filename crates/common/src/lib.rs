//! Shared types and scene configuration for the skiff workspace.

pub mod config;
pub mod types;

pub use config::{
    ActuatorConfig, CameraConfig, ConfigError, FanSpinClock, SceneConfig, VehicleConfig,
    WindowConfig,
};
pub use types::{Direction, ParseDirectionError, Range, Side, WaterBounds};
