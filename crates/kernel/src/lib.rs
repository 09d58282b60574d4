//! Scene kernel: authoritative boat scene state and its update rules.
//!
//! # Invariants
//! - All state mutations flow through [`SceneState::apply`] and
//!   [`SceneState::tick`].
//! - Camera rigs read the boat pose; they never write it.
//! - The fixed update tick is separate from the render frame rate.

pub mod actuators;
pub mod camera;
pub mod scene;
pub mod ticker;
pub mod vehicle;

pub use actuators::Actuators;
pub use camera::{CameraRig, CameraState, HoldControl, UnknownRig};
pub use scene::{RedrawRequest, SceneCommand, SceneState};
pub use ticker::FixedTicker;
pub use vehicle::Vehicle;
