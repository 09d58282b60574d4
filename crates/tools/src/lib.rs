//! Developer tooling: scene inspector and summaries.
//!
//! # Invariants
//! - Tools only read scene state.

mod inspector;

pub use inspector::{BoatInfo, CameraInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "skiff-tools v0.1.0"
}
