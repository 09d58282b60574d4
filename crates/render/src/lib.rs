//! Rendering adapter: renderer-agnostic scene drawing.
//!
//! # Invariants
//! - Renderers never mutate scene state.
//! - Transforms are computed in [`FramePlan::compute`], separately from draw
//!   submission, so they can be tested without a graphics context.

pub mod frame;
pub mod mesh;
mod renderer;

pub use frame::{DrawCall, FramePlan};
pub use mesh::{MeshId, Vertex};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "skiff-render v0.1.0"
}
