//! wgpu render backend for the boat scene.
//!
//! Draws the fixed scene meshes with per-draw model-view and projection
//! matrices taken from a [`skiff_render::FramePlan`].
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Render frame rate is independent of the fixed update tick.

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, RenderError};
pub use gpu::WgpuRenderer;
