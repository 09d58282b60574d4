use crate::frame::FramePlan;
use crate::mesh::MeshId;
use glam::{Mat4, Vec3};
use skiff_kernel::SceneState;
use std::fmt::Write;

/// Draw-call sink. All backends implement this trait.
///
/// A renderer draws what it is given; it never reads or mutates the scene.
pub trait Renderer {
    /// Draw `triangle_count` triangles of `mesh` with the given transforms.
    fn draw(&mut self, mesh: MeshId, model_view: Mat4, projection: Mat4, triangle_count: u32);
}

/// Text renderer for headless runs, logs and tests.
///
/// Records one line per draw with the camera-space position of the mesh
/// origin.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    out: String,
    draws: usize,
    triangles: u32,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole frame of `scene` to text.
    pub fn render(scene: &SceneState, aspect: f32) -> String {
        let mut r = Self::new();
        let cam = scene.camera();
        let v = scene.vehicle();
        let a = scene.actuators();
        let _ = writeln!(
            r.out,
            "=== Frame {} (ticks={}) rig={} fov={:.0} dolly={:.1} centered={} ===",
            scene.frames(),
            scene.ticks(),
            cam.rig(),
            cam.fov_degrees(),
            cam.dolly(),
            cam.is_centered()
        );
        let p = v.position();
        let _ = writeln!(
            r.out,
            "Boat: pos=({:.2}, {:.2}, {:.2}) heading={:.1} fan={:.0}@{:.0} rudder={:.0} light={:.0}",
            p.x,
            p.y,
            p.z,
            v.heading(),
            a.fan_angle(),
            a.fan_speed(),
            a.rudder_angle(),
            a.searchlight_angle()
        );
        FramePlan::compute(scene, aspect).submit(&mut r);
        r.finish()
    }

    pub fn draw_count(&self) -> usize {
        self.draws
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangles
    }

    pub fn finish(mut self) -> String {
        let _ = writeln!(
            self.out,
            "Draws: {} Triangles: {}",
            self.draws, self.triangles
        );
        self.out
    }
}

impl Renderer for DebugTextRenderer {
    fn draw(&mut self, mesh: MeshId, model_view: Mat4, projection: Mat4, triangle_count: u32) {
        let eye = model_view.transform_point3(Vec3::ZERO);
        let clip = projection * model_view * glam::Vec4::W;
        let visible = clip.w > 0.0;
        let _ = writeln!(
            self.out,
            "  {:<12} tris={:<3} eye=({:.2}, {:.2}, {:.2}){}",
            mesh.name(),
            triangle_count,
            eye.x,
            eye.y,
            eye.z,
            if visible { "" } else { " behind" }
        );
        self.draws += 1;
        self.triangles += triangle_count;
    }
}
