use crate::mesh::MeshId;
use crate::renderer::Renderer;
use glam::{Mat4, Vec3};
use skiff_kernel::SceneState;

/// One mesh with its composed model-view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub model_view: Mat4,
}

/// Everything needed to draw one frame, computed without touching any
/// graphics API.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub view: Mat4,
    pub projection: Mat4,
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    /// Compose per-part transforms from the current scene state.
    ///
    /// Water and posts are placed by the view alone. The hull is translated
    /// then yawed to the boat pose; fan, rudder and searchlight add their own
    /// rotation on top of the hull transform.
    pub fn compute(scene: &SceneState, aspect: f32) -> Self {
        let view = scene.view_matrix();
        let projection = scene.projection(aspect);
        let act = scene.actuators();

        let hull = view * scene.vehicle().model_matrix();
        let fan = hull * Mat4::from_rotation_z(act.fan_angle().to_radians());
        let rudder = hull * Mat4::from_rotation_y(act.rudder_angle().to_radians());
        let searchlight = hull * Mat4::from_rotation_y(act.searchlight_angle().to_radians());

        let draws = vec![
            DrawCall {
                mesh: MeshId::Water,
                model_view: view,
            },
            DrawCall {
                mesh: MeshId::Fan,
                model_view: fan,
            },
            DrawCall {
                mesh: MeshId::Rudder,
                model_view: rudder,
            },
            DrawCall {
                mesh: MeshId::Hull,
                model_view: hull,
            },
            DrawCall {
                mesh: MeshId::Searchlight,
                model_view: searchlight,
            },
            DrawCall {
                mesh: MeshId::Posts,
                model_view: view,
            },
        ];
        tracing::trace!(
            "frame plan: rig={} draws={}",
            scene.camera().rig(),
            draws.len()
        );

        Self {
            view,
            projection,
            draws,
        }
    }

    /// Issue every draw in order.
    pub fn submit<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for call in &self.draws {
            renderer.draw(
                call.mesh,
                call.model_view,
                self.projection,
                call.mesh.triangle_count(),
            );
        }
    }

    pub fn get(&self, mesh: MeshId) -> Option<&DrawCall> {
        self.draws.iter().find(|d| d.mesh == mesh)
    }

    /// Where a mesh's local origin lands in camera space.
    pub fn eye_space_origin(&self, mesh: MeshId) -> Option<Vec3> {
        self.get(mesh).map(|d| d.model_view.transform_point3(Vec3::ZERO))
    }
}
