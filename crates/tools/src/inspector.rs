use serde::Serialize;
use skiff_kernel::{CameraRig, HoldControl, SceneState};

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene for the HUD, the CLI and logs.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &SceneState) -> SceneSummary {
        let v = scene.vehicle();
        let a = scene.actuators();
        let c = scene.camera();
        let p = v.position();
        SceneSummary {
            ticks: scene.ticks(),
            frames: scene.frames(),
            boat: BoatInfo {
                position: [p.x, p.y, p.z],
                heading: v.heading(),
                fan_angle: a.fan_angle(),
                fan_speed: a.fan_speed(),
                rudder_angle: a.rudder_angle(),
                searchlight_angle: a.searchlight_angle(),
            },
            camera: CameraInfo {
                rig: c.rig(),
                fov_degrees: c.fov_degrees(),
                dolly: c.dolly(),
                centered: c.is_centered(),
                held: [
                    HoldControl::ZoomIn,
                    HoldControl::ZoomOut,
                    HoldControl::DollyIn,
                    HoldControl::DollyOut,
                ]
                .into_iter()
                .filter(|h| c.is_held(*h))
                .collect(),
            },
        }
    }
}

/// Snapshot of the scene for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub ticks: u64,
    pub frames: u64,
    pub boat: BoatInfo,
    pub camera: CameraInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoatInfo {
    pub position: [f32; 3],
    pub heading: f32,
    pub fan_angle: f32,
    pub fan_speed: f32,
    pub rudder_angle: f32,
    pub searchlight_angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraInfo {
    pub rig: CameraRig,
    pub fov_degrees: f32,
    pub dolly: f32,
    pub centered: bool,
    pub held: Vec<HoldControl>,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.boat;
        let c = &self.camera;
        writeln!(f, "Scene: ticks={} frames={}", self.ticks, self.frames)?;
        writeln!(
            f,
            "Boat: pos=({:.2}, {:.2}, {:.2}) heading={:.1}",
            b.position[0], b.position[1], b.position[2], b.heading
        )?;
        writeln!(
            f,
            "Actuators: fan={:.0} (speed {:.0}) rudder={:.0} searchlight={:.0}",
            b.fan_angle, b.fan_speed, b.rudder_angle, b.searchlight_angle
        )?;
        write!(
            f,
            "Camera: rig={} fov={:.0} dolly={:.1} target={}",
            c.rig,
            c.fov_degrees,
            c.dolly,
            if c.centered { "origin" } else { "boat" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_common::Direction;
    use skiff_kernel::SceneCommand;

    #[test]
    fn summary_of_default_scene() {
        let s = SceneInspector::summary(&SceneState::default());
        assert_eq!(s.ticks, 0);
        assert_eq!(s.camera.rig, CameraRig::FreeRoam);
        assert!(s.camera.held.is_empty());
        let text = s.to_string();
        assert!(text.contains("rig=freeRoam"));
        assert!(text.contains("target=origin"));
    }

    #[test]
    fn summary_tracks_commands() {
        let mut scene = SceneState::default();
        scene.apply(SceneCommand::Move(Direction::Left));
        scene.apply(SceneCommand::Hold {
            control: HoldControl::ZoomIn,
            held: true,
        });
        scene.tick();
        let s = SceneInspector::summary(&scene);
        assert_eq!(s.boat.heading, 5.0);
        assert_eq!(s.boat.rudder_angle, 20.0);
        assert_eq!(s.camera.fov_degrees, 44.0);
        assert_eq!(s.camera.held, vec![HoldControl::ZoomIn]);
    }

    #[test]
    fn summary_serializes_rig_name() {
        let mut scene = SceneState::default();
        scene.apply(SceneCommand::SelectRig(CameraRig::Overhead));
        let json = serde_json::to_value(SceneInspector::summary(&scene)).unwrap();
        assert_eq!(json["camera"]["rig"], "overhead");
        assert_eq!(json["boat"]["position"][0], 0.0);
    }
}
