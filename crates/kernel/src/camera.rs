use crate::vehicle::Vehicle;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use skiff_common::{CameraConfig, Range};
use std::fmt;
use std::str::FromStr;

/// Named strategy for deriving the view matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraRig {
    /// Stationary elevated camera; the world shifts under it as the boat moves.
    #[default]
    FreeRoam,
    /// Straight down from above, rotated so the boat always points the same way.
    Overhead,
    /// Behind and above the boat, following heading and position.
    Chase,
    /// Same matrix as [`CameraRig::FreeRoam`], selected through its own key.
    Original,
}

impl CameraRig {
    pub const ALL: [CameraRig; 4] = [
        CameraRig::FreeRoam,
        CameraRig::Overhead,
        CameraRig::Chase,
        CameraRig::Original,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CameraRig::FreeRoam => "freeRoam",
            CameraRig::Overhead => "overhead",
            CameraRig::Chase => "chase",
            CameraRig::Original => "original",
        }
    }
}

impl fmt::Display for CameraRig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a rig name is not one of [`CameraRig::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown camera rig `{0}`")]
pub struct UnknownRig(pub String);

impl FromStr for CameraRig {
    type Err = UnknownRig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "freeroam" => Ok(CameraRig::FreeRoam),
            "overhead" => Ok(CameraRig::Overhead),
            "chase" => Ok(CameraRig::Chase),
            "original" => Ok(CameraRig::Original),
            _ => Err(UnknownRig(s.to_string())),
        }
    }
}

/// Level-triggered controls advanced by the fixed tick while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldControl {
    ZoomIn,
    ZoomOut,
    DollyIn,
    DollyOut,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldControls {
    zoom_in: bool,
    zoom_out: bool,
    dolly_in: bool,
    dolly_out: bool,
}

impl HeldControls {
    fn get(&self, control: HoldControl) -> bool {
        match control {
            HoldControl::ZoomIn => self.zoom_in,
            HoldControl::ZoomOut => self.zoom_out,
            HoldControl::DollyIn => self.dolly_in,
            HoldControl::DollyOut => self.dolly_out,
        }
    }

    fn slot(&mut self, control: HoldControl) -> &mut bool {
        match control {
            HoldControl::ZoomIn => &mut self.zoom_in,
            HoldControl::ZoomOut => &mut self.zoom_out,
            HoldControl::DollyIn => &mut self.dolly_in,
            HoldControl::DollyOut => &mut self.dolly_out,
        }
    }
}

// Rig geometry.
const FREE_ROAM_EYE: Vec3 = Vec3::new(0.0, 2.0, 5.0);
const OVERHEAD_EYE: Vec3 = Vec3::new(0.0, 5.0, 0.0);
const CHASE_EYE: Vec3 = Vec3::new(0.0, 1.0, -2.0);

/// Camera parameters: active rig, zoom, dolly and look target.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    rig: CameraRig,
    fov_degrees: f32,
    dolly: f32,
    /// Free-roam looks at the origin when set, at the boat otherwise.
    centered: bool,
    held: HeldControls,
    fov_step: f32,
    fov_range: Range,
    dolly_step: f32,
    dolly_range: Range,
    near: f32,
    far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl CameraState {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            rig: CameraRig::FreeRoam,
            fov_degrees: config.fov_degrees,
            dolly: 0.0,
            centered: true,
            held: HeldControls::default(),
            fov_step: config.fov_step,
            fov_range: config.fov_range,
            dolly_step: config.dolly_step,
            dolly_range: config.dolly_range,
            near: config.near,
            far: config.far,
        }
    }

    pub fn rig(&self) -> CameraRig {
        self.rig
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn dolly(&self) -> f32 {
        self.dolly
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    pub fn is_held(&self, control: HoldControl) -> bool {
        self.held.get(control)
    }

    pub fn clip_planes(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    /// Switch rigs immediately.
    pub fn select(&mut self, rig: CameraRig) {
        if self.rig != rig {
            tracing::debug!("camera rig {} -> {}", self.rig, rig);
        }
        self.rig = rig;
    }

    /// Flip the free-roam look target between the origin and the boat.
    pub fn toggle_look_target(&mut self) {
        self.centered = !self.centered;
    }

    /// Record a held-key transition for a level-triggered control.
    pub fn set_held(&mut self, control: HoldControl, held: bool) {
        *self.held.slot(control) = held;
    }

    /// Clear every held zoom and dolly control.
    pub fn release_all(&mut self) {
        self.held = HeldControls::default();
    }

    /// One fixed tick of zoom and dolly.
    pub fn tick(&mut self) {
        if self.held.zoom_in {
            self.fov_degrees = self.fov_range.clamp(self.fov_degrees - self.fov_step);
        }
        if self.held.zoom_out {
            self.fov_degrees = self.fov_range.clamp(self.fov_degrees + self.fov_step);
        }
        if self.held.dolly_in {
            self.dolly = self.dolly_range.clamp(self.dolly - self.dolly_step);
        }
        if self.held.dolly_out {
            self.dolly = self.dolly_range.clamp(self.dolly + self.dolly_step);
        }
    }

    /// Perspective projection for the current field of view.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// View matrix of the active rig.
    pub fn view_matrix(&self, vehicle: &Vehicle) -> Mat4 {
        self.rig_view(self.rig, vehicle)
    }

    /// View matrix a given rig would produce from the current parameters.
    pub fn rig_view(&self, rig: CameraRig, vehicle: &Vehicle) -> Mat4 {
        match rig {
            CameraRig::FreeRoam | CameraRig::Original => {
                let eye = FREE_ROAM_EYE + Vec3::Z * self.dolly;
                let target = if self.centered {
                    Vec3::ZERO
                } else {
                    vehicle.position()
                };
                Mat4::look_at_rh(eye, target, Vec3::Y)
                    * Mat4::from_translation(-vehicle.position())
            }
            CameraRig::Overhead => {
                // Looking straight down; +Z stands in for "up" on screen.
                Mat4::look_at_rh(OVERHEAD_EYE, Vec3::ZERO, Vec3::Z) * vehicle.inverse_pose()
            }
            CameraRig::Chase => {
                let up = Vec3::new(0.0, 1.0, -1.0).normalize();
                Mat4::look_at_rh(CHASE_EYE, Vec3::ZERO, up) * vehicle.inverse_pose()
            }
        }
    }

    /// View matrix for a rig given by name. Unknown names log an error and
    /// yield the identity matrix.
    pub fn view_matrix_by_name(&self, name: &str, vehicle: &Vehicle) -> Mat4 {
        match name.parse::<CameraRig>() {
            Ok(rig) => self.rig_view(rig, vehicle),
            Err(e) => {
                tracing::error!("invalid camera type: {e}");
                Mat4::IDENTITY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn defaults() {
        let cam = CameraState::default();
        assert_eq!(cam.rig(), CameraRig::FreeRoam);
        assert_eq!(cam.fov_degrees(), 45.0);
        assert_eq!(cam.dolly(), 0.0);
        assert!(cam.is_centered());
        assert_eq!(cam.clip_planes(), (1.0, 10.0));
    }

    #[test]
    fn rig_names_parse() {
        for rig in CameraRig::ALL {
            assert_eq!(rig.name().parse::<CameraRig>(), Ok(rig));
        }
        assert_eq!("free_roam".parse::<CameraRig>(), Ok(CameraRig::FreeRoam));
        assert!("bogus".parse::<CameraRig>().is_err());
    }

    #[test]
    fn overhead_matches_reference_composition() {
        let cam = CameraState::default();
        let boat = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, 0.5), 90.0);
        let expected = Mat4::look_at_rh(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Z)
            * Mat4::from_rotation_y((-90.0_f32).to_radians())
            * Mat4::from_translation(Vec3::new(-1.0, 0.0, -0.5));
        assert!(approx(cam.rig_view(CameraRig::Overhead, &boat), expected));
    }

    #[test]
    fn overhead_keeps_boat_under_camera() {
        let cam = CameraState::default();
        let boat = Vehicle::default().with_pose(Vec3::new(-2.0, 0.0, 1.0), 33.0);
        let view = cam.rig_view(CameraRig::Overhead, &boat);
        let p = view.transform_point3(boat.position());
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!((p.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn chase_places_boat_ahead_of_camera() {
        let cam = CameraState::default();
        let boat = Vehicle::default().with_pose(Vec3::new(0.5, 0.0, -1.0), 120.0);
        let view = cam.rig_view(CameraRig::Chase, &boat);
        let p = view.transform_point3(boat.position());
        // On the optical axis, in front of the camera.
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!(p.z < 0.0);
        assert!((p.z + 5.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn free_roam_and_original_agree() {
        let mut cam = CameraState::default();
        cam.set_held(HoldControl::DollyOut, true);
        cam.tick();
        let boat = Vehicle::default().with_pose(Vec3::new(0.3, 0.0, 0.2), 10.0);
        assert!(approx(
            cam.rig_view(CameraRig::FreeRoam, &boat),
            cam.rig_view(CameraRig::Original, &boat)
        ));
    }

    #[test]
    fn free_roam_ignores_heading_and_shifts_world() {
        let cam = CameraState::default();
        let a = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, 0.0), 0.0);
        let b = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, 0.0), 45.0);
        let expected = Mat4::look_at_rh(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y)
            * Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0));
        assert!(approx(cam.rig_view(CameraRig::FreeRoam, &a), expected));
        assert!(approx(cam.rig_view(CameraRig::FreeRoam, &b), expected));
    }

    #[test]
    fn free_roam_tracks_boat_when_not_centered() {
        let mut cam = CameraState::default();
        cam.toggle_look_target();
        assert!(!cam.is_centered());
        let boat = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, -1.0), 0.0);
        let expected = Mat4::look_at_rh(Vec3::new(0.0, 2.0, 5.0), boat.position(), Vec3::Y)
            * Mat4::from_translation(-boat.position());
        assert!(approx(cam.view_matrix(&boat), expected));
        cam.toggle_look_target();
        assert!(cam.is_centered());
    }

    #[test]
    fn dolly_moves_free_roam_eye() {
        let mut cam = CameraState::default();
        cam.set_held(HoldControl::DollyIn, true);
        for _ in 0..5 {
            cam.tick();
        }
        assert!((cam.dolly() + 1.0).abs() < 1e-5);
        let boat = Vehicle::default();
        let eye = Vec3::new(0.0, 2.0, 5.0 + cam.dolly());
        let expected = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        assert!(approx(cam.view_matrix(&boat), expected));
    }

    #[test]
    fn unknown_rig_name_yields_identity() {
        let cam = CameraState::default();
        let boat = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, 1.0), 45.0);
        assert_eq!(cam.view_matrix_by_name("bogus", &boat), Mat4::IDENTITY);
        assert!(approx(
            cam.view_matrix_by_name("chase", &boat),
            cam.rig_view(CameraRig::Chase, &boat)
        ));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = CameraState::default();
        cam.set_held(HoldControl::ZoomIn, true);
        for _ in 0..100 {
            cam.tick();
            assert!(cam.fov_degrees() >= 5.0);
        }
        assert_eq!(cam.fov_degrees(), 5.0);

        cam.set_held(HoldControl::ZoomIn, false);
        cam.set_held(HoldControl::ZoomOut, true);
        for _ in 0..200 {
            cam.tick();
            assert!(cam.fov_degrees() <= 120.0);
        }
        assert_eq!(cam.fov_degrees(), 120.0);
    }

    #[test]
    fn dolly_is_clamped() {
        let mut cam = CameraState::default();
        cam.set_held(HoldControl::DollyIn, true);
        for _ in 0..100 {
            cam.tick();
            assert!(cam.dolly() >= -4.0);
        }
        assert_eq!(cam.dolly(), -4.0);

        cam.set_held(HoldControl::DollyIn, false);
        cam.set_held(HoldControl::DollyOut, true);
        for _ in 0..100 {
            cam.tick();
            assert!(cam.dolly() <= 3.0);
        }
        assert_eq!(cam.dolly(), 3.0);
    }

    #[test]
    fn released_controls_stop_ticking() {
        let mut cam = CameraState::default();
        cam.set_held(HoldControl::ZoomOut, true);
        cam.tick();
        cam.set_held(HoldControl::ZoomOut, false);
        cam.tick();
        assert_eq!(cam.fov_degrees(), 46.0);
        assert!(!cam.is_held(HoldControl::ZoomOut));
    }

    #[test]
    fn projection_is_finite() {
        let cam = CameraState::default();
        let p = cam.projection(16.0 / 9.0);
        assert!(p.is_finite());
    }
}
