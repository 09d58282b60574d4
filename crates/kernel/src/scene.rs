use crate::actuators::Actuators;
use crate::camera::{CameraRig, CameraState, HoldControl};
use crate::vehicle::Vehicle;
use glam::Mat4;
use skiff_common::{Direction, FanSpinClock, SceneConfig, Side};

/// A discrete input to the scene, already stripped of any key identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Move or turn the boat (key-down).
    Move(Direction),
    /// Forward/backward key released.
    StopFan,
    /// Left/right key released.
    CenterRudder,
    /// Swing the searchlight one step.
    Searchlight(Side),
    /// Switch to a camera rig.
    SelectRig(CameraRig),
    /// Press or release a level-triggered camera control.
    Hold { control: HoldControl, held: bool },
    /// Flip the free-roam look target.
    ToggleLookTarget,
}

/// Single pending-frame flag. Any number of requests between two drains
/// collapse into one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawRequest {
    pending: bool,
}

impl RedrawRequest {
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear the flag, returning whether a frame was requested.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// The whole mutable scene: boat pose, actuators and camera.
///
/// # Invariants
/// - Only [`SceneState::apply`] touches discrete pose, actuator and held-key
///   state.
/// - Only [`SceneState::tick`] advances zoom and dolly.
/// - Computing matrices never mutates anything.
#[derive(Debug, Clone)]
pub struct SceneState {
    vehicle: Vehicle,
    actuators: Actuators,
    camera: CameraState,
    fan_spin: FanSpinClock,
    redraw: RedrawRequest,
    ticks: u64,
    frames: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            vehicle: Vehicle::new(&config.vehicle),
            actuators: Actuators::new(&config.actuators),
            camera: CameraState::new(&config.camera),
            fan_spin: config.actuators.fan_spin,
            redraw: RedrawRequest::default(),
            ticks: 0,
            frames: 0,
        }
    }

    /// Replace the boat, e.g. to start from a specific pose.
    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicle = vehicle;
        self
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn actuators(&self) -> &Actuators {
        &self.actuators
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn fan_spin(&self) -> FanSpinClock {
        self.fan_spin
    }

    /// Fixed ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    /// Drain the pending-frame flag.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::Move(direction) => self.move_vehicle(direction),
            SceneCommand::StopFan => self.actuators.stop_fan(),
            SceneCommand::CenterRudder => self.actuators.center_rudder(),
            SceneCommand::Searchlight(side) => self.update_searchlight_angle(side),
            SceneCommand::SelectRig(rig) => {
                self.camera.select(rig);
                self.redraw.request();
            }
            SceneCommand::Hold { control, held } => {
                // Pressing only counts in free-roam; releasing always clears.
                if !held || self.camera.rig() == CameraRig::FreeRoam {
                    self.camera.set_held(control, held);
                }
            }
            SceneCommand::ToggleLookTarget => {
                if self.camera.rig() == CameraRig::FreeRoam {
                    self.camera.toggle_look_target();
                    tracing::debug!("free-roam centered={}", self.camera.is_centered());
                }
            }
        }
    }

    /// Turn or translate the boat and set the matching actuator. Schedules
    /// exactly one redraw.
    pub fn move_vehicle(&mut self, direction: Direction) {
        let applied = self.vehicle.apply(direction);
        self.actuators.engage(direction);
        tracing::debug!(
            "move {direction}: heading={:.1} dx={:.3} dz={:.3}",
            self.vehicle.heading(),
            applied.x,
            applied.z
        );
        self.redraw.request();
    }

    /// Drop all held input, e.g. when the window loses keyboard focus and
    /// the matching key-up events will never arrive.
    pub fn release_held_input(&mut self) {
        self.camera.release_all();
        self.actuators.stop_fan();
        self.actuators.center_rudder();
        self.redraw.request();
        tracing::debug!("held input released");
    }

    pub fn update_searchlight_angle(&mut self, side: Side) {
        self.actuators.step_searchlight(side);
    }

    /// One fixed-period update: level-triggered zoom and dolly, then a redraw
    /// request.
    pub fn tick(&mut self) {
        self.camera.tick();
        if self.fan_spin == FanSpinClock::PerTick {
            self.actuators.spin_fan();
        }
        self.ticks += 1;
        self.redraw.request();
    }

    /// Per-drawn-frame animation. Call once before building each frame.
    pub fn advance_frame(&mut self) {
        if self.fan_spin == FanSpinClock::PerFrame {
            self.actuators.spin_fan();
        }
        self.frames += 1;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix(&self.vehicle)
    }

    pub fn view_matrix_by_name(&self, name: &str) -> Mat4 {
        self.camera.view_matrix_by_name(name, &self.vehicle)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        self.camera.projection(aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn held(control: HoldControl) -> SceneCommand {
        SceneCommand::Hold {
            control,
            held: true,
        }
    }

    fn released(control: HoldControl) -> SceneCommand {
        SceneCommand::Hold {
            control,
            held: false,
        }
    }

    #[test]
    fn releasing_held_input_stops_drift() {
        let mut s = SceneState::default();
        s.apply(held(HoldControl::ZoomIn));
        s.apply(held(HoldControl::DollyOut));
        s.apply(SceneCommand::Move(Direction::Forward));
        s.apply(SceneCommand::Move(Direction::Left));
        s.tick();
        assert_eq!(s.camera().fov_degrees(), 44.0);

        s.release_held_input();
        for control in [
            HoldControl::ZoomIn,
            HoldControl::ZoomOut,
            HoldControl::DollyIn,
            HoldControl::DollyOut,
        ] {
            assert!(!s.camera().is_held(control));
        }
        assert_eq!(s.actuators().fan_speed(), 0.0);
        assert_eq!(s.actuators().rudder_angle(), 0.0);

        let (fov, dolly) = (s.camera().fov_degrees(), s.camera().dolly());
        for _ in 0..5 {
            s.tick();
        }
        assert_eq!(s.camera().fov_degrees(), fov);
        assert_eq!(s.camera().dolly(), dolly);
    }

    #[test]
    fn move_requests_exactly_one_redraw() {
        let mut s = SceneState::default();
        assert!(!s.redraw_pending());
        s.apply(SceneCommand::Move(Direction::Forward));
        assert!(s.take_redraw());
        assert!(!s.take_redraw());
    }

    #[test]
    fn redraw_requests_coalesce() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::Move(Direction::Left));
        s.tick();
        s.tick();
        assert!(s.take_redraw());
        assert!(!s.redraw_pending());
    }

    #[test]
    fn move_sets_and_release_clears_fan() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::Move(Direction::Backward));
        assert_eq!(s.actuators().fan_speed(), -40.0);
        s.apply(SceneCommand::StopFan);
        assert_eq!(s.actuators().fan_speed(), 0.0);
    }

    #[test]
    fn turn_release_centers_rudder() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::Move(Direction::Right));
        s.apply(SceneCommand::Move(Direction::Right));
        assert_eq!(s.actuators().rudder_angle(), -20.0);
        assert_eq!(s.vehicle().heading(), -10.0);
        s.apply(SceneCommand::CenterRudder);
        assert_eq!(s.actuators().rudder_angle(), 0.0);
    }

    #[test]
    fn fan_spins_per_frame_not_per_tick_by_default() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::Move(Direction::Forward));
        s.tick();
        s.tick();
        assert_eq!(s.actuators().fan_angle(), 0.0);
        s.advance_frame();
        s.advance_frame();
        s.advance_frame();
        assert_eq!(s.actuators().fan_angle(), 120.0);
        assert_eq!(s.frames(), 3);
        assert_eq!(s.ticks(), 2);
    }

    #[test]
    fn fan_can_spin_on_the_tick_clock() {
        let mut config = SceneConfig::default();
        config.actuators.fan_spin = FanSpinClock::PerTick;
        let mut s = SceneState::new(&config);
        s.apply(SceneCommand::Move(Direction::Backward));
        s.advance_frame();
        assert_eq!(s.actuators().fan_angle(), 0.0);
        s.tick();
        assert_eq!(s.actuators().fan_angle(), -40.0);
    }

    #[test]
    fn fan_angle_magnitude_is_monotonic_while_held() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::Move(Direction::Forward));
        let mut last = s.actuators().fan_angle();
        for _ in 0..20 {
            s.advance_frame();
            assert!(s.actuators().fan_angle() > last);
            last = s.actuators().fan_angle();
        }
        s.apply(SceneCommand::StopFan);
        s.advance_frame();
        assert_eq!(s.actuators().fan_angle(), last);
    }

    #[test]
    fn zoom_only_latches_in_free_roam() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::SelectRig(CameraRig::Chase));
        s.apply(held(HoldControl::ZoomIn));
        s.tick();
        assert_eq!(s.camera().fov_degrees(), 45.0);

        s.apply(SceneCommand::SelectRig(CameraRig::FreeRoam));
        s.apply(held(HoldControl::ZoomIn));
        s.tick();
        assert_eq!(s.camera().fov_degrees(), 44.0);

        // Release clears even after leaving free-roam.
        s.apply(SceneCommand::SelectRig(CameraRig::Overhead));
        s.apply(released(HoldControl::ZoomIn));
        s.tick();
        assert_eq!(s.camera().fov_degrees(), 44.0);
    }

    #[test]
    fn dolly_bounds_hold_over_many_ticks() {
        let mut s = SceneState::default();
        s.apply(held(HoldControl::DollyIn));
        for _ in 0..50 {
            s.tick();
            assert!(s.camera().dolly() >= -4.0);
        }
        s.apply(released(HoldControl::DollyIn));
        s.apply(held(HoldControl::DollyOut));
        for _ in 0..50 {
            s.tick();
            assert!(s.camera().dolly() <= 3.0);
        }
    }

    #[test]
    fn look_target_toggle_is_symmetric_and_free_roam_only() {
        let mut s = SceneState::default();
        s.apply(SceneCommand::ToggleLookTarget);
        assert!(!s.camera().is_centered());
        s.apply(SceneCommand::ToggleLookTarget);
        assert!(s.camera().is_centered());

        s.apply(SceneCommand::SelectRig(CameraRig::Overhead));
        s.apply(SceneCommand::ToggleLookTarget);
        assert!(s.camera().is_centered());
    }

    #[test]
    fn searchlight_command_clamps() {
        let mut s = SceneState::default();
        for _ in 0..10 {
            s.apply(SceneCommand::Searchlight(Side::Left));
        }
        assert_eq!(s.actuators().searchlight_angle(), 30.0);
    }

    #[test]
    fn view_matrix_follows_selected_rig() {
        let boat = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, 0.5), 90.0);
        let mut s = SceneState::default().with_vehicle(boat);
        s.apply(SceneCommand::SelectRig(CameraRig::Overhead));
        assert_eq!(s.view_matrix(), s.view_matrix_by_name("overhead"));
        assert_eq!(s.view_matrix_by_name("bogus"), Mat4::IDENTITY);
    }

    #[test]
    fn forward_sequence_respects_bounds() {
        let mut s = SceneState::default();
        for i in 0..500 {
            let d = match i % 11 {
                0 => Direction::Left,
                5 => Direction::Backward,
                _ => Direction::Forward,
            };
            s.apply(SceneCommand::Move(d));
            let p = s.vehicle().position();
            assert!(p.x.abs() < 2.8 && p.z.abs() < 1.8);
        }
    }
}
