use skiff_common::{ActuatorConfig, Direction, Range, Side};

/// Secondary animated parts of the boat: fan, rudder and searchlight.
///
/// # Invariants
/// - `rudder_angle` and `fan_speed` are non-zero only between the key-down
///   that set them and the matching key-up.
/// - `searchlight_angle` never leaves its configured range.
#[derive(Debug, Clone, PartialEq)]
pub struct Actuators {
    fan_angle: f32,
    fan_speed: f32,
    rudder_angle: f32,
    searchlight_angle: f32,
    fan_rate: f32,
    rudder_deflection: f32,
    searchlight_step: f32,
    searchlight_range: Range,
}

impl Default for Actuators {
    fn default() -> Self {
        Self::new(&ActuatorConfig::default())
    }
}

impl Actuators {
    pub fn new(config: &ActuatorConfig) -> Self {
        Self {
            fan_angle: 0.0,
            fan_speed: 0.0,
            rudder_angle: 0.0,
            searchlight_angle: 0.0,
            fan_rate: config.fan_speed,
            rudder_deflection: config.rudder_deflection,
            searchlight_step: config.searchlight_step,
            searchlight_range: config.searchlight_range,
        }
    }

    pub fn fan_angle(&self) -> f32 {
        self.fan_angle
    }

    pub fn fan_speed(&self) -> f32 {
        self.fan_speed
    }

    pub fn rudder_angle(&self) -> f32 {
        self.rudder_angle
    }

    pub fn searchlight_angle(&self) -> f32 {
        self.searchlight_angle
    }

    /// Edge-triggered reaction to a move command: forward/backward spin the
    /// fan, left/right deflect the rudder.
    pub fn engage(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.fan_speed = self.fan_rate,
            Direction::Backward => self.fan_speed = -self.fan_rate,
            Direction::Left => self.rudder_angle = self.rudder_deflection,
            Direction::Right => self.rudder_angle = -self.rudder_deflection,
        }
    }

    /// Forward/backward key released.
    pub fn stop_fan(&mut self) {
        self.fan_speed = 0.0;
    }

    /// Left/right key released.
    pub fn center_rudder(&mut self) {
        self.rudder_angle = 0.0;
    }

    /// Advance the fan by one step at the current speed.
    pub fn spin_fan(&mut self) {
        self.fan_angle += self.fan_speed;
    }

    /// Swing the searchlight one step, saturating at the range limits.
    pub fn step_searchlight(&mut self, side: Side) {
        let next = self.searchlight_angle + side.sign() * self.searchlight_step;
        self.searchlight_angle = self.searchlight_range.clamp(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchlight_saturates_left() {
        let mut a = Actuators::default();
        for _ in 0..10 {
            a.step_searchlight(Side::Left);
        }
        assert_eq!(a.searchlight_angle(), 30.0);
        a.step_searchlight(Side::Left);
        assert_eq!(a.searchlight_angle(), 30.0);
    }

    #[test]
    fn searchlight_saturates_right_and_recovers() {
        let mut a = Actuators::default();
        for _ in 0..5 {
            a.step_searchlight(Side::Right);
        }
        assert_eq!(a.searchlight_angle(), -30.0);
        a.step_searchlight(Side::Left);
        assert_eq!(a.searchlight_angle(), -23.0);
    }

    #[test]
    fn searchlight_mixed_sequence_stays_in_range() {
        let mut a = Actuators::default();
        let pattern = [Side::Left, Side::Left, Side::Right, Side::Left];
        for i in 0..200 {
            a.step_searchlight(pattern[i % pattern.len()]);
            assert!((-30.0..=30.0).contains(&a.searchlight_angle()));
        }
    }

    #[test]
    fn fan_speed_follows_direction_and_stops() {
        let mut a = Actuators::default();
        a.engage(Direction::Forward);
        assert_eq!(a.fan_speed(), 40.0);
        a.engage(Direction::Backward);
        assert_eq!(a.fan_speed(), -40.0);
        a.stop_fan();
        assert_eq!(a.fan_speed(), 0.0);
    }

    #[test]
    fn rudder_resets_to_exactly_zero() {
        let mut a = Actuators::default();
        a.engage(Direction::Left);
        assert_eq!(a.rudder_angle(), 20.0);
        a.engage(Direction::Right);
        assert_eq!(a.rudder_angle(), -20.0);
        a.center_rudder();
        assert_eq!(a.rudder_angle(), 0.0);
    }

    #[test]
    fn fan_angle_accumulates_only_while_spinning() {
        let mut a = Actuators::default();
        a.spin_fan();
        assert_eq!(a.fan_angle(), 0.0);
        a.engage(Direction::Forward);
        a.spin_fan();
        a.spin_fan();
        assert_eq!(a.fan_angle(), 80.0);
        a.stop_fan();
        a.spin_fan();
        assert_eq!(a.fan_angle(), 80.0);
    }
}
