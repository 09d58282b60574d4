use glam::{Mat4, Vec3};
use skiff_common::{Direction, VehicleConfig, WaterBounds};

/// The boat's pose on the water.
///
/// Position only changes through [`Vehicle::apply`], which enforces the
/// water bounds one axis at a time: a step that would leave the rectangle on
/// X is dropped for X but may still be applied on Z, and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    position: Vec3,
    /// Degrees, unbounded. Trigonometry takes care of wrapping.
    heading: f32,
    speed: f32,
    turn_step: f32,
    bounds: WaterBounds,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(&VehicleConfig::default())
    }
}

impl Vehicle {
    /// A boat at the origin facing +Z.
    pub fn new(config: &VehicleConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            heading: 0.0,
            speed: config.speed,
            turn_step: config.turn_step,
            bounds: config.bounds,
        }
    }

    /// Place the boat at an explicit pose. Positions outside the water are
    /// accepted as-is; the bounds only gate future moves.
    pub fn with_pose(mut self, position: Vec3, heading: f32) -> Self {
        self.position = position;
        self.heading = heading;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn bounds(&self) -> WaterBounds {
        self.bounds
    }

    /// Unit vector the boat moves along when going forward.
    pub fn forward(&self) -> Vec3 {
        let h = self.heading.to_radians();
        Vec3::new(h.sin(), 0.0, h.cos())
    }

    /// Turn or translate the boat. Returns the displacement actually applied.
    pub fn apply(&mut self, direction: Direction) -> Vec3 {
        match direction {
            Direction::Left => {
                self.heading += self.turn_step;
                Vec3::ZERO
            }
            Direction::Right => {
                self.heading -= self.turn_step;
                Vec3::ZERO
            }
            Direction::Forward => self.translate(self.forward() * self.speed),
            Direction::Backward => self.translate(-self.forward() * self.speed),
        }
    }

    fn translate(&mut self, delta: Vec3) -> Vec3 {
        let mut applied = Vec3::ZERO;
        let x = self.position.x + delta.x;
        if self.bounds.contains_x(x) {
            self.position.x = x;
            applied.x = delta.x;
        }
        let z = self.position.z + delta.z;
        if self.bounds.contains_z(z) {
            self.position.z = z;
            applied.z = delta.z;
        }
        if applied != delta {
            tracing::debug!(
                "boat move clipped at water edge: wanted ({:.3}, {:.3}) applied ({:.3}, {:.3})",
                delta.x,
                delta.z,
                applied.x,
                applied.z
            );
        }
        applied
    }

    /// Object-to-world transform of the hull: translate, then yaw.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.heading.to_radians())
    }

    /// World-to-boat transform used by the tracking rigs: inverse yaw, then
    /// inverse translation.
    pub fn inverse_pose(&self) -> Mat4 {
        Mat4::from_rotation_y(-self.heading.to_radians()) * Mat4::from_translation(-self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let v = Vehicle::default();
        assert_eq!(v.position(), Vec3::ZERO);
        assert_eq!(v.heading(), 0.0);
        assert_eq!(v.speed(), 0.05);
    }

    #[test]
    fn turning_changes_heading_only() {
        let mut v = Vehicle::default();
        v.apply(Direction::Left);
        v.apply(Direction::Left);
        v.apply(Direction::Right);
        assert_eq!(v.heading(), 5.0);
        assert_eq!(v.position(), Vec3::ZERO);
    }

    #[test]
    fn forward_follows_heading() {
        let mut v = Vehicle::default();
        v.apply(Direction::Forward);
        assert!((v.position().z - 0.05).abs() < 1e-6);
        assert!(v.position().x.abs() < 1e-6);

        let mut v = Vehicle::default().with_pose(Vec3::ZERO, 90.0);
        v.apply(Direction::Forward);
        assert!((v.position().x - 0.05).abs() < 1e-6);
        assert!(v.position().z.abs() < 1e-6);
    }

    #[test]
    fn backward_undoes_forward() {
        let mut v = Vehicle::default().with_pose(Vec3::ZERO, 30.0);
        v.apply(Direction::Forward);
        v.apply(Direction::Backward);
        assert!(v.position().length() < 1e-6);
    }

    #[test]
    fn stays_strictly_inside_water() {
        let mut v = Vehicle::default();
        for i in 0..2000 {
            if i % 37 == 0 {
                v.apply(Direction::Left);
            }
            v.apply(if i % 300 < 220 {
                Direction::Forward
            } else {
                Direction::Backward
            });
            let p = v.position();
            assert!(p.x > -2.8 && p.x < 2.8, "x escaped: {}", p.x);
            assert!(p.z > -1.8 && p.z < 1.8, "z escaped: {}", p.z);
        }
    }

    #[test]
    fn blocked_axis_does_not_block_the_other() {
        // Pressed against the +Z edge, heading diagonally.
        let mut v = Vehicle::default().with_pose(Vec3::new(0.0, 0.0, 1.79), 45.0);
        let applied = v.apply(Direction::Forward);
        assert_eq!(applied.z, 0.0);
        assert!(applied.x > 0.0);
        assert!((v.position().z - 1.79).abs() < 1e-6);
        assert!(v.position().x > 0.0);
    }

    #[test]
    fn model_and_inverse_pose_cancel() {
        let v = Vehicle::default().with_pose(Vec3::new(1.0, 0.0, -0.5), 73.0);
        let product = v.inverse_pose() * v.model_matrix();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }
}
