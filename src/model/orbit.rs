use nalgebra::{Point3, UnitQuaternion, Vector3};

use super::body::BodyDescriptor;

/// Controls how fast a speed multiplier of 1.0 moves a body around its orbit.
pub const ORBIT_SCALE: f32 = 0.1;

// Spin is scaled separately for each axis; x wobbles at half the rate of y.
pub const SPIN_SCALE_Y: f32 = 10.0;
pub const SPIN_SCALE_X: f32 = 5.0;

pub const MIN_SPEED: f32 = 0.0;
pub const MAX_SPEED: f32 = 10.0;

/// Rotation of a body about its own axes, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
}

impl Spin {
    pub fn advance(&mut self, rate_x: f32, rate_y: f32, dt: f32) {
        self.y += rate_y * dt;
        self.x += rate_x * dt;
    }

    // x is applied first, then y, matching XYZ Euler order
    pub fn to_rotation(self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalState {
    // Never normalized; sin and cos don't care.
    pub angle: f32,
    pub speed_multiplier: f32,
    pub spin: Spin,
}

impl OrbitalState {
    pub fn new(desc: &BodyDescriptor, initial_angle: f32) -> Self {
        OrbitalState {
            angle: initial_angle,
            speed_multiplier: desc.base_angular_speed,
            spin: Spin::default(),
        }
    }

    pub fn advance(&mut self, desc: &BodyDescriptor, dt: f32) {
        self.angle += self.speed_multiplier * dt * ORBIT_SCALE;
        self.spin.advance(
            desc.rotation_speed * SPIN_SCALE_X,
            desc.rotation_speed * SPIN_SCALE_Y,
            dt,
        );
    }

    /// Everything orbits in the y = 0 plane.
    pub fn position(&self, desc: &BodyDescriptor) -> Point3<f32> {
        Point3::new(
            self.angle.cos() * desc.orbital_distance,
            0.0,
            self.angle.sin() * desc.orbital_distance,
        )
    }
}

/// Clamps a requested multiplier into the allowed range. NaN counts as the
/// slowest setting.
pub fn clamp_speed(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_SPEED;
    }
    nalgebra::clamp(value, MIN_SPEED, MAX_SPEED)
}
