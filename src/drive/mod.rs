// Drive pipeline for the quadriga swerve base
//
// Provides:
// - Stick shaping (deadband + slew rate limiting)
// - Field-relative to body-frame transform
// - Swerve inverse kinematics (body velocity -> module targets)

mod frame;
mod shaper;
mod shaping;
pub mod kinematics;

pub use frame::body_from_field;
pub use kinematics::{ModuleGeometry, SwerveKinematics};
pub use shaper::DriveShaper;
pub use shaping::{SlewRateLimiter, apply_deadband};

/// Body-frame velocity command.
///
/// +x forward, +y left, omega counter-clockwise about +z.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyVelocity {
    pub vx_mps: f64,
    pub vy_mps: f64,
    pub omega_radps: f64,
}

impl BodyVelocity {
    pub fn is_finite(&self) -> bool {
        self.vx_mps.is_finite() && self.vy_mps.is_finite() && self.omega_radps.is_finite()
    }
}
