// Per-mode stick shaping: raw pad sample -> body velocity command

use crate::config::DriveParams;
use crate::messages::{DriveMode, PadState};

use super::BodyVelocity;
use super::frame::body_from_field;
use super::shaping::{SlewRateLimiter, apply_deadband};

/// Turns raw pad samples into body-frame velocity commands.
///
/// Owns the three per-DOF rate limiters. Field mode runs the full
/// deadband -> scale -> rate-limit -> frame-transform pipeline. Tank
/// mode skips the limiters: throttle response is traded against
/// smoothness there, and that asymmetry is intentional.
pub struct DriveShaper {
    params: DriveParams,
    x_limiter: SlewRateLimiter,
    y_limiter: SlewRateLimiter,
    omega_limiter: SlewRateLimiter,
}

impl DriveShaper {
    pub fn new(params: &DriveParams) -> Self {
        Self {
            params: params.clone(),
            x_limiter: SlewRateLimiter::new(params.max_accel_mps2),
            y_limiter: SlewRateLimiter::new(params.max_accel_mps2),
            omega_limiter: SlewRateLimiter::new(params.max_omega_accel_radps2),
        }
    }

    /// Shape one pad sample into a body velocity for this cycle.
    pub fn shape(
        &mut self,
        mode: DriveMode,
        pad: &PadState,
        yaw_rad: f64,
        dt: f64,
    ) -> BodyVelocity {
        match mode {
            DriveMode::FieldSwerve => self.shape_field_swerve(pad, yaw_rad, dt),
            DriveMode::PseudoTank => self.shape_pseudo_tank(pad),
        }
    }

    /// Reset the rate limiters. The runtime calls this when entering
    /// field mode so a previous episode can't seed the smoothed outputs.
    pub fn reset(&mut self) {
        self.x_limiter.reset();
        self.y_limiter.reset();
        self.omega_limiter.reset();
    }

    fn shape_field_swerve(&mut self, pad: &PadState, yaw_rad: f64, dt: f64) -> BodyVelocity {
        let factor = if pad.slow { self.params.slow_factor } else { 1.0 };

        let forward = apply_deadband(finite_or_zero(pad.left_y), self.params.deadband);
        let strafe = apply_deadband(finite_or_zero(pad.left_x), self.params.deadband);
        let turn = apply_deadband(finite_or_zero(pad.right_x), self.params.deadband);

        // Scale to physical units before limiting, so the configured
        // bounds are true accelerations even when the slow factor flips.
        let field = BodyVelocity {
            vx_mps: self
                .x_limiter
                .calculate(forward * self.params.max_speed_mps * factor, dt),
            vy_mps: self
                .y_limiter
                .calculate(strafe * self.params.max_speed_mps * factor, dt),
            omega_radps: self
                .omega_limiter
                .calculate(turn * self.params.max_omega_radps * factor, dt),
        };

        body_from_field(field, yaw_rad)
    }

    // Triggers drive, left stick turns, no strafe. Robot-relative, and
    // the rate limiters are bypassed on purpose.
    fn shape_pseudo_tank(&self, pad: &PadState) -> BodyVelocity {
        let throttle = finite_or_zero(pad.right_trigger).clamp(0.0, 1.0)
            - finite_or_zero(pad.left_trigger).clamp(0.0, 1.0);
        let forward = apply_deadband(throttle, self.params.deadband);
        let turn = apply_deadband(finite_or_zero(pad.left_x), self.params.deadband);

        BodyVelocity {
            vx_mps: forward * self.params.max_speed_mps,
            vy_mps: 0.0,
            omega_radps: turn * self.params.max_omega_radps,
        }
    }
}

/// Non-finite axis values are treated as centered, so a malformed pad
/// sample can never poison the limiter state.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
