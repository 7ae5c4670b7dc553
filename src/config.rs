// Timeouts, topics, drive parameters
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Pad input timeout for watchdog
pub const CMD_TIMEOUT: Duration = Duration::from_millis(250);

// Zenoh topics
pub const TOPIC_CMD_PAD: &str = "quadriga/cmd/pad"; // gamepad samples
pub const TOPIC_CMD_MODE: &str = "quadriga/cmd/mode"; // drive mode selector
pub const TOPIC_IMU_YAW: &str = "quadriga/imu/yaw"; // heading samples
pub const TOPIC_RT_MODULES: &str = "quadriga/rt/modules"; // actuation targets
pub const TOPIC_HEALTH: &str = "quadriga/state/health"; // health status

/// Number of swerve modules on the base.
pub const MODULE_COUNT: usize = 4;

/// Static drive parameters, fixed for the whole session.
///
/// Loaded once at startup (optionally from a JSON file) and validated
/// before the loop starts. Invalid parameters are fatal, never checked
/// per cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriveParams {
    /// Stick deadband threshold, applied to raw axis values in [-1, 1].
    pub deadband: f64,

    /// Maximum linear speed of the base, m/s.
    pub max_speed_mps: f64,

    /// Maximum angular speed of the base, rad/s.
    pub max_omega_radps: f64,

    /// Rate-limit bound on commanded linear velocity, m/s^2.
    pub max_accel_mps2: f64,

    /// Rate-limit bound on commanded angular velocity, rad/s^2.
    pub max_omega_accel_radps2: f64,

    /// Speed multiplier while the pad's slow flag is held, (0, 1].
    pub slow_factor: f64,

    /// Module positions [x, y] in the body frame, meters.
    /// +x forward, +y left. Order: FL, FR, BL, BR.
    pub module_offsets_m: [[f64; 2]; MODULE_COUNT],
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            deadband: 0.06,
            max_speed_mps: 3.6,
            max_omega_radps: 2.0 * std::f64::consts::PI,
            max_accel_mps2: 4.0,
            max_omega_accel_radps2: 8.0,
            slow_factor: 0.5,
            module_offsets_m: [
                [0.28, 0.28],   // FL
                [0.28, -0.28],  // FR
                [-0.28, 0.28],  // BL
                [-0.28, -0.28], // BR
            ],
        }
    }
}

/// Errors from loading or validating drive parameters
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("failed to read params file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse params file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("deadband must be in [0, 1), got {0}")]
    DeadbandOutOfRange(f64),

    #[error("slow_factor must be in (0, 1], got {0}")]
    SlowFactorOutOfRange(f64),

    #[error("module offset [{x}, {y}] is not finite")]
    NonFiniteOffset { x: f64, y: f64 },
}

impl DriveParams {
    /// Load parameters from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ParamsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check the parameters against the base's physical constraints.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("max_speed_mps", self.max_speed_mps),
            ("max_omega_radps", self.max_omega_radps),
            ("max_accel_mps2", self.max_accel_mps2),
            ("max_omega_accel_radps2", self.max_omega_accel_radps2),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        if !(0.0..1.0).contains(&self.deadband) {
            return Err(ParamsError::DeadbandOutOfRange(self.deadband));
        }

        if !(self.slow_factor > 0.0 && self.slow_factor <= 1.0) {
            return Err(ParamsError::SlowFactorOutOfRange(self.slow_factor));
        }

        for [x, y] in self.module_offsets_m {
            if !x.is_finite() || !y.is_finite() {
                return Err(ParamsError::NonFiniteOffset { x, y });
            }
        }

        Ok(())
    }
}
