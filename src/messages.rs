// Define message types for the runtime

use serde::{Deserialize, Serialize};

use crate::config::MODULE_COUNT;

/// Raw gamepad sample from the pad bridge -> runtime.
///
/// Sticks are in [-1, 1] with forward/left positive (the bridge normalizes
/// whatever the OS reports), triggers in [0, 1]. `slow` is the precision
/// button: while held, all speed demands are scaled by the configured
/// slow factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct PadState {
    pub left_x: f64,
    pub left_y: f64,
    pub right_x: f64,
    pub left_trigger: f64,
    pub right_trigger: f64,
    pub slow: bool,
}

/// Heading sample from the IMU node -> runtime.
///
/// Yaw in radians, positive counter-clockwise. The sensor node owns the
/// wrapping convention; the runtime only ever takes sin/cos of it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct HeadingSample {
    pub yaw_rad: f64,
}

/// Control scheme selector, published by the operator UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// Field-relative strafe drive: left stick translates, right stick
    /// rotates, translation is independent of robot heading.
    FieldSwerve,
    /// Throttle-and-turn scheme on a swerve base: triggers drive forward
    /// and back, left stick X turns. Robot-relative, no strafe.
    PseudoTank,
}

/// Target for a single swerve module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ModuleTarget {
    /// Steer direction in radians, body frame, 0 = straight ahead.
    pub angle_rad: f64,
    /// Wheel ground speed in m/s, unsigned.
    pub speed_mps: f64,
}

/// Actuation output from runtime -> hardware node, one target per module
/// in fixed order FL, FR, BL, BR.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ModuleTargets {
    pub modules: [ModuleTarget; MODULE_COUNT],
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    InputStale,
}
