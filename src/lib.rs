// Quadriga runtime library
//
// Turns raw gamepad samples into per-module swerve targets:
// deadband -> rate limit -> frame transform -> inverse kinematics.
// The binary in main.rs wires this into a 50 Hz zenoh loop.

pub mod config;
pub mod drive;
pub mod messages;
pub mod runtime;
