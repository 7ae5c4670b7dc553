// Swerve inverse kinematics for the quadriga 4-module base
// Converts a body-frame velocity (x, y, omega) to per-module steer
// angles and wheel speeds.

use tracing::warn;

use crate::config::{DriveParams, MODULE_COUNT};
use crate::messages::{ModuleTarget, ModuleTargets};

use super::BodyVelocity;

/// Below this wheel speed the steer angle is undefined; the module holds
/// its last commanded angle instead of slewing.
const SPEED_EPSILON_MPS: f64 = 1e-6;

/// Fixed position of one module in the body frame.
#[derive(Debug, Clone, Copy)]
pub struct ModuleGeometry {
    pub offset_x_m: f64,
    pub offset_y_m: f64,
}

/// Maps body velocities to per-module targets.
///
/// Owns the module geometry (fixed at startup, order FL, FR, BL, BR) and
/// the last commanded angles, which are reused whenever a module's
/// velocity vector degenerates to zero.
pub struct SwerveKinematics {
    modules: [ModuleGeometry; MODULE_COUNT],
    max_speed_mps: f64,
    last_angles_rad: [f64; MODULE_COUNT],
}

impl SwerveKinematics {
    pub fn new(params: &DriveParams) -> Self {
        let modules = params.module_offsets_m.map(|[x, y]| ModuleGeometry {
            offset_x_m: x,
            offset_y_m: y,
        });
        Self {
            modules,
            max_speed_mps: params.max_speed_mps,
            last_angles_rad: [0.0; MODULE_COUNT],
        }
    }

    /// Compute module targets for one body velocity command.
    pub fn solve(&mut self, body: BodyVelocity) -> ModuleTargets {
        if !body.is_finite() {
            warn!("Non-finite body velocity {:?}, stopping modules", body);
            return self.stop();
        }

        let mut targets = [ModuleTarget::default(); MODULE_COUNT];

        for (i, module) in self.modules.iter().enumerate() {
            // Velocity of the wheel contact point: translation plus the
            // rotational component omega x r.
            let vx = body.vx_mps - body.omega_radps * module.offset_y_m;
            let vy = body.vy_mps + body.omega_radps * module.offset_x_m;
            let speed = vx.hypot(vy);

            targets[i] = if speed < SPEED_EPSILON_MPS {
                ModuleTarget {
                    angle_rad: self.last_angles_rad[i],
                    speed_mps: 0.0,
                }
            } else {
                ModuleTarget {
                    angle_rad: vy.atan2(vx),
                    speed_mps: speed,
                }
            };
        }

        // If any module saturates, scale every speed down by the same
        // factor. Relative speeds carry the motion direction and
        // rotation ratio; clipping one module alone would corrupt the
        // whole trajectory.
        let fastest = targets.iter().map(|t| t.speed_mps).fold(0.0, f64::max);
        if fastest > self.max_speed_mps {
            let scale = self.max_speed_mps / fastest;
            for target in &mut targets {
                target.speed_mps *= scale;
            }
        }

        for (i, target) in targets.iter().enumerate() {
            self.last_angles_rad[i] = target.angle_rad;
        }

        ModuleTargets { modules: targets }
    }

    /// Stop targets: zero speeds, steer angles held where they are.
    pub fn stop(&self) -> ModuleTargets {
        let mut targets = [ModuleTarget::default(); MODULE_COUNT];
        for (i, &angle_rad) in self.last_angles_rad.iter().enumerate() {
            targets[i] = ModuleTarget {
                angle_rad,
                speed_mps: 0.0,
            };
        }
        ModuleTargets { modules: targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_4, PI};

    fn kinematics() -> SwerveKinematics {
        SwerveKinematics::new(&DriveParams::default())
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn zero_velocity_stops_all_modules() {
        let mut kin = kinematics();
        let targets = kin.solve(BodyVelocity::default());
        for target in targets.modules {
            assert_eq!(target.speed_mps, 0.0);
            assert_eq!(target.angle_rad, 0.0);
        }
    }

    #[test]
    fn uniform_translation_gives_identical_targets() {
        let mut kin = kinematics();
        let targets = kin.solve(BodyVelocity {
            vx_mps: 1.0,
            vy_mps: 1.0,
            omega_radps: 0.0,
        });
        let first = targets.modules[0];
        assert_close(first.angle_rad, FRAC_PI_4);
        assert_close(first.speed_mps, f64::sqrt(2.0));
        for target in targets.modules {
            assert_eq!(target, first);
        }
    }

    #[test]
    fn pure_forward_points_all_modules_ahead() {
        let mut kin = kinematics();
        let targets = kin.solve(BodyVelocity {
            vx_mps: 2.0,
            vy_mps: 0.0,
            omega_radps: 0.0,
        });
        for target in targets.modules {
            assert_close(target.angle_rad, 0.0);
            assert_close(target.speed_mps, 2.0);
        }
    }

    #[test]
    fn pure_rotation_is_tangential_and_symmetric() {
        let mut kin = kinematics();
        let omega = 1.0;
        let targets = kin.solve(BodyVelocity {
            vx_mps: 0.0,
            vy_mps: 0.0,
            omega_radps: omega,
        });

        // All modules sit at the same radius, so speeds match.
        let radius = f64::hypot(0.28, 0.28);
        for target in targets.modules {
            assert_close(target.speed_mps, omega * radius);
        }

        // FL at (+0.28, +0.28): wheel velocity (-w*0.28, +w*0.28).
        assert_close(targets.modules[0].angle_rad, 3.0 * FRAC_PI_4);
        // FR at (+0.28, -0.28): wheel velocity (+w*0.28, +w*0.28).
        assert_close(targets.modules[1].angle_rad, FRAC_PI_4);
        // BL at (-0.28, +0.28): wheel velocity (-w*0.28, -w*0.28).
        assert_close(targets.modules[2].angle_rad, -3.0 * FRAC_PI_4);
        // BR at (-0.28, -0.28): wheel velocity (+w*0.28, -w*0.28).
        assert_close(targets.modules[3].angle_rad, -FRAC_PI_4);
    }

    #[test]
    fn saturation_caps_fastest_module_at_max_speed() {
        let mut kin = kinematics();
        let targets = kin.solve(BodyVelocity {
            vx_mps: 10.0,
            vy_mps: 0.0,
            omega_radps: 0.0,
        });
        let max = DriveParams::default().max_speed_mps;
        for target in targets.modules {
            assert_close(target.speed_mps, max);
        }
    }

    #[test]
    fn saturation_scaling_preserves_speed_ratios() {
        let body_small = BodyVelocity {
            vx_mps: 0.3,
            vy_mps: 0.1,
            omega_radps: 0.4,
        };
        let body_big = BodyVelocity {
            vx_mps: body_small.vx_mps * 40.0,
            vy_mps: body_small.vy_mps * 40.0,
            omega_radps: body_small.omega_radps * 40.0,
        };

        let unsaturated = kinematics().solve(body_small);
        let saturated = kinematics().solve(body_big);

        let max = DriveParams::default().max_speed_mps;
        let fastest = saturated
            .modules
            .iter()
            .map(|t| t.speed_mps)
            .fold(0.0, f64::max);
        assert_close(fastest, max);

        // Same ratios, same angles, just a shorter speed vector.
        for (small, big) in unsaturated.modules.iter().zip(saturated.modules.iter()) {
            assert_close(
                big.speed_mps / saturated.modules[0].speed_mps,
                small.speed_mps / unsaturated.modules[0].speed_mps,
            );
            assert_close(big.angle_rad, small.angle_rad);
        }
    }

    #[test]
    fn zero_command_holds_last_angles() {
        let mut kin = kinematics();
        kin.solve(BodyVelocity {
            vx_mps: 1.0,
            vy_mps: 1.0,
            omega_radps: 0.0,
        });

        // Cycle after cycle the modules stay put at the old angle.
        for _ in 0..3 {
            let targets = kin.solve(BodyVelocity::default());
            for target in targets.modules {
                assert_close(target.angle_rad, FRAC_PI_4);
                assert_eq!(target.speed_mps, 0.0);
            }
        }
    }

    #[test]
    fn stop_holds_angles_and_zeroes_speeds() {
        let mut kin = kinematics();
        kin.solve(BodyVelocity {
            vx_mps: -1.0,
            vy_mps: 0.0,
            omega_radps: 0.0,
        });
        let targets = kin.stop();
        for target in targets.modules {
            assert_close(target.angle_rad.abs(), PI);
            assert_eq!(target.speed_mps, 0.0);
        }
    }

    #[test]
    fn non_finite_body_velocity_stops_modules() {
        let mut kin = kinematics();
        kin.solve(BodyVelocity {
            vx_mps: 1.0,
            vy_mps: 0.0,
            omega_radps: 0.0,
        });
        let targets = kin.solve(BodyVelocity {
            vx_mps: f64::NAN,
            vy_mps: 0.0,
            omega_radps: 0.0,
        });
        for target in targets.modules {
            assert!(target.angle_rad.is_finite());
            assert_eq!(target.speed_mps, 0.0);
        }
    }
}
