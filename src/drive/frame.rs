// Field-relative to body-frame conversion

use tracing::warn;

use super::BodyVelocity;

/// Rotate a field-relative velocity into the body frame.
///
/// `yaw_rad` is the robot heading, counter-clockwise positive. Only its
/// sine and cosine are consumed, so the caller's wrapping convention
/// does not matter. Non-finite inputs collapse to zero motion for the
/// cycle; actuation must never see NaN or Inf.
pub fn body_from_field(field: BodyVelocity, yaw_rad: f64) -> BodyVelocity {
    if !yaw_rad.is_finite() || !field.is_finite() {
        warn!(
            "Non-finite field velocity {:?} or heading {}, commanding no motion",
            field, yaw_rad
        );
        return BodyVelocity::default();
    }

    let (sin, cos) = yaw_rad.sin_cos();
    BodyVelocity {
        vx_mps: field.vx_mps * cos + field.vy_mps * sin,
        vy_mps: -field.vx_mps * sin + field.vy_mps * cos,
        omega_radps: field.omega_radps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn zero_heading_is_identity() {
        let field = BodyVelocity {
            vx_mps: 1.2,
            vy_mps: -0.4,
            omega_radps: 0.7,
        };
        let body = body_from_field(field, 0.0);
        assert_close(body.vx_mps, 1.2);
        assert_close(body.vy_mps, -0.4);
        assert_close(body.omega_radps, 0.7);
    }

    #[test]
    fn ninety_degree_heading_swaps_axes() {
        // Facing 90 deg CCW, a field-forward command becomes a body
        // rightward one: vx = 0, vy = -1.
        let field = BodyVelocity {
            vx_mps: 1.0,
            vy_mps: 0.0,
            omega_radps: 0.0,
        };
        let body = body_from_field(field, std::f64::consts::FRAC_PI_2);
        assert_close(body.vx_mps, 0.0);
        assert_close(body.vy_mps, -1.0);
    }

    #[test]
    fn omega_passes_through_unchanged() {
        let field = BodyVelocity {
            vx_mps: 0.5,
            vy_mps: 0.5,
            omega_radps: 2.0,
        };
        let body = body_from_field(field, 1.3);
        assert_close(body.omega_radps, 2.0);
    }

    #[test]
    fn heading_wrap_does_not_matter() {
        let field = BodyVelocity {
            vx_mps: 0.8,
            vy_mps: -0.2,
            omega_radps: 0.1,
        };
        let tau = 2.0 * std::f64::consts::PI;
        let a = body_from_field(field, 1.1);
        let b = body_from_field(field, 1.1 + tau);
        assert_close(a.vx_mps, b.vx_mps);
        assert_close(a.vy_mps, b.vy_mps);
    }

    #[test]
    fn non_finite_heading_commands_no_motion() {
        let field = BodyVelocity {
            vx_mps: 1.0,
            vy_mps: 1.0,
            omega_radps: 1.0,
        };
        assert_eq!(body_from_field(field, f64::NAN), BodyVelocity::default());
        assert_eq!(
            body_from_field(field, f64::INFINITY),
            BodyVelocity::default()
        );
    }

    #[test]
    fn non_finite_velocity_commands_no_motion() {
        let field = BodyVelocity {
            vx_mps: f64::NAN,
            vy_mps: 0.0,
            omega_radps: 0.0,
        };
        assert_eq!(body_from_field(field, 0.0), BodyVelocity::default());
    }
}
