// Stick conditioning primitives: deadband and slew rate limiting

/// Zero out axis values inside the deadband, pass the rest unchanged.
///
/// Counters stick drift (and driver error) near center.
pub fn apply_deadband(value: f64, threshold: f64) -> f64 {
    if value.abs() > threshold { value } else { 0.0 }
}

/// Limits the rate of change of a command between calls.
///
/// One limiter per degree of freedom; the stored output is the limiter's
/// only state. dt is passed in per call, so tests need no clock.
#[derive(Debug, Clone, Copy)]
pub struct SlewRateLimiter {
    max_rate_per_s: f64,
    last_output: f64,
}

impl SlewRateLimiter {
    pub fn new(max_rate_per_s: f64) -> Self {
        Self {
            max_rate_per_s,
            last_output: 0.0,
        }
    }

    /// Move the output toward `input` by at most `max_rate * dt`.
    pub fn calculate(&mut self, input: f64, dt: f64) -> f64 {
        if dt > 0.0 {
            let max_change = self.max_rate_per_s * dt;
            let change = (input - self.last_output).clamp(-max_change, max_change);
            self.last_output += change;
        }
        self.last_output
    }

    /// Force the output back to zero. Only lifecycle control (mode
    /// transitions) calls this, never the pipeline itself.
    pub fn reset(&mut self) {
        self.last_output = 0.0;
    }

    pub fn output(&self) -> f64 {
        self.last_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.02;

    #[test]
    fn deadband_zeroes_values_at_or_below_threshold() {
        assert_eq!(apply_deadband(0.0, 0.06), 0.0);
        assert_eq!(apply_deadband(0.05, 0.06), 0.0);
        assert_eq!(apply_deadband(0.06, 0.06), 0.0);
        assert_eq!(apply_deadband(-0.06, 0.06), 0.0);
    }

    #[test]
    fn deadband_passes_values_above_threshold_unchanged() {
        assert_eq!(apply_deadband(0.3, 0.06), 0.3);
        assert_eq!(apply_deadband(-0.3, 0.06), -0.3);
        assert_eq!(apply_deadband(1.0, 0.06), 1.0);
    }

    #[test]
    fn step_input_is_limited_per_cycle() {
        let mut limiter = SlewRateLimiter::new(2.0);
        let out = limiter.calculate(1.0, DT);
        assert!((out - 2.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn output_change_is_bounded_for_arbitrary_sequences() {
        let mut limiter = SlewRateLimiter::new(3.0);
        let inputs = [1.0, -1.0, 0.5, 0.5, -2.0, 4.0, 0.0, -0.3, 1.7];

        let mut prev = limiter.output();
        for input in inputs {
            let out = limiter.calculate(input, DT);
            assert!(
                (out - prev).abs() <= 3.0 * DT + 1e-12,
                "change {} exceeds bound",
                out - prev
            );
            prev = out;
        }
    }

    #[test]
    fn converges_to_constant_input() {
        let mut limiter = SlewRateLimiter::new(2.0);
        let mut out = 0.0;
        for _ in 0..50 {
            out = limiter.calculate(0.8, DT);
        }
        assert!((out - 0.8).abs() < 1e-12);
    }

    #[test]
    fn small_change_passes_through_exactly() {
        let mut limiter = SlewRateLimiter::new(2.0);
        let out = limiter.calculate(0.01, DT);
        assert!((out - 0.01).abs() < 1e-12);
    }

    #[test]
    fn zero_dt_holds_output() {
        let mut limiter = SlewRateLimiter::new(2.0);
        limiter.calculate(1.0, DT);
        let held = limiter.output();
        assert_eq!(limiter.calculate(1.0, 0.0), held);
        assert_eq!(limiter.calculate(1.0, -DT), held);
    }

    #[test]
    fn reset_forces_output_to_zero() {
        let mut limiter = SlewRateLimiter::new(2.0);
        for _ in 0..50 {
            limiter.calculate(1.0, DT);
        }
        limiter.reset();
        assert_eq!(limiter.output(), 0.0);
    }
}
