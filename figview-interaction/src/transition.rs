use std::time::{Duration, Instant};

use figview_common::transform::Transform;

/// Duration used by reset and box-zoom animations
pub const DEFAULT_DURATION: Duration = Duration::from_millis(750);

/// An in-flight animated view change on one panel. Sampling is pure in
/// `now`, so callers drive time explicitly and tests never sleep.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: Transform,
    pub to: Transform,
    pub start: Instant,
    pub duration: Duration,
}

impl Transition {
    pub fn new(from: Transform, to: Transform, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// The eased transform at `now`, and whether the transition finished
    pub fn sample(&self, now: Instant) -> (Transform, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        (self.from.lerp(&self.to, ease_cubic_in_out(t)), t >= 1.0)
    }
}

fn ease_cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_sample_endpoints() {
        let start = Instant::now();
        let tr = Transition::new(
            Transform::identity(),
            Transform::new(100.0, 0.0, 4.0),
            start,
            Duration::from_millis(750),
        );

        let (at_start, done) = tr.sample(start);
        assert!(!done);
        assert!(at_start.is_identity());

        let (at_end, done) = tr.sample(start + Duration::from_millis(750));
        assert!(done);
        assert_approx_eq!(f32, at_end.translate_x, 100.0);
        assert_approx_eq!(f32, at_end.scale, 4.0);

        // past the end the target holds
        let (after, done) = tr.sample(start + Duration::from_secs(5));
        assert!(done);
        assert_approx_eq!(f32, after.scale, 4.0);
    }

    #[test]
    fn test_midpoint_eased() {
        let start = Instant::now();
        let tr = Transition::new(
            Transform::identity(),
            Transform::new(100.0, 0.0, 1.0),
            start,
            Duration::from_millis(800),
        );
        // cubic in-out passes through 0.5 at the midpoint
        let (mid, done) = tr.sample(start + Duration::from_millis(400));
        assert!(!done);
        assert_approx_eq!(f32, mid.translate_x, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let start = Instant::now();
        let tr = Transition::new(
            Transform::identity(),
            Transform::new(1.0, 2.0, 3.0),
            start,
            Duration::ZERO,
        );
        let (t, done) = tr.sample(start);
        assert!(done);
        assert_approx_eq!(f32, t.scale, 3.0);
    }

    #[test]
    fn test_ease_monotone() {
        let mut prev = 0.0;
        for i in 0..=20 {
            let v = ease_cubic_in_out(i as f32 / 20.0);
            assert!(v >= prev);
            prev = v;
        }
        assert_approx_eq!(f32, ease_cubic_in_out(1.0), 1.0);
    }
}
