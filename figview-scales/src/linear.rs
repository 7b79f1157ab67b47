use figview_common::array;

use crate::scale::ContinuousScale;

#[derive(Clone, Debug)]
pub struct LinearScaleConfig {
    pub domain: (f32, f32),
    pub range: (f32, f32),
    pub clamp: bool,
    pub nice: Option<usize>,
}

impl Default for LinearScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            nice: None,
        }
    }
}

/// An affine scale mapping a numeric data domain to a pixel range.
/// Supports clamping, domain niceing, and tick generation.
#[derive(Clone, Debug)]
pub struct LinearScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
    clamp: bool,
}

impl LinearScale {
    pub fn new(config: &LinearScaleConfig) -> Self {
        let mut this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
        };

        if let Some(nice) = config.nice {
            this = this.nice(Some(nice));
        }

        this
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<usize>) -> Self {
        if self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
        {
            return self;
        }

        let reversed = self.domain_start > self.domain_end;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let count = count.unwrap_or(10) as f32;
        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = array::tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * -step).floor() / -step;
                stop = (stop * -step).ceil() / -step;
            } else {
                break;
            }
            prestep = step;
        }

        if reversed {
            self.domain_start = stop;
            self.domain_end = start;
        } else {
            self.domain_start = start;
            self.domain_end = stop;
        }
        self
    }

    pub fn with_domain(mut self, domain: (f32, f32)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    fn degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }
}

impl ContinuousScale for LinearScale {
    fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn scale(&self, value: f32) -> f32 {
        // Degenerate domains collapse to range start (d3 behavior)
        if self.degenerate() {
            return self.range_start;
        }

        let k = (self.range_end - self.range_start) / (self.domain_end - self.domain_start);
        let px = self.range_start + (value - self.domain_start) * k;
        if self.clamp {
            let (lo, hi) = if self.range_start <= self.range_end {
                (self.range_start, self.range_end)
            } else {
                (self.range_end, self.range_start)
            };
            px.clamp(lo, hi)
        } else {
            px
        }
    }

    fn invert(&self, pixel: f32) -> f32 {
        if self.degenerate() {
            return self.domain_start;
        }

        let pixel = if self.clamp {
            let (lo, hi) = if self.range_start <= self.range_end {
                (self.range_start, self.range_end)
            } else {
                (self.range_end, self.range_start)
            };
            pixel.clamp(lo, hi)
        } else {
            pixel
        };

        let k = (self.domain_end - self.domain_start) / (self.range_end - self.range_start);
        self.domain_start + (pixel - self.range_start) * k
    }

    fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        array::ticks(self.domain_start, self.domain_end, count.unwrap_or(10.0))
    }

    fn set_range(&mut self, range: (f32, f32)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_defaults() {
        let scale = LinearScale::new(&Default::default());
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(scale.range(), (0.0, 1.0));
    }

    #[test]
    fn test_scale_and_clamp() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            clamp: true,
            ..Default::default()
        });

        assert_approx_eq!(f32, scale.scale(0.0), 0.0); // clamped
        assert_approx_eq!(f32, scale.scale(10.0), 0.0);
        assert_approx_eq!(f32, scale.scale(15.0), 25.0);
        assert_approx_eq!(f32, scale.scale(25.0), 75.0);
        assert_approx_eq!(f32, scale.scale(30.0), 100.0);
        assert_approx_eq!(f32, scale.scale(40.0), 100.0); // clamped
    }

    #[test]
    fn test_invert_unclamped_extrapolates() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            ..Default::default()
        });

        assert_approx_eq!(f32, scale.invert(-25.0), 5.0);
        assert_approx_eq!(f32, scale.invert(50.0), 20.0);
        assert_approx_eq!(f32, scale.invert(125.0), 35.0);
    }

    #[test]
    fn test_invert_reversed_range() {
        // Screen y ranges run top-down, so reversed ranges are the norm
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (200.0, 0.0),
            ..Default::default()
        });

        assert_approx_eq!(f32, scale.scale(0.0), 200.0);
        assert_approx_eq!(f32, scale.scale(10.0), 0.0);
        assert_approx_eq!(f32, scale.invert(100.0), 5.0);
    }

    #[test]
    fn test_roundtrip() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (-4.0, 12.5),
            range: (0.0, 640.0),
            ..Default::default()
        });
        for v in [-4.0, -1.25, 0.0, 3.7, 12.5] {
            assert_approx_eq!(f32, scale.invert(scale.scale(v)), v, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (10.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });
        assert_approx_eq!(f32, scale.scale(0.0), 0.0);
        assert_approx_eq!(f32, scale.scale(20.0), 0.0);
        assert_approx_eq!(f32, scale.invert(50.0), 10.0);
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });
        assert_eq!(scale.ticks(Some(5.0)), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(scale.ticks(Some(2.0)), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_nice() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (1.1, 10.9),
            nice: Some(10),
            ..Default::default()
        });
        assert_eq!(scale.domain(), (1.0, 11.0));
    }
}
