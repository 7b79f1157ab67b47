use figview_common::array;

use crate::error::FigviewScaleError;
use crate::scale::ContinuousScale;

/// Logarithm/power pair for a fixed base, specialized for the common bases
#[derive(Clone, Debug)]
enum LogFunction {
    Base10,
    Base2,
    Natural,
    Custom { base: f32, ln_base: f32 },
}

impl LogFunction {
    fn new(base: f32) -> Self {
        if base == 10.0 {
            LogFunction::Base10
        } else if base == 2.0 {
            LogFunction::Base2
        } else if base == std::f32::consts::E {
            LogFunction::Natural
        } else {
            LogFunction::Custom {
                base,
                ln_base: base.ln(),
            }
        }
    }

    fn log(&self, x: f32) -> f32 {
        match self {
            LogFunction::Base10 => x.log10(),
            LogFunction::Base2 => x.log2(),
            LogFunction::Natural => x.ln(),
            LogFunction::Custom { ln_base, .. } => x.ln() / ln_base,
        }
    }

    fn pow(&self, x: f32) -> f32 {
        match self {
            LogFunction::Base10 => 10.0f32.powf(x),
            LogFunction::Base2 => 2.0f32.powf(x),
            LogFunction::Natural => x.exp(),
            LogFunction::Custom { base, .. } => base.powf(x),
        }
    }

    fn base(&self) -> f32 {
        match self {
            LogFunction::Base10 => 10.0,
            LogFunction::Base2 => 2.0,
            LogFunction::Natural => std::f32::consts::E,
            LogFunction::Custom { base, .. } => *base,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogScaleConfig {
    pub domain: (f32, f32),
    pub range: (f32, f32),
    pub base: f32,
    pub clamp: bool,
}

impl Default for LogScaleConfig {
    fn default() -> Self {
        Self {
            domain: (1.0, 10.0),
            range: (0.0, 1.0),
            base: 10.0,
            clamp: false,
        }
    }
}

/// A scale affine in `log(value)`. The domain must be strictly positive;
/// construction fails fast on a non-positive bound so draw-time mapping
/// never has to handle it.
#[derive(Clone, Debug)]
pub struct LogScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
    clamp: bool,
    log_fun: LogFunction,
}

impl LogScale {
    pub fn new(config: &LogScaleConfig) -> Result<Self, FigviewScaleError> {
        if !(config.base > 1.0) || !config.base.is_finite() {
            return Err(FigviewScaleError::InvalidLogBase(config.base));
        }
        if !(config.domain.0 > 0.0 && config.domain.1 > 0.0) {
            return Err(FigviewScaleError::NonPositiveLogDomain(
                config.domain.0,
                config.domain.1,
            ));
        }

        Ok(Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            log_fun: LogFunction::new(config.base),
        })
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

    pub fn base(&self) -> f32 {
        self.log_fun.base()
    }

    /// Minor tick values: k * base^e for integer k in (1, base), restricted
    /// to the given domain window.
    pub fn minor_ticks(&self, domain: (f32, f32)) -> Vec<f32> {
        let (lo, hi) = if domain.0 <= domain.1 {
            (domain.0, domain.1)
        } else {
            (domain.1, domain.0)
        };
        if !(lo > 0.0 && hi > 0.0) {
            return vec![];
        }

        let base = self.log_fun.base();
        if (base - base.round()).abs() > f32::EPSILON || base < 3.0 {
            return vec![];
        }

        let e0 = self.log_fun.log(lo).floor() as i32;
        let e1 = self.log_fun.log(hi).ceil() as i32;
        let mut out = Vec::new();
        for exp in e0..=e1 {
            let decade = self.log_fun.pow(exp as f32);
            for k in 2..(base as i32) {
                let t = k as f32 * decade;
                if t < lo {
                    continue;
                }
                if t > hi {
                    break;
                }
                out.push(t);
            }
        }
        out
    }

    fn log_domain(&self) -> (f32, f32) {
        (
            self.log_fun.log(self.domain_start),
            self.log_fun.log(self.domain_end),
        )
    }

    /// Powers of the base inside an arbitrary domain window, for views that
    /// show only part of the domain. Falls back to log-spaced linear ticks
    /// when the window spans too many decades for the requested count.
    pub fn ticks_in(&self, window: (f32, f32), count: Option<f32>) -> Vec<f32> {
        let count = count.unwrap_or(10.0);
        let (mut u, mut v) = window;
        let reverse = v < u;
        if reverse {
            std::mem::swap(&mut u, &mut v);
        }
        if !(u > 0.0 && v > 0.0) {
            return vec![];
        }

        let i = self.log_fun.log(u);
        let j = self.log_fun.log(v);

        let mut z: Vec<f32> = if j - i < count {
            ((i.floor() as i32)..=(j.ceil() as i32))
                .map(|exp| self.log_fun.pow(exp as f32))
                .filter(|&t| t >= u && t <= v)
                .collect()
        } else {
            array::ticks(i, j, count.min(j - i))
                .into_iter()
                .map(|x| self.log_fun.pow(x))
                .collect()
        };

        if reverse {
            z.reverse();
        }
        z
    }
}

impl ContinuousScale for LogScale {
    fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn scale(&self, value: f32) -> f32 {
        let (ld0, ld1) = self.log_domain();
        if ld0 == ld1 || self.range_start == self.range_end {
            return self.range_start;
        }

        let k = (self.range_end - self.range_start) / (ld1 - ld0);
        let px = self.range_start + (self.log_fun.log(value) - ld0) * k;
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
        let (ld0, ld1) = self.log_domain();
        if ld0 == ld1 || self.range_start == self.range_end {
            return self.domain_start;
        }

        let k = (ld1 - ld0) / (self.range_end - self.range_start);
        self.log_fun.pow(ld0 + (pixel - self.range_start) * k)
    }

    fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        self.ticks_in((self.domain_start, self.domain_end), count)
    }

    fn set_range(&mut self, range: (f32, f32)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }
}
