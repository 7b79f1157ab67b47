use chrono::{Duration, NaiveDateTime};
use figview_common::array;

use crate::error::FigviewScaleError;
use crate::scale::ContinuousScale;

#[derive(Clone, Debug)]
pub struct DateScaleConfig {
    /// True date instants at the domain endpoints
    pub domain: (NaiveDateTime, NaiveDateTime),
    /// The plotting tool's ordinal-float encoding of those same endpoints
    pub ordinal_domain: (f32, f32),
    pub range: (f32, f32),
}

/// A temporal scale driven by ordinal-float date values.
///
/// The exporting tool hands us data as ordinal floats together with the
/// date instants they correspond to, so the exposed forward mapping is the
/// composition `pixel = date_map(ordinal_map(ordinal))`. Because both maps
/// are affine, pixels are computed directly from the ordinal interval and
/// the date endpoints are kept for readouts and tick labelling.
#[derive(Clone, Debug)]
pub struct DateScale {
    date_start: NaiveDateTime,
    date_end: NaiveDateTime,
    ordinal_start: f32,
    ordinal_end: f32,
    range_start: f32,
    range_end: f32,
}

impl DateScale {
    pub fn new(config: &DateScaleConfig) -> Result<Self, FigviewScaleError> {
        if config.domain.1 < config.domain.0 {
            return Err(FigviewScaleError::ReversedDateDomain(
                config.domain.0,
                config.domain.1,
            ));
        }
        if config.ordinal_domain.0 == config.ordinal_domain.1 {
            return Err(FigviewScaleError::DegenerateOrdinalDomain(
                config.ordinal_domain.0,
                config.ordinal_domain.1,
            ));
        }

        Ok(Self {
            date_start: config.domain.0,
            date_end: config.domain.1,
            ordinal_start: config.ordinal_domain.0,
            ordinal_end: config.ordinal_domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
        })
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn date_domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.date_start, self.date_end)
    }

    fn fraction(&self, ordinal: f32) -> f32 {
        (ordinal - self.ordinal_start) / (self.ordinal_end - self.ordinal_start)
    }

    /// The date instant an ordinal value represents
    pub fn date_at(&self, ordinal: f32) -> NaiveDateTime {
        let span_ms = (self.date_end - self.date_start).num_milliseconds();
        // day-scale ordinals exceed f32 sub-second precision, so the
        // fraction is taken in f64 and rounded to whole milliseconds
        let frac = (ordinal as f64 - self.ordinal_start as f64)
            / (self.ordinal_end as f64 - self.ordinal_start as f64);
        let offset = Duration::milliseconds((span_ms as f64 * frac).round() as i64);
        self.date_start + offset
    }

    /// The ordinal encoding of a date instant
    pub fn ordinal_at(&self, date: NaiveDateTime) -> f32 {
        let span_ms = (self.date_end - self.date_start).num_milliseconds();
        if span_ms == 0 {
            return self.ordinal_start;
        }
        let offset_ms = (date - self.date_start).num_milliseconds();
        let frac = offset_ms as f64 / span_ms as f64;
        self.ordinal_start + frac as f32 * (self.ordinal_end - self.ordinal_start)
    }

    /// Tick positions mapped to their date instants, for label formatting
    pub fn tick_dates(&self, count: Option<f32>) -> Vec<(f32, NaiveDateTime)> {
        self.ticks(count)
            .into_iter()
            .map(|t| (t, self.date_at(t)))
            .collect()
    }
}

impl ContinuousScale for DateScale {
    fn domain(&self) -> (f32, f32) {
        (self.ordinal_start, self.ordinal_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn scale(&self, ordinal: f32) -> f32 {
        self.range_start + self.fraction(ordinal) * (self.range_end - self.range_start)
    }

    fn invert(&self, pixel: f32) -> f32 {
        if self.range_start == self.range_end {
            return self.ordinal_start;
        }
        let frac = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.ordinal_start + frac * (self.ordinal_end - self.ordinal_start)
    }

    fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        array::ticks(self.ordinal_start, self.ordinal_end, count.unwrap_or(10.0))
    }

    fn set_range(&mut self, range: (f32, f32)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }
}
