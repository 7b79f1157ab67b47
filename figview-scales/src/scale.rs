use figview_common::array;
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::date::DateScale;
use crate::linear::LinearScale;
use crate::log::LogScale;

/// One-dimensional invertible mapping from a data domain to a pixel range
pub trait ContinuousScale {
    fn domain(&self) -> (f32, f32);
    fn range(&self) -> (f32, f32);
    fn scale(&self, value: f32) -> f32;
    fn invert(&self, pixel: f32) -> f32;
    fn ticks(&self, count: Option<f32>) -> Vec<f32>;
    fn set_range(&mut self, range: (f32, f32));
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Date,
}

#[derive(Clone, Debug)]
pub enum Scale {
    Linear(LinearScale),
    Log(LogScale),
    Date(DateScale),
}

impl Scale {
    pub fn kind(&self) -> ScaleKind {
        match self {
            Scale::Linear(_) => ScaleKind::Linear,
            Scale::Log(_) => ScaleKind::Log,
            Scale::Date(_) => ScaleKind::Date,
        }
    }

    pub fn as_date(&self) -> Option<&DateScale> {
        match self {
            Scale::Date(scale) => Some(scale),
            _ => None,
        }
    }

    pub fn as_log(&self) -> Option<&LogScale> {
        match self {
            Scale::Log(scale) => Some(scale),
            _ => None,
        }
    }

    /// Tick values inside an arbitrary domain window, for views that show
    /// only part of the domain.
    pub fn ticks_in(&self, window: (f32, f32), count: Option<f32>) -> Vec<f32> {
        match self {
            Scale::Log(scale) => scale.ticks_in(window, count),
            Scale::Linear(_) | Scale::Date(_) => {
                array::ticks(window.0, window.1, count.unwrap_or(10.0))
            }
        }
    }
}

impl ContinuousScale for Scale {
    fn domain(&self) -> (f32, f32) {
        match self {
            Scale::Linear(scale) => scale.domain(),
            Scale::Log(scale) => scale.domain(),
            Scale::Date(scale) => scale.domain(),
        }
    }

    fn range(&self) -> (f32, f32) {
        match self {
            Scale::Linear(scale) => scale.range(),
            Scale::Log(scale) => scale.range(),
            Scale::Date(scale) => scale.range(),
        }
    }

    fn scale(&self, value: f32) -> f32 {
        match self {
            Scale::Linear(scale) => scale.scale(value),
            Scale::Log(scale) => scale.scale(value),
            Scale::Date(scale) => scale.scale(value),
        }
    }

    fn invert(&self, pixel: f32) -> f32 {
        match self {
            Scale::Linear(scale) => scale.invert(pixel),
            Scale::Log(scale) => scale.invert(pixel),
            Scale::Date(scale) => scale.invert(pixel),
        }
    }

    fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        match self {
            Scale::Linear(scale) => scale.ticks(count),
            Scale::Log(scale) => scale.ticks(count),
            Scale::Date(scale) => scale.ticks(count),
        }
    }

    fn set_range(&mut self, range: (f32, f32)) {
        match self {
            Scale::Linear(scale) => scale.set_range(range),
            Scale::Log(scale) => scale.set_range(range),
            Scale::Date(scale) => scale.set_range(range),
        }
    }
}

impl From<LinearScale> for Scale {
    fn from(scale: LinearScale) -> Self {
        Scale::Linear(scale)
    }
}

impl From<LogScale> for Scale {
    fn from(scale: LogScale) -> Self {
        Scale::Log(scale)
    }
}

impl From<DateScale> for Scale {
    fn from(scale: DateScale) -> Self {
        Scale::Date(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::LinearScaleConfig;
    use crate::log::LogScaleConfig;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_kind_names() {
        assert_eq!(
            serde_json::to_value(ScaleKind::Linear).unwrap(),
            serde_json::json!("linear")
        );
        assert_eq!(
            serde_json::from_str::<ScaleKind>("\"date\"").unwrap(),
            ScaleKind::Date
        );
    }

    #[test]
    fn test_enum_delegation() {
        let scale: Scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        })
        .into();
        assert_eq!(scale.kind(), ScaleKind::Linear);
        assert_approx_eq!(f32, scale.scale(5.0), 50.0);
        assert_approx_eq!(f32, scale.invert(50.0), 5.0);

        let log: Scale = LogScale::new(&LogScaleConfig::default()).unwrap().into();
        assert_eq!(log.kind(), ScaleKind::Log);
        assert!(log.as_log().is_some());
        assert!(log.as_date().is_none());
    }
}
