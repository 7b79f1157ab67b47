use serde::{Deserialize, Serialize};

use figview_scales::Scale;

use crate::spec::{AxisSpec, GridStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisPosition {
    pub fn dimension(&self) -> AxisDimension {
        match self {
            AxisPosition::Left | AxisPosition::Right => AxisDimension::Y,
            AxisPosition::Top | AxisPosition::Bottom => AxisDimension::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDimension {
    X,
    Y,
}

/// A tick rail along one panel edge.
///
/// Explicit tick values from the spec are filtered against the visible
/// domain on every view change; tick formats ride along by index so a
/// label never detaches from its value. Without explicit values, ticks
/// are regenerated inside the visible window instead.
#[derive(Debug, Clone)]
pub struct Axis {
    pub position: AxisPosition,
    pub nticks: usize,
    pub visible: bool,
    pub zorder: f32,
    tickvalues: Option<Vec<f32>>,
    tickformat: Option<Vec<String>>,
    minor_tickvalues: Option<Vec<f32>>,
    minor_tickformat: Option<Vec<String>>,
    filtered_tickvalues: Vec<f32>,
    filtered_tickformat: Option<Vec<String>>,
    filtered_minor_tickvalues: Vec<f32>,
    filtered_minor_tickformat: Option<Vec<String>>,
    format_pattern: Option<String>,
    pub grid: Option<GridStyle>,
    pub minor_grid: Option<GridStyle>,
}

impl Axis {
    pub fn from_spec(spec: AxisSpec) -> Self {
        Self {
            position: spec.position,
            nticks: spec.nticks,
            visible: spec.visible,
            zorder: spec.zorder,
            tickvalues: spec.tickvalues,
            tickformat: spec.tickformat,
            minor_tickvalues: spec.minor_tickvalues,
            minor_tickformat: spec.minor_tickformat,
            filtered_tickvalues: vec![],
            filtered_tickformat: None,
            filtered_minor_tickvalues: vec![],
            filtered_minor_tickformat: None,
            format_pattern: None,
            grid: spec.grid,
            minor_grid: spec.minor_grid,
        }
    }

    pub fn dimension(&self) -> AxisDimension {
        self.position.dimension()
    }

    /// Replaces the explicit tick values and formats. `None` values return
    /// the axis to automatic tick generation.
    pub fn set_ticks(&mut self, values: Option<Vec<f32>>, formats: Option<Vec<String>>) {
        self.tickvalues = values;
        self.tickformat = formats;
    }

    pub fn set_minor_ticks(&mut self, values: Option<Vec<f32>>, formats: Option<Vec<String>>) {
        self.minor_tickvalues = values;
        self.minor_tickformat = formats;
    }

    pub fn set_nticks(&mut self, nticks: usize) {
        self.nticks = nticks;
    }

    /// Label format pattern for automatically generated ticks. The
    /// pattern is carried opaquely for the label renderer.
    pub fn format_pattern(&self) -> Option<&str> {
        self.format_pattern.as_deref()
    }

    pub fn set_format_pattern(&mut self, pattern: Option<String>) {
        self.format_pattern = pattern;
    }

    /// Recomputes the visible tick set for a data-domain window.
    ///
    /// Explicit values keep only entries inside the window, dropping the
    /// format entry at the same index alongside. Automatic ticks are
    /// regenerated from the scale inside the window. A hidden axis
    /// produces no ticks at all, which also silences its grids.
    pub fn refresh(&mut self, scale: &Scale, window: (f32, f32)) {
        if !self.visible {
            self.filtered_tickvalues.clear();
            self.filtered_tickformat = None;
            self.filtered_minor_tickvalues.clear();
            self.filtered_minor_tickformat = None;
            return;
        }
        let (lo, hi) = normalize(window);

        match &self.tickvalues {
            Some(values) => {
                let (vals, fmts) = filter_indexed(values, self.tickformat.as_deref(), lo, hi);
                self.filtered_tickvalues = vals;
                self.filtered_tickformat = fmts;
            }
            None => {
                self.filtered_tickvalues = scale.ticks_in((lo, hi), Some(self.nticks as f32));
                self.filtered_tickformat = None;
            }
        }

        match &self.minor_tickvalues {
            Some(values) => {
                let (vals, fmts) =
                    filter_indexed(values, self.minor_tickformat.as_deref(), lo, hi);
                self.filtered_minor_tickvalues = vals;
                self.filtered_minor_tickformat = fmts;
            }
            None => {
                // log scales get automatic intra-decade minors
                self.filtered_minor_tickvalues = match scale.as_log() {
                    Some(log) => log.minor_ticks((lo, hi)),
                    None => vec![],
                };
                self.filtered_minor_tickformat = None;
            }
        }
    }

    pub fn tick_values(&self) -> &[f32] {
        &self.filtered_tickvalues
    }

    pub fn tick_formats(&self) -> Option<&[String]> {
        self.filtered_tickformat.as_deref()
    }

    pub fn minor_tick_values(&self) -> &[f32] {
        &self.filtered_minor_tickvalues
    }

    pub fn minor_tick_formats(&self) -> Option<&[String]> {
        self.filtered_minor_tickformat.as_deref()
    }
}

fn normalize(window: (f32, f32)) -> (f32, f32) {
    if window.0 <= window.1 {
        window
    } else {
        (window.1, window.0)
    }
}

fn filter_indexed(
    values: &[f32],
    formats: Option<&[String]>,
    lo: f32,
    hi: f32,
) -> (Vec<f32>, Option<Vec<String>>) {
    match formats {
        Some(formats) if formats.len() == values.len() => {
            let (vals, fmts): (Vec<f32>, Vec<String>) = values
                .iter()
                .zip(formats.iter())
                .filter(|(v, _)| **v >= lo && **v <= hi)
                .map(|(v, f)| (*v, f.clone()))
                .unzip();
            (vals, Some(fmts))
        }
        _ => (
            values.iter().copied().filter(|v| *v >= lo && *v <= hi).collect(),
            None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figview_scales::{LinearScale, LinearScaleConfig, LogScale, LogScaleConfig};

    fn linear(domain: (f32, f32)) -> Scale {
        LinearScale::new(&LinearScaleConfig {
            domain,
            range: (0.0, 400.0),
            ..Default::default()
        })
        .into()
    }

    fn axis(spec: AxisSpec) -> Axis {
        Axis::from_spec(spec)
    }

    #[test]
    fn test_position_dimension() {
        assert_eq!(AxisPosition::Left.dimension(), AxisDimension::Y);
        assert_eq!(AxisPosition::Right.dimension(), AxisDimension::Y);
        assert_eq!(AxisPosition::Top.dimension(), AxisDimension::X);
        assert_eq!(AxisPosition::Bottom.dimension(), AxisDimension::X);
    }

    #[test]
    fn test_explicit_ticks_filtered_to_window() {
        let mut ax = axis(AxisSpec {
            tickvalues: Some(vec![1.0, 5.0, 9.0, 15.0]),
            ..Default::default()
        });
        ax.refresh(&linear((0.0, 10.0)), (0.0, 10.0));
        assert_eq!(ax.tick_values(), &[1.0, 5.0, 9.0]);

        ax.refresh(&linear((0.0, 10.0)), (6.0, 10.0));
        assert_eq!(ax.tick_values(), &[9.0]);
    }

    #[test]
    fn test_formats_follow_their_values() {
        let mut ax = axis(AxisSpec {
            tickvalues: Some(vec![1.0, 5.0, 9.0, 15.0]),
            tickformat: Some(
                ["one", "five", "nine", "fifteen"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            ..Default::default()
        });
        ax.refresh(&linear((0.0, 10.0)), (4.0, 10.0));
        assert_eq!(ax.tick_values(), &[5.0, 9.0]);
        assert_eq!(
            ax.tick_formats().unwrap(),
            &["five".to_string(), "nine".to_string()]
        );
    }

    #[test]
    fn test_reversed_window_normalized() {
        let mut ax = axis(AxisSpec {
            tickvalues: Some(vec![1.0, 5.0, 9.0]),
            ..Default::default()
        });
        ax.refresh(&linear((0.0, 10.0)), (10.0, 2.0));
        assert_eq!(ax.tick_values(), &[5.0, 9.0]);
    }

    #[test]
    fn test_auto_ticks_regenerate_in_window() {
        let mut ax = axis(AxisSpec {
            nticks: 5,
            ..Default::default()
        });
        ax.refresh(&linear((0.0, 10.0)), (0.0, 10.0));
        assert_eq!(ax.tick_values(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        ax.refresh(&linear((0.0, 10.0)), (0.0, 1.0));
        assert_eq!(ax.tick_values(), &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_log_axis_gets_automatic_minors() {
        let scale: Scale = LogScale::new(&LogScaleConfig {
            domain: (1.0, 100.0),
            range: (0.0, 400.0),
            ..Default::default()
        })
        .unwrap()
        .into();
        let mut ax = axis(AxisSpec::default());
        ax.refresh(&scale, (1.0, 100.0));
        assert_eq!(ax.tick_values(), &[1.0, 10.0, 100.0]);
        assert!(ax.minor_tick_values().contains(&2.0));
        assert!(!ax.minor_tick_values().contains(&10.0));
    }

    #[test]
    fn test_hidden_axis_produces_no_ticks() {
        let mut ax = axis(AxisSpec {
            tickvalues: Some(vec![1.0, 5.0, 9.0]),
            ..Default::default()
        });
        ax.refresh(&linear((0.0, 10.0)), (0.0, 10.0));
        assert_eq!(ax.tick_values(), &[1.0, 5.0, 9.0]);

        ax.visible = false;
        ax.refresh(&linear((0.0, 10.0)), (0.0, 10.0));
        assert!(ax.tick_values().is_empty());
        assert!(ax.minor_tick_values().is_empty());
    }

    #[test]
    fn test_set_ticks_overrides() {
        let mut ax = axis(AxisSpec::default());
        ax.set_ticks(Some(vec![0.0, 3.0, 6.0]), None);
        ax.refresh(&linear((0.0, 10.0)), (0.0, 10.0));
        assert_eq!(ax.tick_values(), &[0.0, 3.0, 6.0]);

        ax.set_ticks(None, None);
        ax.set_nticks(5);
        ax.refresh(&linear((0.0, 10.0)), (0.0, 10.0));
        assert_eq!(ax.tick_values(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }
}
