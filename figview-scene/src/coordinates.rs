use serde::{Deserialize, Serialize};
use strum::VariantNames;

use figview_scales::{ContinuousScale, Scale};

use crate::error::FigviewSceneError;
use crate::panel::PanelId;

/// Coordinate unit an element's positions are expressed in.
///
/// `data` positions run through a panel's scales and track pan/zoom;
/// `axes` positions are panel fractions with y up; `figure` positions are
/// figure fractions with y up; `display` positions are raw pixels. Only
/// `data` is zoomable.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoordinateUnit {
    #[default]
    Data,
    Axes,
    Figure,
    Display,
}

impl CoordinateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateUnit::Data => "data",
            CoordinateUnit::Axes => "axes",
            CoordinateUnit::Figure => "figure",
            CoordinateUnit::Display => "display",
        }
    }

    /// Parses a unit code, reporting the valid codes on failure
    pub fn parse(code: &str) -> Result<Self, FigviewSceneError> {
        match code {
            "data" => Ok(CoordinateUnit::Data),
            "axes" => Ok(CoordinateUnit::Axes),
            "figure" => Ok(CoordinateUnit::Figure),
            "display" => Ok(CoordinateUnit::Display),
            _ => Err(FigviewSceneError::UnrecognizedCoordinateUnit {
                code: code.to_string(),
                valid: CoordinateUnit::VARIANTS,
            }),
        }
    }

    /// Whether positions in this unit move under pan/zoom
    pub fn zoomable(&self) -> bool {
        matches!(self, CoordinateUnit::Data)
    }
}

impl std::fmt::Display for CoordinateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a coordinate system is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateContext {
    Figure,
    Panel(PanelId),
}

/// A validated (unit, context) pair. `data` and `axes` units require a
/// panel context, checked once here so projection never has to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateSystem {
    unit: CoordinateUnit,
    context: CoordinateContext,
}

impl CoordinateSystem {
    pub fn new(
        unit: CoordinateUnit,
        context: CoordinateContext,
    ) -> Result<Self, FigviewSceneError> {
        if matches!(unit, CoordinateUnit::Data | CoordinateUnit::Axes)
            && context == CoordinateContext::Figure
        {
            return Err(FigviewSceneError::MissingPanelContext(
                unit.as_str().to_string(),
            ));
        }
        Ok(Self { unit, context })
    }

    pub fn unit(&self) -> CoordinateUnit {
        self.unit
    }

    pub fn context(&self) -> CoordinateContext {
        self.context
    }

    pub fn panel(&self) -> Option<PanelId> {
        match self.context {
            CoordinateContext::Panel(id) => Some(id),
            CoordinateContext::Figure => None,
        }
    }

    pub fn zoomable(&self) -> bool {
        self.unit.zoomable()
    }
}

/// Snapshot of the geometry needed to project positions into a panel's
/// local pixel space. Pixels are untransformed; the live pan/zoom
/// transform is applied afterwards to zoomable elements only.
pub struct PanelProjection<'a> {
    pub fig_width: f32,
    pub fig_height: f32,
    /// Panel origin in figure pixels, measured from the top-left corner
    pub position: [f32; 2],
    pub width: f32,
    pub height: f32,
    pub x_scale: &'a Scale,
    pub y_scale: &'a Scale,
}

impl PanelProjection<'_> {
    pub fn x(&self, unit: CoordinateUnit, v: f32) -> f32 {
        match unit {
            CoordinateUnit::Data => self.x_scale.scale(v),
            CoordinateUnit::Axes => v * self.width,
            CoordinateUnit::Figure => v * self.fig_width - self.position[0],
            CoordinateUnit::Display => v,
        }
    }

    pub fn y(&self, unit: CoordinateUnit, v: f32) -> f32 {
        match unit {
            CoordinateUnit::Data => self.y_scale.scale(v),
            // fraction units measure y up; pixels measure y down
            CoordinateUnit::Axes => self.height * (1.0 - v),
            CoordinateUnit::Figure => (1.0 - v) * self.fig_height - self.position[1],
            CoordinateUnit::Display => v,
        }
    }

    pub fn point(&self, unit: CoordinateUnit, x: f32, y: f32) -> [f32; 2] {
        [self.x(unit, x), self.y(unit, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figview_scales::{LinearScale, LinearScaleConfig};
    use float_cmp::assert_approx_eq;

    fn projection<'a>(x_scale: &'a Scale, y_scale: &'a Scale) -> PanelProjection<'a> {
        PanelProjection {
            fig_width: 640.0,
            fig_height: 480.0,
            position: [64.0, 48.0],
            width: 512.0,
            height: 384.0,
            x_scale,
            y_scale,
        }
    }

    fn scales() -> (Scale, Scale) {
        let x = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 512.0),
            ..Default::default()
        });
        let y = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 1.0),
            range: (384.0, 0.0),
            ..Default::default()
        });
        (x.into(), y.into())
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(CoordinateUnit::parse("axes").unwrap(), CoordinateUnit::Axes);
        let err = CoordinateUnit::parse("polar").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("polar"));
        assert!(msg.contains("data"));
        assert!(msg.contains("display"));
    }

    #[test]
    fn test_panel_required_for_data_units() {
        assert!(CoordinateSystem::new(CoordinateUnit::Data, CoordinateContext::Figure).is_err());
        assert!(CoordinateSystem::new(CoordinateUnit::Axes, CoordinateContext::Figure).is_err());
        assert!(
            CoordinateSystem::new(CoordinateUnit::Figure, CoordinateContext::Figure).is_ok()
        );
        assert!(
            CoordinateSystem::new(CoordinateUnit::Display, CoordinateContext::Figure).is_ok()
        );
        assert!(CoordinateSystem::new(CoordinateUnit::Data, CoordinateContext::Panel(0)).is_ok());
    }

    #[test]
    fn test_only_data_zoomable() {
        assert!(CoordinateUnit::Data.zoomable());
        assert!(!CoordinateUnit::Axes.zoomable());
        assert!(!CoordinateUnit::Figure.zoomable());
        assert!(!CoordinateUnit::Display.zoomable());
    }

    #[test]
    fn test_axes_fraction_inverts_y() {
        let (x, y) = scales();
        let proj = projection(&x, &y);
        assert_approx_eq!(f32, proj.y(CoordinateUnit::Axes, 0.0), 384.0);
        assert_approx_eq!(f32, proj.y(CoordinateUnit::Axes, 1.0), 0.0);
        assert_approx_eq!(f32, proj.x(CoordinateUnit::Axes, 0.5), 256.0);
    }

    #[test]
    fn test_figure_fraction_offsets_by_panel_position() {
        let (x, y) = scales();
        let proj = projection(&x, &y);
        // figure fraction (0.1, 0.9) is at figure pixel (64, 48), the
        // panel's own origin
        assert_approx_eq!(f32, proj.x(CoordinateUnit::Figure, 0.1), 0.0, epsilon = 1e-4);
        assert_approx_eq!(f32, proj.y(CoordinateUnit::Figure, 0.9), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_data_unit_runs_through_scales() {
        let (x, y) = scales();
        let proj = projection(&x, &y);
        let p = proj.point(CoordinateUnit::Data, 5.0, 0.0);
        assert_approx_eq!(f32, p[0], 256.0);
        assert_approx_eq!(f32, p[1], 384.0);
    }

    #[test]
    fn test_display_identity() {
        let (x, y) = scales();
        let proj = projection(&x, &y);
        assert_approx_eq!(f32, proj.x(CoordinateUnit::Display, 123.0), 123.0);
        assert_approx_eq!(f32, proj.y(CoordinateUnit::Display, 45.0), 45.0);
    }
}
