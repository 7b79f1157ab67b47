use figview_common::transform::Transform;
use figview_scales::{ContinuousScale, Scale};

use crate::axis::{Axis, AxisDimension};
use crate::spec::GridStyle;

/// One segment of a grid, in view-space panel pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: [f32; 2],
    pub end: [f32; 2],
}

/// Grid lines mirroring an axis's visible ticks across the panel interior.
/// Positions track pan/zoom; extents always span the full panel.
#[derive(Debug, Clone)]
pub struct Grid {
    pub dimension: AxisDimension,
    pub minor: bool,
    pub style: GridStyle,
    pub zorder: f32,
}

impl Grid {
    pub fn new(dimension: AxisDimension, minor: bool, style: GridStyle) -> Self {
        Self {
            dimension,
            minor,
            style,
            zorder: 0.0,
        }
    }

    pub fn lines(
        &self,
        axis: &Axis,
        scale: &Scale,
        transform: &Transform,
        panel_width: f32,
        panel_height: f32,
    ) -> Vec<GridLine> {
        let values = if self.minor {
            axis.minor_tick_values()
        } else {
            axis.tick_values()
        };

        values
            .iter()
            .map(|v| {
                let base = scale.scale(*v);
                match self.dimension {
                    AxisDimension::X => {
                        let x = transform.apply_x(base);
                        GridLine {
                            start: [x, 0.0],
                            end: [x, panel_height],
                        }
                    }
                    AxisDimension::Y => {
                        let y = transform.apply_y(base);
                        GridLine {
                            start: [0.0, y],
                            end: [panel_width, y],
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;
    use crate::spec::AxisSpec;
    use figview_scales::{LinearScale, LinearScaleConfig};
    use float_cmp::assert_approx_eq;

    fn x_scale() -> Scale {
        LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 400.0),
            ..Default::default()
        })
        .into()
    }

    #[test]
    fn test_lines_mirror_axis_ticks() {
        let scale = x_scale();
        let mut axis = Axis::from_spec(AxisSpec {
            position: AxisPosition::Bottom,
            tickvalues: Some(vec![2.0, 5.0, 8.0]),
            ..Default::default()
        });
        axis.refresh(&scale, (0.0, 10.0));

        let grid = Grid::new(AxisDimension::X, false, GridStyle::default());
        let lines = grid.lines(&axis, &scale, &Transform::identity(), 400.0, 300.0);

        assert_eq!(lines.len(), 3);
        assert_approx_eq!(f32, lines[0].start[0], 80.0);
        assert_approx_eq!(f32, lines[1].start[0], 200.0);
        // vertical lines span the full panel height
        assert_approx_eq!(f32, lines[0].start[1], 0.0);
        assert_approx_eq!(f32, lines[0].end[1], 300.0);
    }

    #[test]
    fn test_lines_track_transform() {
        let scale = x_scale();
        let mut axis = Axis::from_spec(AxisSpec {
            position: AxisPosition::Bottom,
            tickvalues: Some(vec![5.0]),
            ..Default::default()
        });
        axis.refresh(&scale, (0.0, 10.0));

        let grid = Grid::new(AxisDimension::X, false, GridStyle::default());
        let zoomed = Transform::new(-100.0, 0.0, 2.0);
        let lines = grid.lines(&axis, &scale, &zoomed, 400.0, 300.0);
        assert_approx_eq!(f32, lines[0].start[0], 300.0);
    }
}
