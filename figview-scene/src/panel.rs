use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use figview_common::transform::Transform;
use figview_scales::{
    ContinuousScale, DateScale, DateScaleConfig, LinearScale, LinearScaleConfig, LogScale,
    LogScaleConfig, Scale, ScaleKind,
};

use crate::axis::{Axis, AxisDimension};
use crate::coordinates::{CoordinateContext, CoordinateSystem, PanelProjection};
use crate::element::{CollectionElement, Drawable, Element, ElementKind, PointSeriesElement, TextElement};
use crate::error::FigviewSceneError;
use crate::grid::{Grid, GridLine};
use crate::spec::{DomainEndpoint, PanelSpec, Record};

pub type PanelId = usize;

pub(crate) struct IdGenerator {
    prefix: String,
    counter: usize,
}

impl IdGenerator {
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
        }
    }

    pub(crate) fn next(&mut self) -> String {
        self.counter += 1;
        format!("{}-el{}", self.prefix, self.counter)
    }
}

/// One subplot: base scales fixed at construction, a live view transform
/// on top, axes with visibility-filtered ticks, grids, and child elements
/// split into zoom-reactive and static layers.
#[derive(Debug, Clone)]
pub struct Panel {
    pub index: PanelId,
    pub id: String,
    /// Panel origin in figure pixels, measured from the top-left corner
    pub position: [f32; 2],
    pub width: f32,
    pub height: f32,
    pub x_scale: Scale,
    pub y_scale: Scale,
    /// Live pan/zoom state; the base scales are never mutated by gestures
    pub transform: Transform,
    pub zoomable: bool,
    pub frame_on: bool,
    /// Panels whose x view must follow this panel's
    pub shared_x: Vec<PanelId>,
    /// Panels whose y view must follow this panel's
    pub shared_y: Vec<PanelId>,
    /// Overlaid panels occupying the same figure region
    pub twins: Vec<PanelId>,
    pub axes: Vec<Axis>,
    pub grids: Vec<Grid>,
    pub elements: Vec<Element>,
    reactive_layer: Vec<usize>,
    static_layer: Vec<usize>,
    pub(crate) sharex_refs: Vec<String>,
    pub(crate) sharey_refs: Vec<String>,
}

impl Panel {
    pub(crate) fn from_spec(
        index: PanelId,
        spec: PanelSpec,
        fig_width: f32,
        fig_height: f32,
        ids: &mut IdGenerator,
    ) -> Result<Self, FigviewSceneError> {
        let id = spec.id.clone().unwrap_or_else(|| ids.next());

        let [bx, by, bw, bh] = spec.bbox;
        let position = [bx * fig_width, (1.0 - by - bh) * fig_height];
        let width = bw * fig_width;
        let height = bh * fig_height;

        let x_scale = build_scale(
            spec.xscale,
            spec.xlim,
            spec.xdomain.as_ref(),
            (0.0, width),
            &id,
            "x",
        )?;
        let y_scale = build_scale(
            spec.yscale,
            spec.ylim,
            spec.ydomain.as_ref(),
            (height, 0.0),
            &id,
            "y",
        )?;

        let axes: Vec<Axis> = spec.axes.into_iter().map(Axis::from_spec).collect();

        let mut grids = Vec::new();
        for axis in &axes {
            if let Some(style) = &axis.grid {
                if style.grid_on {
                    grids.push(Grid::new(axis.dimension(), false, style.clone()));
                }
            }
            if let Some(style) = &axis.minor_grid {
                if style.grid_on {
                    grids.push(Grid::new(axis.dimension(), true, style.clone()));
                }
            }
        }

        let context = CoordinateContext::Panel(index);
        let mut elements = Vec::new();

        for line in spec.lines {
            let coords = CoordinateSystem::new(line.coordinates, context)?;
            elements.push(Element {
                id: line.id.unwrap_or_else(|| ids.next()),
                zorder: line.zorder,
                kind: ElementKind::Line(PointSeriesElement::new(
                    line.data,
                    line.xindex,
                    line.yindex,
                    coords,
                )),
            });
        }
        for path in spec.paths {
            let coords = CoordinateSystem::new(path.coordinates, context)?;
            elements.push(Element {
                id: path.id.unwrap_or_else(|| ids.next()),
                zorder: path.zorder,
                kind: ElementKind::Path(PointSeriesElement::new(
                    path.data,
                    path.xindex,
                    path.yindex,
                    coords,
                )),
            });
        }
        for markers in spec.markers {
            let coords = CoordinateSystem::new(markers.coordinates, context)?;
            elements.push(Element {
                id: markers.id.unwrap_or_else(|| ids.next()),
                zorder: markers.zorder,
                kind: ElementKind::Markers(PointSeriesElement::new(
                    markers.data,
                    markers.xindex,
                    markers.yindex,
                    coords,
                )),
            });
        }
        for text in spec.texts {
            let coords = CoordinateSystem::new(text.coordinates, context)?;
            elements.push(Element {
                id: text.id.unwrap_or_else(|| ids.next()),
                zorder: text.zorder,
                kind: ElementKind::Text(TextElement::new(text.text, text.position, coords)),
            });
        }
        for coll in spec.collections {
            let offset_coords = CoordinateSystem::new(coll.offsetcoordinates, context)?;
            let path_coords = CoordinateSystem::new(coll.pathcoordinates, context)?;
            elements.push(Element {
                id: coll.id.unwrap_or_else(|| ids.next()),
                zorder: coll.zorder,
                kind: ElementKind::Collection(CollectionElement::new(
                    coll.offsets,
                    coll.xindex,
                    coll.yindex,
                    offset_coords,
                    path_coords,
                )),
            });
        }

        elements.sort_by(|a, b| a.zorder.partial_cmp(&b.zorder).unwrap_or(Ordering::Equal));

        let mut panel = Self {
            index,
            id,
            position,
            width,
            height,
            x_scale,
            y_scale,
            transform: Transform::identity(),
            zoomable: spec.zoomable,
            frame_on: spec.frame_on,
            shared_x: vec![],
            shared_y: vec![],
            twins: vec![],
            axes,
            grids,
            elements,
            reactive_layer: vec![],
            static_layer: vec![],
            sharex_refs: spec.sharex,
            sharey_refs: spec.sharey,
        };
        panel.refresh_ticks();
        Ok(panel)
    }

    /// Data interval visible along x through the current transform
    pub fn current_xlim(&self) -> (f32, f32) {
        let (lo, hi) = self.transform.visible_x((0.0, self.width));
        (self.x_scale.invert(lo), self.x_scale.invert(hi))
    }

    /// Data interval visible along y through the current transform,
    /// returned bottom-first to match the y scale's domain order
    pub fn current_ylim(&self) -> (f32, f32) {
        let (top, bottom) = self.transform.visible_y((0.0, self.height));
        (self.y_scale.invert(bottom), self.y_scale.invert(top))
    }

    /// Re-filters every axis against the visible data window
    pub fn refresh_ticks(&mut self) {
        let xw = {
            let (lo, hi) = self.transform.visible_x((0.0, self.width));
            (self.x_scale.invert(lo), self.x_scale.invert(hi))
        };
        let yw = {
            let (top, bottom) = self.transform.visible_y((0.0, self.height));
            (self.y_scale.invert(bottom), self.y_scale.invert(top))
        };
        for axis in &mut self.axes {
            match axis.dimension() {
                AxisDimension::X => axis.refresh(&self.x_scale, xw),
                AxisDimension::Y => axis.refresh(&self.y_scale, yw),
            }
        }
    }

    /// Installs a new view transform, refreshing ticks and re-projecting
    /// the zoom-reactive elements
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh_ticks();
        for el in &mut self.elements {
            el.zoomed(&transform);
        }
    }

    /// Projects all elements into pixels and partitions them into the
    /// zoom-reactive and static layers
    pub fn draw(
        &mut self,
        fig_width: f32,
        fig_height: f32,
        data: &IndexMap<String, Vec<Record>>,
    ) -> Result<(), FigviewSceneError> {
        let Panel {
            position,
            width,
            height,
            x_scale,
            y_scale,
            transform,
            elements,
            reactive_layer,
            static_layer,
            ..
        } = self;
        let proj = PanelProjection {
            fig_width,
            fig_height,
            position: *position,
            width: *width,
            height: *height,
            x_scale,
            y_scale,
        };

        reactive_layer.clear();
        static_layer.clear();
        for (i, el) in elements.iter_mut().enumerate() {
            el.draw(&proj, data)?;
            el.zoomed(transform);
            if el.zoomable() {
                reactive_layer.push(i);
            } else {
                static_layer.push(i);
            }
        }
        Ok(())
    }

    /// Element indices that re-project on every view change
    pub fn reactive_layer(&self) -> &[usize] {
        &self.reactive_layer
    }

    /// Element indices projected once at draw time
    pub fn static_layer(&self) -> &[usize] {
        &self.static_layer
    }

    /// Maps a data point to view-space panel pixels
    pub fn to_pixel(&self, x: f32, y: f32) -> [f32; 2] {
        self.transform
            .apply([self.x_scale.scale(x), self.y_scale.scale(y)])
    }

    /// Maps a view-space panel pixel back to data coordinates
    pub fn data_at_pixel(&self, pixel: [f32; 2]) -> (f32, f32) {
        let base = self.transform.unapply(pixel);
        (self.x_scale.invert(base[0]), self.y_scale.invert(base[1]))
    }

    /// View-space grid lines for the current tick sets
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let mut out = Vec::new();
        for grid in &self.grids {
            let (scale, dim) = match grid.dimension {
                AxisDimension::X => (&self.x_scale, AxisDimension::X),
                AxisDimension::Y => (&self.y_scale, AxisDimension::Y),
            };
            if let Some(axis) = self.axes.iter().find(|a| a.dimension() == dim) {
                out.extend(grid.lines(axis, scale, &self.transform, self.width, self.height));
            }
        }
        out
    }

    pub(crate) fn projection<'a>(&'a self, fig_width: f32, fig_height: f32) -> PanelProjection<'a> {
        PanelProjection {
            fig_width,
            fig_height,
            position: self.position,
            width: self.width,
            height: self.height,
            x_scale: &self.x_scale,
            y_scale: &self.y_scale,
        }
    }

    pub(crate) fn overlaps(&self, other: &Panel) -> bool {
        const EPS: f32 = 0.5;
        (self.position[0] - other.position[0]).abs() < EPS
            && (self.position[1] - other.position[1]).abs() < EPS
            && (self.width - other.width).abs() < EPS
            && (self.height - other.height).abs() < EPS
    }
}

fn build_scale(
    kind: ScaleKind,
    lim: [f32; 2],
    domain: Option<&[DomainEndpoint; 2]>,
    range: (f32, f32),
    panel_id: &str,
    dimension: &'static str,
) -> Result<Scale, FigviewSceneError> {
    match kind {
        ScaleKind::Linear => Ok(LinearScale::new(&LinearScaleConfig {
            domain: (lim[0], lim[1]),
            range,
            ..Default::default()
        })
        .into()),
        ScaleKind::Log => Ok(LogScale::new(&LogScaleConfig {
            domain: (lim[0], lim[1]),
            range,
            ..Default::default()
        })?
        .into()),
        ScaleKind::Date => {
            let endpoints = domain.ok_or_else(|| FigviewSceneError::MissingDateDomain {
                panel: panel_id.to_string(),
                dimension,
            })?;
            let start = date_endpoint(&endpoints[0])?;
            let end = date_endpoint(&endpoints[1])?;
            Ok(DateScale::new(&DateScaleConfig {
                domain: (start, end),
                ordinal_domain: (lim[0], lim[1]),
                range,
            })?
            .into())
        }
    }
}

fn date_endpoint(endpoint: &DomainEndpoint) -> Result<NaiveDateTime, FigviewSceneError> {
    match endpoint {
        DomainEndpoint::DateParts(parts) => date_from_parts(parts),
        DomainEndpoint::Number(n) => {
            Err(FigviewSceneError::InvalidDateParts(vec![*n as f64]))
        }
    }
}

/// `[year, month0, day, hour, minute, second]` with a zero-based month
fn date_from_parts(parts: &[f64; 6]) -> Result<NaiveDateTime, FigviewSceneError> {
    NaiveDate::from_ymd_opt(parts[0] as i32, parts[1] as u32 + 1, parts[2] as u32)
        .and_then(|d| d.and_hms_opt(parts[3] as u32, parts[4] as u32, parts[5] as u32))
        .ok_or_else(|| FigviewSceneError::InvalidDateParts(parts.to_vec()))
}
