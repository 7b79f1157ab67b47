use indexmap::IndexMap;

use figview_common::transform::Transform;

use crate::coordinates::{CoordinateSystem, PanelProjection};
use crate::error::FigviewSceneError;
use crate::spec::{DataRef, Record};

pub(crate) fn resolve_data<'a>(
    data: &'a IndexMap<String, Vec<Record>>,
    data_ref: &'a DataRef,
) -> Result<&'a [Record], FigviewSceneError> {
    match data_ref {
        DataRef::Key(key) => data
            .get(key)
            .map(|rows| rows.as_slice())
            .ok_or_else(|| FigviewSceneError::DatasetNotFound(key.clone())),
        DataRef::Literal(rows) => Ok(rows.as_slice()),
    }
}

/// Column lookup that rejects records shorter than the configured index
pub fn column(row: &[f32], index: usize) -> Result<f32, FigviewSceneError> {
    row.get(index)
        .copied()
        .ok_or(FigviewSceneError::RecordTooShort {
            len: row.len(),
            column: index,
        })
}

/// A panel child that projects its positions to pixels and reacts (or
/// not) to the live pan/zoom transform.
pub trait Drawable {
    /// Projects positions into untransformed panel pixels
    fn draw(
        &mut self,
        proj: &PanelProjection,
        data: &IndexMap<String, Vec<Record>>,
    ) -> Result<(), FigviewSceneError>;

    /// Re-projects cached pixels through a new view transform
    fn zoomed(&mut self, transform: &Transform);

    /// Whether any of this element's coordinates move under pan/zoom
    fn zoomable(&self) -> bool;
}

/// Point-sequence geometry shared by lines, paths and marker sets
#[derive(Debug, Clone)]
pub struct PointSeriesElement {
    pub data: DataRef,
    pub xindex: usize,
    pub yindex: usize,
    pub coords: CoordinateSystem,
    base: Vec<[f32; 2]>,
    view: Vec<[f32; 2]>,
}

impl PointSeriesElement {
    pub fn new(data: DataRef, xindex: usize, yindex: usize, coords: CoordinateSystem) -> Self {
        Self {
            data,
            xindex,
            yindex,
            coords,
            base: vec![],
            view: vec![],
        }
    }

    /// Untransformed panel-pixel positions
    pub fn base_points(&self) -> &[[f32; 2]] {
        &self.base
    }

    /// View-space positions after the current transform
    pub fn view_points(&self) -> &[[f32; 2]] {
        &self.view
    }
}

impl Drawable for PointSeriesElement {
    fn draw(
        &mut self,
        proj: &PanelProjection,
        data: &IndexMap<String, Vec<Record>>,
    ) -> Result<(), FigviewSceneError> {
        let rows = resolve_data(data, &self.data)?;
        let mut base = Vec::with_capacity(rows.len());
        for row in rows {
            let x = column(row, self.xindex)?;
            let y = column(row, self.yindex)?;
            base.push(proj.point(self.coords.unit(), x, y));
        }
        self.base = base;
        self.view = self.base.clone();
        Ok(())
    }

    fn zoomed(&mut self, transform: &Transform) {
        if !self.zoomable() {
            return;
        }
        self.view = self.base.iter().map(|p| transform.apply(*p)).collect();
    }

    fn zoomable(&self) -> bool {
        self.coords.zoomable()
    }
}

#[derive(Debug, Clone)]
pub struct TextElement {
    pub text: String,
    pub position: [f32; 2],
    pub coords: CoordinateSystem,
    base: [f32; 2],
    view: [f32; 2],
}

impl TextElement {
    pub fn new(text: String, position: [f32; 2], coords: CoordinateSystem) -> Self {
        Self {
            text,
            position,
            coords,
            base: [0.0, 0.0],
            view: [0.0, 0.0],
        }
    }

    pub fn view_position(&self) -> [f32; 2] {
        self.view
    }
}

impl Drawable for TextElement {
    fn draw(
        &mut self,
        proj: &PanelProjection,
        _data: &IndexMap<String, Vec<Record>>,
    ) -> Result<(), FigviewSceneError> {
        self.base = proj.point(self.coords.unit(), self.position[0], self.position[1]);
        self.view = self.base;
        Ok(())
    }

    fn zoomed(&mut self, transform: &Transform) {
        if !self.zoomable() {
            return;
        }
        self.view = transform.apply(self.base);
    }

    fn zoomable(&self) -> bool {
        self.coords.zoomable()
    }
}

/// Scatter-style collection: per-point offsets, shared path shapes, and a
/// per-point hidden mask driven by linked brushing. Offsets and paths may
/// sit in different coordinate systems; the element is reactive if either
/// one is zoomable.
#[derive(Debug, Clone)]
pub struct CollectionElement {
    pub offsets: DataRef,
    pub xindex: usize,
    pub yindex: usize,
    pub offset_coords: CoordinateSystem,
    pub path_coords: CoordinateSystem,
    base: Vec<[f32; 2]>,
    view: Vec<[f32; 2]>,
    hidden: Vec<bool>,
}

impl CollectionElement {
    pub fn new(
        offsets: DataRef,
        xindex: usize,
        yindex: usize,
        offset_coords: CoordinateSystem,
        path_coords: CoordinateSystem,
    ) -> Self {
        Self {
            offsets,
            xindex,
            yindex,
            offset_coords,
            path_coords,
            base: vec![],
            view: vec![],
            hidden: vec![],
        }
    }

    pub fn view_offsets(&self) -> &[[f32; 2]] {
        &self.view
    }

    pub fn hidden(&self) -> &[bool] {
        &self.hidden
    }

    pub fn set_hidden(&mut self, flags: Vec<bool>) {
        self.hidden = flags;
    }

    pub fn clear_hidden(&mut self) {
        for flag in &mut self.hidden {
            *flag = false;
        }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

impl Drawable for CollectionElement {
    fn draw(
        &mut self,
        proj: &PanelProjection,
        data: &IndexMap<String, Vec<Record>>,
    ) -> Result<(), FigviewSceneError> {
        let rows = resolve_data(data, &self.offsets)?;
        let mut base = Vec::with_capacity(rows.len());
        for row in rows {
            let x = column(row, self.xindex)?;
            let y = column(row, self.yindex)?;
            base.push(proj.point(self.offset_coords.unit(), x, y));
        }
        self.base = base;
        self.view = self.base.clone();
        if self.hidden.len() != self.base.len() {
            self.hidden = vec![false; self.base.len()];
        }
        Ok(())
    }

    fn zoomed(&mut self, transform: &Transform) {
        if !self.offset_coords.zoomable() {
            return;
        }
        self.view = self.base.iter().map(|p| transform.apply(*p)).collect();
    }

    fn zoomable(&self) -> bool {
        self.offset_coords.zoomable() || self.path_coords.zoomable()
    }
}

#[derive(Debug, Clone)]
pub enum ElementKind {
    Line(PointSeriesElement),
    Path(PointSeriesElement),
    Markers(PointSeriesElement),
    Text(TextElement),
    Collection(CollectionElement),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub zorder: f32,
    pub kind: ElementKind,
}

impl Element {
    pub fn as_collection(&self) -> Option<&CollectionElement> {
        match &self.kind {
            ElementKind::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut CollectionElement> {
        match &mut self.kind {
            ElementKind::Collection(c) => Some(c),
            _ => None,
        }
    }
}

impl Drawable for Element {
    fn draw(
        &mut self,
        proj: &PanelProjection,
        data: &IndexMap<String, Vec<Record>>,
    ) -> Result<(), FigviewSceneError> {
        match &mut self.kind {
            ElementKind::Line(e) | ElementKind::Path(e) | ElementKind::Markers(e) => {
                e.draw(proj, data)
            }
            ElementKind::Text(e) => e.draw(proj, data),
            ElementKind::Collection(e) => e.draw(proj, data),
        }
    }

    fn zoomed(&mut self, transform: &Transform) {
        match &mut self.kind {
            ElementKind::Line(e) | ElementKind::Path(e) | ElementKind::Markers(e) => {
                e.zoomed(transform)
            }
            ElementKind::Text(e) => e.zoomed(transform),
            ElementKind::Collection(e) => e.zoomed(transform),
        }
    }

    fn zoomable(&self) -> bool {
        match &self.kind {
            ElementKind::Line(e) | ElementKind::Path(e) | ElementKind::Markers(e) => e.zoomable(),
            ElementKind::Text(e) => e.zoomable(),
            ElementKind::Collection(e) => e.zoomable(),
        }
    }
}
