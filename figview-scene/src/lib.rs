pub mod axis;
pub mod coordinates;
pub mod element;
pub mod error;
pub mod figure;
pub mod grid;
pub mod panel;
pub mod registry;
pub mod spec;

pub use axis::{Axis, AxisDimension, AxisPosition};
pub use coordinates::{CoordinateContext, CoordinateSystem, CoordinateUnit, PanelProjection};
pub use element::{
    CollectionElement, Drawable, Element, ElementKind, PointSeriesElement, TextElement,
};
pub use error::FigviewSceneError;
pub use figure::{ElementRef, Figure};
pub use grid::{Grid, GridLine};
pub use panel::{Panel, PanelId};
pub use registry::{FigurePlugin, PluginFactory, PluginRegistry};
pub use spec::{DataRef, FigureSpec, PanelSpec, PluginSpec, Record};
