use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use figview_scales::ScaleKind;

use crate::axis::AxisPosition;
use crate::coordinates::CoordinateUnit;

/// One data point: a row of column values, indexed by `xindex`/`yindex`
pub type Record = Vec<f32>;

/// Deserialized figure description. Field names and defaults follow the
/// JSON emitted by plotting-tool exporters, so a figure dict serialized by
/// such an exporter loads without adjustment.
#[derive(Debug, Clone, Deserialize)]
pub struct FigureSpec {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub data: IndexMap<String, Vec<Record>>,
    #[serde(default)]
    pub axes: Vec<PanelSpec>,
    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginSpec>,
}

fn default_plugins() -> Vec<PluginSpec> {
    ["reset", "zoom", "boxzoom"]
        .iter()
        .map(|kind| PluginSpec {
            kind: (*kind).to_string(),
            options: serde_json::Map::new(),
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub options: serde_json::Map<String, Value>,
}

/// A subplot region. `bbox` is `[x, y, width, height]` in figure fractions
/// with y measured up from the bottom edge.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelSpec {
    pub xlim: [f32; 2],
    pub ylim: [f32; 2],
    #[serde(default = "default_bbox")]
    pub bbox: [f32; 4],
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub xscale: ScaleKind,
    #[serde(default)]
    pub yscale: ScaleKind,
    /// Date endpoints as `[year, month0, day, hour, minute, second]`,
    /// present when the matching scale kind is `date`
    #[serde(default)]
    pub xdomain: Option<[DomainEndpoint; 2]>,
    #[serde(default)]
    pub ydomain: Option<[DomainEndpoint; 2]>,
    #[serde(default)]
    pub sharex: Vec<String>,
    #[serde(default)]
    pub sharey: Vec<String>,
    #[serde(default = "default_true")]
    pub frame_on: bool,
    #[serde(default = "default_true")]
    pub zoomable: bool,
    #[serde(default = "default_axes")]
    pub axes: Vec<AxisSpec>,
    #[serde(default)]
    pub lines: Vec<LineSpec>,
    #[serde(default)]
    pub paths: Vec<PathSpec>,
    #[serde(default)]
    pub markers: Vec<MarkerSpec>,
    #[serde(default)]
    pub texts: Vec<TextSpec>,
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
}

fn default_bbox() -> [f32; 4] {
    [0.1, 0.1, 0.8, 0.8]
}

fn default_axes() -> Vec<AxisSpec> {
    vec![
        AxisSpec {
            position: AxisPosition::Left,
            ..Default::default()
        },
        AxisSpec {
            position: AxisPosition::Bottom,
            ..Default::default()
        },
    ]
}

/// A numeric endpoint or a date-parts sextuple with a zero-based month
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DomainEndpoint {
    Number(f32),
    DateParts([f64; 6]),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AxisSpec {
    pub position: AxisPosition,
    #[serde(default = "default_nticks")]
    pub nticks: usize,
    #[serde(default)]
    pub tickvalues: Option<Vec<f32>>,
    #[serde(default)]
    pub tickformat: Option<Vec<String>>,
    #[serde(default)]
    pub minor_tickvalues: Option<Vec<f32>>,
    #[serde(default)]
    pub minor_tickformat: Option<Vec<String>>,
    #[serde(default)]
    pub grid: Option<GridStyle>,
    #[serde(default)]
    pub minor_grid: Option<GridStyle>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub zorder: f32,
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            position: AxisPosition::Bottom,
            nticks: default_nticks(),
            tickvalues: None,
            tickformat: None,
            minor_tickvalues: None,
            minor_tickformat: None,
            grid: None,
            minor_grid: None,
            visible: true,
            zorder: 0.0,
        }
    }
}

fn default_nticks() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridStyle {
    #[serde(default = "default_grid_color")]
    pub color: String,
    #[serde(default = "default_dasharray")]
    pub dasharray: String,
    #[serde(default = "default_grid_alpha")]
    pub alpha: f32,
    #[serde(default = "default_true", rename = "gridOn")]
    pub grid_on: bool,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: default_grid_color(),
            dasharray: default_dasharray(),
            alpha: default_grid_alpha(),
            grid_on: true,
        }
    }
}

fn default_grid_color() -> String {
    "gray".to_string()
}

fn default_dasharray() -> String {
    "2,2".to_string()
}

fn default_grid_alpha() -> f32 {
    0.5
}

/// Points drawn either from a named dataset or inline literal rows
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataRef {
    Key(String),
    Literal(Vec<Record>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineSpec {
    pub data: DataRef,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub xindex: usize,
    #[serde(default = "default_one")]
    pub yindex: usize,
    #[serde(default)]
    pub coordinates: CoordinateUnit,
    #[serde(default = "default_zorder_two")]
    pub zorder: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSpec {
    pub data: DataRef,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub xindex: usize,
    #[serde(default = "default_one")]
    pub yindex: usize,
    #[serde(default)]
    pub coordinates: CoordinateUnit,
    #[serde(default = "default_zorder_one")]
    pub zorder: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkerSpec {
    pub data: DataRef,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub xindex: usize,
    #[serde(default = "default_one")]
    pub yindex: usize,
    #[serde(default)]
    pub coordinates: CoordinateUnit,
    #[serde(default = "default_zorder_three")]
    pub zorder: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextSpec {
    pub text: String,
    pub position: [f32; 2],
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub coordinates: CoordinateUnit,
    #[serde(default = "default_zorder_three")]
    pub zorder: f32,
}

/// A scatter-style collection: per-point offsets with shared path shapes.
/// Offsets and paths may live in different coordinate systems.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSpec {
    pub offsets: DataRef,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub xindex: usize,
    #[serde(default = "default_one")]
    pub yindex: usize,
    #[serde(default = "default_display")]
    pub pathcoordinates: CoordinateUnit,
    #[serde(default)]
    pub offsetcoordinates: CoordinateUnit,
    #[serde(default = "default_zorder_two")]
    pub zorder: f32,
}

fn default_true() -> bool {
    true
}

fn default_one() -> usize {
    1
}

fn default_display() -> CoordinateUnit {
    CoordinateUnit::Display
}

fn default_zorder_one() -> f32 {
    1.0
}

fn default_zorder_two() -> f32 {
    2.0
}

fn default_zorder_three() -> f32 {
    3.0
}
