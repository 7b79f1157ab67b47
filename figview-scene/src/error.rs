use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigviewSceneError {
    #[error("Unrecognized coordinate unit '{code}' (expected one of {valid:?})")]
    UnrecognizedCoordinateUnit { code: String, valid: &'static [&'static str] },

    #[error("A panel context is required for '{0}' coordinates")]
    MissingPanelContext(String),

    #[error("Dataset '{0}' not found in the figure data table")]
    DatasetNotFound(String),

    #[error("Record with {len} values has no column {column}")]
    RecordTooShort { len: usize, column: usize },

    #[error("No element with id '{0}'")]
    ElementNotFound(String),

    #[error("Panel '{panel}' references unknown shared-axis panel '{reference}'")]
    SharedPanelNotFound { panel: String, reference: String },

    #[error(
        "Panel '{panel}' overlaps {count} frame-bearing panels; twin relationships must be pairwise"
    )]
    AmbiguousTwinPanels { panel: String, count: usize },

    #[error("Panel '{panel}' already shares both axes with twin '{twin}'")]
    TwinShareConflict { panel: String, twin: String },

    #[error("Panel '{panel}' has a date {dimension} scale but no date domain")]
    MissingDateDomain { panel: String, dimension: &'static str },

    #[error("Invalid date components: {0:?}")]
    InvalidDateParts(Vec<f64>),

    #[error("Plugin '{plugin}' requires the '{field}' field")]
    MissingPluginField { plugin: String, field: String },

    #[error(transparent)]
    Scale(#[from] figview_scales::FigviewScaleError),

    #[error("Invalid figure specification: {0}")]
    InvalidSpec(#[from] serde_json::Error),
}
