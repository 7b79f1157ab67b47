pub mod date;
pub mod error;
pub mod linear;
pub mod log;
pub mod scale;

pub use date::{DateScale, DateScaleConfig};
pub use error::FigviewScaleError;
pub use linear::{LinearScale, LinearScaleConfig};
pub use log::{LogScale, LogScaleConfig};
pub use scale::{ContinuousScale, Scale, ScaleKind};
