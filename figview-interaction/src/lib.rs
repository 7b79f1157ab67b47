pub mod brush;
pub mod event;
pub mod transition;
pub mod viewport;

pub use brush::LinkedBrush;
pub use event::{
    BoxZoomEvent, BrushEvent, BrushPhase, GestureEvent, PanEvent, WheelZoomEvent,
};
pub use transition::{Transition, DEFAULT_DURATION};
pub use viewport::ViewportController;
