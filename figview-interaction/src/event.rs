use serde::{Deserialize, Serialize};

use figview_scene::PanelId;

/// Scroll-wheel zoom anchored at a pointer position. `delta` is the zoom
/// exponent: the view scale is multiplied by `2^delta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelZoomEvent {
    pub panel: PanelId,
    /// Pointer position in view-space panel pixels
    pub position: [f32; 2],
    pub delta: f32,
}

/// Pointer drag, as a view-space pixel displacement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanEvent {
    pub panel: PanelId,
    pub delta: [f32; 2],
}

/// A completed rubber-band rectangle in view-space panel pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxZoomEvent {
    pub panel: PanelId,
    pub corner0: [f32; 2],
    pub corner1: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushPhase {
    Start,
    Move,
    End,
}

/// One step of a linked-brush drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushEvent {
    pub panel: PanelId,
    pub point: [f32; 2],
    pub phase: BrushPhase,
}

/// Every gesture the viewport controller understands, as plain data so
/// embedders can queue, replay or serialize them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    WheelZoom(WheelZoomEvent),
    Pan(PanEvent),
    BoxZoom(BoxZoomEvent),
    Reset,
}
