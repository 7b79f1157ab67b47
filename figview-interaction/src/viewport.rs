use std::collections::HashMap;
use std::time::{Duration, Instant};

use figview_common::transform::Transform;
use figview_scene::{Figure, PanelId};

use crate::event::{BoxZoomEvent, GestureEvent, PanEvent, WheelZoomEvent};
use crate::transition::{Transition, DEFAULT_DURATION};

/// Box-zoom never zooms out, and caps how far a tiny rectangle can zoom in
const BOXZOOM_MIN_SCALE: f32 = 1.0;
const BOXZOOM_MAX_SCALE: f32 = 8.0;
/// Fraction of the panel the zoomed-to rectangle should fill
const BOXZOOM_FILL: f32 = 0.9;

/// Drives pan/zoom gestures and animated view changes over a figure.
///
/// Instant gestures (wheel, drag) apply immediately and cancel any
/// in-flight transition on the panels they touch; animated changes
/// (box-zoom, reset) schedule per-panel transitions advanced by `tick`.
/// Scheduling onto a panel that is already transitioning replaces the
/// old transition, so the last writer wins.
pub struct ViewportController {
    transitions: HashMap<PanelId, Transition>,
    drag: Option<PanelId>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            drag: None,
        }
    }

    /// Dispatches a gesture event. Returns the panels that changed or
    /// began animating.
    pub fn handle(&mut self, figure: &mut Figure, event: &GestureEvent, now: Instant) -> Vec<PanelId> {
        match event {
            GestureEvent::WheelZoom(ev) => self.wheel_zoom(figure, ev, now),
            GestureEvent::Pan(ev) => self.pan(figure, ev, now),
            GestureEvent::BoxZoom(ev) => self.box_zoom(figure, ev, now),
            GestureEvent::Reset => self.reset(figure, now),
        }
    }

    /// Zooms about the pointer so the data under it stays put
    pub fn wheel_zoom(
        &mut self,
        figure: &mut Figure,
        event: &WheelZoomEvent,
        now: Instant,
    ) -> Vec<PanelId> {
        if !self.gesture_allowed(figure, event.panel) || !figure.zoom_enabled() {
            return vec![];
        }
        let current = figure.panels[event.panel].transform;
        let factor = 2.0f32.powf(event.delta);
        let target = Transform::new(
            event.position[0] - factor * (event.position[0] - current.translate_x),
            event.position[1] - factor * (event.position[1] - current.translate_y),
            current.scale * factor,
        );
        self.apply_gesture(figure, event.panel, target, now)
    }

    pub fn pan(&mut self, figure: &mut Figure, event: &PanEvent, now: Instant) -> Vec<PanelId> {
        if !self.gesture_allowed(figure, event.panel) || !figure.zoom_enabled() {
            return vec![];
        }
        let current = figure.panels[event.panel].transform;
        let target = Transform::new(
            current.translate_x + event.delta[0],
            current.translate_y + event.delta[1],
            current.scale,
        );
        self.apply_gesture(figure, event.panel, target, now)
    }

    /// Starts a pan drag on a panel. Returns whether the drag was
    /// accepted; a press on an unzoomable panel or while zooming is
    /// disabled leaves the controller idle.
    pub fn begin_drag(&mut self, figure: &Figure, panel: PanelId) -> bool {
        if !self.gesture_allowed(figure, panel) || !figure.zoom_enabled() {
            return false;
        }
        self.drag = Some(panel);
        true
    }

    /// Pans the active drag's panel by a pointer movement. Ignored when
    /// no drag is active.
    pub fn drag_by(
        &mut self,
        figure: &mut Figure,
        delta: [f32; 2],
        now: Instant,
    ) -> Vec<PanelId> {
        match self.drag {
            Some(panel) => self.pan(figure, &PanEvent { panel, delta }, now),
            None => vec![],
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Animates the view so the dragged rectangle fills most of the
    /// panel. A degenerate rectangle is a no-op.
    pub fn box_zoom(
        &mut self,
        figure: &mut Figure,
        event: &BoxZoomEvent,
        now: Instant,
    ) -> Vec<PanelId> {
        if !self.gesture_allowed(figure, event.panel) || !figure.boxzoom_enabled() {
            return vec![];
        }

        let panel = &figure.panels[event.panel];
        let view0 = [
            event.corner0[0].min(event.corner1[0]),
            event.corner0[1].min(event.corner1[1]),
        ];
        let view1 = [
            event.corner0[0].max(event.corner1[0]),
            event.corner0[1].max(event.corner1[1]),
        ];

        // the rectangle lives in view space; zoom math runs on base pixels
        let b0 = panel.transform.unapply(view0);
        let b1 = panel.transform.unapply(view1);
        let dx = b1[0] - b0[0];
        let dy = b1[1] - b0[1];
        if dx <= 0.0 || dy <= 0.0 {
            return vec![];
        }

        let scale = (BOXZOOM_FILL / (dx / panel.width).max(dy / panel.height))
            .clamp(BOXZOOM_MIN_SCALE, BOXZOOM_MAX_SCALE);
        let cx = (b0[0] + b1[0]) / 2.0;
        let cy = (b0[1] + b1[1]) / 2.0;
        let target = Transform::new(
            panel.width / 2.0 - scale * cx,
            panel.height / 2.0 - scale * cy,
            scale,
        );
        self.animate_to(figure, event.panel, target, DEFAULT_DURATION, now, true)
    }

    /// Animates every panel back to its untransformed view
    pub fn reset(&mut self, figure: &mut Figure, now: Instant) -> Vec<PanelId> {
        let mut moved = Vec::with_capacity(figure.panels.len());
        for id in 0..figure.panels.len() {
            moved.extend(self.animate_to(
                figure,
                id,
                Transform::identity(),
                DEFAULT_DURATION,
                now,
                false,
            ));
        }
        moved
    }

    /// Schedules an animated view change, propagating targets to linked
    /// panels up front so followers animate in lock-step
    pub fn animate_to(
        &mut self,
        figure: &Figure,
        panel: PanelId,
        target: Transform,
        duration: Duration,
        now: Instant,
        propagate: bool,
    ) -> Vec<PanelId> {
        let targets = if propagate {
            figure.propagation_targets(panel, target)
        } else {
            vec![(panel, target)]
        };
        for (id, t) in &targets {
            self.transitions.insert(
                *id,
                Transition::new(figure.panels[*id].transform, *t, now, duration),
            );
        }
        targets.into_iter().map(|(id, _)| id).collect()
    }

    /// Advances every in-flight transition to `now`
    pub fn tick(&mut self, figure: &mut Figure, now: Instant) -> Vec<PanelId> {
        let ids: Vec<PanelId> = self.transitions.keys().copied().collect();
        let mut moved = Vec::with_capacity(ids.len());
        for id in ids {
            let (transform, done) = self.transitions[&id].sample(now);
            figure.apply_transform(id, transform, false);
            moved.push(id);
            if done {
                self.transitions.remove(&id);
            }
        }
        moved
    }

    pub fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub fn is_transitioning(&self, panel: PanelId) -> bool {
        self.transitions.contains_key(&panel)
    }

    fn gesture_allowed(&self, figure: &Figure, panel: PanelId) -> bool {
        figure.panels[panel].zoomable
    }

    /// Instant gestures replace whatever animation was running on the
    /// affected panels
    fn apply_gesture(
        &mut self,
        figure: &mut Figure,
        panel: PanelId,
        target: Transform,
        _now: Instant,
    ) -> Vec<PanelId> {
        let moved = figure.apply_transform(panel, target, true);
        for id in &moved {
            self.transitions.remove(id);
        }
        moved
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}
