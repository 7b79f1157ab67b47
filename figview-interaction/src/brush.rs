use figview_scene::element::column;
use figview_scene::{DataRef, Figure, FigviewSceneError, PanelId, Record};

use crate::event::{BrushEvent, BrushPhase};

struct BrushSession {
    panel: PanelId,
    origin: [f32; 2],
    current: [f32; 2],
}

/// Linked brushing over every collection bound to one dataset.
///
/// A drag on any panel selects a data-space rectangle there; points of
/// the target dataset outside the rectangle are hidden in every panel
/// that plots it. Only one brush is active at a time: starting a drag on
/// a different panel clears the previous selection first. Selection is
/// tested in data space, so it survives pan/zoom unchanged.
pub struct LinkedBrush {
    dataset: DataRef,
    xindex: usize,
    yindex: usize,
    session: Option<BrushSession>,
}

impl LinkedBrush {
    /// Builds a brush for the figure's registered brush target, which
    /// must be a collection element
    pub fn from_figure(figure: &Figure) -> Result<Self, FigviewSceneError> {
        let target = figure
            .brush_target()
            .ok_or_else(|| FigviewSceneError::MissingPluginField {
                plugin: "linkedbrush".to_string(),
                field: "id".to_string(),
            })?
            .to_string();
        let (panel, element) = figure
            .locate_element(&target)
            .ok_or_else(|| FigviewSceneError::ElementNotFound(target.clone()))?;
        let collection = figure.panels[panel].elements[element]
            .as_collection()
            .ok_or(FigviewSceneError::ElementNotFound(target))?;

        Ok(Self {
            dataset: collection.offsets.clone(),
            xindex: collection.xindex,
            yindex: collection.yindex,
            session: None,
        })
    }

    pub fn handle(
        &mut self,
        figure: &mut Figure,
        event: &BrushEvent,
    ) -> Result<(), FigviewSceneError> {
        match event.phase {
            BrushPhase::Start => {
                self.start(figure, event.panel, event.point);
                Ok(())
            }
            BrushPhase::Move => self.update(figure, event.point),
            BrushPhase::End => {
                self.end(figure);
                Ok(())
            }
        }
    }

    pub fn start(&mut self, figure: &mut Figure, panel: PanelId, point: [f32; 2]) {
        if !figure.linked_brush_enabled() {
            return;
        }
        if let Some(session) = &self.session {
            if session.panel != panel {
                self.clear(figure);
            }
        }
        self.session = Some(BrushSession {
            panel,
            origin: point,
            current: point,
        });
    }

    pub fn update(
        &mut self,
        figure: &mut Figure,
        point: [f32; 2],
    ) -> Result<(), FigviewSceneError> {
        let Some(session) = &mut self.session else {
            return Ok(());
        };
        session.current = point;
        let (panel, origin, current) = (session.panel, session.origin, session.current);
        self.apply_selection(figure, panel, origin, current)
    }

    /// Finishes the drag. An empty rectangle clears the selection, so a
    /// plain click restores every point.
    pub fn end(&mut self, figure: &mut Figure) {
        if let Some(session) = self.session.take() {
            let dx = (session.current[0] - session.origin[0]).abs();
            let dy = (session.current[1] - session.origin[1]).abs();
            if dx == 0.0 || dy == 0.0 {
                self.clear(figure);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn clear(&self, figure: &mut Figure) {
        for panel in &mut figure.panels {
            for element in &mut panel.elements {
                if let Some(collection) = element.as_collection_mut() {
                    if collection.offsets == self.dataset {
                        collection.clear_hidden();
                    }
                }
            }
        }
    }

    fn apply_selection(
        &self,
        figure: &mut Figure,
        panel: PanelId,
        origin: [f32; 2],
        current: [f32; 2],
    ) -> Result<(), FigviewSceneError> {
        let p = &figure.panels[panel];
        let a = p.data_at_pixel([origin[0].min(current[0]), origin[1].min(current[1])]);
        let b = p.data_at_pixel([origin[0].max(current[0]), origin[1].max(current[1])]);
        let (x_lo, x_hi) = ordered(a.0, b.0);
        let (y_lo, y_hi) = ordered(a.1, b.1);

        // the brushed panel's own collection decides which columns the
        // rectangle selects on, so scatter-matrix layouts brush per-pair
        let (xi, yi) = p
            .elements
            .iter()
            .filter_map(|e| e.as_collection())
            .find(|c| c.offsets == self.dataset)
            .map(|c| (c.xindex, c.yindex))
            .unwrap_or((self.xindex, self.yindex));

        let rows: Vec<Record> = figure.get_data(&self.dataset)?.to_vec();
        let mut hidden = Vec::with_capacity(rows.len());
        for row in &rows {
            let x = column(row, xi)?;
            let y = column(row, yi)?;
            hidden.push(!(x >= x_lo && x <= x_hi && y >= y_lo && y <= y_hi));
        }

        for panel in &mut figure.panels {
            for element in &mut panel.elements {
                if let Some(collection) = element.as_collection_mut() {
                    if collection.offsets == self.dataset {
                        collection.set_hidden(hidden.clone());
                    }
                }
            }
        }
        Ok(())
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
