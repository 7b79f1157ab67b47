use indexmap::IndexMap;

use figview_common::transform::Transform;
use figview_scales::ContinuousScale;

use crate::axis::AxisDimension;
use crate::coordinates::{CoordinateContext, CoordinateSystem, CoordinateUnit};
use crate::element::{resolve_data, Element};
use crate::error::FigviewSceneError;
use crate::panel::{IdGenerator, Panel, PanelId};
use crate::registry::{FigurePlugin, PluginRegistry};
use crate::spec::{DataRef, FigureSpec, Record};

/// Result of looking an id up across the figure
pub enum ElementRef<'a> {
    Panel(&'a Panel),
    Child {
        panel: &'a Panel,
        element: &'a Element,
    },
}

/// The assembled scene: panel arena, shared data table, and interaction
/// flags. Panels reference each other by index, so share and twin links
/// never hold owning pointers.
pub struct Figure {
    pub width: f32,
    pub height: f32,
    pub id: String,
    data: IndexMap<String, Vec<Record>>,
    pub panels: Vec<Panel>,
    zoom_enabled: bool,
    boxzoom_enabled: bool,
    linked_brush_enabled: bool,
    brush_target: Option<String>,
    plugins: Vec<Box<dyn FigurePlugin>>,
}

impl Figure {
    pub fn new(spec: FigureSpec, registry: &PluginRegistry) -> Result<Self, FigviewSceneError> {
        let id = spec.id.unwrap_or_else(|| "figure".to_string());
        let mut ids = IdGenerator::new(&id);

        let mut panels = Vec::with_capacity(spec.axes.len());
        for (index, panel_spec) in spec.axes.into_iter().enumerate() {
            panels.push(Panel::from_spec(
                index,
                panel_spec,
                spec.width,
                spec.height,
                &mut ids,
            )?);
        }

        resolve_shared_refs(&mut panels)?;
        discover_twins(&mut panels)?;

        let mut figure = Self {
            width: spec.width,
            height: spec.height,
            id,
            data: spec.data,
            panels,
            zoom_enabled: false,
            boxzoom_enabled: false,
            linked_brush_enabled: false,
            brush_target: None,
            plugins: vec![],
        };

        for plugin_spec in &spec.plugins {
            match registry.build(plugin_spec) {
                None => {
                    log::warn!("skipping unrecognized plugin type '{}'", plugin_spec.kind);
                }
                Some(plugin) => {
                    let plugin = plugin?;
                    plugin.attach(&mut figure);
                    figure.plugins.push(plugin);
                }
            }
        }

        Ok(figure)
    }

    pub fn from_json(json: &str, registry: &PluginRegistry) -> Result<Self, FigviewSceneError> {
        let spec: FigureSpec = serde_json::from_str(json)?;
        Self::new(spec, registry)
    }

    /// Projects every panel's elements, then lets plugins install their
    /// initial interaction state
    pub fn draw(&mut self) -> Result<(), FigviewSceneError> {
        let data = &self.data;
        for panel in &mut self.panels {
            panel.draw(self.width, self.height, data)?;
        }

        self.zoom_enabled = true;
        let plugins = std::mem::take(&mut self.plugins);
        for plugin in &plugins {
            plugin.on_draw(self);
        }
        self.plugins = plugins;
        Ok(())
    }

    pub fn panel(&self, id: PanelId) -> &Panel {
        &self.panels[id]
    }

    pub fn data(&self) -> &IndexMap<String, Vec<Record>> {
        &self.data
    }

    pub fn get_data<'a>(
        &'a self,
        data_ref: &'a DataRef,
    ) -> Result<&'a [Record], FigviewSceneError> {
        resolve_data(&self.data, data_ref)
    }

    /// Looks an id up among panels and their child elements
    pub fn get_element(&self, id: &str) -> Result<ElementRef<'_>, FigviewSceneError> {
        for panel in &self.panels {
            if panel.id == id {
                return Ok(ElementRef::Panel(panel));
            }
            for element in &panel.elements {
                if element.id == id {
                    return Ok(ElementRef::Child { panel, element });
                }
            }
        }
        Err(FigviewSceneError::ElementNotFound(id.to_string()))
    }

    /// Locates a child element by id, as panel and element indices
    pub fn locate_element(&self, id: &str) -> Option<(PanelId, usize)> {
        for (p, panel) in self.panels.iter().enumerate() {
            for (e, element) in panel.elements.iter().enumerate() {
                if element.id == id {
                    return Some((p, e));
                }
            }
        }
        None
    }

    /// Maps a position in some coordinate system to panel-local pixels
    /// (figure pixels for panel-less systems)
    pub fn to_pixel(&self, coords: &CoordinateSystem, x: f32, y: f32) -> [f32; 2] {
        match coords.context() {
            CoordinateContext::Panel(id) => {
                let panel = &self.panels[id];
                panel
                    .projection(self.width, self.height)
                    .point(coords.unit(), x, y)
            }
            CoordinateContext::Figure => match coords.unit() {
                CoordinateUnit::Figure => [x * self.width, (1.0 - y) * self.height],
                CoordinateUnit::Display => [x, y],
                // data/axes units without a panel are rejected at
                // CoordinateSystem construction
                CoordinateUnit::Data | CoordinateUnit::Axes => [f32::NAN, f32::NAN],
            },
        }
    }

    /// Maps a single x value in some coordinate system to pixels
    pub fn to_pixel_x(&self, coords: &CoordinateSystem, x: f32) -> f32 {
        match coords.context() {
            CoordinateContext::Panel(id) => self.panels[id]
                .projection(self.width, self.height)
                .x(coords.unit(), x),
            CoordinateContext::Figure => match coords.unit() {
                CoordinateUnit::Figure => x * self.width,
                CoordinateUnit::Display => x,
                CoordinateUnit::Data | CoordinateUnit::Axes => f32::NAN,
            },
        }
    }

    /// Maps a single y value in some coordinate system to pixels
    pub fn to_pixel_y(&self, coords: &CoordinateSystem, y: f32) -> f32 {
        match coords.context() {
            CoordinateContext::Panel(id) => self.panels[id]
                .projection(self.width, self.height)
                .y(coords.unit(), y),
            CoordinateContext::Figure => match coords.unit() {
                CoordinateUnit::Figure => (1.0 - y) * self.height,
                CoordinateUnit::Display => y,
                CoordinateUnit::Data | CoordinateUnit::Axes => f32::NAN,
            },
        }
    }

    /// Maps one data record to pixels through its column indices
    pub fn to_pixel_record(
        &self,
        coords: &CoordinateSystem,
        record: &[f32],
        xindex: usize,
        yindex: usize,
    ) -> Result<[f32; 2], FigviewSceneError> {
        let x = record
            .get(xindex)
            .copied()
            .ok_or(FigviewSceneError::RecordTooShort {
                len: record.len(),
                column: xindex,
            })?;
        let y = record
            .get(yindex)
            .copied()
            .ok_or(FigviewSceneError::RecordTooShort {
                len: record.len(),
                column: yindex,
            })?;
        Ok(self.to_pixel(coords, x, y))
    }

    /// Adjusts automatic tick generation on one dimension of a panel
    pub fn set_ticks(
        &mut self,
        panel: PanelId,
        dimension: AxisDimension,
        count: Option<usize>,
        formatter: Option<String>,
    ) {
        let p = &mut self.panels[panel];
        for axis in p.axes.iter_mut().filter(|a| a.dimension() == dimension) {
            if let Some(count) = count {
                axis.set_nticks(count);
            }
            axis.set_format_pattern(formatter.clone());
        }
        p.refresh_ticks();
    }

    /// The transforms a view change on `origin` implies across the
    /// figure: shared-x followers take the origin's x translation and
    /// scale, shared-y followers its y translation and scale, and twins
    /// the full transform since they occupy the same pixel space.
    pub fn propagation_targets(
        &self,
        origin: PanelId,
        target: Transform,
    ) -> Vec<(PanelId, Transform)> {
        let mut out: IndexMap<PanelId, Transform> = IndexMap::new();
        out.insert(origin, target);
        let panel = &self.panels[origin];

        for &f in &panel.shared_x {
            if f == origin {
                continue;
            }
            let own = out.get(&f).copied().unwrap_or(self.panels[f].transform);
            out.insert(
                f,
                Transform::new(target.translate_x, own.translate_y, target.scale),
            );
        }
        for &f in &panel.shared_y {
            if f == origin {
                continue;
            }
            let own = out.get(&f).copied().unwrap_or(self.panels[f].transform);
            out.insert(
                f,
                Transform::new(own.translate_x, target.translate_y, target.scale),
            );
        }
        for &t in &panel.twins {
            // twins coincide in pixel space; a share link only carried
            // one dimension, so the full transform replaces that entry
            out.insert(t, target);
        }

        out.into_iter().collect()
    }

    /// Installs a view transform on a panel, optionally carrying linked
    /// panels along. Followers are updated without re-propagating, so
    /// share cycles settle after a single pass. Returns the ids of every
    /// panel that moved.
    pub fn apply_transform(
        &mut self,
        panel: PanelId,
        transform: Transform,
        propagate: bool,
    ) -> Vec<PanelId> {
        let targets = if propagate {
            self.propagation_targets(panel, transform)
        } else {
            vec![(panel, transform)]
        };
        for (id, t) in &targets {
            self.panels[*id].set_transform(*t);
        }
        targets.into_iter().map(|(id, _)| id).collect()
    }

    /// The transform that brings the given data limits into view.
    /// Unspecified dimensions keep their current view; the uniform scale
    /// factor comes from the x limits when both are given.
    pub fn limits_to_transform(
        &self,
        panel: PanelId,
        xlim: Option<(f32, f32)>,
        ylim: Option<(f32, f32)>,
    ) -> Transform {
        let p = &self.panels[panel];

        let x = xlim.map(|(a, b)| {
            let p0 = p.x_scale.scale(a);
            let p1 = p.x_scale.scale(b);
            let k = p.width / (p1 - p0);
            (k, -k * p0)
        });
        let y = ylim.map(|(a, b)| {
            let top = p.y_scale.scale(b);
            let bottom = p.y_scale.scale(a);
            let k = p.height / (bottom - top);
            (k, -k * top)
        });

        let scale = x.map(|(k, _)| k).or(y.map(|(k, _)| k)).unwrap_or(p.transform.scale);
        Transform::new(
            x.map(|(_, t)| t).unwrap_or(p.transform.translate_x),
            y.map(|(_, t)| t).unwrap_or(p.transform.translate_y),
            scale,
        )
    }

    /// Sets the visible data limits on a panel. Propagation hands raw
    /// limits to axis-sharing followers and domain-converted limits to
    /// twins, which collapses to the same pixel transform either way.
    pub fn set_axlim(
        &mut self,
        panel: PanelId,
        xlim: Option<(f32, f32)>,
        ylim: Option<(f32, f32)>,
        propagate: bool,
    ) -> Vec<PanelId> {
        let transform = self.limits_to_transform(panel, xlim, ylim);
        self.panels[panel].set_transform(transform);
        let mut affected = vec![panel];
        if !propagate {
            return affected;
        }

        let mut jobs: IndexMap<PanelId, (Option<(f32, f32)>, Option<(f32, f32)>)> =
            IndexMap::new();
        {
            let p = &self.panels[panel];
            for &f in &p.shared_x {
                if f != panel && !p.twins.contains(&f) {
                    jobs.entry(f).or_insert((None, None)).0 = xlim;
                }
            }
            for &f in &p.shared_y {
                if f != panel && !p.twins.contains(&f) {
                    jobs.entry(f).or_insert((None, None)).1 = ylim;
                }
            }
            for &t in &p.twins {
                // conversion is the identity when the domains coincide
                let xl = xlim.map(|lim| self.convert_xlim(panel, t, lim));
                let yl = ylim.map(|lim| self.convert_ylim(panel, t, lim));
                jobs.insert(t, (xl, yl));
            }
        }

        for (f, (xl, yl)) in jobs {
            let t = self.limits_to_transform(f, xl, yl);
            self.panels[f].set_transform(t);
            affected.push(f);
        }
        affected
    }

    /// Maps x limits between the data domains of two overlaid panels
    pub fn convert_xlim(&self, from: PanelId, to: PanelId, lim: (f32, f32)) -> (f32, f32) {
        let a = self.panels[from].x_scale.domain();
        let b = self.panels[to].x_scale.domain();
        (remap(lim.0, a, b), remap(lim.1, a, b))
    }

    /// Maps y limits between the data domains of two overlaid panels
    pub fn convert_ylim(&self, from: PanelId, to: PanelId, lim: (f32, f32)) -> (f32, f32) {
        let a = self.panels[from].y_scale.domain();
        let b = self.panels[to].y_scale.domain();
        (remap(lim.0, a, b), remap(lim.1, a, b))
    }

    /// Returns every panel to its untransformed view
    pub fn reset(&mut self) {
        for panel in &mut self.panels {
            panel.set_transform(Transform::identity());
        }
    }

    pub fn zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    pub fn enable_zoom(&mut self) {
        self.zoom_enabled = true;
    }

    pub fn disable_zoom(&mut self) {
        self.zoom_enabled = false;
    }

    pub fn toggle_zoom(&mut self) {
        self.zoom_enabled = !self.zoom_enabled;
    }

    pub fn boxzoom_enabled(&self) -> bool {
        self.boxzoom_enabled
    }

    pub fn enable_boxzoom(&mut self) {
        self.boxzoom_enabled = true;
    }

    pub fn disable_boxzoom(&mut self) {
        self.boxzoom_enabled = false;
    }

    pub fn toggle_boxzoom(&mut self) {
        self.boxzoom_enabled = !self.boxzoom_enabled;
    }

    pub fn linked_brush_enabled(&self) -> bool {
        self.linked_brush_enabled
    }

    pub fn enable_linked_brush(&mut self) {
        self.linked_brush_enabled = true;
    }

    pub fn disable_linked_brush(&mut self) {
        self.linked_brush_enabled = false;
    }

    pub fn brush_target(&self) -> Option<&str> {
        self.brush_target.as_deref()
    }

    pub fn set_brush_target(&mut self, target: Option<String>) {
        self.brush_target = target;
    }

    /// Runs `activate` on every plugin of the given kind
    pub fn activate_plugin(&mut self, kind: &str) {
        let plugins = std::mem::take(&mut self.plugins);
        for plugin in plugins.iter().filter(|p| p.kind() == kind) {
            plugin.activate(self);
        }
        self.plugins = plugins;
    }

    /// Runs `deactivate` on every plugin of the given kind
    pub fn deactivate_plugin(&mut self, kind: &str) {
        let plugins = std::mem::take(&mut self.plugins);
        for plugin in plugins.iter().filter(|p| p.kind() == kind) {
            plugin.deactivate(self);
        }
        self.plugins = plugins;
    }
}

fn remap(v: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    to.0 + (v - from.0) * (to.1 - to.0) / (from.1 - from.0)
}

fn resolve_shared_refs(panels: &mut [Panel]) -> Result<(), FigviewSceneError> {
    let index_of: IndexMap<String, PanelId> = panels
        .iter()
        .map(|p| (p.id.clone(), p.index))
        .collect();

    for i in 0..panels.len() {
        let sharex_refs = std::mem::take(&mut panels[i].sharex_refs);
        let sharey_refs = std::mem::take(&mut panels[i].sharey_refs);
        for reference in sharex_refs {
            let target = *index_of.get(&reference).ok_or_else(|| {
                FigviewSceneError::SharedPanelNotFound {
                    panel: panels[i].id.clone(),
                    reference: reference.clone(),
                }
            })?;
            panels[i].shared_x.push(target);
        }
        for reference in sharey_refs {
            let target = *index_of.get(&reference).ok_or_else(|| {
                FigviewSceneError::SharedPanelNotFound {
                    panel: panels[i].id.clone(),
                    reference: reference.clone(),
                }
            })?;
            panels[i].shared_y.push(target);
        }
    }
    Ok(())
}

/// Frameless panels overlaying a frame-bearing panel are twins of it. The
/// frameless side owns the gestures, so the frame bearer is registered as
/// its follower along whichever dimension is not already axis-shared.
fn discover_twins(panels: &mut [Panel]) -> Result<(), FigviewSceneError> {
    for i in 0..panels.len() {
        if panels[i].frame_on {
            continue;
        }

        let overlapping: Vec<PanelId> = (0..panels.len())
            .filter(|&j| j != i && panels[j].overlaps(&panels[i]))
            .collect();
        let bearers: Vec<PanelId> = overlapping
            .iter()
            .copied()
            .filter(|&j| panels[j].frame_on)
            .collect();

        if bearers.len() > 1 {
            return Err(FigviewSceneError::AmbiguousTwinPanels {
                panel: panels[i].id.clone(),
                count: bearers.len(),
            });
        }

        if let Some(&bearer) = bearers.first() {
            if !panels[i].shared_x.contains(&bearer) {
                panels[bearer].shared_x.push(i);
            } else if !panels[i].shared_y.contains(&bearer) {
                panels[bearer].shared_y.push(i);
            } else {
                return Err(FigviewSceneError::TwinShareConflict {
                    panel: panels[i].id.clone(),
                    twin: panels[bearer].id.clone(),
                });
            }
            if !panels[i].twins.contains(&bearer) {
                panels[i].twins.push(bearer);
            }
            if !panels[bearer].twins.contains(&i) {
                panels[bearer].twins.push(i);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    fn figure(value: serde_json::Value) -> Figure {
        let registry = PluginRegistry::new();
        Figure::new(serde_json::from_value(value).unwrap(), &registry).unwrap()
    }

    fn two_shared_panels() -> Figure {
        figure(json!({
            "width": 800.0,
            "height": 400.0,
            "axes": [
                {"id": "axA", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0],
                 "bbox": [0.0, 0.5, 1.0, 0.5], "sharex": ["axB"]},
                {"id": "axB", "xlim": [0.0, 10.0], "ylim": [0.0, 5.0],
                 "bbox": [0.0, 0.0, 1.0, 0.5], "sharex": ["axA"]},
            ],
        }))
    }

    #[test]
    fn test_shared_refs_resolved() {
        let fig = two_shared_panels();
        assert_eq!(fig.panels[0].shared_x, vec![1]);
        assert_eq!(fig.panels[1].shared_x, vec![0]);
    }

    #[test]
    fn test_unknown_shared_ref() {
        let registry = PluginRegistry::new();
        let err = Figure::new(
            serde_json::from_value(json!({
                "width": 800.0,
                "height": 400.0,
                "axes": [
                    {"id": "axA", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0],
                     "sharex": ["axZ"]},
                ],
            }))
            .unwrap(),
            &registry,
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            FigviewSceneError::SharedPanelNotFound { reference, .. } if reference == "axZ"
        ));
    }

    #[test]
    fn test_shared_x_lockstep() {
        let mut fig = two_shared_panels();
        let moved = fig.apply_transform(0, Transform::new(50.0, -20.0, 1.0), true);
        assert_eq!(moved.len(), 2);

        let follower = &fig.panels[1];
        assert_approx_eq!(f32, follower.transform.translate_x, 50.0);
        assert_approx_eq!(f32, follower.transform.scale, 1.0);
        // y stays the follower's own
        assert_approx_eq!(f32, follower.transform.translate_y, 0.0);
    }

    #[test]
    fn test_share_cycle_settles_in_one_pass() {
        let mut fig = two_shared_panels();
        // A follows B and B follows A; a gesture must touch each exactly once
        let moved = fig.apply_transform(1, Transform::new(-30.0, 0.0, 2.0), true);
        assert_eq!(moved.len(), 2);
        assert_approx_eq!(f32, fig.panels[0].transform.translate_x, -30.0);
        assert_approx_eq!(f32, fig.panels[0].transform.scale, 2.0);
    }

    fn twin_figure() -> Figure {
        figure(json!({
            "width": 800.0,
            "height": 400.0,
            "axes": [
                {"id": "host", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0],
                 "bbox": [0.1, 0.1, 0.8, 0.8]},
                {"id": "twin", "xlim": [0.0, 10.0], "ylim": [0.0, 100.0],
                 "bbox": [0.1, 0.1, 0.8, 0.8], "frame_on": false,
                 "sharex": ["host"]},
            ],
        }))
    }

    #[test]
    fn test_twin_discovery() {
        let fig = twin_figure();
        assert_eq!(fig.panels[0].twins, vec![1]);
        assert_eq!(fig.panels[1].twins, vec![0]);
        // twin already shares x with the host, so the host follows its y
        assert_eq!(fig.panels[0].shared_y, vec![1]);
    }

    #[test]
    fn test_twin_share_conflict() {
        let registry = PluginRegistry::new();
        let err = Figure::new(
            serde_json::from_value(json!({
                "width": 800.0,
                "height": 400.0,
                "axes": [
                    {"id": "host", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0]},
                    {"id": "twin", "xlim": [0.0, 10.0], "ylim": [0.0, 100.0],
                     "frame_on": false,
                     "sharex": ["host"], "sharey": ["host"]},
                ],
            }))
            .unwrap(),
            &registry,
        )
        .err()
        .unwrap();
        assert!(matches!(err, FigviewSceneError::TwinShareConflict { .. }));
    }

    #[test]
    fn test_ambiguous_twins() {
        let registry = PluginRegistry::new();
        let err = Figure::new(
            serde_json::from_value(json!({
                "width": 800.0,
                "height": 400.0,
                "axes": [
                    {"id": "a", "xlim": [0.0, 1.0], "ylim": [0.0, 1.0]},
                    {"id": "b", "xlim": [0.0, 1.0], "ylim": [0.0, 1.0]},
                    {"id": "c", "xlim": [0.0, 1.0], "ylim": [0.0, 1.0],
                     "frame_on": false},
                ],
            }))
            .unwrap(),
            &registry,
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            FigviewSceneError::AmbiguousTwinPanels { count: 2, .. }
        ));
    }

    #[test]
    fn test_twins_receive_identical_pixel_transform() {
        let mut fig = twin_figure();
        let target = Transform::new(-100.0, -50.0, 2.0);
        fig.apply_transform(1, target, true);
        assert_eq!(fig.panels[0].transform, target);
        assert_eq!(fig.panels[1].transform, target);
    }

    #[test]
    fn test_set_axlim_transform() {
        let mut fig = figure(json!({
            "width": 800.0,
            "height": 600.0,
            "axes": [
                {"id": "ax", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0],
                 "bbox": [0.0, 0.0, 1.0, 1.0]},
            ],
        }));
        fig.set_axlim(0, Some((6.0, 10.0)), None, false);
        let panel = &fig.panels[0];
        assert_approx_eq!(f32, panel.transform.scale, 2.5);
        assert_approx_eq!(f32, panel.transform.translate_x, -1200.0);
        let (lo, hi) = panel.current_xlim();
        assert_approx_eq!(f32, lo, 6.0, epsilon = 1e-3);
        assert_approx_eq!(f32, hi, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_to_pixel_record_checks_columns() {
        let fig = figure(json!({
            "width": 800.0,
            "height": 600.0,
            "axes": [
                {"id": "ax", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0],
                 "bbox": [0.0, 0.0, 1.0, 1.0]},
            ],
        }));
        let coords =
            CoordinateSystem::new(CoordinateUnit::Data, CoordinateContext::Panel(0)).unwrap();
        let px = fig.to_pixel_record(&coords, &[5.0, 0.5], 0, 1).unwrap();
        assert_approx_eq!(f32, px[0], 400.0);
        assert_approx_eq!(f32, px[1], 300.0);

        let err = fig.to_pixel_record(&coords, &[5.0], 0, 1).unwrap_err();
        assert!(matches!(
            err,
            FigviewSceneError::RecordTooShort { len: 1, column: 1 }
        ));
    }

    #[test]
    fn test_set_ticks_updates_one_dimension() {
        let mut fig = figure(json!({
            "width": 800.0,
            "height": 600.0,
            "axes": [
                {"id": "ax", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0]},
            ],
        }));
        fig.set_ticks(0, AxisDimension::X, Some(5), Some("%.1f".to_string()));

        let x_axis = fig.panels[0]
            .axes
            .iter()
            .find(|a| a.dimension() == AxisDimension::X)
            .unwrap();
        assert_eq!(x_axis.tick_values(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(x_axis.format_pattern(), Some("%.1f"));

        let y_axis = fig.panels[0]
            .axes
            .iter()
            .find(|a| a.dimension() == AxisDimension::Y)
            .unwrap();
        assert_eq!(y_axis.format_pattern(), None);
    }

    #[test]
    fn test_set_axlim_twin_limits_converted() {
        let mut fig = twin_figure();
        // zooming the host's y into its upper half lands the twin on the
        // same pixel window
        fig.set_axlim(0, None, Some((0.5, 1.0)), true);
        let (lo, hi) = fig.panels[1].current_ylim();
        assert_approx_eq!(f32, lo, 50.0, epsilon = 1e-2);
        assert_approx_eq!(f32, hi, 100.0, epsilon = 1e-2);
        assert_eq!(fig.panels[0].transform, fig.panels[1].transform);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut fig = two_shared_panels();
        fig.apply_transform(0, Transform::new(40.0, 40.0, 3.0), true);
        fig.reset();
        assert!(fig.panels.iter().all(|p| p.transform.is_identity()));
    }

    #[test]
    fn test_get_element() {
        let fig = figure(json!({
            "width": 800.0,
            "height": 400.0,
            "axes": [
                {"id": "ax1", "xlim": [0.0, 10.0], "ylim": [0.0, 1.0],
                 "lines": [{"id": "line1", "data": [[0.0, 0.0], [1.0, 1.0]]}]},
            ],
        }));
        assert!(matches!(
            fig.get_element("ax1").unwrap(),
            ElementRef::Panel(_)
        ));
        assert!(matches!(
            fig.get_element("line1").unwrap(),
            ElementRef::Child { .. }
        ));
        assert!(fig.get_element("nope").is_err());
    }

    #[test]
    fn test_plugins_set_initial_state() {
        let registry = PluginRegistry::new();
        let mut fig = Figure::new(
            serde_json::from_value(json!({
                "width": 400.0,
                "height": 300.0,
                "axes": [{"xlim": [0.0, 1.0], "ylim": [0.0, 1.0]}],
                "plugins": [
                    {"type": "zoom", "enabled": true},
                    {"type": "boxzoom", "enabled": false},
                    {"type": "wavelength"},
                ],
            }))
            .unwrap(),
            &registry,
        )
        .unwrap();
        fig.draw().unwrap();
        assert!(fig.zoom_enabled());
        assert!(!fig.boxzoom_enabled());
    }

    #[test]
    fn test_brush_target_attached() {
        let registry = PluginRegistry::new();
        let mut fig = Figure::new(
            serde_json::from_value(json!({
                "width": 400.0,
                "height": 300.0,
                "axes": [{"xlim": [0.0, 1.0], "ylim": [0.0, 1.0],
                          "collections": [{"id": "pts", "offsets": "data01"}]}],
                "data": {"data01": [[0.2, 0.4], [0.6, 0.8]]},
                "plugins": [{"type": "linkedbrush", "id": "pts", "enabled": true}],
            }))
            .unwrap(),
            &registry,
        )
        .unwrap();
        fig.draw().unwrap();
        assert_eq!(fig.brush_target(), Some("pts"));
        assert!(fig.linked_brush_enabled());
    }
}
