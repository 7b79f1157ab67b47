use std::collections::HashMap;

use serde_json::Value;

use crate::error::FigviewSceneError;
use crate::figure::Figure;
use crate::spec::PluginSpec;

/// An interaction behavior wired into a figure.
///
/// Plugins are stateless toggles over figure interaction flags; the
/// gesture handling itself lives with the embedder's controller.
pub trait FigurePlugin {
    fn kind(&self) -> &'static str;

    /// Called once while the figure is assembled
    fn attach(&self, _figure: &mut Figure) {}

    /// Called at draw time to install the plugin's initial state
    fn on_draw(&self, _figure: &mut Figure) {}

    fn activate(&self, _figure: &mut Figure) {}

    fn deactivate(&self, _figure: &mut Figure) {}
}

pub type PluginFactory =
    fn(&serde_json::Map<String, Value>) -> Result<Box<dyn FigurePlugin>, FigviewSceneError>;

/// Maps plugin type names to constructors. Figures take the registry by
/// reference, so embedders can extend or replace the built-in set without
/// any global state.
pub struct PluginRegistry {
    factories: HashMap<String, PluginFactory>,
}

impl PluginRegistry {
    /// A registry with no factories at all
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// The built-in plugin set: reset, zoom, boxzoom and linkedbrush
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("reset", |_| Ok(Box::new(ResetPlugin)));
        registry.register("zoom", |options| {
            Ok(Box::new(ZoomPlugin {
                enabled: enabled_option(options),
            }))
        });
        registry.register("boxzoom", |options| {
            Ok(Box::new(BoxZoomPlugin {
                enabled: enabled_option(options),
            }))
        });
        registry.register("linkedbrush", |options| {
            let target = options
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| FigviewSceneError::MissingPluginField {
                    plugin: "linkedbrush".to_string(),
                    field: "id".to_string(),
                })?
                .to_string();
            Ok(Box::new(LinkedBrushPlugin {
                target,
                enabled: enabled_option(options),
            }))
        });
        registry
    }

    pub fn register(&mut self, kind: &str, factory: PluginFactory) {
        self.factories.insert(kind.to_string(), factory);
    }

    /// Returns `None` when the plugin type is not registered
    pub fn build(
        &self,
        spec: &PluginSpec,
    ) -> Option<Result<Box<dyn FigurePlugin>, FigviewSceneError>> {
        self.factories.get(&spec.kind).map(|f| f(&spec.options))
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Plugins default to enabled unless they advertise a toggle button, in
/// which case the button starts them off.
fn enabled_option(options: &serde_json::Map<String, Value>) -> bool {
    let button = options
        .get("button")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    options
        .get("enabled")
        .and_then(Value::as_bool)
        .unwrap_or(!button)
}

struct ResetPlugin;

impl FigurePlugin for ResetPlugin {
    fn kind(&self) -> &'static str {
        "reset"
    }

    fn activate(&self, figure: &mut Figure) {
        figure.reset();
    }
}

struct ZoomPlugin {
    enabled: bool,
}

impl FigurePlugin for ZoomPlugin {
    fn kind(&self) -> &'static str {
        "zoom"
    }

    fn on_draw(&self, figure: &mut Figure) {
        if self.enabled {
            figure.enable_zoom();
        } else {
            figure.disable_zoom();
        }
    }

    fn activate(&self, figure: &mut Figure) {
        figure.enable_zoom();
    }

    fn deactivate(&self, figure: &mut Figure) {
        figure.disable_zoom();
    }
}

struct BoxZoomPlugin {
    enabled: bool,
}

impl FigurePlugin for BoxZoomPlugin {
    fn kind(&self) -> &'static str {
        "boxzoom"
    }

    fn on_draw(&self, figure: &mut Figure) {
        if self.enabled {
            figure.enable_boxzoom();
        } else {
            figure.disable_boxzoom();
        }
    }

    fn activate(&self, figure: &mut Figure) {
        figure.enable_boxzoom();
    }

    fn deactivate(&self, figure: &mut Figure) {
        figure.disable_boxzoom();
    }
}

struct LinkedBrushPlugin {
    target: String,
    enabled: bool,
}

impl FigurePlugin for LinkedBrushPlugin {
    fn kind(&self) -> &'static str {
        "linkedbrush"
    }

    fn attach(&self, figure: &mut Figure) {
        figure.set_brush_target(Some(self.target.clone()));
    }

    fn on_draw(&self, figure: &mut Figure) {
        if self.enabled {
            figure.enable_linked_brush();
        } else {
            figure.disable_linked_brush();
        }
    }

    fn activate(&self, figure: &mut Figure) {
        figure.enable_linked_brush();
    }

    fn deactivate(&self, figure: &mut Figure) {
        figure.disable_linked_brush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plugin_spec(value: serde_json::Value) -> PluginSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_builtin_kinds() {
        let registry = PluginRegistry::new();
        for kind in ["reset", "zoom", "boxzoom"] {
            let plugin = registry
                .build(&plugin_spec(json!({"type": kind})))
                .unwrap()
                .unwrap();
            assert_eq!(plugin.kind(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_none() {
        let registry = PluginRegistry::new();
        assert!(registry
            .build(&plugin_spec(json!({"type": "mousetooltip"})))
            .is_none());
    }

    #[test]
    fn test_linkedbrush_requires_target() {
        let registry = PluginRegistry::new();
        let err = registry
            .build(&plugin_spec(json!({"type": "linkedbrush"})))
            .unwrap()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            FigviewSceneError::MissingPluginField { plugin, field }
                if plugin == "linkedbrush" && field == "id"
        ));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = PluginRegistry::empty();
        registry.register("reset", |_| Ok(Box::new(ResetPlugin)));
        assert!(registry
            .build(&plugin_spec(json!({"type": "reset"})))
            .is_some());
        assert!(registry
            .build(&plugin_spec(json!({"type": "zoom"})))
            .is_none());
    }
}
