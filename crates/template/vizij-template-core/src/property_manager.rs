//! Custom property capture for template editing.
//!
//! [`CustomPropertyManager`] hands the engine a property observer and a marker
//! observer for one build. After the build it exposes the captured handles by key:
//! list keys, read the first handle's value, or write a value to every handle
//! sharing the key.
//!
//! Keys follow [`Mode`]: namespaced keys are `<node path>.<Kind>`, collapsed keys are
//! the literal node name. Only nodes whose names start with the configured prefix
//! (default `"$"`) are captured.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::config::{Mode, PropertyManagerConfig};
use crate::handle::LazyHandle;
use crate::observer::{Marker, MarkerObserver, NodeType, PropertyObserver};
use crate::path::{KeyPolicy, NodePath};
use crate::props::PropMap;
use crate::value::{
    ColorValue, OpacityValue, PropertyKind, PropertyValue, TextValue, TransformValue,
};

pub type PropKey = String;

#[derive(Default)]
struct CaptureState {
    current_node: NodePath,
    colors: PropMap<ColorValue>,
    opacities: PropMap<OpacityValue>,
    transforms: PropMap<TransformValue>,
    texts: PropMap<TextValue>,
    markers: Vec<Marker>,
}

type SharedState = Rc<RefCell<CaptureState>>;

struct PropertyInterceptor {
    state: SharedState,
    policy: KeyPolicy,
}

impl PropertyInterceptor {
    fn capture<V>(
        &self,
        node_name: Option<&str>,
        kind: PropertyKind,
        handle: &LazyHandle<'_, V>,
        select: impl FnOnce(&mut CaptureState) -> &mut PropMap<V>,
    ) {
        let key = {
            let state = self.state.borrow();
            self.policy.accept_key(node_name, kind, &state.current_node)
        };
        let Some(key) = key else {
            return;
        };
        trace!("capture {kind:?} property under '{key}'");
        // The engine's factory runs outside the state borrow.
        let handle = handle.handle();
        let mut state = self.state.borrow_mut();
        select(&mut *state).push(key, handle);
    }
}

impl PropertyObserver for PropertyInterceptor {
    fn on_color_property(&self, node_name: Option<&str>, handle: &LazyHandle<'_, ColorValue>) {
        self.capture(node_name, PropertyKind::Color, handle, |s| &mut s.colors);
    }

    fn on_opacity_property(&self, node_name: Option<&str>, handle: &LazyHandle<'_, OpacityValue>) {
        self.capture(node_name, PropertyKind::Opacity, handle, |s| {
            &mut s.opacities
        });
    }

    fn on_transform_property(
        &self,
        node_name: Option<&str>,
        handle: &LazyHandle<'_, TransformValue>,
    ) {
        self.capture(node_name, PropertyKind::Transform, handle, |s| {
            &mut s.transforms
        });
    }

    fn on_text_property(&self, node_name: Option<&str>, handle: &LazyHandle<'_, TextValue>) {
        self.capture(node_name, PropertyKind::Text, handle, |s| &mut s.texts);
    }

    fn on_enter_node(&self, node_name: Option<&str>, _node_type: NodeType) {
        if let Some(name) = node_name {
            self.state.borrow_mut().current_node.enter(name);
        }
    }

    fn on_leaving_node(&self, node_name: Option<&str>, _node_type: NodeType) {
        if let Some(name) = node_name {
            self.state.borrow_mut().current_node.leave(name);
        }
    }
}

struct MarkerInterceptor {
    state: SharedState,
}

impl MarkerObserver for MarkerInterceptor {
    fn on_marker(&self, name: &str, t0: f32, t1: f32) {
        self.state.borrow_mut().markers.push(Marker {
            name: name.to_string(),
            begin: t0,
            end: t1,
        });
    }
}

/// Captures prefixed properties during a build and exposes them for editing.
pub struct CustomPropertyManager {
    config: PropertyManagerConfig,
    state: SharedState,
    property_interceptor: Rc<PropertyInterceptor>,
    marker_interceptor: Rc<MarkerInterceptor>,
}

impl Default for CustomPropertyManager {
    fn default() -> Self {
        Self::new(PropertyManagerConfig::default())
    }
}

impl CustomPropertyManager {
    pub fn new(config: PropertyManagerConfig) -> Self {
        let state: SharedState = Rc::new(RefCell::new(CaptureState::default()));
        Self {
            property_interceptor: Rc::new(PropertyInterceptor {
                state: Rc::clone(&state),
                policy: KeyPolicy::from(&config),
            }),
            marker_interceptor: Rc::new(MarkerInterceptor {
                state: Rc::clone(&state),
            }),
            config,
            state,
        }
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self::new(PropertyManagerConfig {
            mode,
            ..PropertyManagerConfig::default()
        })
    }

    pub fn config(&self) -> &PropertyManagerConfig {
        &self.config
    }

    /// Observer to attach to the engine build (see [`BuildOptions`](crate::BuildOptions)).
    pub fn property_observer(&self) -> Rc<dyn PropertyObserver> {
        self.property_interceptor.clone()
    }

    pub fn marker_observer(&self) -> Rc<dyn MarkerObserver> {
        self.marker_interceptor.clone()
    }

    /// Dotted path of the nodes currently being visited; empty outside a build.
    pub fn current_node(&self) -> String {
        self.state.borrow().current_node.as_str().to_string()
    }

    /// Markers in visitation order.
    pub fn markers(&self) -> Vec<Marker> {
        self.state.borrow().markers.clone()
    }

    pub fn prop_keys(&self, kind: PropertyKind) -> Vec<PropKey> {
        let state = self.state.borrow();
        match kind {
            PropertyKind::Color => state.colors.keys(),
            PropertyKind::Opacity => state.opacities.keys(),
            PropertyKind::Transform => state.transforms.keys(),
            PropertyKind::Text => state.texts.keys(),
        }
    }

    /// Value under `key`, or the kind's zero value when the key is unknown.
    pub fn value(&self, kind: PropertyKind, key: &str) -> PropertyValue {
        match kind {
            PropertyKind::Color => PropertyValue::Color(self.color(key)),
            PropertyKind::Opacity => PropertyValue::Opacity(self.opacity(key)),
            PropertyKind::Transform => PropertyValue::Transform(self.transform(key)),
            PropertyKind::Text => PropertyValue::Text(self.text(key)),
        }
    }

    /// Write to the map matching the value's kind.
    pub fn set_value(&mut self, key: &str, value: &PropertyValue) -> bool {
        match value {
            PropertyValue::Color(c) => self.set_color(key, c),
            PropertyValue::Opacity(o) => self.set_opacity(key, *o),
            PropertyValue::Transform(t) => self.set_transform(key, t),
            PropertyValue::Text(t) => self.set_text(key, t),
        }
    }

    pub fn color_props(&self) -> Vec<PropKey> {
        self.prop_keys(PropertyKind::Color)
    }

    pub fn color(&self, key: &str) -> ColorValue {
        self.state.borrow().colors.get(key).unwrap_or_default()
    }

    pub fn set_color(&mut self, key: &str, color: &ColorValue) -> bool {
        self.state.borrow().colors.set(key, color)
    }

    pub fn opacity_props(&self) -> Vec<PropKey> {
        self.prop_keys(PropertyKind::Opacity)
    }

    pub fn opacity(&self, key: &str) -> OpacityValue {
        self.state.borrow().opacities.get(key).unwrap_or_default()
    }

    pub fn set_opacity(&mut self, key: &str, opacity: OpacityValue) -> bool {
        self.state.borrow().opacities.set(key, &opacity)
    }

    pub fn transform_props(&self) -> Vec<PropKey> {
        self.prop_keys(PropertyKind::Transform)
    }

    pub fn transform(&self, key: &str) -> TransformValue {
        self.state.borrow().transforms.get(key).unwrap_or_default()
    }

    pub fn set_transform(&mut self, key: &str, transform: &TransformValue) -> bool {
        self.state.borrow().transforms.set(key, transform)
    }

    pub fn text_props(&self) -> Vec<PropKey> {
        self.prop_keys(PropertyKind::Text)
    }

    pub fn text(&self, key: &str) -> TextValue {
        self.state.borrow().texts.get(key).unwrap_or_default()
    }

    pub fn set_text(&mut self, key: &str, text: &TextValue) -> bool {
        self.state.borrow().texts.set(key, text)
    }
}
