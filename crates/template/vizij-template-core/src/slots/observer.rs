use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use log::warn;

use crate::handle::{LazyHandle, SharedHandle};
use crate::observer::{NodeType, PropertyObserver};
use crate::value::{ColorValue, OpacityValue, TextValue, TransformValue};

use super::manifest::{SlotInfo, SlotType};

/// Slot id → bound handles. Every declared id is present from construction on, so an
/// empty list means "declared but nothing matched" and an absent id is not a slot.
pub(crate) struct SlotBindings<V> {
    slots: HashMap<String, Vec<SharedHandle<V>>>,
}

impl<V> Default for SlotBindings<V> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<V> SlotBindings<V> {
    fn declare(&mut self, slot_id: &str) {
        self.slots.insert(slot_id.to_string(), Vec::new());
    }

    pub(crate) fn is_declared(&self, slot_id: &str) -> bool {
        self.slots.contains_key(slot_id)
    }

    fn bind(&mut self, slot_id: &str, handle: SharedHandle<V>) {
        if let Some(handles) = self.slots.get_mut(slot_id) {
            handles.push(handle);
        }
    }

    pub(crate) fn bound_count(&self, slot_id: &str) -> Option<usize> {
        self.slots.get(slot_id).map(Vec::len)
    }

    pub(crate) fn handles(&self, slot_id: &str) -> Option<&[SharedHandle<V>]> {
        self.slots.get(slot_id).map(Vec::as_slice)
    }

    pub(crate) fn first_value(&self, slot_id: &str) -> Option<V> {
        self.slots
            .get(slot_id)
            .and_then(|handles| handles.first())
            .map(|h| h.get())
    }
}

/// Property observer that binds color, opacity and text handles to declared slots
/// (matched by literal node name) and forwards every event to a wrapped observer.
pub struct SlottablePropertyObserver {
    pub(crate) colors: RefCell<SlotBindings<ColorValue>>,
    pub(crate) opacities: RefCell<SlotBindings<OpacityValue>>,
    pub(crate) texts: RefCell<SlotBindings<TextValue>>,
    proxy: Option<Rc<dyn PropertyObserver>>,
}

impl SlottablePropertyObserver {
    pub fn new(slot_infos: &[SlotInfo], proxy: Option<Rc<dyn PropertyObserver>>) -> Self {
        let mut colors = SlotBindings::default();
        let mut opacities = SlotBindings::default();
        let mut texts = SlotBindings::default();
        for info in slot_infos {
            match info.slot_type {
                SlotType::Color => colors.declare(&info.slot_id),
                SlotType::Opacity => opacities.declare(&info.slot_id),
                SlotType::Text => texts.declare(&info.slot_id),
                // Image slots live in the resource provider.
                SlotType::Image => {}
                SlotType::Unsupported => {
                    warn!("skipping unsupported slot '{}'", info.slot_id);
                }
            }
        }
        Self {
            colors: RefCell::new(colors),
            opacities: RefCell::new(opacities),
            texts: RefCell::new(texts),
            proxy,
        }
    }

    fn bind<V>(
        bindings: &RefCell<SlotBindings<V>>,
        node_name: Option<&str>,
        handle: &LazyHandle<'_, V>,
    ) {
        let Some(slot_id) = node_name else {
            return;
        };
        if !bindings.borrow().is_declared(slot_id) {
            return;
        }
        let handle = handle.handle();
        bindings.borrow_mut().bind(slot_id, handle);
    }
}

impl PropertyObserver for SlottablePropertyObserver {
    fn on_color_property(&self, node_name: Option<&str>, handle: &LazyHandle<'_, ColorValue>) {
        Self::bind(&self.colors, node_name, handle);
        if let Some(proxy) = &self.proxy {
            proxy.on_color_property(node_name, handle);
        }
    }

    fn on_opacity_property(&self, node_name: Option<&str>, handle: &LazyHandle<'_, OpacityValue>) {
        Self::bind(&self.opacities, node_name, handle);
        if let Some(proxy) = &self.proxy {
            proxy.on_opacity_property(node_name, handle);
        }
    }

    fn on_transform_property(
        &self,
        node_name: Option<&str>,
        handle: &LazyHandle<'_, TransformValue>,
    ) {
        if let Some(proxy) = &self.proxy {
            proxy.on_transform_property(node_name, handle);
        }
    }

    fn on_text_property(&self, node_name: Option<&str>, handle: &LazyHandle<'_, TextValue>) {
        Self::bind(&self.texts, node_name, handle);
        if let Some(proxy) = &self.proxy {
            proxy.on_text_property(node_name, handle);
        }
    }

    fn on_enter_node(&self, node_name: Option<&str>, node_type: NodeType) {
        if let Some(proxy) = &self.proxy {
            proxy.on_enter_node(node_name, node_type);
        }
    }

    fn on_leaving_node(&self, node_name: Option<&str>, node_type: NodeType) {
        if let Some(proxy) = &self.proxy {
            proxy.on_leaving_node(node_name, node_type);
        }
    }
}
