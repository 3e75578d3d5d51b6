use std::path::Path;
use std::rc::Rc;

use log::{debug, warn};

use crate::observer::PropertyObserver;
use crate::resources::{ImageAsset, ImageAssetProxy, ResourceProvider};
use crate::value::{ColorValue, OpacityValue, TextValue};

use super::manifest::{SlotInfo, SlotManifest, SlotType};
use super::observer::SlottablePropertyObserver;
use super::provider::SlottableResourceProvider;

/// Binds manifest-declared slots to the content discovered during one build.
///
/// Attach [`SlotManager::resource_provider`] and [`SlotManager::property_observer`]
/// to the build; afterwards the `set_*_slot` methods swap content on every node bound
/// to a slot. Setters targeting ids not declared with the matching kind do nothing.
pub struct SlotManager {
    slot_infos: Vec<SlotInfo>,
    resource_provider: Rc<SlottableResourceProvider>,
    property_observer: Rc<SlottablePropertyObserver>,
}

impl SlotManager {
    /// Read the slot manifest at `path`. A missing or malformed manifest yields a
    /// manager with no slots that still forwards to the wrapped collaborators.
    pub fn new(
        path: impl AsRef<Path>,
        resource_provider: Option<Rc<dyn ResourceProvider>>,
        property_observer: Option<Rc<dyn PropertyObserver>>,
    ) -> Self {
        let manifest = SlotManifest::from_path(path.as_ref()).unwrap_or_else(|err| {
            warn!("{err}; continuing without slots");
            SlotManifest::default()
        });
        Self::from_manifest(manifest, resource_provider, property_observer)
    }

    pub fn from_manifest(
        manifest: SlotManifest,
        resource_provider: Option<Rc<dyn ResourceProvider>>,
        property_observer: Option<Rc<dyn PropertyObserver>>,
    ) -> Self {
        let slot_infos = manifest.slots;
        Self {
            resource_provider: Rc::new(SlottableResourceProvider::new(
                &slot_infos,
                resource_provider,
            )),
            property_observer: Rc::new(SlottablePropertyObserver::new(
                &slot_infos,
                property_observer,
            )),
            slot_infos,
        }
    }

    pub fn slot_infos(&self) -> &[SlotInfo] {
        &self.slot_infos
    }

    pub fn resource_provider(&self) -> Rc<dyn ResourceProvider> {
        self.resource_provider.clone()
    }

    pub fn property_observer(&self) -> Rc<dyn PropertyObserver> {
        self.property_observer.clone()
    }

    /// Handles bound to a property slot: `Some(0)` for a declared slot nothing
    /// matched, `None` when `slot_id` is not a slot of that type.
    pub fn bound_handle_count(&self, slot_type: SlotType, slot_id: &str) -> Option<usize> {
        let observer = &self.property_observer;
        match slot_type {
            SlotType::Color => observer.colors.borrow().bound_count(slot_id),
            SlotType::Opacity => observer.opacities.borrow().bound_count(slot_id),
            SlotType::Text => observer.texts.borrow().bound_count(slot_id),
            SlotType::Image | SlotType::Unsupported => None,
        }
    }

    pub fn set_color_slot(&mut self, slot_id: &str, color: ColorValue) {
        let colors = self.property_observer.colors.borrow();
        match colors.handles(slot_id) {
            Some(handles) => handles.iter().for_each(|h| h.set(&color)),
            None => debug!("set_color_slot: '{slot_id}' is not a color slot"),
        }
    }

    pub fn set_opacity_slot(&mut self, slot_id: &str, opacity: OpacityValue) {
        let opacities = self.property_observer.opacities.borrow();
        match opacities.handles(slot_id) {
            Some(handles) => handles.iter().for_each(|h| h.set(&opacity)),
            None => debug!("set_opacity_slot: '{slot_id}' is not an opacity slot"),
        }
    }

    /// Replace only the string of each bound text value; styling is kept per handle.
    pub fn set_text_string_slot(&mut self, slot_id: &str, text: &str) {
        let texts = self.property_observer.texts.borrow();
        let Some(handles) = texts.handles(slot_id) else {
            debug!("set_text_string_slot: '{slot_id}' is not a text slot");
            return;
        };
        for handle in handles {
            let mut value = handle.get();
            value.text = text.to_string();
            handle.set(&value);
        }
    }

    /// Assign an asset to an image slot; `None` restores the empty placeholder.
    pub fn set_image_slot(&mut self, slot_id: &str, asset: Option<Rc<dyn ImageAsset>>) {
        match self.resource_provider.image_assets.get(slot_id) {
            Some(proxy) => proxy.set_image_asset(asset),
            None => debug!("set_image_slot: '{slot_id}' is not an image slot"),
        }
    }

    /// Load the asset through the wrapped resource provider and assign it to an image
    /// slot. Without a wrapped provider the slot is cleared.
    pub fn set_image_slot_from_resource(
        &mut self,
        slot_id: &str,
        resource_path: &str,
        resource_name: &str,
        asset_id: &str,
    ) {
        let provider = &self.resource_provider;
        let Some(proxy) = provider.image_assets.get(slot_id) else {
            debug!("set_image_slot_from_resource: '{slot_id}' is not an image slot");
            return;
        };
        let asset = provider
            .proxy
            .as_ref()
            .and_then(|p| p.load_image_asset(resource_path, resource_name, asset_id));
        proxy.set_image_asset(asset);
    }

    pub fn color_slot(&self, slot_id: &str) -> Option<ColorValue> {
        self.property_observer.colors.borrow().first_value(slot_id)
    }

    pub fn opacity_slot(&self, slot_id: &str) -> Option<OpacityValue> {
        self.property_observer.opacities.borrow().first_value(slot_id)
    }

    pub fn text_slot(&self, slot_id: &str) -> Option<TextValue> {
        self.property_observer.texts.borrow().first_value(slot_id)
    }

    /// The proxy standing in for an image slot.
    pub fn image_slot(&self, slot_id: &str) -> Option<Rc<ImageAssetProxy>> {
        self.resource_provider.image_assets.get(slot_id).cloned()
    }
}
