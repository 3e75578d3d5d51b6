use std::rc::Rc;

use hashbrown::HashMap;

use crate::resources::{ImageAsset, ImageAssetProxy, ResourceProvider};

use super::manifest::{SlotInfo, SlotType};

/// Resource provider that answers image loads for declared image slots with a
/// swappable [`ImageAssetProxy`]. Everything else goes to the wrapped provider.
///
/// Image slots are matched on the id argument of `load_image_asset`: documents with
/// slots pass the slot id there instead of the asset id.
pub struct SlottableResourceProvider {
    pub(crate) image_assets: HashMap<String, Rc<ImageAssetProxy>>,
    pub(crate) proxy: Option<Rc<dyn ResourceProvider>>,
}

impl SlottableResourceProvider {
    pub fn new(slot_infos: &[SlotInfo], proxy: Option<Rc<dyn ResourceProvider>>) -> Self {
        let image_assets = slot_infos
            .iter()
            .filter(|s| s.slot_type == SlotType::Image)
            .map(|s| (s.slot_id.clone(), Rc::new(ImageAssetProxy::new())))
            .collect();
        Self {
            image_assets,
            proxy,
        }
    }
}

impl ResourceProvider for SlottableResourceProvider {
    fn load(&self, resource_path: &str, resource_name: &str) -> Option<Vec<u8>> {
        self.proxy
            .as_ref()
            .and_then(|p| p.load(resource_path, resource_name))
    }

    fn load_image_asset(
        &self,
        resource_path: &str,
        resource_name: &str,
        resource_id: &str,
    ) -> Option<Rc<dyn ImageAsset>> {
        let Some(slot) = self.image_assets.get(resource_id) else {
            return self
                .proxy
                .as_ref()
                .and_then(|p| p.load_image_asset(resource_path, resource_name, resource_id));
        };
        // Seed the slot with whatever the wrapped provider resolves.
        if let Some(proxy) = &self.proxy {
            slot.set_image_asset(proxy.load_image_asset(resource_path, resource_name, resource_id));
        }
        Some(Rc::clone(slot) as Rc<dyn ImageAsset>)
    }
}
