//! Resource loading contracts and the swappable image asset proxy.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Decoded image owned by the engine.
pub trait Image {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MipmapMode {
    None,
    #[default]
    Nearest,
    Linear,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingOptions {
    pub filter: FilterMode,
    pub mipmap: MipmapMode,
}

/// How an image is fitted into the layer bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFit {
    Fill,
    Start,
    #[default]
    Center,
    End,
    None,
}

/// Row-major 3x3 identity.
pub const IDENTITY_MATRIX: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// What an image asset contributes to one frame.
#[derive(Clone)]
pub struct FrameData {
    pub image: Option<Rc<dyn Image>>,
    pub sampling: SamplingOptions,
    pub matrix: [f32; 9],
    pub size_fit: SizeFit,
}

impl Default for FrameData {
    fn default() -> Self {
        Self {
            image: None,
            sampling: SamplingOptions::default(),
            matrix: IDENTITY_MATRIX,
            size_fit: SizeFit::Center,
        }
    }
}

pub trait ImageAsset {
    /// `true` when frame data varies with time and must be queried every frame.
    fn is_multi_frame(&self) -> bool;

    fn frame_data(&self, t: f32) -> FrameData;
}

/// External resource access used while building an animation.
pub trait ResourceProvider {
    /// Raw bytes for a named resource.
    fn load(&self, _resource_path: &str, _resource_name: &str) -> Option<Vec<u8>> {
        None
    }

    /// Image asset for a document image reference. `resource_id` is the asset id, or
    /// the slot id when the document declares slots.
    fn load_image_asset(
        &self,
        _resource_path: &str,
        _resource_name: &str,
        _resource_id: &str,
    ) -> Option<Rc<dyn ImageAsset>> {
        None
    }
}

/// Image asset whose delegate can be swapped at any time.
///
/// Reports itself as multi-frame so the engine re-queries it every frame and picks
/// up swaps during playback. Without a delegate it yields an empty frame.
#[derive(Default)]
pub struct ImageAssetProxy {
    asset: RefCell<Option<Rc<dyn ImageAsset>>>,
}

impl ImageAssetProxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_image_asset(&self, asset: Option<Rc<dyn ImageAsset>>) {
        *self.asset.borrow_mut() = asset;
    }

    pub fn has_image_asset(&self) -> bool {
        self.asset.borrow().is_some()
    }
}

impl ImageAsset for ImageAssetProxy {
    fn is_multi_frame(&self) -> bool {
        true
    }

    fn frame_data(&self, t: f32) -> FrameData {
        let asset = self.asset.borrow().clone();
        match asset {
            Some(asset) => asset.frame_data(t),
            None => FrameData::default(),
        }
    }
}
