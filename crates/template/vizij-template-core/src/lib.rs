//! Vizij Template Core (engine-agnostic)
//!
//! Template substitution utilities for vector animations. A host animation engine
//! drives a single build pass over a parsed document; the observers in this crate
//! capture property handles and image loads during that pass so one parsed animation
//! can be reused as a template with swappable colors, opacities, transforms, text
//! and images. Nested animation references can be redirected to external documents
//! through [`ExternalAnimationPrecompInterceptor`].
//!
//! The engine itself (parsing, scene graph, rendering) is reached only through the
//! traits in [`engine`], [`handle`], [`observer`] and [`resources`].

pub mod config;
pub mod engine;
pub mod error;
pub mod handle;
pub mod observer;
pub mod path;
pub mod precomp;
pub mod property_manager;
pub mod props;
pub mod resources;
pub mod slots;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::{Mode, PrecompConfig, PropertyManagerConfig};
pub use engine::{
    Animation, AnimationFactory, BuildOptions, Canvas, ExternalLayer, PrecompInterceptor, Rect,
    RenderFlags, Size,
};
pub use error::TemplateError;
pub use handle::{
    ColorPropertyHandle, LazyHandle, OpacityPropertyHandle, PropertyHandle, SharedHandle,
    TextPropertyHandle, TransformPropertyHandle,
};
pub use observer::{Marker, MarkerObserver, NodeType, PropertyObserver};
pub use precomp::ExternalAnimationPrecompInterceptor;
pub use property_manager::{CustomPropertyManager, PropKey};
pub use resources::{
    FilterMode, FrameData, Image, ImageAsset, ImageAssetProxy, MipmapMode, ResourceProvider,
    SamplingOptions, SizeFit,
};
pub use slots::{SlotInfo, SlotManager, SlotManifest, SlotType};
pub use value::{
    ColorValue, OpacityValue, PropertyKind, PropertyValue, TextAlign, TextResize, TextValue,
    TransformValue, VerticalAlign,
};
