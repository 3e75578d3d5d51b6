//! Engine seams: the animation builder, built animations and the layers they host.
//!
//! Nothing here renders; adapters for a concrete engine implement these traits and
//! the template utilities only drive them.

use std::any::Any;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::observer::{MarkerObserver, PropertyObserver};
use crate::resources::ResourceProvider;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Rect anchored at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: size.width,
            bottom: size.height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Per-call render options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFlags {
    /// Do not isolate the top-level layer; the caller already decided on isolation.
    pub skip_top_level_isolation: bool,
    /// Do not clip to the destination rect.
    pub disable_top_level_clipping: bool,
}

impl RenderFlags {
    pub const SKIP_TOP_LEVEL_ISOLATION: RenderFlags = RenderFlags {
        skip_top_level_isolation: true,
        disable_top_level_clipping: false,
    };
}

/// Drawing surface owned by the host renderer.
pub trait Canvas {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A fully built animation.
pub trait Animation {
    /// Seek to a time in seconds.
    fn seek_frame_time(&mut self, t: f64);

    fn render(&self, canvas: &mut dyn Canvas, dst: Option<Rect>, flags: RenderFlags);
}

/// Host-drawn content placed in a precomp layer.
pub trait ExternalLayer {
    /// `t` is the layer-local time in seconds.
    fn render(&mut self, canvas: &mut dyn Canvas, t: f64);
}

/// Gives the caller a chance to replace a nested composition with external content.
pub trait PrecompInterceptor {
    /// `None` means "not handled": the engine falls back to the embedded composition.
    fn on_load_precomp(&self, id: &str, name: &str, size: Size) -> Option<Box<dyn ExternalLayer>>;
}

/// Collaborators attached to a single build.
#[derive(Clone, Default)]
pub struct BuildOptions {
    pub resource_provider: Option<Rc<dyn ResourceProvider>>,
    pub precomp_interceptor: Option<Rc<dyn PrecompInterceptor>>,
    pub property_observer: Option<Rc<dyn PropertyObserver>>,
    pub marker_observer: Option<Rc<dyn MarkerObserver>>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_provider(mut self, provider: Rc<dyn ResourceProvider>) -> Self {
        self.resource_provider = Some(provider);
        self
    }

    pub fn with_precomp_interceptor(mut self, interceptor: Rc<dyn PrecompInterceptor>) -> Self {
        self.precomp_interceptor = Some(interceptor);
        self
    }

    pub fn with_property_observer(mut self, observer: Rc<dyn PropertyObserver>) -> Self {
        self.property_observer = Some(observer);
        self
    }

    pub fn with_marker_observer(mut self, observer: Rc<dyn MarkerObserver>) -> Self {
        self.marker_observer = Some(observer);
        self
    }
}

/// Entry point into the engine: parse and build an animation from document bytes.
pub trait AnimationFactory {
    /// `None` when the bytes cannot be built into an animation.
    fn make(&self, data: &[u8], options: BuildOptions) -> Option<Box<dyn Animation>>;
}
