//! Nested-animation loading through the precomp interceptor.
//!
//! Compositions whose name starts with the configured prefix (default `"__"`) are
//! resolved through the resource provider as standalone documents, built into an
//! independent animation and drawn as an external layer. The nested build reuses the
//! same interceptor and provider, so nesting recurses to whatever depth the documents
//! reference. Cyclic references are not detected.

use std::rc::{Rc, Weak};

use log::debug;

use crate::config::PrecompConfig;
use crate::engine::{
    Animation, AnimationFactory, BuildOptions, Canvas, ExternalLayer, PrecompInterceptor, Rect,
    RenderFlags, Size,
};
use crate::error::TemplateError;
use crate::resources::ResourceProvider;

/// Draws a nested animation into its host layer's bounds.
struct ExternalAnimationLayer {
    animation: Box<dyn Animation>,
    size: Size,
}

impl ExternalLayer for ExternalAnimationLayer {
    fn render(&mut self, canvas: &mut dyn Canvas, t: f64) {
        self.animation.seek_frame_time(t);

        // The host animation decides on layer isolation.
        let dst = Rect::from_size(self.size);
        self.animation
            .render(canvas, Some(dst), RenderFlags::SKIP_TOP_LEVEL_ISOLATION);
    }
}

pub struct ExternalAnimationPrecompInterceptor {
    resource_provider: Rc<dyn ResourceProvider>,
    factory: Rc<dyn AnimationFactory>,
    prefix: String,
    this: Weak<ExternalAnimationPrecompInterceptor>,
}

impl ExternalAnimationPrecompInterceptor {
    pub fn new(
        resource_provider: Rc<dyn ResourceProvider>,
        factory: Rc<dyn AnimationFactory>,
        config: PrecompConfig,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            resource_provider,
            factory,
            prefix: config.prefix,
            this: this.clone(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn load_external(&self, name: &str, size: Size) -> Result<Box<dyn ExternalLayer>, TemplateError> {
        let data = self
            .resource_provider
            .load("", name)
            .ok_or_else(|| TemplateError::ResourceNotFound {
                name: name.to_string(),
            })?;

        let mut options =
            BuildOptions::new().with_resource_provider(Rc::clone(&self.resource_provider));
        if let Some(this) = self.this.upgrade() {
            options = options.with_precomp_interceptor(this);
        }

        let animation =
            self.factory
                .make(&data, options)
                .ok_or_else(|| TemplateError::AnimationBuild {
                    name: name.to_string(),
                })?;

        Ok(Box::new(ExternalAnimationLayer { animation, size }))
    }
}

impl PrecompInterceptor for ExternalAnimationPrecompInterceptor {
    fn on_load_precomp(&self, _id: &str, name: &str, size: Size) -> Option<Box<dyn ExternalLayer>> {
        let resource = name.strip_prefix(self.prefix.as_str())?;
        match self.load_external(resource, size) {
            Ok(layer) => Some(layer),
            Err(err) => {
                debug!("precomp '{name}' not handled: {err}");
                None
            }
        }
    }
}
