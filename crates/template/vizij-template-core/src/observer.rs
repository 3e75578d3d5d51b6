//! Build-pass callback contracts.
//!
//! The engine invokes these while it constructs the scene for one animation. All
//! methods default to no-ops so observers only override what they capture.

use serde::{Deserialize, Serialize};

use crate::handle::LazyHandle;
use crate::value::{ColorValue, OpacityValue, TextValue, TransformValue};

/// Coarse classification of the node being entered/left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Layer,
    Effect,
    Other,
}

/// Property visitation callbacks. Node names are `None` for unnamed nodes.
pub trait PropertyObserver {
    fn on_color_property(&self, _node_name: Option<&str>, _handle: &LazyHandle<'_, ColorValue>) {}

    fn on_opacity_property(
        &self,
        _node_name: Option<&str>,
        _handle: &LazyHandle<'_, OpacityValue>,
    ) {
    }

    fn on_transform_property(
        &self,
        _node_name: Option<&str>,
        _handle: &LazyHandle<'_, TransformValue>,
    ) {
    }

    fn on_text_property(&self, _node_name: Option<&str>, _handle: &LazyHandle<'_, TextValue>) {}

    fn on_enter_node(&self, _node_name: Option<&str>, _node_type: NodeType) {}

    fn on_leaving_node(&self, _node_name: Option<&str>, _node_type: NodeType) {}
}

/// Marker visitation callback.
pub trait MarkerObserver {
    fn on_marker(&self, name: &str, t0: f32, t1: f32);
}

/// A named time range declared by the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub begin: f32,
    pub end: f32,
}
