//! Configuration for property capture and nested-animation interception.

use serde::{Deserialize, Serialize};

/// Key derivation policy for captured properties.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Keys are `<dotted node path>.<Kind>`; distinct paths stay distinct.
    #[default]
    Namespaced,
    /// Keys are the literal node name; same-named nodes anywhere in the tree share a key.
    Collapse,
}

/// Settings for [`CustomPropertyManager`](crate::CustomPropertyManager).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyManagerConfig {
    pub mode: Mode,
    /// Only nodes whose name starts with this prefix are captured.
    pub prefix: String,
}

impl Default for PropertyManagerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Namespaced,
            prefix: "$".to_string(),
        }
    }
}

impl PropertyManagerConfig {
    pub fn new(mode: Mode, prefix: impl Into<String>) -> Self {
        Self {
            mode,
            prefix: prefix.into(),
        }
    }
}

/// Settings for [`ExternalAnimationPrecompInterceptor`](crate::ExternalAnimationPrecompInterceptor).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompConfig {
    /// Composition names starting with this prefix are loaded as external animations.
    pub prefix: String,
}

impl Default for PrecompConfig {
    fn default() -> Self {
        Self {
            prefix: "__".to_string(),
        }
    }
}
