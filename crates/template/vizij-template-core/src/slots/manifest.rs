use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::TemplateError;

/// Type tag used when an entry has no integer `t` field.
pub const UNSPECIFIED_TAG: i64 = -1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    Color,
    Opacity,
    Text,
    Image,
    Unsupported,
}

impl SlotType {
    /// Manifest tag mapping: 0 color, 1 opacity, 2 text, 3 image.
    pub fn from_tag(tag: i64) -> Self {
        match tag {
            0 => SlotType::Color,
            1 => SlotType::Opacity,
            2 => SlotType::Text,
            3 => SlotType::Image,
            _ => SlotType::Unsupported,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub slot_id: String,
    pub slot_type: SlotType,
}

/// Declared slots of one template, ordered by slot id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotManifest {
    pub slots: Vec<SlotInfo>,
}

impl SlotManifest {
    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> Result<Self, TemplateError> {
        let data = fs::read(path).map_err(|source| TemplateError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&data)
    }

    /// Parse manifest bytes: `{"slots": {"<id>": {"t": <tag>}, ...}}`.
    ///
    /// A document without `slots` declares nothing. Entries with unknown or missing
    /// tags are kept as [`SlotType::Unsupported`].
    pub fn from_slice(data: &[u8]) -> Result<Self, TemplateError> {
        let root: JsonValue = serde_json::from_slice(data)?;
        let root = root
            .as_object()
            .ok_or_else(|| TemplateError::ManifestShape("root is not an object".to_string()))?;

        let Some(jslots) = root.get("slots") else {
            return Ok(Self::default());
        };
        let jslots = jslots
            .as_object()
            .ok_or_else(|| TemplateError::ManifestShape("`slots` is not an object".to_string()))?;

        let slots = jslots
            .iter()
            .map(|(slot_id, jslot)| {
                let tag = jslot
                    .get("t")
                    .and_then(JsonValue::as_i64)
                    .unwrap_or(UNSPECIFIED_TAG);
                SlotInfo {
                    slot_id: slot_id.clone(),
                    slot_type: SlotType::from_tag(tag),
                }
            })
            .collect();

        Ok(Self { slots })
    }

    pub fn ids_of(&self, slot_type: SlotType) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(move |s| s.slot_type == slot_type)
            .map(|s| s.slot_id.as_str())
    }
}
