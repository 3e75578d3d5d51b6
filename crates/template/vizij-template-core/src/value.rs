//! Property value kinds exchanged through property handles.

use serde::{Deserialize, Serialize};

/// RGBA color, components in 0..1.
pub type ColorValue = [f32; 4];

/// Opacity in percent (0..100), following the document convention.
pub type OpacityValue = f32;

/// Layer/group transform as authored (2D, rotation and skew in degrees).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformValue {
    pub anchor_point: [f32; 2],
    pub position: [f32; 2],
    pub scale: [f32; 2],
    pub rotation: f32,
    pub skew: f32,
    pub skew_axis: f32,
}

impl Default for TransformValue {
    fn default() -> Self {
        Self {
            anchor_point: [0.0, 0.0],
            position: [0.0, 0.0],
            scale: [100.0, 100.0],
            rotation: 0.0,
            skew: 0.0,
            skew_axis: 0.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextResize {
    #[default]
    Fixed,
    ScaleToFit,
    DownscaleToFit,
}

/// Text document value: the string plus the styling that travels with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextValue {
    pub text: String,
    pub font_family: String,
    pub size: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub line_height: f32,
    pub baseline_shift: f32,
    pub tracking: f32,
    pub ascent: f32,
    pub horizontal_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub resize: TextResize,
    pub fill_color: ColorValue,
    pub stroke_color: ColorValue,
    pub stroke_width: f32,
    pub has_fill: bool,
    pub has_stroke: bool,
}

impl Default for TextValue {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: String::new(),
            size: 0.0,
            min_size: 0.0,
            max_size: f32::MAX,
            line_height: 0.0,
            baseline_shift: 0.0,
            tracking: 0.0,
            ascent: 0.0,
            horizontal_align: TextAlign::Left,
            vertical_align: VerticalAlign::Top,
            resize: TextResize::Fixed,
            fill_color: [0.0, 0.0, 0.0, 1.0],
            stroke_color: [0.0, 0.0, 0.0, 1.0],
            stroke_width: 0.0,
            has_fill: false,
            has_stroke: false,
        }
    }
}

/// The four property kinds a template can expose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Color,
    Opacity,
    Transform,
    Text,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 4] = [
        PropertyKind::Color,
        PropertyKind::Opacity,
        PropertyKind::Transform,
        PropertyKind::Text,
    ];

    /// Suffix appended to the node path in namespaced mode.
    #[inline]
    pub fn suffix(self) -> &'static str {
        match self {
            PropertyKind::Color => ".Color",
            PropertyKind::Opacity => ".Opacity",
            PropertyKind::Transform => ".Transform",
            PropertyKind::Text => ".Text",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PropertyValue {
    Color(ColorValue),
    Opacity(OpacityValue),
    Transform(TransformValue),
    Text(TextValue),
}

impl PropertyValue {
    #[inline]
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Opacity(_) => PropertyKind::Opacity,
            PropertyValue::Transform(_) => PropertyKind::Transform,
            PropertyValue::Text(_) => PropertyKind::Text,
        }
    }

    /// Zero value for a kind, returned by reads of absent keys.
    pub fn default_for(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Color => PropertyValue::Color(ColorValue::default()),
            PropertyKind::Opacity => PropertyValue::Opacity(OpacityValue::default()),
            PropertyKind::Transform => PropertyValue::Transform(TransformValue::default()),
            PropertyKind::Text => PropertyValue::Text(TextValue::default()),
        }
    }
}
