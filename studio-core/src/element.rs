//! Canvas elements - the drawable units of a design document.
//!
//! Elements serialize as flat camelCase objects with a `type` tag, which is
//! the shape the remote edit and export services exchange:
//!
//! ```text
//! {"id":"t1","type":"text","content":"Hi","x":10,"y":10,"width":200,"height":40,"zIndex":0}
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position of newly added elements.
pub const DEFAULT_ORIGIN: (f32, f32) = (50.0, 50.0);

/// Unique identifier for an element.
///
/// Locally created elements get a v4 UUID; elements supplied by remote
/// services may carry any id that passes
/// [`validate_element_id`](crate::validation::validate_element_id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier without validating it.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Horizontal alignment of text elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Justified.
    Justify,
}

/// How an image fills its bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to cover the box, cropping overflow.
    #[default]
    Cover,
    /// Scale to fit inside the box.
    Contain,
    /// Stretch to the box.
    Fill,
}

/// The kind-specific content of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text label.
    #[serde(rename_all = "camelCase")]
    Text {
        /// Text content.
        #[serde(alias = "text", default = "defaults::text_content")]
        content: String,
        /// Font size in pixels.
        #[serde(default = "defaults::font_size")]
        font_size: f32,
        /// Font family name.
        #[serde(default = "defaults::font_family")]
        font_family: String,
        /// CSS font weight (`normal`, `bold`, ...).
        #[serde(default = "defaults::normal")]
        font_weight: String,
        /// CSS font style (`normal`, `italic`).
        #[serde(default = "defaults::normal")]
        font_style: String,
        /// CSS text decoration (`none`, `underline`, ...).
        #[serde(default = "defaults::none")]
        text_decoration: String,
        /// Text color as hex.
        #[serde(default = "defaults::black")]
        color: String,
        /// Horizontal alignment.
        #[serde(default)]
        text_align: TextAlign,
    },

    /// A rectangle shape.
    #[serde(rename_all = "camelCase")]
    Rectangle {
        /// Fill color as hex.
        #[serde(default = "defaults::rectangle_fill")]
        fill: String,
        /// Stroke color as hex.
        #[serde(default = "defaults::rectangle_stroke")]
        stroke: String,
        /// Stroke width in pixels.
        #[serde(default = "defaults::stroke_width")]
        stroke_width: f32,
        /// Corner radius in pixels.
        #[serde(default)]
        border_radius: f32,
    },

    /// An ellipse inscribed in the element bounds.
    #[serde(rename_all = "camelCase")]
    Circle {
        /// Fill color as hex.
        #[serde(default = "defaults::circle_fill")]
        fill: String,
        /// Stroke color as hex.
        #[serde(default = "defaults::circle_stroke")]
        stroke: String,
        /// Stroke width in pixels.
        #[serde(default = "defaults::stroke_width")]
        stroke_width: f32,
    },

    /// A raster or vector image.
    #[serde(rename_all = "camelCase")]
    Image {
        /// Image source URI or data URI, if one has been chosen.
        #[serde(default)]
        src: Option<String>,
        /// Fit mode.
        #[serde(default)]
        fit: ImageFit,
    },

    /// A solid background fill.
    #[serde(rename_all = "camelCase")]
    Background {
        /// Background color as hex.
        #[serde(default = "defaults::white")]
        color: String,
    },
}

impl ElementKind {
    /// The element type tag for this content.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Text { .. } => ElementType::Text,
            Self::Rectangle { .. } => ElementType::Rectangle,
            Self::Circle { .. } => ElementType::Circle,
            Self::Image { .. } => ElementType::Image,
            Self::Background { .. } => ElementType::Background,
        }
    }

    /// Text content of a text element.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Element type tags, used when adding elements from a toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Text label.
    Text,
    /// Rectangle shape.
    Rectangle,
    /// Circle shape.
    Circle,
    /// Image.
    Image,
    /// Background fill.
    Background,
}

impl ElementType {
    /// Default content for a freshly added element of this type.
    #[must_use]
    pub fn default_kind(self) -> ElementKind {
        match self {
            Self::Text => ElementKind::Text {
                content: defaults::text_content(),
                font_size: defaults::font_size(),
                font_family: defaults::font_family(),
                font_weight: defaults::normal(),
                font_style: defaults::normal(),
                text_decoration: defaults::none(),
                color: defaults::black(),
                text_align: TextAlign::Left,
            },
            Self::Rectangle => ElementKind::Rectangle {
                fill: defaults::rectangle_fill(),
                stroke: defaults::rectangle_stroke(),
                stroke_width: defaults::stroke_width(),
                border_radius: 0.0,
            },
            Self::Circle => ElementKind::Circle {
                fill: defaults::circle_fill(),
                stroke: defaults::circle_stroke(),
                stroke_width: defaults::stroke_width(),
            },
            Self::Image => ElementKind::Image {
                src: None,
                fit: ImageFit::Cover,
            },
            Self::Background => ElementKind::Background {
                color: defaults::white(),
            },
        }
    }

    /// Default width and height for this type.
    #[must_use]
    pub const fn default_size(self) -> (f32, f32) {
        match self {
            Self::Text => (200.0, 40.0),
            Self::Rectangle | Self::Circle | Self::Image | Self::Background => (100.0, 100.0),
        }
    }

    /// Lowercase tag as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Image => "image",
            Self::Background => "background",
        }
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "image" => Ok(Self::Image),
            "background" => Ok(Self::Background),
            other => Err(format!("unknown element type: {other}")),
        }
    }
}

/// Position, size and stacking for an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// X position (pixels from the canvas left edge).
    pub x: f32,
    /// Y position (pixels from the canvas top edge).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Rotation in degrees, stored as given.
    #[serde(default)]
    pub rotation: f32,
    /// Z-index for layering.
    #[serde(default)]
    pub z_index: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: DEFAULT_ORIGIN.0,
            y: DEFAULT_ORIGIN.1,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            z_index: 0,
        }
    }
}

impl Transform {
    /// Whether every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.rotation.is_finite()
    }
}

/// A canvas element with content and transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Kind-specific content.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Position, size and stacking.
    #[serde(flatten)]
    pub transform: Transform,
    /// Opacity from 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "defaults::opacity")]
    pub opacity: f32,
    /// Whether the element is painted and hit-testable.
    #[serde(default = "defaults::visible")]
    pub visible: bool,
    /// Locked elements ignore pointer-driven edits.
    #[serde(default)]
    pub locked: bool,
}

impl Element {
    /// Create a new element with the given kind and its type's default size.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        let (width, height) = kind.element_type().default_size();
        Self {
            id: ElementId::new(),
            kind,
            transform: Transform {
                width,
                height,
                ..Transform::default()
            },
            opacity: 1.0,
            visible: true,
            locked: false,
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set whether the element is locked.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Set whether the element is visible.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The element type tag.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Check if a point (in canvas coordinates) is within this element's
    /// axis-aligned bounds. Rotation is ignored.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let t = &self.transform;
        x >= t.x && x <= t.x + t.width && y >= t.y && y <= t.y + t.height
    }

    /// Whether pointer input may target this element.
    #[must_use]
    pub const fn is_hit_target(&self) -> bool {
        self.visible && !self.locked
    }
}

mod defaults {
    pub(super) fn text_content() -> String {
        "Sample Text".to_string()
    }

    pub(super) const fn font_size() -> f32 {
        18.0
    }

    pub(super) fn font_family() -> String {
        "Arial".to_string()
    }

    pub(super) fn normal() -> String {
        "normal".to_string()
    }

    pub(super) fn none() -> String {
        "none".to_string()
    }

    pub(super) fn black() -> String {
        "#000000".to_string()
    }

    pub(super) fn white() -> String {
        "#ffffff".to_string()
    }

    pub(super) fn rectangle_fill() -> String {
        "#3b82f6".to_string()
    }

    pub(super) fn rectangle_stroke() -> String {
        "#1e40af".to_string()
    }

    pub(super) fn circle_fill() -> String {
        "#ef4444".to_string()
    }

    pub(super) fn circle_stroke() -> String {
        "#dc2626".to_string()
    }

    pub(super) const fn stroke_width() -> f32 {
        2.0
    }

    pub(super) const fn opacity() -> f32 {
        1.0
    }

    pub(super) const fn visible() -> bool {
        true
    }
}
