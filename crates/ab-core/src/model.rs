//! Element data model for Artboard documents.
//!
//! A document is a flat, insertion-ordered list of [`Element`]s placed on a
//! fixed-size [`Artboard`]. Paint order comes from `z_index` (ties broken by
//! insertion order). Grouping is one level deep: a [`GroupProps`] lists its
//! children, and each child stores its position relative to the group origin.

use crate::geometry::Geom;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Artboard ────────────────────────────────────────────────────────────

/// The fixed-size drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artboard {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
}

impl Default for Artboard {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: "#FFFFFF".into(),
        }
    }
}

impl Artboard {
    pub fn geom(&self) -> Geom {
        Geom::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal text alignment inside the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    pub fill: String,
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Text".into(),
            font_family: "Arial".into(),
            font_size: 24.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            fill: "#000000".into(),
            align: TextAlign::Left,
        }
    }
}

// ─── Images ──────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    /// URL or data URI. Decoding happens on the host.
    pub src: String,
    #[serde(default = "default_true")]
    pub draggable: bool,
}

// ─── Shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Ellipse,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Star => "star",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "rectangle" | "rect" => ShapeKind::Rectangle,
            "circle" => ShapeKind::Circle,
            "ellipse" => ShapeKind::Ellipse,
            "triangle" => ShapeKind::Triangle,
            "pentagon" => ShapeKind::Pentagon,
            "hexagon" => ShapeKind::Hexagon,
            "star" => ShapeKind::Star,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Dash pattern for a given stroke width; empty for solid strokes.
    pub fn dash_pattern(self, width: f64) -> Vec<f64> {
        let w = width.max(1.0);
        match self {
            StrokeStyle::Solid => Vec::new(),
            StrokeStyle::Dashed => vec![w * 4.0, w * 2.0],
            StrokeStyle::Dotted => vec![w, w * 1.5],
        }
    }
}

/// Per-corner radii for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub const fn uniform(r: f64) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    pub shape: ShapeKind,
    pub fill: String,
    pub stroke: String,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Only honoured for rectangles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadii>,
    /// Image clipped to the shape outline ("frame" shapes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_fill: Option<String>,
}

impl ShapeProps {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            fill: "#D9D9D9".into(),
            stroke: "#000000".into(),
            stroke_width: 0.0,
            stroke_style: StrokeStyle::Solid,
            corner_radius: None,
            image_fill: None,
        }
    }
}

// ─── Groups ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupProps {
    /// Child ids in the order they were grouped.
    pub children: SmallVec<[ElementId; 4]>,
}

// ─── Elements ────────────────────────────────────────────────────────────

/// The variant part of an element, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Image(ImageProps),
    Text(TextProps),
    Shape(ShapeProps),
    Group(GroupProps),
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Image(_) => "image",
            ElementKind::Text(_) => "text",
            ElementKind::Shape(_) => "shape",
            ElementKind::Group(_) => "group",
        }
    }
}

/// A placeable unit on the artboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    /// Canvas space for root elements, group-relative for children.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees in `[0, 360)`, around the box centre.
    #[serde(default)]
    pub rotation: f64,
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn geom(&self) -> Geom {
        Geom::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_geom(&mut self, geom: Geom) {
        self.x = geom.x;
        self.y = geom.y;
        self.width = geom.width;
        self.height = geom.height;
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group(_))
    }

    /// Child ids for groups, empty for everything else.
    pub fn children(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Group(g) => &g.children,
            _ => &[],
        }
    }

    pub fn font_size(&self) -> Option<f64> {
        match &self.kind {
            ElementKind::Text(t) => Some(t.font_size),
            _ => None,
        }
    }
}

// ─── Creation & updates ──────────────────────────────────────────────────

/// Parameters for `Document::add_element`. Ids and z-index are assigned by
/// the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub kind: ElementKind,
    pub geom: Geom,
    pub rotation: f64,
}

impl ElementSpec {
    /// Image at the default placement (100, 100, 200 × 150).
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Image(ImageProps {
                src: src.into(),
                draggable: true,
            }),
            geom: Geom::new(100.0, 100.0, 200.0, 150.0),
            rotation: 0.0,
        }
    }

    /// Text at the default placement (100, 100, 200 × 40).
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Text(TextProps {
                text: content.into(),
                ..TextProps::default()
            }),
            geom: Geom::new(100.0, 100.0, 200.0, 40.0),
            rotation: 0.0,
        }
    }

    /// Shape at the default placement (100, 100, 100 × 100).
    pub fn shape(shape: ShapeKind) -> Self {
        Self {
            kind: ElementKind::Shape(ShapeProps::new(shape)),
            geom: Geom::new(100.0, 100.0, 100.0, 100.0),
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.geom.x = x;
        self.geom.y = y;
        self
    }

    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.geom.width = width;
        self.geom.height = height;
        self
    }

    #[must_use]
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Sparse update for an element; only present fields are applied.
///
/// Kind-specific fields must match the element kind. `image_fill: Some("")`
/// removes the frame image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i64>,

    // image
    pub src: Option<String>,
    pub draggable: Option<bool>,

    // text
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub align: Option<TextAlign>,

    // text + shape
    pub fill: Option<String>,

    // shape
    pub shape: Option<ShapeKind>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    pub corner_radius: Option<CornerRadii>,
    pub image_fill: Option<String>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    fn has_image_fields(&self) -> bool {
        self.src.is_some() || self.draggable.is_some()
    }

    fn has_text_fields(&self) -> bool {
        self.text.is_some()
            || self.font_family.is_some()
            || self.font_size.is_some()
            || self.font_weight.is_some()
            || self.font_style.is_some()
            || self.align.is_some()
    }

    fn has_shape_fields(&self) -> bool {
        self.shape.is_some()
            || self.stroke.is_some()
            || self.stroke_width.is_some()
            || self.stroke_style.is_some()
            || self.corner_radius.is_some()
            || self.image_fill.is_some()
    }

    /// Apply onto `el`. Returns the name of the first field that does not
    /// fit the element kind, leaving `el` partially updated; callers apply to
    /// a copy.
    pub(crate) fn apply_to(&self, el: &mut Element) -> Result<(), &'static str> {
        if let Some(v) = self.x {
            el.x = v;
        }
        if let Some(v) = self.y {
            el.y = v;
        }
        if let Some(v) = self.width {
            el.width = v;
        }
        if let Some(v) = self.height {
            el.height = v;
        }
        if let Some(v) = self.rotation {
            el.rotation = crate::geometry::normalize_rotation(v);
        }
        if let Some(v) = self.z_index {
            el.z_index = v;
        }

        match &mut el.kind {
            ElementKind::Image(img) => {
                if self.has_text_fields() || self.has_shape_fields() || self.fill.is_some() {
                    return Err("text/shape field on image");
                }
                if let Some(v) = &self.src {
                    img.src = v.clone();
                }
                if let Some(v) = self.draggable {
                    img.draggable = v;
                }
            }
            ElementKind::Text(t) => {
                if self.has_image_fields() || self.has_shape_fields() {
                    return Err("image/shape field on text");
                }
                if let Some(v) = &self.text {
                    t.text = v.clone();
                }
                if let Some(v) = &self.font_family {
                    t.font_family = v.clone();
                }
                if let Some(v) = self.font_size {
                    t.font_size = v;
                }
                if let Some(v) = self.font_weight {
                    t.font_weight = v;
                }
                if let Some(v) = self.font_style {
                    t.font_style = v;
                }
                if let Some(v) = self.align {
                    t.align = v;
                }
                if let Some(v) = &self.fill {
                    t.fill = v.clone();
                }
            }
            ElementKind::Shape(s) => {
                if self.has_image_fields() || self.has_text_fields() {
                    return Err("image/text field on shape");
                }
                if let Some(v) = self.shape {
                    s.shape = v;
                }
                if let Some(v) = &self.fill {
                    s.fill = v.clone();
                }
                if let Some(v) = &self.stroke {
                    s.stroke = v.clone();
                }
                if let Some(v) = self.stroke_width {
                    s.stroke_width = v;
                }
                if let Some(v) = self.stroke_style {
                    s.stroke_style = v;
                }
                if let Some(v) = self.corner_radius {
                    s.corner_radius = if v.is_zero() { None } else { Some(v) };
                }
                if let Some(v) = &self.image_fill {
                    s.image_fill = if v.is_empty() { None } else { Some(v.clone()) };
                }
            }
            ElementKind::Group(_) => {
                if self.has_image_fields()
                    || self.has_text_fields()
                    || self.has_shape_fields()
                    || self.fill.is_some()
                {
                    return Err("content field on group");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_json_uses_type_tag_and_camel_case() {
        let el = Element {
            id: ElementId::intern("title"),
            x: 10.0,
            y: 20.0,
            width: 200.0,
            height: 40.0,
            rotation: 0.0,
            z_index: 3,
            parent_id: None,
            kind: ElementKind::Text(TextProps::default()),
        };
        let v = serde_json::to_value(&el).unwrap();
        assert_eq!(v["type"], "text");
        assert_eq!(v["zIndex"], 3);
        assert_eq!(v["fontFamily"], "Arial");
        assert!(v.get("parentId").is_none());

        let back: Element = serde_json::from_value(v).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn patch_rejects_fields_of_other_kinds() {
        let mut el = Element {
            id: ElementId::intern("photo"),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            rotation: 0.0,
            z_index: 1,
            parent_id: None,
            kind: ElementKind::Image(ImageProps {
                src: "a.png".into(),
                draggable: true,
            }),
        };
        let patch = ElementPatch {
            font_size: Some(12.0),
            ..ElementPatch::default()
        };
        assert!(patch.apply_to(&mut el).is_err());
    }

    #[test]
    fn patch_clears_image_fill_with_empty_string() {
        let mut el = Element {
            id: ElementId::intern("frame"),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            rotation: 0.0,
            z_index: 1,
            parent_id: None,
            kind: ElementKind::Shape(ShapeProps {
                image_fill: Some("photo.png".into()),
                ..ShapeProps::new(ShapeKind::Circle)
            }),
        };
        let patch = ElementPatch {
            image_fill: Some(String::new()),
            ..ElementPatch::default()
        };
        patch.apply_to(&mut el).unwrap();
        match &el.kind {
            ElementKind::Shape(s) => assert_eq!(s.image_fill, None),
            _ => unreachable!(),
        }
    }
}
