//! Document → drawing commands.
//!
//! Walks root elements in paint order and drives a [`Painter`]. Every
//! element is drawn in its own local frame (origin at its top-left corner,
//! rotated around its centre); group children are drawn inside the group's
//! frame. The selection chrome, guides and marquee go on top.

use ab_core::geometry::rotate_point;
use ab_core::{
    Axis, CornerRadii, Document, Element, ElementId, ElementKind, Geom, Guideline, ShapeKind,
    TextAlign, TextProps,
};
use kurbo::{
    BezPath, Circle, Ellipse, Point, Rect, RoundedRect, RoundedRectRadii, Shape,
};

const PATH_TOLERANCE: f64 = 0.1;

// ─── Painter contract ────────────────────────────────────────────────────

/// Stroke parameters. `dash` is empty for solid lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash: Vec<f64>,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            dash: Vec::new(),
        }
    }
}

/// A single line of text anchored at `(x, y)` (top of the line box; `x` is
/// the left edge, centre or right edge depending on `align`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// CSS font shorthand, e.g. `italic bold 24px Arial`.
    pub font: String,
    pub font_size: f64,
    pub fill: String,
    pub align: TextAlign,
    pub x: f64,
    pub y: f64,
    pub max_width: f64,
}

/// Backend-agnostic 2D drawing surface (Canvas2D, recorders, ...).
///
/// Transforms compose like Canvas2D: each call applies to the current
/// matrix, `save`/`restore` push and pop it along with the clip.
pub trait Painter {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Clockwise, in degrees.
    fn rotate(&mut self, degrees: f64);
    fn fill_path(&mut self, path: &BezPath, color: &str);
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke);
    fn clip_path(&mut self, path: &BezPath);
    fn draw_image(&mut self, src: &str, rect: Rect);
    fn draw_text(&mut self, run: &TextRun);
}

// ─── Overlay ─────────────────────────────────────────────────────────────

/// Editor state drawn on top of the document. Not part of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub selected: Vec<ElementId>,
    pub guides: Vec<Guideline>,
    pub marquee: Option<Geom>,
    /// Grip radius in canvas units; handles are only drawn for a single selection.
    pub handle_radius: f64,
    pub rotate_handle_offset: f64,
    pub accent: String,
    pub guide_color: String,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            guides: Vec::new(),
            marquee: None,
            handle_radius: 8.0,
            rotate_handle_offset: 30.0,
            accent: "#0D99FF".into(),
            guide_color: "#FF3B7F".into(),
        }
    }
}

// ─── Scene painting ──────────────────────────────────────────────────────

/// Paint the artboard, every element, then the overlay.
pub fn paint_document(doc: &Document, overlay: &Overlay, painter: &mut dyn Painter) {
    let board = doc.artboard.geom();
    painter.fill_path(&rect_path(board), &doc.artboard.background_color);

    painter.save();
    painter.clip_path(&rect_path(board));
    for el in doc.paint_order() {
        paint_element(doc, el, painter);
    }
    painter.restore();

    paint_overlay(doc, overlay, painter);
}

fn paint_element(doc: &Document, el: &Element, painter: &mut dyn Painter) {
    painter.save();
    painter.translate(el.x, el.y);
    if el.rotation != 0.0 {
        painter.translate(el.width / 2.0, el.height / 2.0);
        painter.rotate(el.rotation);
        painter.translate(-el.width / 2.0, -el.height / 2.0);
    }
    let local = Rect::new(0.0, 0.0, el.width, el.height);

    match &el.kind {
        ElementKind::Image(img) => painter.draw_image(&img.src, local),

        ElementKind::Text(t) => painter.draw_text(&text_run(t, el.width)),

        ElementKind::Shape(s) => {
            let radii = if s.shape == ShapeKind::Rectangle { s.corner_radius } else { None };
            let outline = shape_outline(s.shape, el.width, el.height, radii);
            painter.fill_path(&outline, &s.fill);
            if let Some(src) = &s.image_fill {
                painter.save();
                painter.clip_path(&outline);
                painter.draw_image(src, local);
                painter.restore();
            }
            if s.stroke_width > 0.0 {
                let stroke = Stroke {
                    color: s.stroke.clone(),
                    width: s.stroke_width,
                    dash: s.stroke_style.dash_pattern(s.stroke_width),
                };
                painter.stroke_path(&outline, &stroke);
            }
        }

        ElementKind::Group(_) => {
            for child in doc.child_paint_order(el.id) {
                paint_element(doc, child, painter);
            }
        }
    }

    painter.restore();
}

fn text_run(t: &TextProps, width: f64) -> TextRun {
    let mut font = String::new();
    if t.font_style == ab_core::FontStyle::Italic {
        font.push_str("italic ");
    }
    if t.font_weight == ab_core::FontWeight::Bold {
        font.push_str("bold ");
    }
    font.push_str(&format!("{}px {}", t.font_size, t.font_family));

    let x = match t.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => width / 2.0,
        TextAlign::Right => width,
    };
    TextRun {
        text: t.text.clone(),
        font,
        font_size: t.font_size,
        fill: t.fill.clone(),
        align: t.align,
        x,
        y: 0.0,
        max_width: width,
    }
}

fn paint_overlay(doc: &Document, overlay: &Overlay, painter: &mut dyn Painter) {
    let single = overlay.selected.len() == 1;
    for id in &overlay.selected {
        let (Some(el), Some(abs)) = (doc.get(*id), doc.absolute_geom(*id)) else {
            continue;
        };
        let outline = rotated_rect_path(abs, el.rotation);
        painter.stroke_path(&outline, &Stroke::solid(&overlay.accent, 1.0));

        if single {
            let r = overlay.handle_radius / 2.0;
            for (_, p) in crate::hit::handle_points(abs, el.rotation) {
                let grip = Rect::new(p.x - r, p.y - r, p.x + r, p.y + r).to_path(PATH_TOLERANCE);
                painter.fill_path(&grip, "#FFFFFF");
                painter.stroke_path(&grip, &Stroke::solid(&overlay.accent, 1.0));
            }

            let top = rotate_point(
                ab_core::Point::new(abs.x + abs.width / 2.0, abs.y),
                abs.center(),
                el.rotation,
            );
            let knob = crate::hit::rotate_handle_point(abs, el.rotation, overlay.rotate_handle_offset);
            let mut stem = BezPath::new();
            stem.move_to((top.x, top.y));
            stem.line_to((knob.x, knob.y));
            painter.stroke_path(&stem, &Stroke::solid(&overlay.accent, 1.0));
            let circle = Circle::new((knob.x, knob.y), r).to_path(PATH_TOLERANCE);
            painter.fill_path(&circle, "#FFFFFF");
            painter.stroke_path(&circle, &Stroke::solid(&overlay.accent, 1.0));
        }
    }

    let board = doc.artboard.geom();
    for g in &overlay.guides {
        let mut line = BezPath::new();
        match g.axis {
            Axis::Vertical => {
                line.move_to((g.position, 0.0));
                line.line_to((g.position, board.height));
            }
            Axis::Horizontal => {
                line.move_to((0.0, g.position));
                line.line_to((board.width, g.position));
            }
        }
        painter.stroke_path(
            &line,
            &Stroke {
                color: overlay.guide_color.clone(),
                width: 1.0,
                dash: vec![4.0, 4.0],
            },
        );
    }

    if let Some(m) = overlay.marquee {
        let path = rect_path(m);
        painter.fill_path(&path, "rgba(13, 153, 255, 0.08)");
        painter.stroke_path(&path, &Stroke::solid(&overlay.accent, 1.0));
    }
    log::trace!(
        "overlay: {} selected, {} guides",
        overlay.selected.len(),
        overlay.guides.len()
    );
}

// ─── Outlines ────────────────────────────────────────────────────────────

fn rect_path(g: Geom) -> BezPath {
    Rect::new(g.x, g.y, g.right(), g.bottom()).to_path(PATH_TOLERANCE)
}

fn rotated_rect_path(g: Geom, rotation: f64) -> BezPath {
    let c = g.center();
    let corners = [
        ab_core::Point::new(g.x, g.y),
        ab_core::Point::new(g.right(), g.y),
        ab_core::Point::new(g.right(), g.bottom()),
        ab_core::Point::new(g.x, g.bottom()),
    ]
    .map(|p| {
        let r = rotate_point(p, c, rotation);
        Point::new(r.x, r.y)
    });
    polygon(&corners)
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Vertices of a regular polygon (or star, when `inner` is set) inscribed in
/// the `width × height` box, first vertex at the top.
fn radial_points(width: f64, height: f64, points: usize, inner: Option<f64>) -> Vec<Point> {
    let (rx, ry) = (width / 2.0, height / 2.0);
    let steps = if inner.is_some() { points * 2 } else { points };
    (0..steps)
        .map(|i| {
            let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * i as f64 / steps as f64;
            let k = match inner {
                Some(ratio) if i % 2 == 1 => ratio,
                _ => 1.0,
            };
            Point::new(rx + rx * k * angle.cos(), ry + ry * k * angle.sin())
        })
        .collect()
}

/// Outline of a shape in its local frame `(0, 0) – (width, height)`.
/// Used for fill, stroke and for clipping frame images.
pub fn shape_outline(shape: ShapeKind, width: f64, height: f64, radii: Option<CornerRadii>) -> BezPath {
    let rect = Rect::new(0.0, 0.0, width, height);
    match shape {
        ShapeKind::Rectangle => match radii {
            Some(r) if !r.is_zero() => {
                let max = width.min(height) / 2.0;
                let radii = RoundedRectRadii::new(
                    r.top_left.clamp(0.0, max),
                    r.top_right.clamp(0.0, max),
                    r.bottom_right.clamp(0.0, max),
                    r.bottom_left.clamp(0.0, max),
                );
                RoundedRect::from_rect(rect, radii).to_path(PATH_TOLERANCE)
            }
            _ => rect.to_path(PATH_TOLERANCE),
        },
        ShapeKind::Circle => {
            Circle::new((width / 2.0, height / 2.0), width.min(height) / 2.0).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Ellipse => {
            Ellipse::new((width / 2.0, height / 2.0), (width / 2.0, height / 2.0), 0.0)
                .to_path(PATH_TOLERANCE)
        }
        ShapeKind::Triangle => polygon(&[
            Point::new(width / 2.0, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ]),
        ShapeKind::Pentagon => polygon(&radial_points(width, height, 5, None)),
        ShapeKind::Hexagon => polygon(&radial_points(width, height, 6, None)),
        ShapeKind::Star => polygon(&radial_points(width, height, 5, Some(0.5))),
    }
}

// ─── Recorder ────────────────────────────────────────────────────────────

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Rotate { degrees: f64 },
    FillPath { path: BezPath, color: String },
    StrokePath { path: BezPath, stroke: Stroke },
    ClipPath { path: BezPath },
    DrawImage { src: String, rect: Rect },
    DrawText(TextRun),
}

/// A [`Painter`] that records calls instead of drawing them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::DrawImage { src, .. } => Some(src.as_str()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::DrawText(run) => Some(run),
            _ => None,
        })
    }
}

impl Painter for DrawList {
    fn save(&mut self) {
        self.commands.push(DrawCmd::Save);
    }
    fn restore(&mut self) {
        self.commands.push(DrawCmd::Restore);
    }
    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCmd::Translate { dx, dy });
    }
    fn rotate(&mut self, degrees: f64) {
        self.commands.push(DrawCmd::Rotate { degrees });
    }
    fn fill_path(&mut self, path: &BezPath, color: &str) {
        self.commands.push(DrawCmd::FillPath {
            path: path.clone(),
            color: color.into(),
        });
    }
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke) {
        self.commands.push(DrawCmd::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
        });
    }
    fn clip_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCmd::ClipPath { path: path.clone() });
    }
    fn draw_image(&mut self, src: &str, rect: Rect) {
        self.commands.push(DrawCmd::DrawImage {
            src: src.into(),
            rect,
        });
    }
    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(DrawCmd::DrawText(run.clone()));
    }
}
