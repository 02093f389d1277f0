//! Canvas2D backend for the render adapter.
//!
//! Implements [`Painter`] on top of `CanvasRenderingContext2d`. Paths are
//! replayed element by element; images come from a cache of decoded
//! `<img>` elements the host registers once they finish loading.

use ab_core::TextAlign;
use ab_render::{Painter, Stroke, TextRun};
use kurbo::{BezPath, PathEl, Rect};
use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Line box height relative to the font size.
const LINE_HEIGHT: f64 = 1.2;
/// Drawn where an image has not finished loading yet.
const IMAGE_PLACEHOLDER: &str = "#E5E5EA";

pub struct Canvas2dPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    images: &'a HashMap<String, HtmlImageElement>,
}

impl<'a> Canvas2dPainter<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, images: &'a HashMap<String, HtmlImageElement>) -> Self {
        Self { ctx, images }
    }

    /// Reset the transform, clear the whole canvas and apply `zoom`.
    pub fn begin_frame(&self, zoom: f64) {
        let ctx = self.ctx;
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        if let Some(canvas) = ctx.canvas() {
            ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
        }
        let _ = ctx.set_transform(zoom, 0.0, 0.0, zoom, 0.0, 0.0);
    }

    fn trace(&self, path: &BezPath) {
        let ctx = self.ctx;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }

    fn set_dash(&self, dash: &[f64]) {
        let arr = js_sys::Array::new();
        for d in dash {
            arr.push(&JsValue::from_f64(*d));
        }
        let _ = self.ctx.set_line_dash(&arr);
    }

    fn measure(&self, text: &str) -> f64 {
        self.ctx.measure_text(text).map_or(0.0, |m| m.width())
    }

    /// Break `text` into lines no wider than `max_width`. Explicit newlines
    /// are kept; a single word wider than the box gets its own line.
    fn wrap(&self, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split(' ') {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{line} {word}")
                };
                if !line.is_empty() && self.measure(&candidate) > max_width {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                } else {
                    line = candidate;
                }
            }
            lines.push(line);
        }
        lines
    }
}

impl Painter for Canvas2dPainter<'_> {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let _ = self.ctx.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        let _ = self.ctx.rotate(degrees.to_radians());
    }

    fn fill_path(&mut self, path: &BezPath, color: &str) {
        self.trace(path);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke) {
        self.trace(path);
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.set_dash(&stroke.dash);
        self.ctx.stroke();
        if !stroke.dash.is_empty() {
            self.set_dash(&[]);
        }
    }

    fn clip_path(&mut self, path: &BezPath) {
        self.trace(path);
        self.ctx.clip();
    }

    fn draw_image(&mut self, src: &str, rect: Rect) {
        match self.images.get(src) {
            Some(img) if img.complete() && img.natural_width() > 0 => {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height(),
                );
            }
            _ => {
                log::trace!("image not ready: {src}");
                self.ctx.set_fill_style_str(IMAGE_PLACEHOLDER);
                self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        let ctx = self.ctx;
        ctx.set_font(&run.font);
        ctx.set_fill_style_str(&run.fill);
        ctx.set_text_baseline("top");
        ctx.set_text_align(match run.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        for (i, line) in self.wrap(&run.text, run.max_width).iter().enumerate() {
            let y = run.y + i as f64 * run.font_size * LINE_HEIGHT;
            let _ = ctx.fill_text(line, run.x, y);
        }
    }
}
