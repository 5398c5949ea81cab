//! The drawing surface shapes render onto.
//!
//! Shapes never touch pixels themselves; they call into a [`Canvas`]. The
//! canvas works in *world* coordinates (y-up, the same space the shapes
//! live in) and is responsible for mapping them onto its own output.
//!
//! Pen thickness follows the classic turtle-graphics convention: it is a
//! pen *radius* given as a fraction of the canvas width, so `0.005` means a
//! line half a percent of the width wide on each side.
//!
//! Two canvases live here:
//! - [`RecordingCanvas`] keeps the calls as a list of [`DrawCommand`]s
//! - [`SvgCanvas`] writes an SVG document

use crate::color::Rgb;
use crate::rectangle::Rectangle;

/// Pen thickness a fresh canvas starts with.
pub const DEFAULT_PEN_THICKNESS: f64 = 0.002;

/// Capability the shapes draw through.
pub trait Canvas {
    /// Wipe everything drawn so far and fill with `color`.
    fn clear(&mut self, color: Rgb);

    fn set_pen_color(&mut self, color: Rgb);

    fn set_pen_thickness(&mut self, thickness: f64);

    fn filled_circle(&mut self, x: f64, y: f64, r: f64);

    fn circle(&mut self, x: f64, y: f64, r: f64);

    /// Filled rectangle given by its center and half extents.
    fn filled_rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64);

    /// Rectangle outline given by its center and half extents.
    fn rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64);

    /// A dot whose radius is the pen thickness.
    fn point(&mut self, x: f64, y: f64);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Text centered on `(x, y)`.
    fn text(&mut self, x: f64, y: f64, text: &str);
}

// ============================================================================
// RECORDING
// ============================================================================

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    PenColor(Rgb),
    PenThickness(f64),
    FilledCircle { x: f64, y: f64, r: f64 },
    Circle { x: f64, y: f64, r: f64 },
    FilledRectangle { cx: f64, cy: f64, half_width: f64, half_height: f64 },
    Rectangle { cx: f64, cy: f64, half_width: f64, half_height: f64 },
    Point { x: f64, y: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Text { x: f64, y: f64, text: String },
}

/// Canvas that remembers every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Number of shapes drawn (pen changes and clears not counted).
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    DrawCommand::Clear(_) | DrawCommand::PenColor(_) | DrawCommand::PenThickness(_)
                )
            })
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_pen_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::PenColor(color));
    }

    fn set_pen_thickness(&mut self, thickness: f64) {
        self.commands.push(DrawCommand::PenThickness(thickness));
    }

    fn filled_circle(&mut self, x: f64, y: f64, r: f64) {
        self.commands.push(DrawCommand::FilledCircle { x, y, r });
    }

    fn circle(&mut self, x: f64, y: f64, r: f64) {
        self.commands.push(DrawCommand::Circle { x, y, r });
    }

    fn filled_rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        self.commands.push(DrawCommand::FilledRectangle { cx, cy, half_width, half_height });
    }

    fn rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        self.commands.push(DrawCommand::Rectangle { cx, cy, half_width, half_height });
    }

    fn point(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Point { x, y });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.commands.push(DrawCommand::Text { x, y, text: text.to_string() });
    }
}

// ============================================================================
// SVG
// ============================================================================

/// Canvas that builds an SVG document for a world viewport.
///
/// The viewport rectangle is stretched over `width x height` pixels with the
/// y axis flipped, so world `(left, top)` lands on pixel `(0, 0)`.
pub struct SvgCanvas {
    viewport: Rectangle,
    width: u32,
    height: u32,
    background: Option<Rgb>,
    color: Rgb,
    thickness: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(viewport: Rectangle, width: u32, height: u32) -> Self {
        Self {
            viewport,
            width,
            height,
            background: None,
            color: Rgb::BLACK,
            thickness: DEFAULT_PEN_THICKNESS,
            body: String::new(),
        }
    }

    fn scale_x(&self) -> f64 {
        self.width as f64 / self.viewport.width()
    }

    fn scale_y(&self) -> f64 {
        self.height as f64 / self.viewport.height()
    }

    fn px(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.viewport.top_left().x()) * self.scale_x(),
            (self.viewport.top_left().y() - y) * self.scale_y(),
        )
    }

    fn stroke_width(&self) -> f64 {
        2.0 * self.thickness * self.width as f64
    }

    fn ellipse(&mut self, x: f64, y: f64, r: f64, paint: &str) {
        let (cx, cy) = self.px(x, y);
        let (rx, ry) = (r * self.scale_x(), r * self.scale_y());
        self.body.push_str(&format!(
            "  <ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" {}/>\n",
            cx, cy, rx, ry, paint
        ));
    }

    fn rect(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64, paint: &str) {
        let (x, y) = self.px(cx - half_width, cy + half_height);
        let w = 2.0 * half_width * self.scale_x();
        let h = 2.0 * half_height * self.scale_y();
        self.body.push_str(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
            x, y, w, h, paint
        ));
    }

    fn fill_paint(&self) -> String {
        format!("fill=\"{}\"", self.color)
    }

    fn stroke_paint(&self) -> String {
        format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"",
            self.color,
            self.stroke_width()
        )
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
"#,
            w = self.width,
            h = self.height
        ));
        if let Some(bg) = self.background {
            svg.push_str(&format!("  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n", bg));
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self, color: Rgb) {
        self.body.clear();
        self.background = Some(color);
    }

    fn set_pen_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_pen_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }

    fn filled_circle(&mut self, x: f64, y: f64, r: f64) {
        let paint = self.fill_paint();
        self.ellipse(x, y, r, &paint);
    }

    fn circle(&mut self, x: f64, y: f64, r: f64) {
        let paint = self.stroke_paint();
        self.ellipse(x, y, r, &paint);
    }

    fn filled_rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        let paint = self.fill_paint();
        self.rect(cx, cy, half_width, half_height, &paint);
    }

    fn rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        let paint = self.stroke_paint();
        self.rect(cx, cy, half_width, half_height, &paint);
    }

    fn point(&mut self, x: f64, y: f64) {
        let (cx, cy) = self.px(x, y);
        let r = self.thickness * self.width as f64;
        self.body.push_str(&format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
            cx, cy, r, self.color
        ));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (px1, py1) = self.px(x1, y1);
        let (px2, py2) = self.px(x2, y2);
        self.body.push_str(&format!(
            concat!(
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" ",
                "stroke=\"{}\" stroke-width=\"{:.2}\"/>\n"
            ),
            px1, py1, px2, py2, self.color, self.stroke_width()
        ));
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        let (px, py) = self.px(x, y);
        self.body.push_str(&format!(
            concat!(
                "  <text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-family=\"sans-serif\" ",
                "font-size=\"16\" text-anchor=\"middle\" dominant-baseline=\"middle\">",
                "{}</text>\n"
            ),
            px, py, self.color, escape_text(text)
        ));
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
