//! Render command: rasterize the final frame of a scene to PNG.
//!
//! ## Rust Lesson #12: Adapting a trait to a library
//!
//! [`PixmapCanvas`] is a thin adapter: it owns a `tiny_skia::Pixmap` and
//! implements the [`Canvas`] trait from the core crate by translating each
//! call into a tiny-skia path. The shapes never learn that pixels exist.

use log::{info, trace};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use rebound::{Canvas, Rectangle, Rgb};

use super::common::{flag_value, load_scene, simulate};

/// Default output width in pixels.
const DEFAULT_SIZE: u32 = 800;

/// A [`Canvas`] that draws into an RGBA pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    viewport: Rectangle,
    color: Rgb,
    thickness: f64,
}

impl PixmapCanvas {
    /// `None` if either dimension is zero.
    pub fn new(viewport: Rectangle, width: u32, height: u32) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(Color::WHITE);
        Some(Self {
            pixmap,
            viewport,
            color: Rgb::BLACK,
            thickness: rebound::canvas::DEFAULT_PEN_THICKNESS,
        })
    }

    #[cfg(test)]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn save_png(&self, path: &str) -> Result<(), String> {
        self.pixmap.save_png(path).map_err(|e| format!("Failed to write {}: {}", path, e))
    }

    fn scale_x(&self) -> f64 {
        self.pixmap.width() as f64 / self.viewport.width()
    }

    fn scale_y(&self) -> f64 {
        self.pixmap.height() as f64 / self.viewport.height()
    }

    fn px(&self, x: f64, y: f64) -> (f32, f32) {
        (
            ((x - self.viewport.top_left().x()) * self.scale_x()) as f32,
            ((self.viewport.top_left().y() - y) * self.scale_y()) as f32,
        )
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color.r, self.color.g, self.color.b, 255);
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: (2.0 * self.thickness * self.pixmap.width() as f64) as f32,
            ..Stroke::default()
        }
    }

    fn oval(&self, x: f64, y: f64, r: f64) -> Option<Path> {
        let (cx, cy) = self.px(x, y);
        let rx = (r * self.scale_x()) as f32;
        let ry = (r * self.scale_y()) as f32;
        let bounds = Rect::from_xywh(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry)?;
        PathBuilder::from_oval(bounds)
    }

    fn rect(&self, cx: f64, cy: f64, half_width: f64, half_height: f64) -> Option<Rect> {
        let (x, y) = self.px(cx - half_width, cy + half_height);
        let w = (2.0 * half_width * self.scale_x()) as f32;
        let h = (2.0 * half_height * self.scale_y()) as f32;
        Rect::from_xywh(x, y, w, h)
    }

    fn fill(&mut self, path: Option<Path>) {
        if let Some(path) = path {
            let paint = self.paint();
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn outline(&mut self, path: Option<Path>) {
        if let Some(path) = path {
            let paint = self.paint();
            let stroke = self.stroke();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

impl Canvas for PixmapCanvas {
    fn clear(&mut self, color: Rgb) {
        self.pixmap.fill(Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    fn set_pen_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_pen_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }

    fn filled_circle(&mut self, x: f64, y: f64, r: f64) {
        let path = self.oval(x, y, r);
        self.fill(path);
    }

    fn circle(&mut self, x: f64, y: f64, r: f64) {
        let path = self.oval(x, y, r);
        self.outline(path);
    }

    fn filled_rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        if let Some(rect) = self.rect(cx, cy, half_width, half_height) {
            let paint = self.paint();
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        let path = self.rect(cx, cy, half_width, half_height).map(PathBuilder::from_rect);
        self.outline(path);
    }

    fn point(&mut self, x: f64, y: f64) {
        let (cx, cy) = self.px(x, y);
        let r = (self.thickness * self.pixmap.width() as f64) as f32;
        let path = PathBuilder::from_circle(cx, cy, r);
        self.fill(path);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (px1, py1) = self.px(x1, y1);
        let (px2, py2) = self.px(x2, y2);
        let mut pb = PathBuilder::new();
        pb.move_to(px1, py1);
        pb.line_to(px2, py2);
        self.outline(pb.finish());
    }

    fn text(&mut self, _x: f64, _y: f64, text: &str) {
        // tiny-skia has no font rasterizer
        trace!("png canvas skips text '{}'", text);
    }
}

/// Execute the render command.
pub fn cmd_render(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<&str> = None;
    let mut output = "rebound.png".to_string();
    let mut frames: Option<u64> = None;
    let mut size = DEFAULT_SIZE;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                output = flag_value(args, i, "--output")?.to_string();
            }
            "-n" | "--frames" => {
                i += 1;
                let value = flag_value(args, i, "--frames")?;
                let n = value
                    .parse()
                    .map_err(|_| format!("Invalid frame count: {}", value))?;
                frames = Some(n);
            }
            "--size" => {
                i += 1;
                let value = flag_value(args, i, "--size")?;
                size = value.parse().map_err(|_| format!("Invalid size: {}", value))?;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path if !path.starts_with('-') => {
                if scene_path.is_none() {
                    scene_path = Some(path);
                }
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown));
            }
        }
        i += 1;
    }

    let scene = load_scene(scene_path)?;
    let frames = frames.unwrap_or(scene.frames);
    let (sim, _) = simulate(&scene, frames)?;

    let (width, height) = pixel_size(sim.bounds(), size);
    let mut canvas = PixmapCanvas::new(*sim.bounds(), width, height)
        .ok_or_else(|| format!("Cannot create a {}x{} image", width, height))?;
    sim.render(&mut canvas);
    canvas.save_png(&output)?;

    info!("Wrote {} ({}x{}) after {} frames", output, width, height, frames);
    println!("Wrote: {} ({}x{})", output, width, height);
    Ok(())
}

/// `width` pixels wide, height following the viewport's aspect ratio.
pub fn pixel_size(bounds: &Rectangle, width: u32) -> (u32, u32) {
    let height = (width as f64 * bounds.height() / bounds.width()).round() as u32;
    (width, height.max(1))
}

fn print_usage() {
    eprintln!("rebound render - Rasterize a scene's final frame to PNG");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rebound render [scene.yaml] [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output PNG (default: rebound.png)");
    eprintln!("    -n, --frames <n>       Frames to simulate first (default: scene's `frames`)");
    eprintln!("    --size <px>            Image width in pixels (default: {})", DEFAULT_SIZE);
    eprintln!();
    eprintln!("The caption is not drawn; use `rebound svg` for a labelled frame.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebound::Circle;

    fn viewport() -> Rectangle {
        Rectangle::from_coords(-100.0, 100.0, 100.0, -100.0).unwrap()
    }

    #[test]
    fn filled_circle_lands_at_mapped_center() {
        let mut canvas = PixmapCanvas::new(viewport(), 200, 200).unwrap();
        let mut circle = Circle::from_coords(50.0, 50.0, 10.0).unwrap();
        circle.set_color(Rgb::new(255, 0, 0));
        circle.draw(&mut canvas);

        // world (50, 50) is pixel (150, 50)
        let hit = canvas.pixmap().pixel(150, 50).unwrap();
        assert_eq!((hit.red(), hit.green(), hit.blue()), (255, 0, 0));

        let miss = canvas.pixmap().pixel(50, 150).unwrap();
        assert_eq!((miss.red(), miss.green(), miss.blue()), (255, 255, 255));
    }

    #[test]
    fn clear_repaints_everything() {
        let mut canvas = PixmapCanvas::new(viewport(), 10, 10).unwrap();
        canvas.clear(Rgb::BLUE);
        let px = canvas.pixmap().pixel(3, 7).unwrap();
        assert_eq!((px.red(), px.green(), px.blue()), (0, 0, 255));
    }

    #[test]
    fn pixel_size_keeps_aspect_ratio() {
        let wide = Rectangle::from_coords(0.0, 50.0, 200.0, 0.0).unwrap();
        assert_eq!(pixel_size(&wide, 400), (400, 100));
        assert_eq!(pixel_size(&viewport(), 300), (300, 300));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(PixmapCanvas::new(viewport(), 0, 10).is_none());
    }
}
