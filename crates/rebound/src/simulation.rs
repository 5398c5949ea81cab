//! The bouncing-circles driver.
//!
//! A [`Simulation`] owns a fixed bounding rectangle and a list of circles.
//! Each frame it draws everything, moves every circle one velocity step, and
//! then classifies each circle against the bounds and reflects its velocity
//! according to the [`Zone`] it landed in.
//!
//! ```
//! use rebound::{Rectangle, Simulation, SpawnConfig};
//!
//! let bounds = Rectangle::from_coords(-100.0, 100.0, 100.0, -100.0).unwrap();
//! let mut sim = Simulation::new(bounds, SpawnConfig::default(), Some(7));
//! sim.spawn_at(0.0, 0.0).unwrap();
//! for _ in 0..1000 {
//!     sim.tick();
//! }
//! assert_eq!(sim.frame(), 1000);
//! ```

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;
use crate::circle::Circle;
use crate::collision::{Bounded, Zone};
use crate::color::Rgb;
use crate::error::{GeometryError, Result};
use crate::geometry::Point;
use crate::rectangle::Rectangle;

/// Pen thickness for the coordinate axes.
pub const AXIS_THICKNESS: f64 = 0.003;

/// Ranges for randomly spawned circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    /// Smallest radius (inclusive).
    pub min_radius: f64,
    /// Largest radius (exclusive).
    pub max_radius: f64,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_radius: 5.0,
            max_radius: 10.0,
            max_speed: 2.0,
        }
    }
}

impl SpawnConfig {
    /// Check that every range can be sampled: finite bounds, a positive
    /// minimum radius no larger than the maximum, and a speed range whose
    /// width `2 * max_speed` is still finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(GeometryError::InvalidSpawn(format!(
                "min_radius must be positive and finite, got {}",
                self.min_radius
            )));
        }
        if !(self.max_radius.is_finite() && self.max_radius >= self.min_radius) {
            return Err(GeometryError::InvalidSpawn(format!(
                "max_radius must be finite and at least min_radius ({}), got {}",
                self.min_radius, self.max_radius
            )));
        }
        if !(2.0 * self.max_speed).is_finite() {
            return Err(GeometryError::InvalidSpawn(format!(
                "max_speed is out of range, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }
}

/// A circle that touched the bounds during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub zone: Zone,
}

/// What happened during one [`Simulation::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub hits: Vec<Hit>,
}

impl FrameReport {
    /// No circle touched the bounds.
    pub fn is_quiet(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Turns a polled "button is down" flag into one event per press.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickLatch {
    pressed: bool,
}

impl ClickLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only on the poll where the button goes from up to down.
    pub fn update(&mut self, is_down: bool) -> bool {
        let fired = is_down && !self.pressed;
        self.pressed = is_down;
        fired
    }
}

/// Circles bouncing inside a fixed rectangle.
pub struct Simulation {
    bounds: Rectangle,
    circles: Vec<Circle>,
    spawn: SpawnConfig,
    rng: StdRng,
    frame: u64,
    show_axes: bool,
}

impl Simulation {
    /// `seed = None` draws the spawn sequence from OS entropy.
    pub fn new(bounds: Rectangle, spawn: SpawnConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            bounds,
            circles: Vec::new(),
            spawn,
            rng,
            frame: 0,
            show_axes: false,
        }
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn spawn_config(&self) -> &SpawnConfig {
        &self.spawn
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    pub fn set_show_axes(&mut self, show: bool) {
        self.show_axes = show;
    }

    pub fn add(&mut self, circle: Circle) {
        self.circles.push(circle);
    }

    /// Remove every circle. The frame counter keeps running.
    pub fn clear(&mut self) {
        self.circles.clear();
    }

    /// Spawn a circle at `(x, y)` with random radius, velocity and color.
    ///
    /// Fails without drawing any numbers if the spawn ranges are invalid
    /// (see [`SpawnConfig::validate`]).
    pub fn spawn_at(&mut self, x: f64, y: f64) -> Result<&Circle> {
        self.spawn.validate()?;
        let radius = sample(&mut self.rng, self.spawn.min_radius, self.spawn.max_radius);
        let speed = self.spawn.max_speed.abs();
        let vx = sample(&mut self.rng, -speed, speed);
        let vy = sample(&mut self.rng, -speed, speed);
        let color = Rgb::new(self.rng.random(), self.rng.random(), self.rng.random());

        let mut circle = Circle::new(Point::new(x, y), radius)?;
        circle.set_velocity(vx, vy);
        circle.set_color(color);

        debug!(
            "spawned circle #{} at ({:.1}, {:.1}) r={:.2} v=({:.2}, {:.2}) {}",
            self.circles.len(),
            x,
            y,
            radius,
            vx,
            vy,
            color
        );
        self.circles.push(circle);
        Ok(&self.circles[self.circles.len() - 1])
    }

    /// Draw the whole scene: background, optional axes, circles, caption.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Rgb::WHITE);
        if self.show_axes {
            draw_axes(canvas, &self.bounds);
        }
        for circle in &self.circles {
            circle.draw(canvas);
        }

        let caption_y = self.bounds.top_left().y() - self.bounds.height() * 0.05;
        canvas.set_pen_color(Rgb::BLUE);
        canvas.text(
            self.bounds.center().x(),
            caption_y,
            &format!("Click to add circles: {}", self.circles.len()),
        );
    }

    /// Move every circle one step.
    pub fn advance(&mut self) {
        for circle in &mut self.circles {
            circle.step();
        }
    }

    /// Classify every circle against the bounds and bounce the ones that hit.
    pub fn resolve_collisions(&mut self) -> Vec<Hit> {
        let mut hits = Vec::new();
        for (index, circle) in self.circles.iter_mut().enumerate() {
            let zone = circle.classify_collision(&self.bounds);
            if zone == Zone::None {
                continue;
            }
            let bounced = zone.reflect(circle.velocity());
            circle.set_velocity(bounced.vx, bounced.vy);
            debug!("circle #{} hit {} -> v=({:.2}, {:.2})", index, zone, bounced.vx, bounced.vy);
            hits.push(Hit { index, zone });
        }
        hits
    }

    /// One frame: move, then bounce.
    pub fn tick(&mut self) -> FrameReport {
        self.advance();
        let hits = self.resolve_collisions();
        self.frame += 1;
        trace!("frame {}: {} circles, {} hits", self.frame, self.circles.len(), hits.len());
        FrameReport {
            frame: self.frame,
            hits,
        }
    }
}

/// Black axes through the origin, labelled near their positive ends.
pub fn draw_axes(canvas: &mut dyn Canvas, bounds: &Rectangle) {
    let left = bounds.top_left().x();
    let right = bounds.bottom_right().x();
    let top = bounds.top_left().y();
    let bottom = bounds.bottom_right().y();
    let dx = bounds.width() * 0.01;
    let dy = bounds.height() * 0.01;

    canvas.set_pen_color(Rgb::BLACK);
    canvas.set_pen_thickness(AXIS_THICKNESS);
    canvas.line(0.0, bottom, 0.0, top);
    canvas.text(dx, top - dy, "y");
    canvas.line(left, 0.0, right, 0.0);
    canvas.text(right - dx, dy, "x");
}

// Ranges are validated before sampling; a collapsed range yields `lo`.
fn sample(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
