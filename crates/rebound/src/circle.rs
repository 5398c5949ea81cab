//! Circles: an owned center point plus a strictly positive radius.

use std::fmt;

use crate::canvas::Canvas;
use crate::collision::{Bounded, Extents};
use crate::color::Rgb;
use crate::error::{GeometryError, Result};
use crate::geometry::{Point, Velocity};

/// A circle. Color and velocity live on the center point.
///
/// The radius is private so every change goes through [`Circle::set_radius`],
/// which refuses anything that is not `> 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self { center, radius })
    }

    pub fn from_coords(x: f64, y: f64, radius: f64) -> Result<Self> {
        Self::new(Point::new(x, y), radius)
    }

    #[inline]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// Mutable access to the center. Points carry no invariant of their own.
    #[inline]
    pub fn center_mut(&mut self) -> &mut Point {
        &mut self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.center.color()
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.center.set_color(color);
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.center.velocity()
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.center.set_velocity(vx, vy);
    }

    /// One tick of motion for the center.
    pub fn step(&mut self) {
        self.center.step();
    }

    /// Overlap test with strict inequality: tangent circles do not overlap.
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance(&other.center) < self.radius + other.radius
    }

    /// Filled disc in the center's color.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_pen_color(self.center.color());
        canvas.filled_circle(self.center.x(), self.center.y(), self.radius);
    }

    pub fn draw_outline(&self, canvas: &mut dyn Canvas, thickness: f64) {
        canvas.set_pen_color(self.center.color());
        canvas.set_pen_thickness(thickness);
        canvas.circle(self.center.x(), self.center.y(), self.radius);
    }
}

impl Default for Circle {
    /// Unit circle at the origin.
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            radius: 1.0,
        }
    }
}

impl Bounded for Circle {
    fn extents(&self) -> Extents {
        Extents {
            left: self.center.x() - self.radius,
            right: self.center.x() + self.radius,
            top: self.center.y() + self.radius,
            bottom: self.center.y() - self.radius,
        }
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle [center={}, radius={}]", self.center, self.radius)
    }
}

// Written as a negated `>` so NaN is rejected too.
fn check_radius(radius: f64) -> Result<()> {
    if !(radius > 0.0) {
        return Err(GeometryError::NonPositiveRadius { radius });
    }
    Ok(())
}
