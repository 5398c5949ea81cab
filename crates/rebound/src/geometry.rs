//! Core point type for rebound.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! A `Point` carries more than coordinates here: it also remembers its color
//! and the velocity it moves with each tick. All of those fields are small
//! `Copy` values, so `Point` itself is `Copy` - assigning it to another
//! variable duplicates it instead of sharing it. A circle that owns a point
//! can never accidentally alias some other shape's point.

use std::fmt;

use crate::canvas::Canvas;
use crate::circle::Circle;
use crate::color::Rgb;

/// Pen thickness used when a point draws itself without an explicit one.
pub const DEFAULT_POINT_THICKNESS: f64 = 0.02;

/// Per-tick displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { vx: 0.0, vy: 0.0 };

    #[inline]
    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    /// Negate the horizontal component.
    #[inline]
    pub fn flip_x(self) -> Self {
        Self::new(-self.vx, self.vy)
    }

    /// Negate the vertical component.
    #[inline]
    pub fn flip_y(self) -> Self {
        Self::new(self.vx, -self.vy)
    }

    /// Negate both components.
    #[inline]
    pub fn flipped(self) -> Self {
        Self::new(-self.vx, -self.vy)
    }
}

/// A 2D point (y grows upward) with a color and a velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    color: Rgb,
    velocity: Velocity,
}

impl Point {
    /// Black, motionless point at `(x, y)`.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            color: Rgb::BLACK,
            velocity: Velocity::ZERO,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Replace the velocity (it does not accumulate).
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.velocity = Velocity::new(vx, vy);
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint of two points. The result is a fresh black, motionless point.
    #[inline]
    pub fn midpoint_of(a: &Point, b: &Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Midpoint between this point and `other`.
    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::midpoint_of(self, other)
    }

    /// Apply one tick of velocity in place. Two calls move two full steps.
    #[inline]
    pub fn step(&mut self) {
        self.x += self.velocity.vx;
        self.y += self.velocity.vy;
    }

    /// Rotate about the origin (not about any owning shape) by `degrees`,
    /// counter-clockwise.
    pub fn rotate(&mut self, degrees: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.x * sin + self.y * cos;
        self.x = x;
        self.y = y;
    }

    /// Strictly inside: a point on the circumference is outside.
    #[inline]
    pub fn inside_circle(&self, circle: &Circle) -> bool {
        self.distance(circle.center()) < circle.radius()
    }

    /// Draw in the point's own color with the default thickness.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_with(canvas, self.color, DEFAULT_POINT_THICKNESS);
    }

    pub fn draw_with(&self, canvas: &mut dyn Canvas, color: Rgb, thickness: f64) {
        canvas.set_pen_color(color);
        canvas.set_pen_thickness(thickness);
        canvas.point(self.x, self.y);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};

    const EPS: f64 = 1e-9;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(&p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn distance_to_self_is_zero_and_symmetric() {
        let a = Point::new(-7.5, 2.25);
        let b = Point::new(11.0, -3.0);
        assert_eq!(a.distance(&a), 0.0);
        assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn midpoint_is_symmetric() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 4.0);
        let m = Point::midpoint_of(&a, &b);
        assert_eq!((m.x(), m.y()), (2.0, 2.0));
        assert_eq!(a.midpoint(&b), b.midpoint(&a));
    }

    #[test]
    fn midpoint_does_not_inherit_color_or_velocity() {
        let mut a = Point::new(0.0, 0.0);
        a.set_color(Rgb::BLUE);
        a.set_velocity(1.0, 1.0);
        let m = a.midpoint(&Point::new(2.0, 2.0));
        assert_eq!(m.color(), Rgb::BLACK);
        assert_eq!(m.velocity(), Velocity::ZERO);
    }

    #[test]
    fn step_accumulates() {
        let mut p = Point::new(1.0, 1.0);
        p.set_velocity(0.5, -2.0);
        p.step();
        p.step();
        assert_eq!((p.x(), p.y()), (2.0, -3.0));
    }

    #[test]
    fn set_velocity_replaces() {
        let mut p = Point::new(0.0, 0.0);
        p.set_velocity(3.0, 3.0);
        p.set_velocity(-1.0, 0.0);
        assert_eq!(p.velocity(), Velocity::new(-1.0, 0.0));
    }

    #[test]
    fn rotate_quarter_turn_about_origin() {
        let mut p = Point::new(10.0, 0.0);
        p.rotate(90.0);
        assert!(p.x().abs() < EPS, "x = {}", p.x());
        assert!((p.y() - 10.0).abs() < EPS, "y = {}", p.y());
    }

    #[test]
    fn full_turn_is_identity() {
        for &(x, y) in &[(1.0, 2.0), (-35.5, 0.25), (0.0, -99.0), (1e3, 1e3)] {
            let mut p = Point::new(x, y);
            p.rotate(360.0);
            assert!((p.x() - x).abs() < 1e-9 * x.abs().max(1.0));
            assert!((p.y() - y).abs() < 1e-9 * y.abs().max(1.0));
        }
    }

    #[test]
    fn inside_circle_is_strict() {
        let circle = Circle::from_coords(0.0, 0.0, 5.0).unwrap();
        assert!(Point::new(1.0, 1.0).inside_circle(&circle));
        assert!(!Point::new(5.0, 0.0).inside_circle(&circle)); // on circumference
        assert!(!Point::new(3.0, 4.0).inside_circle(&circle)); // distance 5
        assert!(!Point::new(6.0, 0.0).inside_circle(&circle));
    }

    #[test]
    fn draw_uses_own_color_and_default_thickness() {
        let mut p = Point::new(2.0, 3.0);
        p.set_color(Rgb::BLUE);
        let mut canvas = RecordingCanvas::new();
        p.draw(&mut canvas);
        assert_eq!(
            canvas.commands(),
            &[
                DrawCommand::PenColor(Rgb::BLUE),
                DrawCommand::PenThickness(DEFAULT_POINT_THICKNESS),
                DrawCommand::Point { x: 2.0, y: 3.0 },
            ]
        );
    }

    #[test]
    fn velocity_flips() {
        let v = Velocity::new(1.5, -2.0);
        assert_eq!(v.flip_x(), Velocity::new(-1.5, -2.0));
        assert_eq!(v.flip_y(), Velocity::new(1.5, 2.0));
        assert_eq!(v.flipped(), Velocity::new(-1.5, 2.0));
    }
}
