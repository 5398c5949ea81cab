//! Axis-aligned rectangles defined by a top-left and a bottom-right corner.
//!
//! Coordinates are y-up, so the top-left corner has the *larger* y. The
//! ordering `top_left.x < bottom_right.x && top_left.y > bottom_right.y` is
//! checked on construction and by both corner setters; a rejected corner is
//! never stored.

use std::fmt;

use crate::canvas::Canvas;
use crate::collision::{Bounded, Extents};
use crate::color::Rgb;
use crate::error::{GeometryError, Result};
use crate::geometry::Point;

/// Outline thickness used by [`Rectangle::draw_outline_default`].
pub const DEFAULT_OUTLINE_THICKNESS: f64 = 0.005;

/// An axis-aligned rectangle. Its color is the color of the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    top_left: Point,
    bottom_right: Point,
}

impl Rectangle {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        check_corners(&top_left, &bottom_right)?;
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Derive the bottom-right corner from a size. Non-positive sizes fail
    /// the ordering check.
    pub fn with_size(top_left: Point, width: f64, height: f64) -> Result<Self> {
        let bottom_right = Point::new(top_left.x() + width, top_left.y() - height);
        Self::new(top_left, bottom_right)
    }

    pub fn from_coords(
        top_left_x: f64,
        top_left_y: f64,
        bottom_right_x: f64,
        bottom_right_y: f64,
    ) -> Result<Self> {
        Self::new(
            Point::new(top_left_x, top_left_y),
            Point::new(bottom_right_x, bottom_right_y),
        )
    }

    #[inline]
    pub fn top_left(&self) -> &Point {
        &self.top_left
    }

    #[inline]
    pub fn bottom_right(&self) -> &Point {
        &self.bottom_right
    }

    /// Replace the top-left corner, validated against the stored bottom-right.
    pub fn set_top_left(&mut self, top_left: Point) -> Result<()> {
        check_corners(&top_left, &self.bottom_right)?;
        self.top_left = top_left;
        Ok(())
    }

    /// Replace the bottom-right corner, validated against the stored top-left.
    pub fn set_bottom_right(&mut self, bottom_right: Point) -> Result<()> {
        check_corners(&self.top_left, &bottom_right)?;
        self.bottom_right = bottom_right;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bottom_right.x() - self.top_left.x()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top_left.y() - self.bottom_right.y()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        self.top_left.midpoint(&self.bottom_right)
    }

    pub fn center_left(&self) -> Point {
        Point::new(self.top_left.x(), self.top_left.y() - self.height() / 2.0)
    }

    pub fn center_right(&self) -> Point {
        Point::new(self.bottom_right.x(), self.bottom_right.y() + self.height() / 2.0)
    }

    pub fn center_top(&self) -> Point {
        Point::new(self.top_left.x() + self.width() / 2.0, self.top_left.y())
    }

    pub fn center_bottom(&self) -> Point {
        Point::new(self.bottom_right.x() - self.width() / 2.0, self.bottom_right.y())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x(), self.bottom_right.y())
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x(), self.top_left.y())
    }

    /// Strict containment: sharing an edge with `other` is not "inside".
    pub fn contained_in(&self, other: &Rectangle) -> bool {
        self.top_left.x() > other.top_left.x()
            && self.top_left.y() < other.top_left.y()
            && self.bottom_right.x() < other.bottom_right.x()
            && self.bottom_right.y() > other.bottom_right.y()
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.top_left.color()
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.top_left.set_color(color);
    }

    /// Give both corners the same velocity so the rectangle translates rigidly.
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.top_left.set_velocity(vx, vy);
        self.bottom_right.set_velocity(vx, vy);
    }

    /// Move each corner by its own stored velocity.
    ///
    /// Corners installed through the setters keep whatever velocity they came
    /// with; call [`Rectangle::set_velocity`] first for rigid motion.
    pub fn step(&mut self) {
        self.top_left.step();
        self.bottom_right.step();
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let center = self.center();
        canvas.set_pen_color(self.color());
        canvas.filled_rectangle(
            center.x(),
            center.y(),
            self.width() / 2.0,
            self.height() / 2.0,
        );
    }

    pub fn draw_outline(&self, canvas: &mut dyn Canvas, thickness: f64) {
        let center = self.center();
        canvas.set_pen_color(self.color());
        canvas.set_pen_thickness(thickness);
        canvas.rectangle(
            center.x(),
            center.y(),
            self.width() / 2.0,
            self.height() / 2.0,
        );
    }

    pub fn draw_outline_default(&self, canvas: &mut dyn Canvas) {
        self.draw_outline(canvas, DEFAULT_OUTLINE_THICKNESS);
    }
}

impl Bounded for Rectangle {
    fn extents(&self) -> Extents {
        Extents {
            left: self.top_left.x(),
            right: self.bottom_right.x(),
            top: self.top_left.y(),
            bottom: self.bottom_right.y(),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rectangle [top_left={}, bottom_right={}]",
            self.top_left, self.bottom_right
        )
    }
}

// Positive form of the invariant, so NaN coordinates are rejected.
fn check_corners(top_left: &Point, bottom_right: &Point) -> Result<()> {
    let ordered = top_left.x() < bottom_right.x() && top_left.y() > bottom_right.y();
    if !ordered {
        return Err(GeometryError::MisorderedCorners {
            top_left: (top_left.x(), top_left.y()),
            bottom_right: (bottom_right.x(), bottom_right.y()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::collision::Zone;

    fn viewport() -> Rectangle {
        Rectangle::from_coords(-100.0, 100.0, 100.0, -100.0).unwrap()
    }

    #[test]
    fn metrics() {
        let r = Rectangle::from_coords(0.0, 10.0, 4.0, 0.0).unwrap();
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 10.0);
        assert_eq!(r.area(), 40.0);
    }

    #[test]
    fn y_down_corners_are_rejected() {
        let err = Rectangle::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0)).unwrap_err();
        assert!(matches!(err, GeometryError::MisorderedCorners { .. }));
    }

    #[test]
    fn degenerate_rectangles_are_rejected() {
        assert!(Rectangle::from_coords(0.0, 5.0, 0.0, 0.0).is_err()); // zero width
        assert!(Rectangle::from_coords(0.0, 5.0, 5.0, 5.0).is_err()); // zero height
        assert!(Rectangle::from_coords(f64::NAN, 5.0, 5.0, 0.0).is_err());
    }

    #[test]
    fn with_size_derives_bottom_right() {
        let r = Rectangle::with_size(Point::new(-10.0, 10.0), 30.0, 5.0).unwrap();
        assert_eq!((r.bottom_right().x(), r.bottom_right().y()), (20.0, 5.0));
        assert!(Rectangle::with_size(Point::new(0.0, 0.0), -1.0, 5.0).is_err());
        assert!(Rectangle::with_size(Point::new(0.0, 0.0), 1.0, 0.0).is_err());
    }

    #[test]
    fn setters_validate_against_the_other_corner() {
        let mut r = Rectangle::from_coords(0.0, 10.0, 10.0, 0.0).unwrap();

        assert!(r.set_top_left(Point::new(10.0, 20.0)).is_err()); // x not left
        assert!(r.set_top_left(Point::new(-5.0, 0.0)).is_err()); // y not above
        assert!(r.set_bottom_right(Point::new(0.0, -5.0)).is_err());
        assert_eq!(r, Rectangle::from_coords(0.0, 10.0, 10.0, 0.0).unwrap());

        r.set_top_left(Point::new(-5.0, 15.0)).unwrap();
        r.set_bottom_right(Point::new(1.0, 14.0)).unwrap();
        assert_eq!(r.width(), 6.0);
        assert_eq!(r.height(), 1.0);
    }

    #[test]
    fn derived_points() {
        let r = Rectangle::from_coords(0.0, 10.0, 20.0, 0.0).unwrap();
        let xy = |p: Point| (p.x(), p.y());
        assert_eq!(xy(r.center()), (10.0, 5.0));
        assert_eq!(xy(r.center_left()), (0.0, 5.0));
        assert_eq!(xy(r.center_right()), (20.0, 5.0));
        assert_eq!(xy(r.center_top()), (10.0, 10.0));
        assert_eq!(xy(r.center_bottom()), (10.0, 0.0));
        assert_eq!(xy(r.bottom_left()), (0.0, 0.0));
        assert_eq!(xy(r.top_right()), (20.0, 10.0));
    }

    #[test]
    fn derived_points_are_fresh_values() {
        let mut r = Rectangle::from_coords(0.0, 10.0, 20.0, 0.0).unwrap();
        r.set_color(Rgb::BLUE);
        let mut c = r.center();
        c.set_x(1000.0);
        assert_eq!(r.center().x(), 10.0);
        assert_eq!(r.bottom_left().color(), Rgb::BLACK);
    }

    #[test]
    fn containment_is_strict() {
        let outer = viewport();
        let inner = Rectangle::from_coords(-10.0, 10.0, 10.0, -10.0).unwrap();
        let flush = Rectangle::from_coords(-100.0, 10.0, 10.0, -10.0).unwrap();
        assert!(inner.contained_in(&outer));
        assert!(!outer.contained_in(&inner));
        assert!(!flush.contained_in(&outer));
        assert!(!outer.contained_in(&outer));
    }

    #[test]
    fn set_velocity_moves_rigidly() {
        let mut r = Rectangle::from_coords(0.0, 10.0, 10.0, 0.0).unwrap();
        r.set_velocity(2.0, -1.0);
        r.step();
        assert_eq!(r, {
            let mut expected = Rectangle::from_coords(2.0, 9.0, 12.0, -1.0).unwrap();
            expected.set_velocity(2.0, -1.0);
            expected
        });
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 10.0);
    }

    #[test]
    fn color_is_top_left_color() {
        let mut r = viewport();
        r.set_color(Rgb::BLUE);
        assert_eq!(r.top_left().color(), Rgb::BLUE);
        assert_eq!(r.bottom_right().color(), Rgb::BLACK);
        assert_eq!(r.color(), Rgb::BLUE);
    }

    #[test]
    fn classify_rectangle_against_bounds() {
        let bounds = viewport();
        let inside = Rectangle::from_coords(-10.0, 10.0, 10.0, -10.0).unwrap();
        assert_eq!(inside.classify_collision(&bounds), Zone::None);

        let left = Rectangle::from_coords(-100.0, 10.0, -90.0, -10.0).unwrap();
        assert_eq!(left.classify_collision(&bounds), Zone::Left);

        let bottom_left = Rectangle::from_coords(-105.0, -80.0, -90.0, -101.0).unwrap();
        assert_eq!(bottom_left.classify_collision(&bounds), Zone::BottomLeft);

        let bottom_right = Rectangle::from_coords(90.0, -80.0, 100.0, -100.0).unwrap();
        assert_eq!(bottom_right.classify_collision(&bounds), Zone::BottomRight);
    }

    #[test]
    fn draw_uses_center_and_half_extents() {
        let mut r = Rectangle::from_coords(0.0, 10.0, 20.0, 0.0).unwrap();
        r.set_color(Rgb::BLUE);
        let mut canvas = RecordingCanvas::new();
        r.draw(&mut canvas);
        r.draw_outline_default(&mut canvas);
        assert_eq!(
            canvas.commands(),
            &[
                DrawCommand::PenColor(Rgb::BLUE),
                DrawCommand::FilledRectangle {
                    cx: 10.0,
                    cy: 5.0,
                    half_width: 10.0,
                    half_height: 5.0,
                },
                DrawCommand::PenColor(Rgb::BLUE),
                DrawCommand::PenThickness(DEFAULT_OUTLINE_THICKNESS),
                DrawCommand::Rectangle {
                    cx: 10.0,
                    cy: 5.0,
                    half_width: 10.0,
                    half_height: 5.0,
                },
            ]
        );
    }
}
