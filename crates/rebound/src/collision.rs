//! Zone-based boundary collision.
//!
//! A moving shape is reduced to its axis-aligned [`Extents`] and compared
//! against the edges of a fixed bounding rectangle. The result is one of
//! nine [`Zone`]s: nothing, one of four edges, or one of four corners.
//!
//! ## Evaluation order
//!
//! All eight predicates are evaluated in a fixed order and the *last* one
//! that holds wins:
//!
//! ```text
//! 1. right  >= bounds.right                      -> Right
//! 2. left   <= bounds.left                       -> Left
//! 3. top    >= bounds.top                        -> Top
//! 4. bottom <= bounds.bottom                     -> Bottom
//! 5. right  >= bounds.right && top    >= top     -> TopRight
//! 6. left   <= bounds.left  && top    >= top     -> TopLeft
//! 7. left   <= bounds.left  && bottom <= bottom  -> BottomLeft
//! 8. right  >= bounds.right && bottom <= bottom  -> BottomRight
//! ```
//!
//! Because each corner predicate is the conjunction of two edge predicates,
//! a corner always beats its edges. Between opposite edges (a shape wider
//! than the bounds) the later check wins, e.g. Left over Right.

use std::fmt;

use crate::geometry::Velocity;
use crate::rectangle::Rectangle;

/// Where a shape touches or crosses its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    #[default]
    None,
    Right,
    Left,
    Top,
    Bottom,
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Zone {
    /// Every zone, in legacy code order.
    pub fn all() -> &'static [Zone] {
        &[
            Zone::None,
            Zone::Right,
            Zone::Left,
            Zone::Top,
            Zone::Bottom,
            Zone::TopRight,
            Zone::TopLeft,
            Zone::BottomLeft,
            Zone::BottomRight,
        ]
    }

    /// Legacy integer code: 0 = none, 1..=4 edges, 5..=8 corners.
    pub fn code(self) -> u8 {
        match self {
            Zone::None => 0,
            Zone::Right => 1,
            Zone::Left => 2,
            Zone::Top => 3,
            Zone::Bottom => 4,
            Zone::TopRight => 5,
            Zone::TopLeft => 6,
            Zone::BottomLeft => 7,
            Zone::BottomRight => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Zone> {
        Zone::all().get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::None => "none",
            Zone::Right => "right",
            Zone::Left => "left",
            Zone::Top => "top",
            Zone::Bottom => "bottom",
            Zone::TopRight => "top-right",
            Zone::TopLeft => "top-left",
            Zone::BottomLeft => "bottom-left",
            Zone::BottomRight => "bottom-right",
        }
    }

    pub fn from_name(name: &str) -> Option<Zone> {
        Zone::all().iter().copied().find(|z| z.name() == name)
    }

    #[inline]
    pub fn is_edge(self) -> bool {
        matches!(self, Zone::Right | Zone::Left | Zone::Top | Zone::Bottom)
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Zone::TopRight | Zone::TopLeft | Zone::BottomLeft | Zone::BottomRight
        )
    }

    /// Bounce policy: side edges flip x, top/bottom flip y, corners flip both.
    pub fn reflect(self, velocity: Velocity) -> Velocity {
        match self {
            Zone::None => velocity,
            Zone::Right | Zone::Left => velocity.flip_x(),
            Zone::Top | Zone::Bottom => velocity.flip_y(),
            Zone::TopRight | Zone::TopLeft | Zone::BottomLeft | Zone::BottomRight => {
                velocity.flipped()
            }
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned extents of a shape (y-up: `top > bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Extents {
    /// Classify these extents against `boundary`. See the module docs for
    /// the evaluation order; it must not be turned into a first-match chain.
    pub fn classify_against(&self, boundary: &Extents) -> Zone {
        let hits_right = self.right >= boundary.right;
        let hits_left = self.left <= boundary.left;
        let hits_top = self.top >= boundary.top;
        let hits_bottom = self.bottom <= boundary.bottom;

        let mut zone = Zone::None;
        if hits_right {
            zone = Zone::Right;
        }
        if hits_left {
            zone = Zone::Left;
        }
        if hits_top {
            zone = Zone::Top;
        }
        if hits_bottom {
            zone = Zone::Bottom;
        }
        if hits_right && hits_top {
            zone = Zone::TopRight;
        }
        if hits_left && hits_top {
            zone = Zone::TopLeft;
        }
        if hits_left && hits_bottom {
            zone = Zone::BottomLeft;
        }
        if hits_right && hits_bottom {
            zone = Zone::BottomRight;
        }
        zone
    }
}

/// Shapes that can be tested against a bounding rectangle.
pub trait Bounded {
    fn extents(&self) -> Extents;

    fn classify_collision(&self, bounds: &Rectangle) -> Zone {
        self.extents().classify_against(&bounds.extents())
    }
}
