//! # rebound
//!
//! Points, circles and axis-aligned rectangles that move at constant
//! velocity and bounce off the edges of a fixed viewport.
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared explicitly below. The shapes (`geometry`,
//! `circle`, `rectangle`) know nothing about pixels: they draw through the
//! [`Canvas`] trait, and the `simulation` module ties them together into the
//! per-frame move / classify / bounce loop.

pub mod canvas;
pub mod circle;
pub mod collision;
pub mod color;
pub mod error;
pub mod geometry;
pub mod rectangle;
pub mod simulation;

// Re-export common types at crate root for convenience.
pub use canvas::{Canvas, DrawCommand, RecordingCanvas, SvgCanvas};
pub use circle::Circle;
pub use collision::{Bounded, Extents, Zone};
pub use color::Rgb;
pub use error::{GeometryError, Result};
pub use geometry::{Point, Velocity};
pub use rectangle::Rectangle;
pub use simulation::{ClickLatch, FrameReport, Hit, Simulation, SpawnConfig, draw_axes};
