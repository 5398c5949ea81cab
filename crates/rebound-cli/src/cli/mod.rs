//! CLI command implementations.
//!
//! This module contains the implementations for the rebound subcommands:
//! - `live` - Interactive terminal window (default)
//! - `run` - Headless simulation with a text or JSON report
//! - `render` - Final frame as PNG
//! - `svg` - Final frame as SVG
//! - `classify` - Zone and bounce for a single shape
//! - `scene` - Validate or generate scene files

pub mod common;
pub mod scene;
pub mod live;
pub mod run;
pub mod render;
pub mod svg;
pub mod classify;

pub use live::cmd_live;
pub use run::cmd_run;
pub use render::cmd_render;
pub use svg::cmd_svg;
pub use classify::cmd_classify;
pub use scene::cmd_scene;
