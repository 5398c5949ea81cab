//! Error type for shape construction and mutation.
//!
//! Every failure in this crate is a contract violation by the caller: a
//! radius that is not positive, rectangle corners in the wrong order, a
//! color string that cannot be parsed, or spawn ranges that cannot be
//! sampled. Validation always runs before any field is assigned, so a failed
//! call leaves the shape untouched.

use thiserror::Error;

/// Invalid-argument errors raised by constructors and validated setters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("circle radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f64 },

    #[error(
        "top-left corner ({}, {}) must be above and left of bottom-right corner ({}, {})",
        .top_left.0, .top_left.1, .bottom_right.0, .bottom_right.1
    )]
    MisorderedCorners {
        top_left: (f64, f64),
        bottom_right: (f64, f64),
    },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid spawn settings: {0}")]
    InvalidSpawn(String),
}

impl GeometryError {
    /// All variants describe a bad argument; there is no transient failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GeometryError::NonPositiveRadius { .. }
                | GeometryError::MisorderedCorners { .. }
                | GeometryError::InvalidColor(_)
                | GeometryError::InvalidSpawn(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
