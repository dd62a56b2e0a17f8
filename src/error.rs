//! Error types for cloth configuration.
//!
//! Tearing and solving never fail; only values crossing the configuration
//! boundary are validated.

use core::fmt;

/// Errors returned when configuring a [`Cloth`](crate::Cloth).
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// The lattice needs at least 2 vertices per side.
    InvalidVertexCount { count: usize },
    /// Scale must be positive and finite.
    InvalidScale,
    /// Physics time step must be positive and finite.
    InvalidTimeStep,
    /// Vertex index is out of bounds.
    VertexOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidVertexCount { count } => {
                write!(f, "cloth needs at least 2 vertices per side (got {})", count)
            }
            ClothError::InvalidScale => write!(f, "scale must be positive and finite"),
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::VertexOutOfBounds { index, count } => {
                write!(f, "vertex index {} out of bounds (count: {})", index, count)
            }
        }
    }
}
