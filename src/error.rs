//! Error types for cloth construction.

use core::fmt;

/// Errors rejected at construction time.
///
/// The step loop itself has no error paths; everything that could make it
/// misbehave is checked before any particle or spring exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Total mass must be positive and finite.
    InvalidMass,
    /// Stiffness must be positive and finite.
    InvalidStiffness,
    /// Air resistance coefficient must be non-negative and finite.
    InvalidAirResistance,
    /// Gravity must be finite.
    InvalidGravity,
    /// Grid spacing must be positive and finite.
    InvalidSpacing,
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// Grid needs at least two nodes and no zero dimension.
    InvalidGridDimensions { width: usize, height: usize },
    /// The grid's index mapping produced an index past the particle count.
    GridIndexOutOfRange { col: usize, row: usize, index: usize, count: usize },
    /// Two grid coordinates mapped to the same flat index.
    DuplicateGridIndex { index: usize },
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// Grid axes must be non-zero and perpendicular.
    InvalidAxes,
    /// Collision sphere needs a finite center and a positive, finite radius.
    InvalidSphere,
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidMass => write!(f, "total mass must be positive and finite"),
            ClothError::InvalidStiffness => write!(f, "stiffness must be positive and finite"),
            ClothError::InvalidAirResistance => {
                write!(f, "air resistance must be non-negative and finite")
            }
            ClothError::InvalidGravity => write!(f, "gravity must be finite"),
            ClothError::InvalidSpacing => write!(f, "grid spacing must be positive and finite"),
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::InvalidGridDimensions { width, height } => {
                write!(f, "grid {}x{} must have at least two nodes", width, height)
            }
            ClothError::GridIndexOutOfRange { col, row, index, count } => write!(
                f,
                "grid node ({}, {}) maps to index {} out of bounds (count: {})",
                col, row, index, count
            ),
            ClothError::DuplicateGridIndex { index } => {
                write!(f, "grid index {} is used by more than one node", index)
            }
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            ClothError::InvalidAxes => {
                write!(f, "grid axes must be non-zero and perpendicular")
            }
            ClothError::InvalidSphere => {
                write!(f, "collision sphere needs a finite center and positive radius")
            }
        }
    }
}

impl core::error::Error for ClothError {}
