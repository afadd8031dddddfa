//! Calibration error taxonomy.

use thiserror::Error;

/// Which side of a rotation step produced a degenerate direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Direction between two virtual anchors.
    Virtual,
    /// Direction between the placed first anchor and a physical sample.
    Physical,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Virtual => write!(f, "virtual"),
            Direction::Physical => write!(f, "physical"),
        }
    }
}

/// Errors raised by session construction and by the alignment steps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("Requested point count {0} is outside [1, 3]")]
    InvalidPointCount(u8),
    #[error("Step {step}: {which} direction has zero length")]
    ZeroLengthDirection { step: usize, which: Direction },
    #[error("Step {step}: sample has a non-finite coordinate")]
    NonFiniteSample { step: usize },
    #[error("Step {step}: virtual and physical directions are antiparallel")]
    AntiparallelDirections { step: usize },
    #[error("Alignment step {requested} requested, but step {expected} is next")]
    OutOfOrder { expected: usize, requested: usize },
    #[error("All alignment steps have already been applied")]
    Exhausted,
}

impl CalibrationError {
    /// Returns `true` for errors caused by an unusable sample or degenerate geometry.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            CalibrationError::ZeroLengthDirection { .. }
                | CalibrationError::NonFiniteSample { .. }
                | CalibrationError::AntiparallelDirections { .. }
        )
    }
}
