use std::fmt;

use pathviz_core::{GridError, Point};

/// Errors reported synchronously by [`RunController`](crate::RunController)
/// commands. A failed command leaves the controller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// A coordinate outside the grid.
    OutOfBounds(Point),
    /// Grid dimensions that cannot be configured.
    InvalidDimensions { rows: i32, cols: i32 },
    /// Start or End is not set.
    MissingEndpoints,
    /// A run was requested while another is active.
    PreconditionFailed,
    /// A grid edit was attempted while a run is active.
    InvalidDuringRun,
    /// Any other grid failure, such as a malformed grid text.
    Grid(GridError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is out of bounds"),
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
            Self::MissingEndpoints => f.write_str("start and end must both be set"),
            Self::PreconditionFailed => f.write_str("a run is already in progress"),
            Self::InvalidDuringRun => f.write_str("the grid cannot be edited during a run"),
            Self::Grid(e) => write!(f, "grid error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for RunError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::OutOfBounds(p) => Self::OutOfBounds(p),
            GridError::InvalidDimensions { rows, cols } => Self::InvalidDimensions { rows, cols },
            other => Self::Grid(other),
        }
    }
}
