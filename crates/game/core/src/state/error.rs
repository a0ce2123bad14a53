//! Snapshot validation errors.
//!
//! A snapshot that fails validation never reaches the decision engine; the
//! transport answers it with the default command instead.

use crate::state::Position;

/// Reasons a snapshot's cell list cannot form a dense board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot carried no cells at all.
    #[error("snapshot contains no cells")]
    Empty,

    /// Board coordinates start at the origin.
    #[error("cell at {position} has a negative coordinate")]
    NegativeCoordinate { position: Position },

    /// Two cells were sent for the same coordinate.
    #[error("cell at {position} appears more than once")]
    DuplicateCell { position: Position },

    /// The cell count does not fill the rectangle spanned by the coordinates.
    #[error("board spans {width}x{height} but {cells} cells were sent")]
    Dimensions { width: u32, height: u32, cells: usize },
}

/// Cell content code outside the known range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown cell content code {0}")]
pub struct UnknownContent(pub u8);
