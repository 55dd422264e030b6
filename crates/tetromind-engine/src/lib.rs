pub use self::{core::*, session::*};

pub mod core;
pub mod session;

/// Error for grids that violate the board shape contract.
///
/// Boards must be rectangular with non-zero dimensions. Construction fails
/// fast with this error instead of silently correcting the input.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidGridError {
    #[display("board dimensions must be non-zero")]
    ZeroDimension,
    #[display("board row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Error for piece matrices that cannot represent a droppable shape.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidShapeError {
    #[display("shape matrix has no rows or zero width")]
    Empty,
    #[display("shape row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("shape has no occupied cells")]
    NoOccupiedCells,
}

/// The next piece cannot spawn because the stack reached the top of the board.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("new piece cannot spawn, the stack has reached the top")]
pub struct TopOutError;
