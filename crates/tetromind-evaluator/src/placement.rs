//! Simulation of a single piece placement.
//!
//! [`PlacementOutcome`] captures what the board looks like after a candidate
//! placement: the piece is locked onto a copy of the board, completed lines
//! are removed, and the resulting board is wrapped in [`BoardMetrics`] for
//! feature extraction. The input board is never touched, so the move search
//! can probe as many candidates as it likes without side effects.

use tetromind_engine::{Board, Cell, Shape};

use crate::board_metrics::BoardMetrics;

/// A candidate placement: the anchor column and row of the rotated shape
/// matrix plus the rotation index that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub col: usize,
    pub row: usize,
    pub rotation: u8,
}

/// The result of locking a shape at a placement on a copy of the board.
#[derive(Debug)]
pub struct PlacementOutcome {
    placement: Placement,
    cleared_lines: usize,
    metrics: BoardMetrics,
}

impl PlacementOutcome {
    /// Simulates locking `shape` at `placement` and clearing lines.
    ///
    /// `shape` must already be rotated to `placement.rotation`; the rotation
    /// index is carried along only so the outcome can be traced back to the
    /// move that produced it.
    #[must_use]
    pub fn simulate(board: &Board, shape: &Shape, placement: Placement) -> Self {
        let mut after = board.clone();
        after.fill_shape(shape, placement.col, placement.row, Cell::Garbage);
        let cleared_lines = after.clear_lines();

        Self {
            placement,
            cleared_lines,
            metrics: BoardMetrics::new(after),
        }
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Number of lines the placement completed and removed.
    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Metrics of the post-clear board.
    #[must_use]
    pub fn metrics(&self) -> &BoardMetrics {
        &self.metrics
    }

    /// The board as it stands after the lock and the line clears.
    #[must_use]
    pub fn board_after(&self) -> &Board {
        self.metrics.board()
    }
}
