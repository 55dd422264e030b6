use std::{cell::OnceCell, iter};

use tetromind_engine::Board;

/// Lazily computed structural metrics of a board state.
///
/// Each metric is computed on first access and cached, so evaluation code
/// can ask for any subset without paying for the rest.
///
/// Definitions (all computed on the post-clear board):
///
/// - **column height**: `board_height - y` where `y` is the topmost occupied
///   row of the column, or 0 for an empty column
/// - **aggregate height**: sum of all column heights (the sum, not the mean)
/// - **holes**: empty cells with at least one occupied cell above them in
///   the same column, summed over all columns
/// - **bumpiness**: sum of absolute height differences between adjacent
///   columns
#[derive(Debug)]
pub struct BoardMetrics {
    board: Board,
    column_heights: OnceCell<Vec<usize>>,
    column_occupied_cells: OnceCell<Vec<usize>>,
    aggregate_height: OnceCell<usize>,
    max_height: OnceCell<usize>,
    num_holes: OnceCell<usize>,
    bumpiness: OnceCell<usize>,
}

impl BoardMetrics {
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            column_heights: OnceCell::new(),
            column_occupied_cells: OnceCell::new(),
            aggregate_height: OnceCell::new(),
            max_height: OnceCell::new(),
            num_holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self::new(board.clone())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Per-column stack heights, left to right.
    #[must_use]
    pub fn column_heights(&self) -> &[usize] {
        self.column_heights.get_or_init(|| {
            let height = self.board.height();
            let mut column_heights = vec![0; self.board.width()];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let top = (0..height).find(|y| self.board.cell(x, *y).is_occupied());
                if let Some(top) = top {
                    *h = height - top;
                }
            }
            column_heights
        })
    }

    /// Per-column occupied cell counts, left to right.
    #[must_use]
    pub fn column_occupied_cells(&self) -> &[usize] {
        self.column_occupied_cells.get_or_init(|| {
            let mut counts = vec![0; self.board.width()];
            for row in self.board.rows() {
                for (count, cell) in iter::zip(&mut counts, row) {
                    if cell.is_occupied() {
                        *count += 1;
                    }
                }
            }
            counts
        })
    }

    /// Sum of all column heights.
    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        *self
            .aggregate_height
            .get_or_init(|| self.column_heights().iter().sum())
    }

    /// Height of the tallest column.
    #[must_use]
    pub fn max_height(&self) -> usize {
        *self
            .max_height
            .get_or_init(|| self.column_heights().iter().copied().max().unwrap_or(0))
    }

    /// Number of covered empty cells.
    ///
    /// Within a column, every empty cell below the topmost occupied cell is
    /// a hole, so the count equals the column height minus the occupied cell
    /// count.
    #[must_use]
    pub fn num_holes(&self) -> usize {
        *self.num_holes.get_or_init(|| {
            iter::zip(self.column_heights(), self.column_occupied_cells())
                .map(|(height, occupied)| height - occupied)
                .sum()
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|pair| pair[0].abs_diff(pair[1]))
                .sum()
        })
    }
}
