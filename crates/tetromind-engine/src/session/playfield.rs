use crate::{
    TopOutError,
    core::{
        board::{Board, Cell},
        shape::{PieceKind, Shape},
    },
};

use super::piece_bag::{BagSeed, PieceBag};

/// A headless playfield: the board, the falling piece kind, and the
/// upcoming pieces.
///
/// The playfield does not decide where pieces go. A driving loop asks the
/// evaluator for a placement of [`Self::current_piece`] and commits it with
/// [`Self::complete_drop`], which locks the piece, clears lines, and spawns
/// the next piece from the bag.
#[derive(Debug, Clone)]
pub struct Playfield {
    board: Board,
    current: PieceKind,
    bag: PieceBag,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Playfield {
    /// Creates a standard 10x20 playfield with a randomly seeded bag.
    #[must_use]
    pub fn new() -> Self {
        Self::from_bag(PieceBag::new())
    }

    /// Like [`Self::new`], but with a specific seed so the piece sequence
    /// is reproducible.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self::from_bag(PieceBag::with_seed(seed))
    }

    fn from_bag(mut bag: PieceBag) -> Self {
        let current = bag.pop_next();
        Self {
            board: Board::standard(),
            current,
            bag,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the kind of the currently falling piece.
    #[must_use]
    pub fn current_piece(&self) -> PieceKind {
        self.current
    }

    /// Returns the kind of the piece that will spawn after the current one.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.bag.peek_next()
    }

    /// Commits a placement of the current piece and advances the session.
    ///
    /// The current piece is rotated by `rotation` quarter turns, locked with
    /// its matrix anchored at `(col, row)`, and completed lines are cleared.
    /// The next piece is then drawn from the bag; if it cannot occupy its
    /// spawn position the game is over.
    ///
    /// # Returns
    ///
    /// Tuple of (lines cleared, result) where an `Err` signals top-out.
    pub fn complete_drop(
        &mut self,
        rotation: u8,
        col: usize,
        row: usize,
    ) -> (usize, Result<(), TopOutError>) {
        let shape = self.current.spawn_shape().rotated_by(rotation);
        self.board
            .fill_shape(&shape, col, row, Cell::Piece(self.current));
        let cleared = self.board.clear_lines();

        self.current = self.bag.pop_next();
        if !self.board.can_place(&self.spawn_shape(), self.spawn_col(), 0) {
            return (cleared, Err(TopOutError));
        }
        (cleared, Ok(()))
    }

    fn spawn_shape(&self) -> Shape {
        self.current.spawn_shape()
    }

    /// Spawn column of the current piece, centered on the board.
    fn spawn_col(&self) -> usize {
        (self.board.width() - self.spawn_shape().width()) / 2
    }
}
