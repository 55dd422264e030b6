//! Move search: choosing the best placement for the falling piece.
//!
//! The search enumerates every candidate placement of the piece (distinct
//! rotation states crossed with every column the rotated matrix fits in),
//! simulates the gravity landing of each candidate on a copy of the board,
//! scores the post-clear result, and keeps the single best move.
//!
//! # Determinism
//!
//! Candidates are visited in ascending rotation index and then ascending
//! column, and only a strictly better score replaces the current best.
//! Ties therefore resolve toward the lower rotation index and the lower
//! column, so identical inputs always produce identical moves.
//!
//! # Termination
//!
//! When the piece has no legal placement at all, the search returns `None`.
//! That is a normal terminal outcome (the caller ends the game), not an
//! error: the scan is a pure read of the board and never fails.
//!
//! # Lookahead
//!
//! [`MoveSearch::select_best_move_with_lookahead`] extends the score of each
//! candidate with the best achievable score of the next piece on the
//! resulting board. Branches that leave the next piece without any legal
//! placement receive [`DEAD_END_SCORE`] instead, steering the search away
//! from placements that end the game one turn later.

use tetromind_engine::{Board, PlayStats, Playfield, Shape};

use crate::{
    placement::{Placement, PlacementOutcome},
    weights::Weights,
};

/// Score assigned to a lookahead branch in which the next piece has no
/// legal placement.
pub const DEAD_END_SCORE: f32 = -1.0e3;

/// The chosen move: anchor column and landing row of the rotated shape
/// matrix, the rotation index, and the score that won the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub col: usize,
    pub row: usize,
    pub rotation: u8,
    pub score: f32,
}

/// Selects the best placement for a piece on a board.
///
/// The search holds nothing but its weight configuration: construct it once,
/// pass it by reference wherever decisions are made, and call it from as
/// many threads as needed. There is no hidden global instance and no state
/// carried between calls.
///
/// # Example
///
/// ```
/// use tetromind_engine::{Board, PieceKind};
/// use tetromind_evaluator::{search::MoveSearch, weights::Weights};
///
/// let search = MoveSearch::new(Weights::default());
/// let board = Board::standard();
///
/// let chosen = search
///     .select_best_move(&board, &PieceKind::I.spawn_shape())
///     .expect("an empty board always has a legal placement");
/// assert_eq!(chosen.row, 19);
/// ```
#[derive(Debug, Clone)]
pub struct MoveSearch {
    weights: Weights,
}

impl MoveSearch {
    #[must_use]
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Returns the highest-scoring placement of `shape` on `board`, or
    /// `None` when no rotation and column admit a legal placement (the
    /// terminal "game over" signal for the caller).
    #[must_use]
    pub fn select_best_move(&self, board: &Board, shape: &Shape) -> Option<Move> {
        self.best_by(board, shape, |outcome| self.weights.score(outcome))
    }

    /// Like [`Self::select_best_move`], but each candidate is additionally
    /// credited with the best follow-up score of `next` on the board the
    /// candidate leaves behind.
    #[must_use]
    pub fn select_best_move_with_lookahead(
        &self,
        board: &Board,
        shape: &Shape,
        next: &Shape,
    ) -> Option<Move> {
        self.best_by(board, shape, |outcome| {
            let follow_up = self
                .select_best_move(outcome.board_after(), next)
                .map_or(DEAD_END_SCORE, |m| m.score);
            self.weights.score(outcome) + follow_up
        })
    }

    /// Plays a full session on `field`, placing up to `turn_limit` pieces.
    ///
    /// The session ends early when no legal placement remains or the stack
    /// tops out; both are normal game-over outcomes.
    pub fn play_session(&self, field: &mut Playfield, turn_limit: usize) -> PlayStats {
        let mut stats = PlayStats::new();
        for _ in 0..turn_limit {
            let shape = field.current_piece().spawn_shape();
            let Some(chosen) = self.select_best_move(field.board(), &shape) else {
                break;
            };
            let (cleared, result) = field.complete_drop(chosen.rotation, chosen.col, chosen.row);
            stats.complete_piece_drop(cleared);
            if result.is_err() {
                break;
            }
        }
        stats
    }

    fn best_by<F>(&self, board: &Board, shape: &Shape, mut score_fn: F) -> Option<Move>
    where
        F: FnMut(&PlacementOutcome) -> f32,
    {
        let mut best: Option<Move> = None;
        for (rotation, rotated) in shape.distinct_rotations() {
            if rotated.width() > board.width() {
                continue;
            }
            for col in 0..=(board.width() - rotated.width()) {
                let Some(row) = board.drop_row(&rotated, col, 0) else {
                    continue;
                };
                let outcome = PlacementOutcome::simulate(
                    board,
                    &rotated,
                    Placement { col, row, rotation },
                );
                let score = score_fn(&outcome);
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(Move {
                        col,
                        row,
                        rotation,
                        score,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use tetromind_engine::{BagSeed, Cell, PieceKind};

    use super::*;

    fn full_board() -> Board {
        let rows = vec![vec![Cell::Garbage; 10]; 20];
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_empty_board_i_piece_lands_on_floor() {
        let search = MoveSearch::new(Weights::default());
        let board = Board::standard();
        let shape = PieceKind::I.spawn_shape();

        // every column 0..=6 admits a horizontal placement on the floor
        for col in 0..=6 {
            assert_eq!(board.drop_row(&shape, col, 0), Some(19), "col {col}");
        }

        // the flattest surface wins: a horizontal placement against a wall
        // has a single height step, so column 0 wins the tie-break
        let chosen = search.select_best_move(&board, &shape).unwrap();
        assert_eq!(chosen.rotation, 0);
        assert_eq!(chosen.row, 19);
        assert_eq!(chosen.col, 0);
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let search = MoveSearch::new(Weights::default());
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..#.......
            .###....#.
            .#####..##
            ###.######
            ",
        );
        let before = board.clone();

        for kind in PieceKind::ALL {
            let shape = kind.spawn_shape();
            let _ = search.select_best_move(&board, &shape);
            let _ = search.select_best_move_with_lookahead(&board, &shape, &shape);
            assert_eq!(board, before, "{kind:?}");
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let search = MoveSearch::new(Weights::default());
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            .....#....
            ..#####...
            .#######.#
            ",
        );
        for kind in PieceKind::ALL {
            let shape = kind.spawn_shape();
            let first = search.select_best_move(&board, &shape);
            let second = search.select_best_move(&board, &shape);
            assert_eq!(first, second, "{kind:?}");
        }
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let search = MoveSearch::new(Weights::default());
        let board = full_board();
        for kind in PieceKind::ALL {
            assert_eq!(
                search.select_best_move(&board, &kind.spawn_shape()),
                None,
                "{kind:?}"
            );
            assert_eq!(
                search.select_best_move_with_lookahead(
                    &board,
                    &kind.spawn_shape(),
                    &kind.spawn_shape()
                ),
                None,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_line_clear_wins_over_any_other_placement() {
        let search = MoveSearch::new(Weights::default());
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #########.
            ",
        );
        let shape = PieceKind::I.spawn_shape();

        let chosen = search.select_best_move(&board, &shape).unwrap();
        // the vertical I in the last column completes and clears row 19
        assert_eq!(chosen.rotation, 1);
        assert_eq!(chosen.col, 9);
        assert_eq!(chosen.row, 16);

        let outcome = PlacementOutcome::simulate(
            &board,
            &shape.rotated_by(chosen.rotation),
            Placement {
                col: chosen.col,
                row: chosen.row,
                rotation: chosen.rotation,
            },
        );
        assert_eq!(outcome.cleared_lines(), 1);
    }

    #[test]
    fn test_chosen_placement_avoids_holes() {
        let search = MoveSearch::new(Weights::default());
        // a lone block in the bottom-left corner invites hole-creating
        // placements on top of it
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #.........
            ",
        );
        let shape = PieceKind::O.spawn_shape();

        let chosen = search.select_best_move(&board, &shape).unwrap();
        let outcome = PlacementOutcome::simulate(
            &board,
            &shape.rotated_by(chosen.rotation),
            Placement {
                col: chosen.col,
                row: chosen.row,
                rotation: chosen.rotation,
            },
        );
        assert_eq!(outcome.metrics().num_holes(), 0);
    }

    #[test]
    fn test_tie_breaking_prefers_lower_rotation_and_column() {
        let search = MoveSearch::new(Weights::default());
        let board = Board::standard();
        // on an empty board the O-piece scores identically against either
        // wall; the tie must resolve to the leftmost candidate
        let chosen = search
            .select_best_move(&board, &PieceKind::O.spawn_shape())
            .unwrap();
        assert_eq!(chosen.rotation, 0);
        assert_eq!(chosen.col, 0);
    }

    #[test]
    fn test_lookahead_keeps_the_clear_available() {
        let search = MoveSearch::new(Weights::default());
        // Row 19 lacks exactly columns 6..=9. Dropping the O-piece into that
        // gap would block the horizontal I that could finish the row.
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ######....
            ",
        );
        let current = PieceKind::O.spawn_shape();
        let next = PieceKind::I.spawn_shape();

        let chosen = search
            .select_best_move_with_lookahead(&board, &current, &next)
            .unwrap();
        let outcome = PlacementOutcome::simulate(
            &board,
            &current.rotated_by(chosen.rotation),
            Placement {
                col: chosen.col,
                row: chosen.row,
                rotation: chosen.rotation,
            },
        );

        // after the chosen placement, the I-piece can still clear row 19
        let follow = search
            .select_best_move(outcome.board_after(), &next)
            .unwrap();
        let follow_outcome = PlacementOutcome::simulate(
            outcome.board_after(),
            &next.rotated_by(follow.rotation),
            Placement {
                col: follow.col,
                row: follow.row,
                rotation: follow.rotation,
            },
        );
        assert!(follow_outcome.cleared_lines() >= 1);
    }

    #[test]
    fn test_lookahead_dead_end_is_penalized_not_fatal() {
        let search = MoveSearch::new(Weights::default());
        // a 3x3 board: the O-piece fits, but afterwards no second O does
        let board = Board::new(3, 3).unwrap();
        let square = PieceKind::O.spawn_shape();

        let chosen = search
            .select_best_move_with_lookahead(&board, &square, &square)
            .unwrap();
        assert!(chosen.score <= DEAD_END_SCORE + 100.0);

        // the immediate search sees nothing wrong with the same board
        let greedy = search.select_best_move(&board, &square).unwrap();
        assert!(greedy.score > DEAD_END_SCORE);
    }

    #[test]
    fn test_play_session_runs_to_turn_limit_on_default_weights() {
        let search = MoveSearch::new(Weights::default());
        let mut field = Playfield::with_seed(BagSeed::from_u64(2024));
        let stats = search.play_session(&mut field, 50);

        // the stock heuristic comfortably survives 50 pieces from empty
        assert_eq!(stats.completed_pieces(), 50);
    }

    #[test]
    fn test_play_session_is_reproducible() {
        let search = MoveSearch::new(Weights::default());
        let seed = BagSeed::from_u64(7);

        let stats_a = search.play_session(&mut Playfield::with_seed(seed), 40);
        let stats_b = search.play_session(&mut Playfield::with_seed(seed), 40);

        assert_eq!(stats_a.score(), stats_b.score());
        assert_eq!(stats_a.total_cleared_lines(), stats_b.total_cleared_lines());
        assert_eq!(stats_a.completed_pieces(), stats_b.completed_pieces());
    }
}
