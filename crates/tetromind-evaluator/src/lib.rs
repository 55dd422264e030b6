//! Heuristic evaluation and move selection for Tetris placements.
//!
//! This crate implements the decision procedure that picks where to drop the
//! falling piece:
//!
//! 1. **Board metrics** ([`board_metrics`]) - Structural measurements of a
//!    board state: column heights, aggregate height, holes, bumpiness.
//! 2. **Placement simulation** ([`placement`]) - Locks a candidate placement
//!    onto a copy of the board, clears lines, and exposes the post-clear
//!    metrics. The caller's board is never mutated.
//! 3. **Weighted scoring** ([`weights`]) - A linear combination of the
//!    placement features: `score = Σ(wᵢ × featureᵢ)`.
//! 4. **Move search** ([`search`]) - Enumerates distinct rotations and legal
//!    columns, simulates the landing of each candidate, and returns the
//!    highest-scoring placement.
//!
//! # Architecture
//!
//! ```text
//! MoveSearch (select best placement, optionally with one-piece lookahead)
//!     ↓ uses
//! Weights (score a single placement)
//!     ↓ uses
//! PlacementOutcome (line clears + post-clear BoardMetrics)
//! ```
//!
//! # Design Notes
//!
//! - The search is a greedy one-step procedure (optionally extended by a
//!   one-piece lookahead); there is no multi-turn planning.
//! - Every `MoveSearch` call is a pure function of `(board, shape, weights)`:
//!   no state persists between calls and identical inputs produce identical
//!   moves, with ties broken toward the lower rotation index and then the
//!   lower column.
//! - "No legal placement" is a normal terminal result (`None`), not an
//!   error. Malformed boards and shapes are rejected when they are
//!   constructed in the engine crate, so the search itself cannot observe
//!   invalid input.

pub mod board_metrics;
pub mod placement;
pub mod search;
pub mod weights;
