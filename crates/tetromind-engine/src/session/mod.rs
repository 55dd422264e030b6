//! Headless play session support.
//!
//! This module provides the pieces needed to drive complete games without any
//! rendering:
//!
//! - [`PieceBag`] - 7-bag piece generation with deterministic seeding
//! - [`BagSeed`] - Seed for reproducible piece sequences
//! - [`Playfield`] - Board plus falling piece plus upcoming pieces
//! - [`PlayStats`] - Score, level, and line-clear statistics
//!
//! The decision procedure that picks placements lives in the evaluator
//! crate; a session loop asks it for a move and applies the result with
//! [`Playfield::complete_drop`] until the game tops out or no legal
//! placement remains.

pub use self::{piece_bag::*, playfield::*, stats::*};

pub(crate) mod piece_bag;
pub(crate) mod playfield;
pub(crate) mod stats;
