//! Feature weights for placement scoring.
//!
//! A placement is scored as a linear combination of four features computed
//! on the post-clear board:
//!
//! ```text
//! score = cleared_lines × w_lines
//!       + aggregate_height × w_height
//!       + holes × w_holes
//!       + bumpiness × w_bumpiness
//! ```
//!
//! The default constants are a proven hand-tuned configuration. Their
//! exact values are a tuning choice, not a correctness requirement; what
//! the search relies on is that clearing more lines,
//! creating fewer holes, and keeping the surface flatter each improve the
//! score, all else equal. Weights can also be loaded from a JSON model file
//! or evolved by the training crate.

use serde::{Deserialize, Serialize};

use crate::placement::PlacementOutcome;

/// Default penalty per unit of aggregate column height.
pub const AGGREGATE_HEIGHT_WEIGHT: f32 = -0.51;
/// Default reward per cleared line.
pub const CLEARED_LINES_WEIGHT: f32 = 0.76;
/// Default penalty per covered empty cell.
pub const HOLES_WEIGHT: f32 = -0.36;
/// Default penalty per unit of surface bumpiness.
pub const BUMPINESS_WEIGHT: f32 = -0.18;

/// Weight configuration for the placement score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub aggregate_height: f32,
    pub cleared_lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            aggregate_height: AGGREGATE_HEIGHT_WEIGHT,
            cleared_lines: CLEARED_LINES_WEIGHT,
            holes: HOLES_WEIGHT,
            bumpiness: BUMPINESS_WEIGHT,
        }
    }
}

impl Weights {
    /// Number of weighted features.
    pub const LEN: usize = 4;

    /// Scores a simulated placement; higher is better.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score(&self, outcome: &PlacementOutcome) -> f32 {
        let metrics = outcome.metrics();
        (outcome.cleared_lines() as f32) * self.cleared_lines
            + (metrics.aggregate_height() as f32) * self.aggregate_height
            + (metrics.num_holes() as f32) * self.holes
            + (metrics.bumpiness() as f32) * self.bumpiness
    }

    /// Returns the weights as a fixed-order array, for code that treats the
    /// configuration as a flat vector (e.g. genetic operators).
    #[must_use]
    pub const fn as_array(self) -> [f32; Self::LEN] {
        [
            self.aggregate_height,
            self.cleared_lines,
            self.holes,
            self.bumpiness,
        ]
    }

    /// Builds weights from an array in [`Self::as_array`] order.
    #[must_use]
    pub const fn from_array(values: [f32; Self::LEN]) -> Self {
        Self {
            aggregate_height: values[0],
            cleared_lines: values[1],
            holes: values[2],
            bumpiness: values[3],
        }
    }
}
