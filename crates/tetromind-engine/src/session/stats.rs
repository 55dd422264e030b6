use serde::Serialize;

/// Score values for line clears.
///
/// Index corresponds to the number of lines cleared simultaneously.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Statistics for a play session.
///
/// Tracks score, level, locked piece count, and a histogram of line clears.
/// Scoring is the simple per-clear table (no combos, no back-to-back
/// bonuses), with one level gained per 10 cleared lines.
///
/// # Example
///
/// ```
/// use tetromind_engine::PlayStats;
///
/// let mut stats = PlayStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PlayStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for PlayStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, one per 10 cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / 10
    }

    /// Returns the number of pieces locked so far.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns the line-clear histogram.
    ///
    /// Index `n` counts the drops that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece drop that cleared `cleared_lines`
    /// lines.
    ///
    /// Clears beyond 4 lines (only possible with non-tetromino shapes) are
    /// scored as 4-line clears.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        let bucket = if cleared_lines < self.line_cleared_counter.len() {
            cleared_lines
        } else {
            self.line_cleared_counter.len() - 1
        };
        self.line_cleared_counter[bucket] += 1;
        self.score += SCORE_TABLE[bucket];
    }
}
