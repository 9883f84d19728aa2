//! Constants for board geometry, square classification, and search parameters.
//!
//! The board is a flat row-major array of 64 cells, 8 columns wide.
//! Cell indices run from 0 (top-left) to 63 (bottom-right).

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width and height.
pub const N: usize = 8;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

// =============================================================================
// Square Classification (heuristic playout policy)
// =============================================================================

/// Corners can never be flipped once taken.
pub const CORNERS: [usize; 4] = [0, 7, 56, 63];

/// Edge squares next to a corner.
pub const BAD_EDGES: [usize; 8] = [1, 6, 8, 15, 48, 55, 57, 62];

/// X-squares, diagonally adjacent to a corner.
pub const WORST: [usize; 4] = [9, 14, 49, 54];

// =============================================================================
// Flat Monte-Carlo Search Parameters
// =============================================================================

/// Default number of rollouts per candidate move.
pub const PLAYOUTS_PER_CANDIDATE: usize = 500;

/// Default wall-clock budget for one move decision, in seconds.
pub const TIME_BUDGET_SECS: u64 = 10;

/// Score added when a rollout ends in a win for the searching side.
pub const SCORE_WIN: i64 = 2;

/// Score added when a rollout ends in a loss for the searching side.
pub const SCORE_LOSS: i64 = -10;

/// Score added when a rollout ends in a tie.
pub const SCORE_TIE: i64 = 1;
