//! Constants for board geometry, scoring, and search parameters.
//!
//! The compile-time defaults here are what the command-line front end
//! falls back to when no flag overrides them.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Othello is always played on 8x8.
pub const N: usize = 8;

/// Number of cells on the board.
pub const BOARDSIZE: usize = N * N;

/// Maximum number of placements in a game (every empty cell filled once).
pub const MAX_GAME_LEN: usize = BOARDSIZE - 4;

/// Offsets to the 8 compass neighbors as (row, col) deltas.
/// Order: NW, N, NE, W, E, SW, S, SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Minimax Parameters
// =============================================================================

/// Default search depth (plies) for minimax.
pub const DEFAULT_DEPTH: usize = 3;

/// Score of a decided game won by the searching player.
pub const WIN_SCORE: i32 = 10_000;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of simulations per move.
pub const DEFAULT_ITERATIONS: usize = 200;

/// UCB1 exploration constant.
pub const UCB_C: f64 = std::f64::consts::SQRT_2;

// =============================================================================
// Piece Symbols
// =============================================================================

/// Dark piece (moves first).
pub const DARK_SYMBOL: char = 'X';

/// Light piece.
pub const LIGHT_SYMBOL: char = 'O';

/// Empty cell in diagrams.
pub const EMPTY_SYMBOL: char = '.';
