//! Othello-Search: Othello rules with minimax and MCTS move selection.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and engine parameters
//! - [`board`] - Colors and the 8x8 grid
//! - [`position`] - Core game logic (legal moves, flipping, outcome)
//! - [`minimax`] - Depth-limited minimax with a material heuristic
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`playout`] - Random game simulation
//! - [`game`] - Players and the turn-by-turn driver
//!
//! ## Example
//!
//! ```
//! use othello_search::mcts::tree_search;
//! use othello_search::minimax::best_move;
//! use othello_search::position::GameState;
//!
//! let mut pos = GameState::new();
//!
//! // Minimax picks Dark's opening move
//! let mv = best_move(&pos, 3).unwrap();
//! pos.apply_move(mv).unwrap();
//!
//! // MCTS answers for Light
//! let mut rng = fastrand::Rng::with_seed(7);
//! let reply = tree_search(&pos, 100, &mut rng).unwrap();
//! assert!(pos.legal_moves().contains(&reply));
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod mcts;
pub mod minimax;
pub mod playout;
pub mod position;
