//! Depth-limited minimax with a material heuristic.
//!
//! The searching player is fixed at the root; recursion only alternates
//! between maximizing and minimizing layers. Every child is scored on its
//! own copy of the position. A node whose side to move has no legal moves
//! is treated as a leaf (no pass is played inside the search).

use crate::board::Color;
use crate::constants::WIN_SCORE;
use crate::position::{GameState, Move};

/// Piece difference from `player`'s point of view.
pub fn material(state: &GameState, player: Color) -> i32 {
    state.count(player) as i32 - state.count(player.opponent()) as i32
}

/// Score a position for `player`, searching `depth` more plies.
fn minimax(state: &GameState, depth: usize, maximizing: bool, player: Color) -> i32 {
    // A drawn leaf falls through to the heuristic, which is 0 there
    if let Some(winner) = state.outcome().winner() {
        return if winner == player { WIN_SCORE } else { -WIN_SCORE };
    }

    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return material(state, player);
    }

    let scores = moves.into_iter().filter_map(|mv| {
        let mut child = *state;
        child.apply_move(mv).ok()?;
        Some(minimax(&child, depth - 1, !maximizing, player))
    });

    if maximizing {
        scores.max().unwrap_or_else(|| material(state, player))
    } else {
        scores.min().unwrap_or_else(|| material(state, player))
    }
}

/// Pick the move with the highest minimax score for the side to move.
///
/// Ties go to the first move in row-major order. Returns `None` when the
/// side to move has no legal moves. A depth of 0 is searched as depth 1.
pub fn best_move(state: &GameState, depth: usize) -> Option<Move> {
    best_move_with_score(state, depth).map(|(mv, _)| mv)
}

/// Like [`best_move`], also returning the winning score.
pub fn best_move_with_score(state: &GameState, depth: usize) -> Option<(Move, i32)> {
    let player = state.to_move();
    let mut best: Option<(Move, i32)> = None;

    for mv in state.legal_moves() {
        let mut child = *state;
        if child.apply_move(mv).is_err() {
            continue;
        }
        let score = minimax(&child, depth.saturating_sub(1), false, player);
        // Strictly better than any move found so far.
        if best.is_none_or(|(_, b)| score > b) {
            best = Some((mv, score));
        }
    }

    best
}

/// A fixed-depth minimax searcher.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    pub depth: usize,
}

impl Minimax {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    pub fn best_move(&self, state: &GameState) -> Option<Move> {
        best_move(state, self.depth)
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_ROW: &str = "........";

    /// Dark to move with two options: (0,2) flips one piece, (7,3) flips
    /// two. Light keeps a reply at (4,2) either way.
    fn two_choice_position() -> GameState {
        let rows = [
            "XO......", EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, "OX......", EMPTY_ROW, EMPTY_ROW,
            "XOO.....",
        ];
        GameState::from_diagram(&rows, Color::Dark).unwrap()
    }

    #[test]
    fn test_material() {
        let mut pos = GameState::new();
        assert_eq!(material(&pos, Color::Dark), 0);
        pos.apply_move(Move::new(2, 3)).unwrap();
        assert_eq!(material(&pos, Color::Dark), 3);
        assert_eq!(material(&pos, Color::Light), -3);
    }

    #[test]
    fn test_win_and_loss_scores() {
        let rows = [
            "XXX.....", EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW,
            EMPTY_ROW,
        ];
        let won = GameState::from_diagram(&rows, Color::Light).unwrap();
        assert_eq!(minimax(&won, 0, true, Color::Dark), WIN_SCORE);
        assert_eq!(minimax(&won, 3, false, Color::Light), -WIN_SCORE);
    }

    #[test]
    fn test_cutoff_uses_heuristic() {
        let pos = GameState::new();
        assert_eq!(minimax(&pos, 0, true, Color::Dark), 0);
    }

    #[test]
    fn test_start_depth_one_takes_first_of_equal_moves() {
        let pos = GameState::new();
        assert_eq!(best_move_with_score(&pos, 1), Some((Move::new(2, 3), 3)));
    }

    #[test]
    fn test_prefers_larger_capture() {
        let pos = two_choice_position();
        assert_eq!(
            pos.legal_moves(),
            vec![Move::new(0, 2), Move::new(7, 3)]
        );
        assert_eq!(best_move_with_score(&pos, 1), Some((Move::new(7, 3), 4)));
    }

    #[test]
    fn test_no_moves_returns_none() {
        let rows = [
            "OX......", EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW,
            EMPTY_ROW,
        ];
        let pos = GameState::from_diagram(&rows, Color::Dark).unwrap();
        assert_eq!(best_move(&pos, 3), None);
    }

    #[test]
    fn test_depth_zero_searches_one_ply() {
        let pos = two_choice_position();
        assert_eq!(best_move(&pos, 0), best_move(&pos, 1));
    }

    #[test]
    fn test_deterministic() {
        let pos = GameState::new();
        let first = Minimax::new(3).best_move(&pos);
        for _ in 0..3 {
            assert_eq!(Minimax::new(3).best_move(&pos), first);
        }
    }
}
