//! Random playouts (uniform random game simulation).
//!
//! A playout plays uniformly random legal moves until neither side can
//! move. When only the side to move is stuck it passes and play goes on.

use fastrand::Rng;

use crate::constants::MAX_GAME_LEN;
use crate::position::{GameState, Move, Outcome};

/// Choose a uniformly random legal move for the side to move.
pub fn choose_random_move(pos: &GameState, rng: &mut Rng) -> Option<Move> {
    let moves = pos.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves on `pos` until the game is over and return the result.
pub fn mcplayout(pos: &mut GameState, rng: &mut Rng) -> Outcome {
    let mut placed = 0;
    while !pos.is_terminal() {
        match choose_random_move(pos, rng) {
            Some(mv) => {
                let played = pos.apply_move(mv);
                debug_assert!(played.is_ok(), "random move {mv} rejected");
                placed += 1;
            }
            None => pos.pass_turn(),
        }
    }
    debug_assert!(placed <= MAX_GAME_LEN);
    pos.outcome()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    #[test]
    fn test_playout_reaches_end() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..20 {
            let mut pos = GameState::new();
            let outcome = mcplayout(&mut pos, &mut rng);
            assert!(pos.is_terminal());
            assert_ne!(outcome, Outcome::Undetermined);
            assert_eq!(outcome, pos.outcome());
        }
    }

    #[test]
    fn test_playout_on_finished_game() {
        let rows = [
            "XX......", "........", "........", "........", "........", "........",
            "........", "O.......",
        ];
        let mut pos = GameState::from_diagram(&rows, Color::Light).unwrap();
        let before = pos;
        let mut rng = Rng::with_seed(1);
        assert_eq!(mcplayout(&mut pos, &mut rng), Outcome::DarkWins);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_playout_passes_for_stuck_side() {
        // Dark is stuck; Light must be allowed to continue
        let rows = [
            "OX......", "........", "........", "........", "........", "........",
            "........", "........",
        ];
        let mut pos = GameState::from_diagram(&rows, Color::Dark).unwrap();
        let mut rng = Rng::with_seed(3);
        assert_eq!(mcplayout(&mut pos, &mut rng), Outcome::LightWins);
        assert_eq!(pos.count(Color::Light), 3);
    }

    #[test]
    fn test_random_move_is_legal() {
        let pos = GameState::new();
        let mut rng = Rng::with_seed(11);
        for _ in 0..10 {
            let mv = choose_random_move(&pos, &mut rng).unwrap();
            assert!(pos.legal_moves().contains(&mv));
        }
    }
}
