//! Monte Carlo playouts (game simulation to the end).
//!
//! A playout picks moves with a cheap [`Policy`] until the game is decided.
//! Two policies exist: uniform random, and a static positional heuristic
//! that prefers corners and avoids the squares next to them.

use fastrand::Rng;

use crate::constants::{BAD_EDGES, CORNERS, WORST};
use crate::game::{GameState, Move, Outcome};

/// How moves are picked during a playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Uniformly random legal move
    Random,
    /// Random move from the best non-empty positional tier
    Heuristic,
}

/// Positional tier of a square, best first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Corner,
    Safe,
    BadEdge,
    Worst,
}

impl Tier {
    pub fn of(pos: Move) -> Self {
        if CORNERS.contains(&pos) {
            Tier::Corner
        } else if BAD_EDGES.contains(&pos) {
            Tier::BadEdge
        } else if WORST.contains(&pos) {
            Tier::Worst
        } else {
            Tier::Safe
        }
    }
}

impl Policy {
    /// Pick one of `moves`, or `None` if there are none.
    pub fn choose(self, moves: &[Move], rng: &mut Rng) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        match self {
            Policy::Random => Some(moves[rng.usize(..moves.len())]),
            Policy::Heuristic => {
                let best = moves.iter().map(|&m| Tier::of(m)).min()?;
                let tier: Vec<Move> = moves.iter().copied().filter(|&m| Tier::of(m) == best).collect();
                Some(tier[rng.usize(..tier.len())])
            }
        }
    }
}

/// Play `state` out to the end and return the outcome.
///
/// A side with no legal move passes; two passes in a row end the game.
/// Every iteration places one chip or returns, so the loop is bounded by
/// the number of empty cells.
pub fn rollout(state: &mut GameState, policy: Policy, rng: &mut Rng) -> Outcome {
    let max_plies = state.board.empty_count();

    for _ in 0..=max_plies {
        if let Some(outcome) = state.check_terminal(false) {
            return outcome;
        }

        let mut moves = state.legal_moves();
        if moves.is_empty() {
            state.switch_side();
            moves = state.legal_moves();
            if moves.is_empty() {
                return state.check_terminal(true).unwrap_or(Outcome::Tie);
            }
        }

        let Some(pos) = policy.choose(&moves, rng) else {
            break;
        };
        state.apply_move(pos);
        state.switch_side();
    }

    // Only reachable if the ply bound is wrong; score what is on the board.
    let (light, dark) = state.score();
    Outcome::from_counts(light, dark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color};
    use crate::constants::CELLS;

    #[test]
    fn test_tier_classification() {
        assert_eq!(Tier::of(0), Tier::Corner);
        assert_eq!(Tier::of(63), Tier::Corner);
        assert_eq!(Tier::of(1), Tier::BadEdge);
        assert_eq!(Tier::of(57), Tier::BadEdge);
        assert_eq!(Tier::of(9), Tier::Worst);
        assert_eq!(Tier::of(54), Tier::Worst);
        assert_eq!(Tier::of(2), Tier::Safe);
        assert_eq!(Tier::of(27), Tier::Safe);
    }

    #[test]
    fn test_heuristic_prefers_corner() {
        let mut rng = Rng::with_seed(7);
        let moves = [1, 9, 20, 56, 62];
        for _ in 0..200 {
            assert_eq!(Policy::Heuristic.choose(&moves, &mut rng), Some(56));
        }
    }

    #[test]
    fn test_heuristic_tier_order() {
        let mut rng = Rng::with_seed(11);
        for _ in 0..200 {
            let safe = Policy::Heuristic.choose(&[9, 1, 20, 30], &mut rng).unwrap();
            assert!(safe == 20 || safe == 30);
            assert_eq!(Policy::Heuristic.choose(&[9, 14, 48], &mut rng), Some(48));
            let worst = Policy::Heuristic.choose(&[9, 54], &mut rng).unwrap();
            assert!(worst == 9 || worst == 54);
        }
    }

    #[test]
    fn test_random_covers_all_moves() {
        let mut rng = Rng::with_seed(3);
        let moves = [20, 29, 34, 43];
        let mut seen = [false; 4];
        for _ in 0..400 {
            let m = Policy::Random.choose(&moves, &mut rng).unwrap();
            let i = moves.iter().position(|&x| x == m).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(Policy::Random.choose(&[], &mut rng), None);
    }

    #[test]
    fn test_rollout_reaches_terminal() {
        let mut rng = Rng::with_seed(42);
        for policy in [Policy::Random, Policy::Heuristic] {
            for _ in 0..20 {
                let mut state = GameState::new(Color::Dark);
                let outcome = rollout(&mut state, policy, &mut rng);
                assert_eq!(state.game_over(), Some(outcome));
                let (light, dark) = state.score();
                assert_eq!(Outcome::from_counts(light, dark), outcome);
                assert!(light + dark <= CELLS);
            }
        }
    }

    #[test]
    fn test_rollout_double_pass() {
        // Two isolated chips of the same color: nobody can move.
        let mut board = Board::new();
        board.set(0, Some(Color::Light));
        board.set(63, Some(Color::Light));
        let mut state = GameState::from_board(board, Color::Dark);
        let mut rng = Rng::with_seed(1);
        assert_eq!(rollout(&mut state, Policy::Random, &mut rng), Outcome::LightWins);
    }
}
