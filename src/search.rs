//! Flat Monte Carlo move selection.
//!
//! Every legal move gets the same fixed number of independent playouts.
//! Each playout result is scored from the searching side's point of view
//! and summed per move; the move with the highest sum wins. There is no
//! tree, no reuse between moves, and no UCB exploration.
//!
//! The wall-clock budget is checked before every playout. Once it runs out
//! no further playouts start, so moves later in index order may receive
//! fewer playouts or none at all.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use fastrand::Rng;
use log::{debug, info};
use rayon::prelude::*;

use crate::board::Color;
use crate::constants::{PLAYOUTS_PER_CANDIDATE, SCORE_LOSS, SCORE_TIE, SCORE_WIN, TIME_BUDGET_SECS};
use crate::game::{GameState, Move, Outcome};
use crate::playout::{Policy, rollout};

/// Parameters for one move search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Playouts run for each legal move
    pub playouts_per_candidate: usize,
    /// Wall-clock budget; `None` means unlimited
    pub time_budget: Option<Duration>,
    /// Move picker used inside playouts
    pub policy: Policy,
    /// Evaluate candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            playouts_per_candidate: PLAYOUTS_PER_CANDIDATE,
            time_budget: Some(Duration::from_secs(TIME_BUDGET_SECS)),
            policy: Policy::Heuristic,
            parallel: false,
        }
    }
}

/// Accumulated playout results for one candidate move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateStats {
    pub pos: Move,
    pub score: i64,
    pub playouts: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
}

impl CandidateStats {
    fn new(pos: Move) -> Self {
        Self {
            pos,
            score: 0,
            playouts: 0,
            wins: 0,
            losses: 0,
            ties: 0,
        }
    }

    /// Score a playout outcome for the side that was searching.
    fn record(&mut self, outcome: Outcome, mover: Color) {
        self.playouts += 1;
        match outcome.winner() {
            Some(c) if c == mover => {
                self.wins += 1;
                self.score += SCORE_WIN;
            }
            Some(_) => {
                self.losses += 1;
                self.score += SCORE_LOSS;
            }
            None => {
                self.ties += 1;
                self.score += SCORE_TIE;
            }
        }
    }
}

/// Everything a search found out.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Chosen move, `None` when the side to move has to pass
    pub best: Option<Move>,
    /// One entry per legal move, ascending by cell
    pub candidates: Vec<CandidateStats>,
    /// Total playouts performed
    pub rollouts: usize,
    pub elapsed: Duration,
    /// Whether the wall-clock budget cut the search short
    pub timed_out: bool,
}

/// Shared stop signal: set once the budget is exceeded, seen by all workers.
struct Deadline {
    start: Instant,
    budget: Option<Duration>,
    expired: AtomicBool,
}

impl Deadline {
    fn new(budget: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            budget,
            expired: AtomicBool::new(false),
        }
    }

    fn is_expired(&self) -> bool {
        if self.expired.load(Ordering::Relaxed) {
            return true;
        }
        match self.budget {
            Some(budget) if self.start.elapsed() > budget => {
                self.expired.store(true, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }
}

/// Independent random stream per candidate, so results do not depend on
/// the order (or thread) in which candidates are evaluated.
fn candidate_seed(seed: u64, pos: Move) -> u64 {
    seed ^ (pos as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run playouts for one candidate until its quota or the deadline.
fn evaluate(state: &GameState, pos: Move, config: &SearchConfig, seed: u64, deadline: &Deadline) -> CandidateStats {
    let mut rng = Rng::with_seed(candidate_seed(seed, pos));
    let mut stats = CandidateStats::new(pos);

    for _ in 0..config.playouts_per_candidate {
        if deadline.is_expired() {
            break;
        }
        let mut sim = *state;
        sim.apply_move(pos);
        sim.switch_side();
        let outcome = rollout(&mut sim, config.policy, &mut rng);
        stats.record(outcome, state.to_move);
    }

    stats
}

/// Highest score wins; equal scores go to the lowest cell index.
fn best_candidate(candidates: &[CandidateStats]) -> Option<Move> {
    candidates
        .iter()
        .max_by_key(|c| (c.score, Reverse(c.pos)))
        .map(|c| c.pos)
}

/// Evaluate every legal move of `state` and report the statistics.
///
/// `seed` fixes all randomness; with an unlimited budget the report is the
/// same for sequential and parallel evaluation.
pub fn search(state: &GameState, config: &SearchConfig, seed: u64) -> SearchReport {
    let moves = state.legal_moves();
    let deadline = Deadline::new(config.time_budget);

    let candidates: Vec<CandidateStats> = if config.parallel {
        moves
            .par_iter()
            .map(|&pos| evaluate(state, pos, config, seed, &deadline))
            .collect()
    } else {
        moves
            .iter()
            .map(|&pos| evaluate(state, pos, config, seed, &deadline))
            .collect()
    };

    let elapsed = deadline.start.elapsed();
    let timed_out = deadline.expired.load(Ordering::Relaxed);
    let rollouts = candidates.iter().map(|c| c.playouts).sum();

    if timed_out {
        info!("time budget exceeded after {rollouts} playouts, making decision");
    }
    for c in &candidates {
        debug!(
            "move {} score={} playouts={} w={} l={} t={}",
            c.pos, c.score, c.playouts, c.wins, c.losses, c.ties
        );
    }

    let best = best_candidate(&candidates);
    debug!(
        "{} chose {:?} after {rollouts} playouts in {:.3}s",
        state.to_move,
        best,
        elapsed.as_secs_f64()
    );

    SearchReport {
        best,
        candidates,
        rollouts,
        elapsed,
        timed_out,
    }
}

/// Best move for the side to move, or `None` if it must pass.
pub fn select_move(state: &GameState, config: &SearchConfig, seed: u64) -> Option<Move> {
    search(state, config, seed).best
}
