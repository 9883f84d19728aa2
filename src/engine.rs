//! Move-choosing agents.
//!
//! [`Engine`] wraps the flat Monte Carlo search with its own random stream
//! and keeps metrics across every move it is asked for.

use fastrand::Rng;

use crate::game::{GameState, Move};
use crate::metrics::SearchMetrics;
use crate::search::{SearchConfig, SearchReport, search};

/// Something that can pick a move for the side to move.
pub trait Agent {
    /// Pick a move, or `None` to pass. Only called when a legal move exists.
    fn choose_move(&mut self, state: &GameState) -> anyhow::Result<Option<Move>>;

    /// Search metrics, for agents that search.
    fn metrics(&self) -> Option<&SearchMetrics> {
        None
    }
}

/// Computer player using flat Monte Carlo search.
pub struct Engine {
    config: SearchConfig,
    metrics: SearchMetrics,
    rng: Rng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            metrics: SearchMetrics::new(),
            rng: Rng::new(),
        }
    }

    /// Engine whose searches are reproducible.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            metrics: SearchMetrics::new(),
            rng: Rng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a full search and record it in the metrics.
    ///
    /// Nothing is recorded when there was nothing to search.
    pub fn search(&mut self, state: &GameState) -> SearchReport {
        let seed = self.rng.u64(..);
        let report = search(state, &self.config, seed);
        if !report.candidates.is_empty() {
            self.metrics.record(report.rollouts, report.elapsed);
        }
        report
    }

    /// Best move for the side to move, or `None` if it has to pass.
    pub fn select_move(&mut self, state: &GameState) -> Option<Move> {
        self.search(state).best
    }

    pub fn average_rollouts_per_second(&self) -> Option<f64> {
        self.metrics.average_rollouts_per_second()
    }

    pub fn average_search_seconds(&self) -> Option<f64> {
        self.metrics.average_search_seconds()
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl Agent for Engine {
    fn choose_move(&mut self, state: &GameState) -> anyhow::Result<Option<Move>> {
        Ok(self.select_move(state))
    }

    fn metrics(&self) -> Option<&SearchMetrics> {
        Some(&self.metrics)
    }
}
