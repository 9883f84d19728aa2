//! Search metrics and game tallies.

use std::time::Duration;

use crate::game::Outcome;

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Running log of move searches, averaged on demand.
#[derive(Debug, Clone, Default)]
pub struct SearchMetrics {
    rollouts_per_second: Vec<f64>,
    search_seconds: Vec<f64>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one search. A zero-length search contributes its duration
    /// but no rate.
    pub fn record(&mut self, rollouts: usize, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rollouts_per_second.push(rollouts as f64 / secs);
        }
        self.search_seconds.push(secs);
    }

    /// Number of searches recorded.
    pub fn searches(&self) -> usize {
        self.search_seconds.len()
    }

    pub fn average_rollouts_per_second(&self) -> Option<f64> {
        mean(&self.rollouts_per_second)
    }

    pub fn average_search_seconds(&self) -> Option<f64> {
        mean(&self.search_seconds)
    }

    pub fn reset(&mut self) {
        self.rollouts_per_second.clear();
        self.search_seconds.clear();
    }
}

/// Win/tie counts across games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub light_wins: u32,
    pub dark_wins: u32,
    pub ties: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::LightWins => self.light_wins += 1,
            Outcome::DarkWins => self.dark_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.light_wins + self.dark_wins + self.ties
    }
}

/// Format an optional average for display.
pub fn fmt_average(value: Option<f64>) -> String {
    value.map_or_else(|| "no data".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn test_empty_metrics_report_no_data() {
        let metrics = SearchMetrics::new();
        assert_eq!(metrics.searches(), 0);
        assert_eq!(metrics.average_rollouts_per_second(), None);
        assert_eq!(metrics.average_search_seconds(), None);
        assert_eq!(fmt_average(metrics.average_search_seconds()), "no data");
    }

    #[test]
    fn test_record_and_reset() {
        let mut metrics = SearchMetrics::new();
        metrics.record(100, Duration::from_secs(2));
        metrics.record(300, Duration::from_secs(2));
        assert_eq!(metrics.searches(), 2);
        assert_eq!(metrics.average_rollouts_per_second(), Some(100.0));
        assert_eq!(metrics.average_search_seconds(), Some(2.0));

        metrics.record(0, Duration::ZERO);
        assert_eq!(metrics.searches(), 3);
        assert_eq!(metrics.average_rollouts_per_second(), Some(100.0));

        metrics.reset();
        assert_eq!(metrics.average_search_seconds(), None);
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        tally.record(Outcome::DarkWins);
        tally.record(Outcome::DarkWins);
        tally.record(Outcome::Tie);
        assert_eq!(tally, Tally { light_wins: 0, dark_wins: 2, ties: 1 });
        assert_eq!(tally.games(), 3);
    }
}
