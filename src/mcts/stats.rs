//! Counters gathered while a search runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-search counters, reset by `MCTSSearch::start`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,

    pub nodes_expanded: u32,

    pub evaluations: u32,

    /// Evaluations of positions where the match was already decided.
    pub decided_leaves: u32,

    /// Iterations that wanted to expand but hit `max_nodes`.
    pub budget_stalls: u32,

    /// Enumerated actions the engine refused. Stays 0 while legal-action
    /// generation and `apply` agree.
    pub rejected_expansions: u32,

    pub max_depth: u16,

    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.time_us)
    }

    /// Share of iterations that grew the tree.
    #[must_use]
    pub fn expansion_rate(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        f64::from(self.nodes_expanded) / f64::from(self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_rate() {
        let stats = SearchStats {
            iterations: 40,
            nodes_expanded: 10,
            budget_stalls: 30,
            ..SearchStats::default()
        };
        assert!((stats.expansion_rate() - 0.25).abs() < 1e-12);
        assert_eq!(SearchStats::default().expansion_rate(), 0.0);
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut stats = SearchStats {
            iterations: 3,
            decided_leaves: 2,
            time_us: 1_500,
            ..SearchStats::default()
        };
        assert_eq!(stats.elapsed(), Duration::from_micros(1_500));
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
