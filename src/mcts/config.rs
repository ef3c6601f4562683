//! Search tuning knobs.

use serde::{Deserialize, Serialize};

/// Tuning for one `MCTSSearch`. Iteration counts are passed per call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// C in the UCB1 term. Larger values spread visits across more moves.
    pub exploration_constant: f64,

    /// Arena size cap. A full tree keeps re-scoring its existing leaves.
    pub max_nodes: usize,

    /// Seeds expansion order and the draws made while simulating moves.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.41,
            max_nodes: 100_000,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The root always fits, so the cap never drops below one node.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_node_cap_keeps_root() {
        assert_eq!(MCTSConfig::default().with_max_nodes(0).max_nodes, 1);
    }

    #[test]
    fn test_partial_json_is_rejected() {
        assert!(serde_json::from_str::<MCTSConfig>(r#"{"seed": 3}"#).is_err());
        let json = serde_json::to_string(&MCTSConfig::default().with_exploration(0.5)).unwrap();
        let config: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.exploration_constant, 0.5);
        assert_eq!(config.seed, 42);
    }
}
