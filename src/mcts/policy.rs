//! Child selection policies.

use super::config::MCTSConfig;
use super::node::NodeId;
use super::tree::MCTSTree;

/// Policy for selecting which child node to descend into.
pub trait SelectionPolicy: Send + Sync {
    /// Pick a child of `parent`. `None` when it has no children.
    fn select(&self, tree: &MCTSTree, parent: NodeId, config: &MCTSConfig) -> Option<NodeId>;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: mean(a) + c * sqrt(ln(N) / n(a)), with unvisited children first.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl UCB1 {
    /// UCB1 score of a child with `visits` and `mean` under a parent with `parent_visits`.
    #[must_use]
    pub fn score(mean: f64, visits: u32, parent_visits: u32, c: f64) -> f64 {
        if visits == 0 {
            return f64::INFINITY;
        }
        let ln_parent = (parent_visits.max(1) as f64).ln();
        mean + c * (ln_parent / visits as f64).sqrt()
    }
}

impl SelectionPolicy for UCB1 {
    fn select(&self, tree: &MCTSTree, parent: NodeId, config: &MCTSConfig) -> Option<NodeId> {
        let node = tree.get(parent);
        node.children
            .iter()
            .map(|&id| {
                let child = tree.get(id);
                let score = Self::score(child.mean_score(), child.visits, node.visits, config.exploration_constant);
                (id, score)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}

/// Pure exploitation: highest mean score.
#[derive(Clone, Debug, Default)]
pub struct Greedy;

impl SelectionPolicy for Greedy {
    fn select(&self, tree: &MCTSTree, parent: NodeId, _config: &MCTSConfig) -> Option<NodeId> {
        tree.get(parent)
            .children
            .iter()
            .map(|&id| (id, tree.get(id).mean_score()))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}
