//! Search tree nodes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Action, GameState};

/// Arena index of a node. The root is always 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Parent of the root.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// One position reached during search.
///
/// Scores are from the root player's point of view regardless of who acts
/// at this node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    pub parent: NodeId,

    /// Move that produced `state`. `None` at the root.
    pub action: Option<Action>,

    /// Owned copy; siblings share structure through `im`.
    pub state: GameState,

    pub depth: u16,

    pub visits: u32,

    pub total_score: f64,

    pub children: SmallVec<[NodeId; 8]>,

    /// Legal moves from `state` with no child yet.
    pub untried: Vec<Action>,
}

impl MCTSNode {
    pub fn new(parent: NodeId, action: Option<Action>, state: GameState, depth: u16, untried: Vec<Action>) -> Self {
        Self {
            parent,
            action,
            state,
            depth,
            visits: 0,
            total_score: 0.0,
            children: SmallVec::new(),
            untried,
        }
    }

    pub fn root(state: GameState, untried: Vec<Action>) -> Self {
        Self::new(NodeId::NONE, None, state, 0, untried)
    }

    /// Mean score, 0 when unvisited.
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_score / f64::from(self.visits)
    }

    /// The match is over at this node.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.state.winner.is_some()
    }

    /// Nothing left to expand or descend into.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.untried.is_empty() && self.children.is_empty()
    }
}
