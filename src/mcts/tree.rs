//! Arena of search nodes.
//!
//! Nodes live in one `Vec` and point at each other by `NodeId`, so the tree
//! can be cloned, serialized and dropped in one piece.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::{Action, GameState};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    nodes: Vec<MCTSNode>,
}

impl MCTSTree {
    /// Tree holding only the root position and its legal moves.
    pub fn new(state: GameState, untried: Vec<Action>) -> Self {
        Self::with_capacity(state, untried, 1024)
    }

    pub fn with_capacity(state: GameState, untried: Vec<Action>, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(state, untried));
        Self { nodes }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        &self.nodes[0]
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Attach the position reached by playing `action` at `parent`.
    pub fn add_child(&mut self, parent: NodeId, action: Action, state: GameState, untried: Vec<Action>) -> NodeId {
        let depth = self.get(parent).depth.saturating_add(1);
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(MCTSNode::new(parent, Some(action), state, depth, untried));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Credit `score` to `from` and every ancestor.
    pub fn backpropagate(&mut self, from: NodeId, score: f64) {
        let mut current = from;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.visits += 1;
            node.total_score += score;
            current = node.parent;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &MCTSNode> {
        self.get(id).children.iter().map(move |&c| self.get(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Moves along the most-visited path from the root.
    #[must_use]
    pub fn principal_line(&self) -> Vec<Action> {
        let mut line = Vec::new();
        let mut current = self.root();
        while let Some(&next) = self.get(current).children.iter().max_by_key(|&&c| self.get(c).visits) {
            let Some(action) = self.get(next).action.clone() else {
                break;
            };
            line.push(action);
            current = next;
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSettings, Nation, Player, PlayerId, PlayerSetup};

    fn duel() -> GameState {
        let settings = GameSettings::default();
        let players = (0..2)
            .map(|i| Player::new(PlayerId::new(i), &PlayerSetup::bot("bot", Nation::Republic), &settings))
            .collect();
        GameState::new(players, settings)
    }

    #[test]
    fn test_children_link_back() {
        let mut tree = MCTSTree::new(duel(), vec![Action::EndTurn]);
        let child = tree.add_child(tree.root(), Action::EndTurn, duel(), Vec::new());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(child).parent, tree.root());
        assert_eq!(tree.get(child).depth, 1);
        assert_eq!(tree.root_node().children.as_slice(), &[child]);
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut tree = MCTSTree::new(duel(), Vec::new());
        let attack = tree.add_child(tree.root(), Action::attack("sword#1", PlayerId::new(1)), duel(), Vec::new());
        let absorb = tree.add_child(attack, Action::TakeDamage, duel(), Vec::new());

        tree.backpropagate(absorb, 0.5);
        tree.backpropagate(attack, -1.0);

        assert_eq!(tree.get(absorb).visits, 1);
        assert_eq!(tree.get(attack).visits, 2);
        assert_eq!(tree.root_node().visits, 2);
        assert!((tree.root_node().total_score + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_principal_line_follows_visits() {
        let mut tree = MCTSTree::new(duel(), Vec::new());
        let pass = tree.add_child(tree.root(), Action::EndTurn, duel(), Vec::new());
        let attack = tree.add_child(tree.root(), Action::attack("sword#1", PlayerId::new(1)), duel(), Vec::new());
        let absorb = tree.add_child(attack, Action::TakeDamage, duel(), Vec::new());
        tree.backpropagate(pass, 0.0);
        tree.backpropagate(absorb, 1.0);
        tree.backpropagate(absorb, 1.0);

        assert_eq!(
            tree.principal_line(),
            vec![Action::attack("sword#1", PlayerId::new(1)), Action::TakeDamage]
        );
        assert!(MCTSTree::new(duel(), Vec::new()).principal_line().is_empty());
    }
}
