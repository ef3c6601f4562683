//! Core MCTS search algorithm.
//!
//! Each iteration runs selection (UCB1 from the root), expansion (one random
//! untried action applied to a clone of the node's state), a one-ply
//! evaluation of the new state from the root player's perspective, and
//! backpropagation of that score to the root. There are no rollouts.
//!
//! The search can be time-sliced: `start` seeds the tree, `run` and
//! `run_until` add iterations, and `result` reads the recommendation at any
//! point in between.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::eval::{Evaluation, Evaluator};
use crate::rules::{ActionOutcome, RulesEngine};

use super::config::MCTSConfig;
use super::policy::{SelectionPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Recommendation and training targets from a search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Most-visited root action; `None` when the root had no legal actions.
    pub action: Option<Action>,

    /// Root child visits divided by iterations, per action.
    pub policy: Vec<(Action, f64)>,

    /// Mean score of the recommended child.
    pub value: f64,

    pub iterations: u32,
}

impl SearchResult {
    fn empty(iterations: u32) -> Self {
        Self {
            action: None,
            policy: Vec::new(),
            value: 0.0,
            iterations,
        }
    }
}

/// Main MCTS search context.
///
/// Generic over the rules engine and the evaluator. Owns the search tree,
/// configuration and RNG.
pub struct MCTSSearch<E: RulesEngine, V: Evaluator = Evaluation> {
    engine: E,
    evaluator: V,
    config: MCTSConfig,
    tree: Option<MCTSTree>,
    root_player: PlayerId,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    stats: SearchStats,
}

impl<E: RulesEngine, V: Evaluator> MCTSSearch<E, V> {
    pub fn new(engine: E, evaluator: V, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            engine,
            evaluator,
            config,
            tree: None,
            root_player: PlayerId::new(0),
            rng,
            selection: Box::new(UCB1),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn evaluator(&self) -> &V {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut V {
        &mut self.evaluator
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The current tree, if `start` has been called.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree> {
        self.tree.as_ref()
    }

    /// Player the search decides for (the actor at the root).
    #[must_use]
    pub fn root_player(&self) -> PlayerId {
        self.root_player
    }

    /// Seed a fresh tree at `state`. The caller's state is never touched.
    pub fn start(&mut self, state: &GameState) {
        self.stats.reset();
        self.root_player = self.engine.actor(state);
        let actions = self.engine.legal_actions(state);
        let capacity = self.config.max_nodes.min(4096);
        self.tree = Some(MCTSTree::with_capacity(state.clone(), actions, capacity));
    }

    /// Run up to `iterations` more iterations. Returns how many ran.
    pub fn run(&mut self, iterations: u32) -> u32 {
        let start = Instant::now();
        let mut done = 0;
        while done < iterations && self.iteration() {
            done += 1;
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;
        done
    }

    /// Run iterations until `deadline`. Returns how many ran.
    pub fn run_until(&mut self, deadline: Instant) -> u32 {
        let start = Instant::now();
        let mut done = 0;
        while Instant::now() < deadline && self.iteration() {
            done += 1;
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;
        done
    }

    /// Run a complete search from `state`.
    pub fn search(&mut self, state: &GameState, iterations: u32) -> SearchResult {
        self.start(state);
        self.run(iterations);
        let result = self.result();
        log::trace!(
            "search: {} iterations in {:?}, {} nodes ({:.2} per iteration), value {:.3}",
            self.stats.iterations,
            self.stats.elapsed(),
            self.tree.as_ref().map_or(0, MCTSTree::len),
            self.stats.expansion_rate(),
            result.value
        );
        if log::log_enabled!(log::Level::Trace) {
            if let Some(tree) = &self.tree {
                let line: Vec<String> = tree.principal_line().iter().map(ToString::to_string).collect();
                log::trace!("principal line: {}", line.join(" -> "));
            }
        }
        result
    }

    /// Search and fall back to the engine's forced action when there is no choice.
    pub fn decide(&mut self, state: &GameState, iterations: u32) -> (Action, SearchResult) {
        let result = self.search(state, iterations);
        let action = result
            .action
            .clone()
            .unwrap_or_else(|| self.engine.forced_action(state));
        (action, result)
    }

    /// Recommendation from the tree so far.
    #[must_use]
    pub fn result(&self) -> SearchResult {
        let iterations = self.stats.iterations;
        let Some(tree) = &self.tree else {
            return SearchResult::empty(iterations);
        };
        let root = tree.root();
        let best = tree
            .get(root)
            .children
            .iter()
            .copied()
            .max_by(|&a, &b| {
                let (a, b) = (tree.get(a), tree.get(b));
                a.visits.cmp(&b.visits).then(
                    a.mean_score()
                        .partial_cmp(&b.mean_score())
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
            });
        let Some(best) = best else {
            return SearchResult::empty(iterations);
        };

        let denominator = f64::from(iterations.max(1));
        let policy = tree
            .children(root)
            .filter_map(|child| child.action.clone().map(|a| (a, f64::from(child.visits) / denominator)))
            .collect();

        SearchResult {
            action: tree.get(best).action.clone(),
            policy,
            value: tree.get(best).mean_score(),
            iterations,
        }
    }

    /// Single MCTS iteration. Returns false if there is no tree.
    fn iteration(&mut self) -> bool {
        let Some(tree) = self.tree.as_mut() else {
            return false;
        };

        // === SELECTION ===
        let mut current = tree.root();
        loop {
            let node = tree.get(current);
            if !node.untried.is_empty() || node.children.is_empty() {
                break;
            }
            match self.selection.select(tree, current, &self.config) {
                Some(child) => current = child,
                None => break,
            }
        }

        // === EXPANSION ===
        let mut leaf = current;
        let wants_expansion = !tree.get(current).untried.is_empty();
        if wants_expansion && tree.len() >= self.config.max_nodes {
            self.stats.budget_stalls += 1;
        } else if wants_expansion {
            let node = tree.get_mut(current);
            let index = self.rng.gen_index(node.untried.len());
            let action = node.untried.swap_remove(index);

            match self.engine.apply_action(&tree.get(current).state, &action, &mut self.rng) {
                ActionOutcome::Applied(next) => {
                    let actions = self.engine.legal_actions(&next);
                    leaf = tree.add_child(current, action, next, actions);
                    self.stats.nodes_expanded += 1;
                    self.stats.max_depth = self.stats.max_depth.max(tree.get(leaf).depth);
                }
                ActionOutcome::Rejected(reason) => {
                    log::debug!("enumerated action {action} was rejected: {reason}");
                    self.stats.rejected_expansions += 1;
                }
            }
        }

        // === EVALUATION ===
        let leaf_node = tree.get(leaf);
        if leaf_node.is_decided() {
            self.stats.decided_leaves += 1;
        }
        let score = self.evaluator.evaluate(&leaf_node.state, self.root_player);
        self.stats.evaluations += 1;

        // === BACKPROPAGATION ===
        tree.backpropagate(leaf, score);
        self.stats.iterations += 1;
        true
    }

    /// Visit count of the root (equals iterations run since `start`).
    #[must_use]
    pub fn root_visits(&self) -> u32 {
        self.tree.as_ref().map_or(0, |t| t.root_node().visits)
    }
}
