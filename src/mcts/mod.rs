//! Monte Carlo Tree Search agent.
//!
//! ## Overview
//!
//! - **One-ply evaluation**: new leaves are scored directly by an
//!   `Evaluator` from the root player's perspective, no rollouts
//! - **Arena tree**: nodes hold their state snapshot; clones are O(1)
//! - **Time-sliced**: `start` / `run` / `run_until` / `result`
//! - **Training targets**: visit distribution and value in `SearchResult`
//!
//! ## Usage
//!
//! ```rust
//! use card_conquest::core::{GameRng, GameSettings, Nation, PlayerSetup};
//! use card_conquest::eval::Evaluation;
//! use card_conquest::games::GameEngine;
//! use card_conquest::mcts::{MCTSConfig, MCTSSearch};
//!
//! let engine = GameEngine::new();
//! let players = [PlayerSetup::human("Ada", Nation::Kingdom), PlayerSetup::bot("Bot", Nation::Khanate)];
//! let state = engine.create_initial_state(&players, &GameSettings::default(), &mut GameRng::new(1));
//!
//! let mut search = MCTSSearch::new(engine, Evaluation::new(), MCTSConfig::default());
//! let result = search.search(&state, 50);
//! assert!(result.action.is_some());
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{Greedy, SelectionPolicy, UCB1};
pub use search::{MCTSSearch, SearchResult};
pub use stats::SearchStats;
pub use tree::MCTSTree;
