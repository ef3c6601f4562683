//! # card-conquest
//!
//! A turn-based nation-building card battle engine with an MCTS agent.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every engine call takes a `&GameState` and
//!    returns a new one. Rejected actions return the input unchanged.
//!
//! 2. **N-Player First**: seats, targeting and turn order work for any
//!    table size up to `GameSettings::max_players`.
//!
//! 3. **Explicit randomness**: shop refreshes, draws, events and missile targets
//!    all pull from a caller-supplied `GameRng`, so a seed replays a game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for MCTS.
//!
//! - **One-ply MCTS**: leaves are scored by an `Evaluator` (heuristic or a
//!   small residual value network loaded from JSON), no rollouts.
//!
//! ## Modules
//!
//! - `core`: players, nations, state, actions, RNG, settings
//! - `cards`: card definitions, instances and the catalog
//! - `rules`: `RulesEngine` trait and action outcomes
//! - `games`: the Card Conquest rules
//! - `eval`: position evaluators
//! - `nn`: state encoder and value network
//! - `mcts`: Monte Carlo Tree Search for AI
//! - `training`: self-play and training record export

pub mod cards;
pub mod core;
pub mod eval;
pub mod games;
pub mod mcts;
pub mod nn;
pub mod rules;
pub mod training;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, BotDifficulty, GameRng, GameSettings, GameState, LogEntry, LogKind, Nation, PendingAttack, Player,
    PlayerId, PlayerSetup, TurnPhase,
};

pub use crate::cards::{Card, CardCatalog, CardCategory, CardDefinition, EffectKind};

pub use crate::rules::{ActionOutcome, GameResult, RejectReason, RulesEngine};

pub use crate::games::GameEngine;

pub use crate::eval::{Evaluation, Evaluator, HeuristicEvaluator};

pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchResult, SearchStats};

pub use crate::training::{SelfPlayConfig, SelfPlayWorker, TrainingLog, TrainingRecord};
