//! Training data generation.
//!
//! ## Overview
//!
//! - **TrainingRecord**: one search decision with policy and value targets
//! - **TrainingLog**: record collection with JSON / bincode export
//! - **SelfPlayWorker**: runs bot-vs-bot games with MCTS to fill a log
//!
//! ## Usage
//!
//! ```rust,ignore
//! use card_conquest::training::{SelfPlayConfig, SelfPlayWorker};
//!
//! let worker = SelfPlayWorker::new(GameEngine::new(), Evaluation::new(), SelfPlayConfig::new());
//! let log = worker.play_games(10, &players, &GameSettings::default(), 42);
//! log.save("records.bin")?;
//! ```

pub mod export;
pub mod record;
pub mod self_play;

pub use export::{ExportError, TrainingLog};
pub use record::{ActionKind, ActionRecord, PlayerStats, StateSnapshot, TrainingRecord};
pub use self_play::{GameSummary, SelfPlayConfig, SelfPlayWorker};
