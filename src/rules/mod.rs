//! Rules engine trait and action outcomes.
//!
//! The search calls into `RulesEngine` and never interprets game-specific
//! concepts directly. `games::conquest` provides the implementation.

pub mod engine;
pub mod outcome;

pub use engine::{GameResult, RulesEngine};
pub use outcome::{ActionOutcome, RejectReason};
