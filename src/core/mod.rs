//! Core engine types: players, state, actions, RNG, configuration.
//!
//! This module contains the data model. Rules live in `rules` and `games`.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, CardIds};
pub use config::{BotDifficulty, GameSettings};
pub use player::{Nation, NationBonus, Player, PlayerId, PlayerSetup};
pub use rng::GameRng;
pub use state::{GameState, LastAction, LogEntry, LogKind, PendingAttack, TurnPhase};
