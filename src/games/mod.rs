//! Game implementations of `RulesEngine`.

pub mod conquest;

pub use conquest::GameEngine;
