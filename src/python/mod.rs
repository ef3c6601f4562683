//! Python bindings for the card-conquest engine.
//!
//! Game states and actions cross the boundary as JSON strings, the same
//! documents the serde types produce on the Rust side.
//!
//! # Quick Start
//!
//! ```python
//! import card_conquest as cc
//!
//! game = cc.Game(players=[("alice", "kingdom"), ("bot", "khanate")], seed=7)
//! while game.winner is None:
//!     action = cc.Search(iterations=50).decide(game)
//!     game.apply(action)
//!
//! log = cc.SelfPlay(iterations=20).play_games(4, seed=1)
//! log.save("records.bin")
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod py_game;
mod py_search;
mod py_training;

pub use py_game::*;
pub use py_search::*;
pub use py_training::*;

pub(crate) fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// card_conquest: nation-building card battles with an MCTS agent.
#[pymodule]
fn card_conquest(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGame>()?;

    m.add_class::<PySearch>()?;
    m.add_class::<PyEncoder>()?;

    m.add_class::<PySelfPlay>()?;
    m.add_class::<PyTrainingLog>()?;

    Ok(())
}
