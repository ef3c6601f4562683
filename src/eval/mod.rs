//! Position evaluation for the search.
//!
//! All evaluators map `(state, perspective)` to a score in [-1, 1]:
//! -1 when the perspective player is dead, +1 when every opponent is dead,
//! a blended estimate otherwise.
//!
//! - `HeuristicEvaluator`: hand-tuned formula, needs no configuration
//! - `Evaluation`: uses a loaded `ResidualValueNet`, falls back to the heuristic

mod evaluation;
mod heuristic;

pub use evaluation::Evaluation;
pub use heuristic::{HeuristicEvaluator, HeuristicWeights};

use crate::core::{GameState, PlayerId};

/// Static position evaluator.
pub trait Evaluator: Send + Sync {
    /// Score `state` for `perspective`, in [-1, 1].
    fn evaluate(&self, state: &GameState, perspective: PlayerId) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, state: &GameState, perspective: PlayerId) -> f64 {
        (**self).evaluate(state, perspective)
    }
}

/// Score of a decided position, if it is one.
#[must_use]
pub fn terminal_value(state: &GameState, perspective: PlayerId) -> Option<f64> {
    let me = state.get_player(perspective)?;
    if !me.is_alive() {
        return Some(-1.0);
    }
    if state.living_enemies(perspective).next().is_none() {
        return Some(1.0);
    }
    None
}
