//! Search and encoding bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::PlayerId;
use crate::eval::Evaluation;
use crate::mcts::{MCTSConfig, MCTSSearch};
use crate::nn::{ConquestEncoder, StateEncoder};

use super::py_game::PyGame;
use super::value_error;

/// MCTS agent.
#[pyclass(name = "Search")]
pub struct PySearch {
    evaluation: Evaluation,
    config: MCTSConfig,
    iterations: u32,
}

#[pymethods]
impl PySearch {
    /// Create a search.
    ///
    /// # Arguments
    /// - iterations: iterations per decision
    /// - exploration_constant: UCB1 constant
    /// - seed: search RNG seed
    /// - weights: optional value network JSON
    #[new]
    #[pyo3(signature = (iterations = 50, exploration_constant = 1.41, seed = 42, weights = None))]
    fn new(iterations: u32, exploration_constant: f64, seed: u64, weights: Option<&str>) -> PyResult<Self> {
        let evaluation = match weights {
            Some(json) => Evaluation::with_weights(json).map_err(value_error)?,
            None => Evaluation::new(),
        };
        Ok(Self {
            evaluation,
            config: MCTSConfig::default().with_exploration(exploration_constant).with_seed(seed),
            iterations,
        })
    }

    /// Load value network weights. On failure the previous evaluator stays active.
    fn load_weights(&mut self, json: &str) -> PyResult<()> {
        self.evaluation.load_weights(json).map_err(value_error)
    }

    #[getter]
    fn has_model(&self) -> bool {
        self.evaluation.has_model()
    }

    /// Best action for the game's actor, as JSON.
    fn decide(&self, game: &PyGame) -> PyResult<String> {
        let mut search = MCTSSearch::new(&game.engine, &self.evaluation, self.config.clone());
        let (action, _) = search.decide(&game.state, self.iterations);
        serde_json::to_string(&action).map_err(value_error)
    }

    /// Full search result (action, policy, value, iterations) as JSON.
    fn search(&self, game: &PyGame) -> PyResult<String> {
        let mut search = MCTSSearch::new(&game.engine, &self.evaluation, self.config.clone());
        let result = search.search(&game.state, self.iterations);
        serde_json::to_string(&result).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Search(iterations={}, c={}, model={})",
            self.iterations,
            self.config.exploration_constant,
            self.evaluation.has_model()
        )
    }
}

/// Value network feature encoder.
#[pyclass(name = "Encoder")]
pub struct PyEncoder(ConquestEncoder);

#[pymethods]
impl PyEncoder {
    #[new]
    #[pyo3(signature = (gold_scale = 1000.0))]
    fn new(gold_scale: f32) -> Self {
        Self(ConquestEncoder::new().with_gold_scale(gold_scale))
    }

    /// Feature vector of `player` in `game`.
    fn encode<'py>(&self, py: Python<'py>, game: &PyGame, player: u8) -> Bound<'py, PyArray1<f32>> {
        let encoded = self.0.encode(&game.state, PlayerId::new(player));
        PyArray1::from_slice_bound(py, &encoded.tensor)
    }

    #[getter]
    fn shape(&self) -> Vec<usize> {
        self.0.output_shape()
    }
}
