//! Self-play and training log bindings for Python.

use pyo3::prelude::*;

use crate::eval::Evaluation;
use crate::games::GameEngine;
use crate::training::{SelfPlayConfig, SelfPlayWorker, TrainingLog};

use super::py_game::{parse_settings, parse_setups};
use super::value_error;

/// Self-play data generator.
#[pyclass(name = "SelfPlay")]
pub struct PySelfPlay(SelfPlayWorker);

#[pymethods]
impl PySelfPlay {
    /// # Arguments
    /// - iterations: MCTS iterations per move (default: from bot difficulty)
    /// - max_moves: actions before a game is abandoned
    /// - weights: optional value network JSON
    #[new]
    #[pyo3(signature = (iterations = None, max_moves = 500, weights = None))]
    fn new(iterations: Option<u32>, max_moves: usize, weights: Option<&str>) -> PyResult<Self> {
        let evaluation = match weights {
            Some(json) => Evaluation::with_weights(json).map_err(value_error)?,
            None => Evaluation::new(),
        };
        let mut config = SelfPlayConfig::new().with_max_moves(max_moves);
        config.iterations = iterations;
        Ok(Self(SelfPlayWorker::new(GameEngine::new(), evaluation, config)))
    }

    /// Play `count` games and collect their records.
    #[pyo3(signature = (count, players = None, settings = None, seed = 0))]
    fn play_games(
        &self,
        count: usize,
        players: Option<Vec<(String, String)>>,
        settings: Option<&str>,
        seed: u64,
    ) -> PyResult<PyTrainingLog> {
        let players = players.unwrap_or_else(|| {
            vec![
                ("north".to_string(), "kingdom".to_string()),
                ("south".to_string(), "khanate".to_string()),
            ]
        });
        let setups = parse_setups(&players)?;
        let settings = parse_settings(settings)?;
        Ok(PyTrainingLog(self.0.play_games(count, &setups, &settings, seed)))
    }
}

/// Collected training records.
#[pyclass(name = "TrainingLog")]
pub struct PyTrainingLog(pub TrainingLog);

#[pymethods]
impl PyTrainingLog {
    #[new]
    fn new() -> Self {
        Self(TrainingLog::new())
    }

    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        TrainingLog::load(path).map(Self).map_err(value_error)
    }

    /// Write to `path`; a `.bin` extension selects bincode, anything else JSON.
    fn save(&self, path: &str) -> PyResult<()> {
        self.0.save(path).map_err(value_error)
    }

    /// All records as a JSON array.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.0.records).map_err(value_error)
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    fn __repr__(&self) -> String {
        format!("TrainingLog(records={})", self.0.len())
    }
}
