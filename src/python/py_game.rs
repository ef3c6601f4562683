//! Game bindings for Python.

use pyo3::prelude::*;

use crate::core::{Action, GameRng, GameSettings, GameState, Nation, PlayerSetup};
use crate::games::GameEngine;
use crate::rules::{ActionOutcome, GameResult, RulesEngine};

use super::value_error;

pub(crate) fn parse_nation(name: &str) -> PyResult<Nation> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase())).map_err(value_error)
}

pub(crate) fn parse_setups(players: &[(String, String)]) -> PyResult<Vec<PlayerSetup>> {
    players
        .iter()
        .map(|(name, nation)| Ok(PlayerSetup::bot(name.clone(), parse_nation(nation)?)))
        .collect()
}

pub(crate) fn parse_settings(settings: Option<&str>) -> PyResult<GameSettings> {
    settings.map_or_else(|| Ok(GameSettings::default()), |json| GameSettings::from_json(json).map_err(value_error))
}

/// A running match: engine, state and RNG.
#[pyclass(name = "Game")]
pub struct PyGame {
    pub(crate) engine: GameEngine,
    pub(crate) state: GameState,
    pub(crate) rng: GameRng,
}

#[pymethods]
impl PyGame {
    /// Create a match.
    ///
    /// # Arguments
    /// - players: list of (name, nation) pairs
    /// - settings: optional settings JSON; missing fields take defaults
    /// - seed: RNG seed
    #[new]
    #[pyo3(signature = (players, settings = None, seed = 42))]
    fn new(players: Vec<(String, String)>, settings: Option<&str>, seed: u64) -> PyResult<Self> {
        let setups = parse_setups(&players)?;
        let settings = parse_settings(settings)?;
        let engine = GameEngine::new();
        let mut rng = GameRng::new(seed);
        let state = engine.create_initial_state(&setups, &settings, &mut rng);
        Ok(Self { engine, state, rng })
    }

    /// Legal actions for the player entitled to act, as JSON strings.
    fn legal_actions(&self) -> PyResult<Vec<String>> {
        self.engine
            .legal_actions(&self.state)
            .iter()
            .map(|a| serde_json::to_string(a).map_err(value_error))
            .collect()
    }

    /// Apply an action given as JSON. Returns the rejection reason, if any.
    fn apply(&mut self, action: &str) -> PyResult<Option<String>> {
        let action: Action = serde_json::from_str(action).map_err(value_error)?;
        match self.engine.apply(&self.state, &action, &mut self.rng) {
            ActionOutcome::Applied(next) => {
                self.state = next;
                Ok(None)
            }
            ActionOutcome::Rejected(reason) => Ok(Some(reason.to_string())),
        }
    }

    /// Deposit (positive) or withdraw (negative) gold for the current player.
    fn bank(&mut self, amount: i64) {
        self.state = self.engine.handle_bank_transaction(&self.state, amount);
    }

    /// Full state as JSON.
    fn state_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.state).map_err(value_error)
    }

    /// Replace the state with a JSON document.
    fn load_state(&mut self, json: &str) -> PyResult<()> {
        self.state = serde_json::from_str(json).map_err(value_error)?;
        Ok(())
    }

    #[getter]
    fn current_player(&self) -> u8 {
        self.state.current_player.0
    }

    #[getter]
    fn actor(&self) -> u8 {
        self.engine.actor(&self.state).0
    }

    #[getter]
    fn turn(&self) -> u32 {
        self.state.turn
    }

    #[getter]
    fn winner(&self) -> Option<u8> {
        self.state.winner.map(|p| p.0)
    }

    /// True once the game has a result (including a draw).
    fn is_over(&self) -> bool {
        self.engine.result(&self.state).is_some()
    }

    fn is_draw(&self) -> bool {
        matches!(self.engine.result(&self.state), Some(GameResult::Draw))
    }

    fn __repr__(&self) -> String {
        format!(
            "Game(players={}, turn={}, current={})",
            self.state.player_count(),
            self.state.turn,
            self.state.current_player
        )
    }
}
