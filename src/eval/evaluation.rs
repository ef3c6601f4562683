//! Evaluation component: learned model when loaded, heuristic otherwise.

use std::path::Path;

use crate::core::{GameState, PlayerId};
use crate::nn::{ConquestEncoder, ResidualValueNet, StateEncoder, ValueNetwork, WeightsDocument, WeightsError};

use super::{terminal_value, Evaluator, HeuristicEvaluator};

/// Position evaluator owning an optional learned model.
///
/// Starts with no model and scores with `HeuristicEvaluator`. Loading a
/// weights document switches to the residual network; a failed load leaves
/// whatever was active before untouched.
#[derive(Clone, Debug, Default)]
pub struct Evaluation {
    heuristic: HeuristicEvaluator,
    encoder: ConquestEncoder,
    model: Option<ResidualValueNet>,
}

impl Evaluation {
    /// Heuristic-only evaluation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluation with a model built from `json`.
    pub fn with_weights(json: &str) -> Result<Self, WeightsError> {
        let mut evaluation = Self::new();
        evaluation.load_weights(json)?;
        Ok(evaluation)
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: HeuristicEvaluator) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Parse, validate and install a weights document.
    pub fn load_weights(&mut self, json: &str) -> Result<(), WeightsError> {
        self.install(ResidualValueNet::from_json(json))
    }

    /// Install an already-parsed document.
    pub fn load_document(&mut self, doc: &WeightsDocument) -> Result<(), WeightsError> {
        self.install(ResidualValueNet::from_document(doc))
    }

    /// Swap in a freshly built model. A failed build keeps the current one.
    fn install(&mut self, built: Result<ResidualValueNet, WeightsError>) -> Result<(), WeightsError> {
        match built {
            Ok(model) => {
                log::info!("loaded value network (hidden size {})", model.hidden_size());
                self.model = Some(model);
                Ok(())
            }
            Err(err) => {
                log::warn!("rejected weights document: {err}");
                Err(err)
            }
        }
    }

    /// Read a weights document from disk.
    pub fn load_weights_file(&mut self, path: impl AsRef<Path>) -> Result<(), WeightsError> {
        let json = std::fs::read_to_string(path)?;
        self.load_weights(&json)
    }

    /// Drop the model and go back to the heuristic.
    pub fn clear_weights(&mut self) {
        self.model = None;
    }

    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}

impl Evaluator for Evaluation {
    fn evaluate(&self, state: &GameState, perspective: PlayerId) -> f64 {
        match &self.model {
            Some(model) => {
                if let Some(value) = terminal_value(state, perspective) {
                    return value;
                }
                let encoded = self.encoder.encode(state, perspective);
                f64::from(model.predict(&encoded)).clamp(-1.0, 1.0)
            }
            None => self.heuristic.evaluate(state, perspective),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    use super::*;

    struct Capture(Mutex<Vec<(Level, String)>>);

    impl Log for Capture {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

    fn logged(level: Level, needle: &str) -> bool {
        CAPTURE
            .0
            .lock()
            .unwrap()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }

    #[test]
    fn test_document_loads_are_logged() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(LevelFilter::Info);

        let mut evaluation = Evaluation::new();
        evaluation.load_document(&WeightsDocument::constant(6, 3, 0.1)).unwrap();
        assert!(logged(Level::Info, "hidden size 6"));

        let mut broken = WeightsDocument::constant(6, 3, 0.1);
        broken.value_out.bias[0] = f32::INFINITY;
        assert!(evaluation.load_document(&broken).is_err());
        assert!(logged(Level::Warn, "rejected weights document"));
        assert!(evaluation.has_model());
    }
}
