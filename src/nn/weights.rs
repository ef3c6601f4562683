//! Weights document for the residual value network.
//!
//! The document is JSON, one dense layer per key, each layer stored as a
//! row-major `weight` matrix (`out x in`) plus a `bias` vector:
//!
//! ```json
//! {
//!   "input":        { "weight": [[...10 floats...], ...H rows], "bias": [...H] },
//!   "blocks":       [ {H x H}, {H x H}, {H x H} ],
//!   "value_hidden": { "weight": [[...H floats...], ...V rows], "bias": [...V] },
//!   "value_out":    { "weight": [[...V floats...]], "bias": [b] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encoder::INPUT_SIZE;

/// Residual blocks in the network body.
pub const RESIDUAL_BLOCKS: usize = 3;

/// Why a weights document was refused.
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("failed to read weights: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed weights document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("layer `{layer}` has shape {found:?}, expected {expected:?}")]
    Shape {
        layer: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("expected {expected} residual blocks, found {found}")]
    BlockCount { expected: usize, found: usize },

    #[error("layer `{layer}` contains a non-finite value")]
    NonFinite { layer: String },
}

/// One dense layer as stored in the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerWeights {
    pub weight: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl LayerWeights {
    /// Layer with every weight and bias set to `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            weight: vec![vec![value; cols]; rows],
            bias: vec![value; rows],
        }
    }

    /// Check this layer is `rows x cols` with a matching bias and finite values.
    fn validate(&self, layer: &str, rows: usize, cols: usize) -> Result<(), WeightsError> {
        let shape_error = |found| WeightsError::Shape {
            layer: layer.to_string(),
            expected: (rows, cols),
            found,
        };
        if self.weight.len() != rows {
            return Err(shape_error((self.weight.len(), self.weight.first().map_or(0, Vec::len))));
        }
        if let Some(row) = self.weight.iter().find(|row| row.len() != cols) {
            return Err(shape_error((rows, row.len())));
        }
        if self.bias.len() != rows {
            return Err(shape_error((self.bias.len(), 1)));
        }
        let finite = self.weight.iter().flatten().chain(self.bias.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(WeightsError::NonFinite { layer: layer.to_string() });
        }
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.weight.len()
    }
}

/// Full weights document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightsDocument {
    pub input: LayerWeights,
    pub blocks: Vec<LayerWeights>,
    pub value_hidden: LayerWeights,
    pub value_out: LayerWeights,
}

impl WeightsDocument {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, WeightsError> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, WeightsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Hidden width of the network body.
    #[must_use]
    pub fn hidden_size(&self) -> usize {
        self.input.rows()
    }

    /// Check every layer's shape chains into the next and all values are finite.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let hidden = self.hidden_size();
        if hidden == 0 {
            return Err(WeightsError::Shape {
                layer: "input".to_string(),
                expected: (1, INPUT_SIZE),
                found: (0, 0),
            });
        }
        self.input.validate("input", hidden, INPUT_SIZE)?;

        if self.blocks.len() != RESIDUAL_BLOCKS {
            return Err(WeightsError::BlockCount {
                expected: RESIDUAL_BLOCKS,
                found: self.blocks.len(),
            });
        }
        for (i, block) in self.blocks.iter().enumerate() {
            block.validate(&format!("blocks[{i}]"), hidden, hidden)?;
        }

        let value_hidden = self.value_hidden.rows().max(1);
        self.value_hidden.validate("value_hidden", value_hidden, hidden)?;
        self.value_out.validate("value_out", 1, value_hidden)?;
        Ok(())
    }

    /// Document with every parameter set to `value`. Handy for tests and
    /// for bootstrapping an export.
    #[must_use]
    pub fn constant(hidden: usize, value_hidden: usize, value: f32) -> Self {
        Self {
            input: LayerWeights::filled(hidden, INPUT_SIZE, value),
            blocks: (0..RESIDUAL_BLOCKS)
                .map(|_| LayerWeights::filled(hidden, hidden, value))
                .collect(),
            value_hidden: LayerWeights::filled(value_hidden, hidden, value),
            value_out: LayerWeights::filled(1, value_hidden, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_document_is_valid() {
        let doc = WeightsDocument::constant(8, 4, 0.1);
        assert!(doc.validate().is_ok());
        assert_eq!(doc.hidden_size(), 8);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = WeightsDocument::constant(4, 2, 0.5);
        let json = doc.to_json().unwrap();
        assert_eq!(WeightsDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(WeightsDocument::from_json("not json"), Err(WeightsError::Parse(_))));
        assert!(matches!(WeightsDocument::from_json("{}"), Err(WeightsError::Parse(_))));
    }

    #[test]
    fn test_rejects_wrong_input_width() {
        let mut doc = WeightsDocument::constant(4, 2, 0.1);
        doc.input.weight[2].pop();
        let err = doc.validate().unwrap_err();
        assert!(matches!(err, WeightsError::Shape { ref layer, .. } if layer == "input"));
    }

    #[test]
    fn test_rejects_block_count() {
        let mut doc = WeightsDocument::constant(4, 2, 0.1);
        doc.blocks.pop();
        assert!(matches!(
            doc.validate(),
            Err(WeightsError::BlockCount { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_rejects_mismatched_bias() {
        let mut doc = WeightsDocument::constant(4, 2, 0.1);
        doc.blocks[1].bias.push(0.0);
        assert!(matches!(doc.validate(), Err(WeightsError::Shape { .. })));
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut doc = WeightsDocument::constant(4, 2, 0.1);
        doc.value_out.bias[0] = f32::NAN;
        assert!(matches!(doc.validate(), Err(WeightsError::NonFinite { .. })));
    }
}
