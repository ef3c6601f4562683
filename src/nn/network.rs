//! Residual feed-forward value network.
//!
//! ```text
//! h = relu(W_in x + b_in)
//! for each block: h = relu(W h + b) + h
//! v = tanh(W_out relu(W_vh h + b_vh) + b_out)
//! ```

use super::encoder::INPUT_SIZE;
use super::traits::{EncodedState, ValueNetwork};
use super::weights::{LayerWeights, WeightsDocument, WeightsError};

/// Dense layer with flattened row-major weights.
#[derive(Clone, Debug)]
struct Dense {
    weight: Vec<f32>,
    bias: Vec<f32>,
    cols: usize,
}

impl Dense {
    fn from_layer(layer: &LayerWeights) -> Self {
        Self {
            weight: layer.weight.iter().flatten().copied().collect(),
            bias: layer.bias.clone(),
            cols: layer.weight.first().map_or(0, Vec::len),
        }
    }

    /// `W x + b`.
    fn affine(&self, x: &[f32]) -> Vec<f32> {
        self.bias
            .iter()
            .zip(self.weight.chunks_exact(self.cols.max(1)))
            .map(|(b, row)| b + row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>())
            .collect()
    }
}

fn relu(mut v: Vec<f32>) -> Vec<f32> {
    for x in &mut v {
        *x = x.max(0.0);
    }
    v
}

/// Value network built from a validated `WeightsDocument`.
#[derive(Clone, Debug)]
pub struct ResidualValueNet {
    input: Dense,
    blocks: Vec<Dense>,
    value_hidden: Dense,
    value_out: Dense,
}

impl ResidualValueNet {
    /// Validate the document and build the network.
    pub fn from_document(doc: &WeightsDocument) -> Result<Self, WeightsError> {
        doc.validate()?;
        Ok(Self {
            input: Dense::from_layer(&doc.input),
            blocks: doc.blocks.iter().map(Dense::from_layer).collect(),
            value_hidden: Dense::from_layer(&doc.value_hidden),
            value_out: Dense::from_layer(&doc.value_out),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, WeightsError> {
        Self::from_document(&WeightsDocument::from_json(json)?)
    }

    /// Forward pass over a raw feature vector. Missing features read as 0.
    #[must_use]
    pub fn forward(&self, features: &[f32]) -> f32 {
        let mut x = [0.0f32; INPUT_SIZE];
        for (slot, v) in x.iter_mut().zip(features) {
            *slot = *v;
        }

        let mut h = relu(self.input.affine(&x));
        for block in &self.blocks {
            let out = relu(block.affine(&h));
            for (hi, oi) in h.iter_mut().zip(out) {
                *hi += oi;
            }
        }
        let v = relu(self.value_hidden.affine(&h));
        let out = self.value_out.affine(&v);
        out.first().copied().unwrap_or(0.0).tanh()
    }

    #[must_use]
    pub fn hidden_size(&self) -> usize {
        self.input.bias.len()
    }
}

impl ValueNetwork for ResidualValueNet {
    fn predict(&self, encoded: &EncodedState) -> f32 {
        self.forward(&encoded.tensor)
    }
}
