//! Network input and the value-network seam.

use serde::{Deserialize, Serialize};

/// Flat feature vector for one player's view of a position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    pub tensor: Vec<f32>,

    /// `[features]` for the conquest encoder.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(tensor.len(), shape.iter().product::<usize>());
        Self { tensor, shape }
    }

    /// All-zero input for a seat that is not at the table.
    pub fn blank(features: usize) -> Self {
        Self::new(vec![0.0; features], vec![features])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Every feature lies in [0, 1].
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.tensor.iter().all(|v| (0.0..=1.0).contains(v))
    }
}

/// Scores an encoded position for the player it was encoded for.
///
/// Output is in [-1, 1].
pub trait ValueNetwork: Send + Sync {
    fn predict(&self, encoded: &EncodedState) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_seat() {
        let blank = EncodedState::blank(10);
        assert_eq!(blank.len(), 10);
        assert_eq!(blank.shape, vec![10]);
        assert!(blank.is_normalized());
    }

    #[test]
    fn test_out_of_range_feature() {
        let encoded = EncodedState::new(vec![0.5, 1.5], vec![2]);
        assert!(!encoded.is_normalized());
        assert!(!encoded.is_empty());
    }
}
