//! Learned value evaluation.
//!
//! ## Overview
//!
//! - **Traits**: `EncodedState` input and the `ValueNetwork` seam
//! - **Encoding**: `StateEncoder` trait and `ConquestEncoder` implementation
//! - **Weights**: `WeightsDocument`, the externally supplied JSON model
//! - **Network**: `ResidualValueNet`, the forward pass over a document
//!
//! ## Usage
//!
//! ```rust,ignore
//! use card_conquest::nn::{ConquestEncoder, ResidualValueNet, StateEncoder, ValueNetwork};
//!
//! let net = ResidualValueNet::from_json(&std::fs::read_to_string("model.json")?)?;
//! let encoded = ConquestEncoder::new().encode(&state, player);
//! let value = net.predict(&encoded);
//! ```

pub mod encoder;
pub mod network;
pub mod traits;
pub mod weights;

pub use encoder::{ConquestEncoder, StateEncoder, INPUT_SIZE};
pub use network::ResidualValueNet;
pub use traits::{EncodedState, ValueNetwork};
pub use weights::{LayerWeights, WeightsDocument, WeightsError, RESIDUAL_BLOCKS};
