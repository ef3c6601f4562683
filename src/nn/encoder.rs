//! State encoding for network input.
//!
//! Transforms a game state into the flat feature vector the value network
//! consumes, from one player's perspective.

use crate::core::{GameState, Nation, PlayerId};
use crate::nn::traits::EncodedState;

/// Number of features produced by `ConquestEncoder`.
pub const INPUT_SIZE: usize = 10;

/// Encodes game state into tensors for network input.
pub trait StateEncoder: Send + Sync {
    /// Encode the game state from a player's perspective.
    fn encode(&self, state: &GameState, perspective: PlayerId) -> EncodedState;

    /// Shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;
}

/// Per-player feature vector.
///
/// Layout (all in [0, 1]):
///
/// | index | feature |
/// |---|---|
/// | 0 | hp / max_hp |
/// | 1 | mana / max_mana |
/// | 2 | gold / gold_scale |
/// | 3 | bank deposit / gold_scale |
/// | 4 | hand size / max_hand_size |
/// | 5 | land count / max_land_size |
/// | 6..10 | nation one-hot (Kingdom, Republic, Theocracy, Khanate) |
#[derive(Clone, Debug)]
pub struct ConquestEncoder {
    gold_scale: f32,
}

impl Default for ConquestEncoder {
    fn default() -> Self {
        Self { gold_scale: 1000.0 }
    }
}

impl ConquestEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gold amount that maps to 1.0.
    #[must_use]
    pub fn with_gold_scale(mut self, scale: f32) -> Self {
        self.gold_scale = scale.max(1.0);
        self
    }
}

fn ratio(value: i64, max: i64) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (value as f32 / max as f32).clamp(0.0, 1.0)
}

impl StateEncoder for ConquestEncoder {
    fn encode(&self, state: &GameState, perspective: PlayerId) -> EncodedState {
        let Some(player) = state.get_player(perspective) else {
            return EncodedState::blank(INPUT_SIZE);
        };
        let mut tensor = vec![0.0f32; INPUT_SIZE];
        let settings = &state.settings;

        tensor[0] = ratio(player.hp, player.max_hp);
        tensor[1] = ratio(player.mana, player.max_mana);
        tensor[2] = (player.gold as f32 / self.gold_scale).clamp(0.0, 1.0);
        tensor[3] = (player.deposit as f32 / self.gold_scale).clamp(0.0, 1.0);
        tensor[4] = ratio(player.hand.len() as i64, settings.max_hand_size as i64);
        tensor[5] = ratio(player.lands.len() as i64, settings.max_land_size as i64);
        tensor[6 + player.nation.index()] = 1.0;

        let encoded = EncodedState::new(tensor, vec![INPUT_SIZE]);
        debug_assert!(encoded.is_normalized());
        encoded
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![INPUT_SIZE]
    }
}

const _: () = assert!(6 + Nation::ALL.len() == INPUT_SIZE);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSettings, Player, PlayerSetup};

    fn make_state() -> GameState {
        let settings = GameSettings::default();
        let players = [Nation::Theocracy, Nation::Khanate]
            .iter()
            .enumerate()
            .map(|(i, &n)| Player::new(PlayerId::new(i as u8), &PlayerSetup::bot(format!("p{i}"), n), &settings))
            .collect();
        GameState::new(players, settings)
    }

    #[test]
    fn test_encoder_shape() {
        let encoder = ConquestEncoder::new();
        assert_eq!(encoder.output_shape(), vec![INPUT_SIZE]);
        assert_eq!(encoder.encode(&make_state(), PlayerId::new(0)).len(), INPUT_SIZE);
    }

    #[test]
    fn test_encoder_features() {
        let mut state = make_state();
        state.player_mut(PlayerId::new(1)).hp = 45;
        state.player_mut(PlayerId::new(1)).gold = 500;

        let encoded = ConquestEncoder::new().encode(&state, PlayerId::new(1));
        // Khanate max hp is 90
        assert!((encoded.tensor[0] - 0.5).abs() < 1e-6);
        assert!((encoded.tensor[2] - 0.5).abs() < 1e-6);
        assert_eq!(&encoded.tensor[6..], &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_encoder_clamps() {
        let mut state = make_state();
        state.player_mut(PlayerId::new(0)).gold = 10_000;
        let encoded = ConquestEncoder::new().encode(&state, PlayerId::new(0));
        assert_eq!(encoded.tensor[2], 1.0);
        assert_eq!(encoded.tensor[8], 1.0);
    }

    #[test]
    fn test_encoder_unknown_perspective() {
        let encoded = ConquestEncoder::new().encode(&make_state(), PlayerId::new(9));
        assert!(encoded.tensor.iter().all(|&v| v == 0.0));
    }
}
