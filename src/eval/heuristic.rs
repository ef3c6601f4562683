//! Hand-tuned position score.

use crate::cards::CardCategory;
use crate::core::{GameState, PlayerId};

use super::{terminal_value, Evaluator};

/// Weights and normalizers for `HeuristicEvaluator`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicWeights {
    pub hp_advantage: f64,
    pub mana: f64,
    pub gold: f64,
    pub income: f64,
    /// Bonus per enchantment card held.
    pub artifact: f64,
    pub stalemate_penalty: f64,
    /// Gold amount that scores as a full 1.0.
    pub gold_scale: f64,
    /// Income per turn that scores as a full 1.0.
    pub income_scale: f64,
    /// The stalemate penalty applies past this turn...
    pub stalemate_turn: u32,
    /// ...while the opponents' average HP is above this.
    pub stalemate_hp: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            hp_advantage: 0.6,
            mana: 0.05,
            gold: 0.05,
            income: 0.2,
            artifact: 0.02,
            stalemate_penalty: 0.1,
            gold_scale: 500.0,
            income_scale: 50.0,
            stalemate_turn: 20,
            stalemate_hp: 80.0,
        }
    }
}

/// Heuristic evaluation.
///
/// Blends HP advantage over the living opponents' average (dominant term),
/// small mana and gold terms, income capacity including lands, a bonus per
/// held enchantment, and a penalty for long games where opponents are
/// still healthy. Always in [-1, 1].
#[derive(Clone, Debug, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_weights(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, state: &GameState, perspective: PlayerId) -> f64 {
        if let Some(value) = terminal_value(state, perspective) {
            return value;
        }
        let Some(me) = state.get_player(perspective) else {
            return 0.0;
        };
        let w = &self.weights;

        let opponents: Vec<_> = state.living_enemies(perspective).map(|id| state.player(id)).collect();
        let avg_opp_hp = opponents.iter().map(|p| p.hp as f64).sum::<f64>() / opponents.len().max(1) as f64;
        let hp_scale = me.max_hp.max(1) as f64;
        let hp_advantage = ((me.hp as f64 - avg_opp_hp) / hp_scale).clamp(-1.0, 1.0);

        let mana = me.mana as f64 / me.max_mana.max(1) as f64;
        let gold = (me.gold.max(0) as f64 / w.gold_scale).min(1.0);
        let income = ((me.income + me.land_income()).max(0) as f64 / w.income_scale).min(1.0);
        let artifacts = me
            .hand
            .iter()
            .filter(|c| c.category == CardCategory::Enchantment)
            .count() as f64;

        let mut score = w.hp_advantage * hp_advantage
            + w.mana * mana
            + w.gold * gold
            + w.income * income
            + w.artifact * artifacts;

        if state.turn > w.stalemate_turn && avg_opp_hp > w.stalemate_hp {
            score -= w.stalemate_penalty;
        }
        score.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSettings, Nation, Player, PlayerSetup};

    fn make_state(count: usize) -> GameState {
        let settings = GameSettings::default();
        let players = (0..count)
            .map(|i| Player::new(PlayerId::new(i as u8), &PlayerSetup::bot(format!("p{i}"), Nation::Republic), &settings))
            .collect();
        GameState::new(players, settings)
    }

    #[test]
    fn test_hp_advantage_dominates() {
        let mut state = make_state(2);
        state.player_mut(PlayerId::new(1)).hp = 40;
        let eval = HeuristicEvaluator::new();

        let ahead = eval.evaluate(&state, PlayerId::new(0));
        let behind = eval.evaluate(&state, PlayerId::new(1));
        assert!(ahead > 0.3);
        assert!(behind < 0.0);
    }

    #[test]
    fn test_stalemate_penalty() {
        let mut state = make_state(2);
        let eval = HeuristicEvaluator::new();
        let early = eval.evaluate(&state, PlayerId::new(0));
        state.turn = 21;
        let late = eval.evaluate(&state, PlayerId::new(0));
        assert!((early - late - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_income_counts_lands() {
        let mut state = make_state(2);
        let eval = HeuristicEvaluator::new();
        let before = eval.evaluate(&state, PlayerId::new(0));

        let farm = crate::cards::CardCatalog::standard().get("farm").unwrap().instantiate("farm#99".into());
        state.player_mut(PlayerId::new(0)).lands.push_back(farm);
        assert!(eval.evaluate(&state, PlayerId::new(0)) > before);
    }
}
