//! Training records captured at each search decision.
//!
//! A record holds what an offline trainer needs for one decision: a compact
//! snapshot of the position, the search's visit distribution (policy
//! target), its value estimate, the action actually taken and, once the
//! game ends, the final outcome for the deciding player.
//!
//! Actions are stored as flat `ActionRecord`s rather than the tagged
//! `Action` so that records survive non-self-describing formats (bincode).

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{Action, CardIds, GameState, Nation, PlayerId};

/// Action kind without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    EndTurn,
    PlayCard,
    Attack,
    BuyCard,
    SellCard,
    Repel,
    TakeDamage,
}

/// Flat, format-neutral form of an `Action`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub card_ids: Vec<String>,
    pub target: Option<PlayerId>,
}

impl From<&Action> for ActionRecord {
    fn from(action: &Action) -> Self {
        let (kind, card_ids, target) = match action {
            Action::EndTurn => (ActionKind::EndTurn, Vec::new(), None),
            Action::PlayCard { card_id, target } => (ActionKind::PlayCard, vec![card_id.clone()], *target),
            Action::Attack { card_ids, target } => (ActionKind::Attack, card_ids.to_vec(), Some(*target)),
            Action::BuyCard { card_id } => (ActionKind::BuyCard, vec![card_id.clone()], None),
            Action::SellCard { card_id } => (ActionKind::SellCard, vec![card_id.clone()], None),
            Action::Repel { card_ids } => (ActionKind::Repel, card_ids.to_vec(), None),
            Action::TakeDamage => (ActionKind::TakeDamage, Vec::new(), None),
        };
        Self { kind, card_ids, target }
    }
}

impl ActionRecord {
    /// Rebuild the action. `None` if the record is missing a required field.
    #[must_use]
    pub fn to_action(&self) -> Option<Action> {
        let first = self.card_ids.first().cloned();
        let ids = || self.card_ids.iter().cloned().collect::<CardIds>();
        match self.kind {
            ActionKind::EndTurn => Some(Action::EndTurn),
            ActionKind::TakeDamage => Some(Action::TakeDamage),
            ActionKind::PlayCard => first.map(|card_id| Action::PlayCard { card_id, target: self.target }),
            ActionKind::BuyCard => first.map(|card_id| Action::BuyCard { card_id }),
            ActionKind::SellCard => first.map(|card_id| Action::SellCard { card_id }),
            ActionKind::Attack => match self.target {
                Some(target) if !self.card_ids.is_empty() => Some(Action::Attack { card_ids: ids(), target }),
                _ => None,
            },
            ActionKind::Repel if !self.card_ids.is_empty() => Some(Action::Repel { card_ids: ids() }),
            ActionKind::Repel => None,
        }
    }
}

/// Public stats of one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub nation: Nation,
    pub hp: i64,
    pub max_hp: i64,
    pub mana: i64,
    pub max_mana: i64,
    pub gold: i64,
    pub income: i64,
    pub deposit: i64,
    pub hand_size: usize,
    pub land_count: usize,
    pub is_dead: bool,
}

/// Compact position snapshot from one player's point of view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub players: Vec<PlayerStats>,
    /// The deciding player's hand.
    pub hand: Vec<Card>,
    pub shop: Vec<Card>,
}

impl StateSnapshot {
    #[must_use]
    pub fn capture(state: &GameState, perspective: PlayerId) -> Self {
        let players = state
            .players
            .iter()
            .map(|p| PlayerStats {
                id: p.id,
                nation: p.nation,
                hp: p.hp,
                max_hp: p.max_hp,
                mana: p.mana,
                max_mana: p.max_mana,
                gold: p.gold,
                income: p.income,
                deposit: p.deposit,
                hand_size: p.hand.len(),
                land_count: p.lands.len(),
                is_dead: p.is_dead,
            })
            .collect();
        let hand = state
            .get_player(perspective)
            .map(|p| p.hand.iter().cloned().collect())
            .unwrap_or_default();

        Self {
            players,
            hand,
            shop: state.shop.iter().cloned().collect(),
        }
    }
}

/// One search decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub game_id: String,
    pub turn: u32,
    pub player: PlayerId,
    pub nation: Nation,
    pub snapshot: StateSnapshot,
    /// Visit distribution over root actions.
    pub policy: Vec<(ActionRecord, f64)>,
    /// Search value estimate for `player`.
    pub value: f64,
    pub action_taken: ActionRecord,
    /// Final result for `player` (+1 win, -1 loss, 0 draw or unfinished).
    pub outcome: Option<f64>,
}

impl TrainingRecord {
    #[must_use]
    pub fn new(
        game_id: impl Into<String>,
        state: &GameState,
        player: PlayerId,
        policy: &[(Action, f64)],
        value: f64,
        action_taken: &Action,
    ) -> Self {
        let nation = state
            .get_player(player)
            .map_or(Nation::Kingdom, |p| p.nation);
        Self {
            game_id: game_id.into(),
            turn: state.turn,
            player,
            nation,
            snapshot: StateSnapshot::capture(state, player),
            policy: policy.iter().map(|(a, p)| (ActionRecord::from(a), *p)).collect(),
            value,
            action_taken: ActionRecord::from(action_taken),
            outcome: None,
        }
    }

    /// Policy probability of the action taken.
    #[must_use]
    pub fn taken_action_prob(&self) -> f64 {
        self.policy
            .iter()
            .find(|(a, _)| a == &self.action_taken)
            .map_or(0.0, |(_, p)| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_record_round_trip() {
        let actions = [
            Action::EndTurn,
            Action::TakeDamage,
            Action::play("fire_arrows#3", None),
            Action::play("plunder#4", Some(PlayerId::new(2))),
            Action::attack("sword_strike#1", PlayerId::new(1)),
            Action::buy("farm#9"),
            Action::sell("farm#9"),
            Action::repel("shield_wall#2"),
        ];
        for action in &actions {
            assert_eq!(ActionRecord::from(action).to_action().as_ref(), Some(action));
        }
    }

    #[test]
    fn test_incomplete_record_is_rejected() {
        let record = ActionRecord {
            kind: ActionKind::Attack,
            card_ids: vec!["sword_strike#1".into()],
            target: None,
        };
        assert!(record.to_action().is_none());
    }
}
