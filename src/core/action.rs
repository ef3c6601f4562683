//! Action requests.
//!
//! An `Action` is the tagged value a caller (UI, room layer, search agent)
//! hands to the engine. Each variant maps 1:1 onto an engine entry point.
//! Serialized with an internal `type` tag:
//!
//! ```
//! use card_conquest::core::{Action, PlayerId};
//!
//! let action = Action::play("fire_arrows#3", Some(PlayerId::new(1)));
//! let json = serde_json::to_string(&action).unwrap();
//! assert_eq!(json, r#"{"type":"play_card","card_id":"fire_arrows#3","target":1}"#);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// Card ids carried by multi-card actions.
pub type CardIds = SmallVec<[String; 2]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Pass the turn to the next living player.
    EndTurn,

    /// Resolve a card from hand immediately.
    PlayCard {
        card_id: String,
        #[serde(default)]
        target: Option<PlayerId>,
    },

    /// Commit attack cards against a target, opening its defense phase.
    Attack { card_ids: CardIds, target: PlayerId },

    /// Buy a card from the shop offer.
    BuyCard { card_id: String },

    /// Sell a card from hand for half its price.
    SellCard { card_id: String },

    /// Defender discards defense cards to reduce incoming damage.
    Repel { card_ids: CardIds },

    /// Defender accepts the incoming damage.
    TakeDamage,
}

impl Action {
    #[must_use]
    pub fn play(card_id: impl Into<String>, target: Option<PlayerId>) -> Self {
        Action::PlayCard { card_id: card_id.into(), target }
    }

    #[must_use]
    pub fn attack(card_id: impl Into<String>, target: PlayerId) -> Self {
        let mut card_ids = CardIds::new();
        card_ids.push(card_id.into());
        Action::Attack { card_ids, target }
    }

    #[must_use]
    pub fn buy(card_id: impl Into<String>) -> Self {
        Action::BuyCard { card_id: card_id.into() }
    }

    #[must_use]
    pub fn sell(card_id: impl Into<String>) -> Self {
        Action::SellCard { card_id: card_id.into() }
    }

    #[must_use]
    pub fn repel(card_id: impl Into<String>) -> Self {
        let mut card_ids = CardIds::new();
        card_ids.push(card_id.into());
        Action::Repel { card_ids }
    }

    /// The wire tag of this action.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Action::EndTurn => "end_turn",
            Action::PlayCard { .. } => "play_card",
            Action::Attack { .. } => "attack",
            Action::BuyCard { .. } => "buy_card",
            Action::SellCard { .. } => "sell_card",
            Action::Repel { .. } => "repel",
            Action::TakeDamage => "take_damage",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::EndTurn | Action::TakeDamage => f.write_str(self.tag()),
            Action::PlayCard { card_id, target: Some(t) } => write!(f, "play {card_id} -> {t}"),
            Action::PlayCard { card_id, target: None } => write!(f, "play {card_id}"),
            Action::Attack { card_ids, target } => write!(f, "attack {} -> {target}", card_ids.join("+")),
            Action::BuyCard { card_id } => write!(f, "buy {card_id}"),
            Action::SellCard { card_id } => write!(f, "sell {card_id}"),
            Action::Repel { card_ids } => write!(f, "repel with {}", card_ids.join("+")),
        }
    }
}
