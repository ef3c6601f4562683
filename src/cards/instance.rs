//! Card instances.

use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, EffectKind};

/// A card held by a player or offered in the shop.
///
/// Immutable once created. `id` is unique within a game (`"{catalog_id}#{n}"`),
/// so two copies of the same catalog card in one hand are distinguishable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub catalog_id: String,
    pub name: String,
    pub category: CardCategory,
    /// Shop price (already scaled when offered in the shop).
    pub cost: i64,
    pub mana_cost: i64,
    pub effect: EffectKind,
    pub value: i64,
    pub hp_cost: Option<i64>,
}

impl Card {
    /// HP paid on cast (0 if none).
    #[must_use]
    pub fn hp_cost(&self) -> i64 {
        self.hp_cost.unwrap_or(0)
    }

    /// Gold received when selling this card.
    #[must_use]
    pub fn sell_price(&self) -> i64 {
        self.cost / 2
    }

    /// Attack-category damage cards go through the attack/defense flow.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.category == CardCategory::Attack && self.effect == EffectKind::Damage
    }

    /// Defense-category cards can repel an incoming attack.
    #[must_use]
    pub fn can_repel(&self) -> bool {
        self.category == CardCategory::Defense
    }

    /// A copy carrying a different instance id.
    #[must_use]
    pub fn with_id(&self, id: String) -> Card {
        Card { id, ..self.clone() }
    }
}
