//! Card definitions (catalog entries).
//!
//! A `CardDefinition` is static data: what a card costs and what it does.
//! Instances held in hands, lands and the shop are `Card`s created from a
//! definition with a unique per-game id.

use serde::{Deserialize, Serialize};

use super::instance::Card;

/// Card category. At most one card per category may be played each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    Industry,
    Attack,
    Defense,
    Missile,
    Magic,
    Contract,
    Enchantment,
}

impl CardCategory {
    pub const ALL: [CardCategory; 7] = [
        CardCategory::Industry,
        CardCategory::Attack,
        CardCategory::Defense,
        CardCategory::Missile,
        CardCategory::Magic,
        CardCategory::Contract,
        CardCategory::Enchantment,
    ];
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardCategory::Industry => "Industry",
            CardCategory::Attack => "Attack",
            CardCategory::Defense => "Defense",
            CardCategory::Missile => "Missile",
            CardCategory::Magic => "Magic",
            CardCategory::Contract => "Contract",
            CardCategory::Enchantment => "Enchantment",
        };
        f.write_str(name)
    }
}

/// What a card does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Reduce the target's HP by the (scaled) value.
    Damage,
    /// Restore the actor's HP.
    Heal,
    /// Restore the actor's mana.
    Mana,
    /// Place the card into the actor's lands for recurring income.
    Income,
    /// Add gold to the actor.
    GoldGain,
    /// Move up to `value` gold from the target to the actor.
    GoldSteal,
    FullRestoreHp,
    FullRestoreMana,
    FullRestoreAll,
}

impl EffectKind {
    /// Whether resolving this effect needs a target player.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(self, EffectKind::Damage | EffectKind::GoldSteal)
    }
}

/// Static card data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Stable catalog id.
    pub id: String,
    pub name: String,
    pub category: CardCategory,
    /// Shop price.
    pub cost: i64,
    /// Cast price.
    pub mana_cost: i64,
    pub effect: EffectKind,
    pub value: i64,
    /// HP paid on cast.
    pub hp_cost: Option<i64>,
}

impl CardDefinition {
    /// Create a definition with no HP cost.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: CardCategory,
        effect: EffectKind,
        value: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            cost: 0,
            mana_cost: 0,
            effect,
            value,
            hp_cost: None,
        }
    }

    /// Set shop and mana prices.
    pub fn with_costs(mut self, cost: i64, mana_cost: i64) -> Self {
        self.cost = cost;
        self.mana_cost = mana_cost;
        self
    }

    pub fn with_hp_cost(mut self, hp_cost: i64) -> Self {
        self.hp_cost = Some(hp_cost);
        self
    }

    /// Create an instance with the given unique id.
    #[must_use]
    pub fn instantiate(&self, instance_id: String) -> Card {
        Card {
            id: instance_id,
            catalog_id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            cost: self.cost,
            mana_cost: self.mana_cost,
            effect: self.effect,
            value: self.value,
            hp_cost: self.hp_cost,
        }
    }
}
