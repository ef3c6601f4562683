//! Card catalog: read-only lookup table keyed by catalog id.
//!
//! `CardCatalog::standard()` holds the default card set, including every
//! nation's starting card.

use rustc_hash::FxHashMap;

use super::definition::{CardCategory, CardDefinition, EffectKind};
use crate::core::GameRng;

/// Catalog of card definitions.
///
/// Definitions are kept in registration order so random draws are
/// reproducible for a given seed.
///
/// ## Example
///
/// ```
/// use card_conquest::cards::{CardCatalog, CardCategory, CardDefinition, EffectKind};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(
///     CardDefinition::new("bolt", "Lightning Bolt", CardCategory::Magic, EffectKind::Damage, 30)
///         .with_costs(60, 30),
/// );
///
/// assert_eq!(catalog.get("bolt").unwrap().name, "Lightning Bolt");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    index: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same id already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.index.contains_key(&card.id) {
            panic!("Card with id {:?} already registered", card.id);
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
    }

    /// Get a card definition by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Find cards by category.
    pub fn find_by_category(&self, category: CardCategory) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(move |c| c.category == category)
    }

    /// Uniformly random definition (used for draws).
    pub fn random(&self, rng: &mut GameRng) -> Option<&CardDefinition> {
        rng.choose(&self.cards)
    }

    /// The default card set.
    #[must_use]
    pub fn standard() -> Self {
        use CardCategory::*;
        use EffectKind::*;

        let mut catalog = Self::new();
        let defs = [
            // Industry
            CardDefinition::new("farm", "Farm", Industry, Income, 5).with_costs(40, 5),
            CardDefinition::new("trade_route", "Trade Route", Industry, Income, 8).with_costs(50, 10),
            CardDefinition::new("mine", "Mine", Industry, Income, 10).with_costs(60, 10),
            CardDefinition::new("workshop", "Workshop", Industry, Income, 15).with_costs(90, 15),
            // Attack
            CardDefinition::new("sword_strike", "Sword Strike", Attack, Damage, 20).with_costs(30, 10),
            CardDefinition::new("horse_archers", "Horse Archers", Attack, Damage, 25).with_costs(45, 15),
            CardDefinition::new("cavalry_charge", "Cavalry Charge", Attack, Damage, 35).with_costs(60, 20),
            // Defense
            CardDefinition::new("shield_wall", "Shield Wall", Defense, Heal, 15).with_costs(30, 5),
            CardDefinition::new("stone_wall", "Stone Wall", Defense, Heal, 25).with_costs(50, 10),
            // Missile
            CardDefinition::new("fire_arrows", "Fire Arrows", Missile, Damage, 15).with_costs(40, 15),
            CardDefinition::new("war_rockets", "War Rockets", Missile, Damage, 22).with_costs(55, 20),
            CardDefinition::new("catapult", "Catapult", Missile, Damage, 30).with_costs(70, 25),
            // Magic
            CardDefinition::new("healing_light", "Healing Light", Magic, Heal, 25).with_costs(35, 15),
            CardDefinition::new("divine_light", "Divine Light", Magic, Heal, 40).with_costs(50, 20),
            CardDefinition::new("mana_crystal", "Mana Crystal", Magic, Mana, 30).with_costs(30, 0),
            CardDefinition::new("lightning_bolt", "Lightning Bolt", Magic, Damage, 30)
                .with_costs(60, 30)
                .with_hp_cost(5),
            CardDefinition::new("blood_ritual", "Blood Ritual", Magic, Mana, 40)
                .with_costs(20, 0)
                .with_hp_cost(15),
            CardDefinition::new("restoration", "Restoration", Magic, FullRestoreHp, 0).with_costs(120, 40),
            CardDefinition::new("arcane_surge", "Arcane Surge", Magic, FullRestoreMana, 0).with_costs(100, 10),
            // Contract
            CardDefinition::new("tax_collection", "Tax Collection", Contract, GoldGain, 40).with_costs(30, 5),
            CardDefinition::new("merchant_deal", "Merchant Deal", Contract, GoldGain, 70).with_costs(50, 10),
            CardDefinition::new("plunder", "Plunder", Contract, GoldSteal, 30).with_costs(45, 15),
            CardDefinition::new("spy_network", "Spy Network", Contract, GoldSteal, 60).with_costs(70, 20),
            // Enchantment
            CardDefinition::new("ancient_relic", "Ancient Relic", Enchantment, FullRestoreAll, 0).with_costs(150, 50),
            CardDefinition::new("vigor_charm", "Charm of Vigor", Enchantment, Heal, 30).with_costs(80, 25),
        ];
        for def in defs {
            catalog.register(def);
        }
        catalog
    }
}
