//! Game configuration.
//!
//! `GameSettings` is supplied once when a match is created and copied into
//! every `GameState`. The engine only ever reads it; hosts may edit it
//! before the game starts.

use serde::{Deserialize, Serialize};

/// Starting hit points before nation bonuses and the health multiplier.
pub const BASE_HP: i64 = 100;

/// Starting mana before nation bonuses.
pub const BASE_MANA: i64 = 50;

/// Passive income before nation bonuses.
pub const BASE_INCOME: i64 = 10;

/// Interest paid on bank deposits at the start of the depositor's turn.
pub const BANK_INTEREST_RATE: f64 = 0.05;

/// Number of log entries kept in the state (newest first).
pub const LOG_CAPACITY: usize = 50;

/// HP gained by a blessing / mana lost by a catastrophe.
pub const EVENT_MAGNITUDE: i64 = 20;

/// Bot strength, mapped to an MCTS iteration budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl BotDifficulty {
    /// MCTS iterations a bot of this difficulty spends per decision.
    #[must_use]
    pub const fn iterations(self) -> u32 {
        match self {
            BotDifficulty::Easy => 10,
            BotDifficulty::Medium => 50,
            BotDifficulty::Hard => 200,
        }
    }
}

/// Match configuration.
///
/// ## Example
///
/// ```
/// use card_conquest::core::GameSettings;
///
/// let settings = GameSettings::default()
///     .with_initial_gold(250)
///     .with_cards_per_turn(2);
///
/// assert_eq!(settings.initial_gold, 250);
/// assert_eq!(settings.cards_per_turn, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Gold every player starts with (before nation bonuses).
    pub initial_gold: i64,

    /// Upper bound on seats at the table.
    pub max_players: usize,

    /// Number of bot seats the host should fill.
    pub bot_count: usize,

    /// Search budget for bots.
    pub bot_difficulty: BotDifficulty,

    /// Cards drawn at the start of each turn.
    pub cards_per_turn: usize,

    /// Multiplier applied to base income plus land income.
    pub income_multiplier: f64,

    /// Global events fire on rounds divisible by this (0 disables).
    pub event_frequency: u32,

    /// Mana cap for every player (before nation bonuses).
    pub max_mana: i64,

    /// Hand cap.
    pub max_hand_size: usize,

    /// Land cap.
    pub max_land_size: usize,

    /// Mana regained at the start of a player's own turn.
    pub mana_regen: i64,

    /// Set by the room layer for networked games.
    pub is_multiplayer: bool,

    /// Number of cards offered in the shop each round.
    pub shop_size: usize,

    /// Scales starting max HP.
    pub health_multiplier: f64,

    /// Scales card damage.
    pub damage_multiplier: f64,

    /// Scales shop prices.
    pub price_multiplier: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_gold: 100,
            max_players: 4,
            bot_count: 1,
            bot_difficulty: BotDifficulty::Medium,
            cards_per_turn: 1,
            income_multiplier: 1.0,
            event_frequency: 5,
            max_mana: 100,
            max_hand_size: 10,
            max_land_size: 5,
            mana_regen: 10,
            is_multiplayer: false,
            shop_size: 5,
            health_multiplier: 1.0,
            damage_multiplier: 1.0,
            price_multiplier: 1.0,
        }
    }
}

impl GameSettings {
    /// Parse settings from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_initial_gold(mut self, gold: i64) -> Self {
        self.initial_gold = gold;
        self
    }

    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    pub fn with_bots(mut self, count: usize, difficulty: BotDifficulty) -> Self {
        self.bot_count = count;
        self.bot_difficulty = difficulty;
        self
    }

    pub fn with_cards_per_turn(mut self, cards: usize) -> Self {
        self.cards_per_turn = cards;
        self
    }

    pub fn with_income_multiplier(mut self, multiplier: f64) -> Self {
        self.income_multiplier = multiplier;
        self
    }

    pub fn with_event_frequency(mut self, frequency: u32) -> Self {
        self.event_frequency = frequency;
        self
    }

    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    pub fn with_max_land_size(mut self, size: usize) -> Self {
        self.max_land_size = size;
        self
    }

    pub fn with_mana_regen(mut self, regen: i64) -> Self {
        self.mana_regen = regen;
        self
    }

    pub fn with_shop_size(mut self, size: usize) -> Self {
        self.shop_size = size;
        self
    }

    pub fn with_multipliers(mut self, health: f64, damage: f64, price: f64) -> Self {
        self.health_multiplier = health;
        self.damage_multiplier = damage;
        self.price_multiplier = price;
        self
    }

    /// Apply the damage multiplier to a raw card value.
    #[must_use]
    pub fn scale_damage(&self, value: i64) -> i64 {
        (value as f64 * self.damage_multiplier).floor() as i64
    }

    /// Apply the price multiplier to a catalog cost.
    #[must_use]
    pub fn scale_price(&self, cost: i64) -> i64 {
        (cost as f64 * self.price_multiplier).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.initial_gold, 100);
        assert_eq!(settings.max_hand_size, 10);
        assert_eq!(settings.event_frequency, 5);
        assert_eq!(settings.damage_multiplier, 1.0);
    }

    #[test]
    fn test_builder_pattern() {
        let settings = GameSettings::default()
            .with_initial_gold(10)
            .with_bots(3, BotDifficulty::Hard)
            .with_multipliers(2.0, 1.5, 0.5);

        assert_eq!(settings.initial_gold, 10);
        assert_eq!(settings.bot_count, 3);
        assert_eq!(settings.bot_difficulty.iterations(), 200);
        assert_eq!(settings.scale_damage(20), 30);
        assert_eq!(settings.scale_price(45), 22);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = GameSettings::from_json(r#"{"initial_gold": 500, "bot_difficulty": "easy"}"#).unwrap();
        assert_eq!(settings.initial_gold, 500);
        assert_eq!(settings.bot_difficulty, BotDifficulty::Easy);
        assert_eq!(settings.shop_size, 5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GameSettings::from_json("not json").is_err());
    }
}
