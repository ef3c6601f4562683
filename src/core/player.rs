//! Players, nations and seat setup.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. The id of a player equals its index in
//! `GameState::players`, which never changes for the game's duration.
//!
//! ## Nation
//!
//! One of four factions. Each adjusts the starting HP / mana / gold /
//! income and grants one starting card.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::{GameSettings, BASE_HP, BASE_INCOME, BASE_MANA};
use crate::cards::Card;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use card_conquest::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Playable factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nation {
    /// Sturdy walls: extra max HP.
    Kingdom,
    /// Merchants: extra gold and income.
    Republic,
    /// Priests: extra mana.
    Theocracy,
    /// Raiders: extra gold, an attack card to start.
    Khanate,
}

/// Stat adjustments a nation applies on top of the base values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NationBonus {
    pub max_hp: i64,
    pub mana: i64,
    pub max_mana: i64,
    pub gold: i64,
    pub income: i64,
}

impl Nation {
    /// All nations, in one-hot encoding order.
    pub const ALL: [Nation; 4] = [Nation::Kingdom, Nation::Republic, Nation::Theocracy, Nation::Khanate];

    /// Position in `Nation::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Nation::Kingdom => 0,
            Nation::Republic => 1,
            Nation::Theocracy => 2,
            Nation::Khanate => 3,
        }
    }

    #[must_use]
    pub const fn bonus(self) -> NationBonus {
        match self {
            Nation::Kingdom => NationBonus { max_hp: 20, mana: 0, max_mana: 0, gold: 0, income: 0 },
            Nation::Republic => NationBonus { max_hp: 0, mana: 0, max_mana: 0, gold: 50, income: 5 },
            Nation::Theocracy => NationBonus { max_hp: 0, mana: 20, max_mana: 20, gold: 0, income: 0 },
            Nation::Khanate => NationBonus { max_hp: -10, mana: 0, max_mana: 0, gold: 30, income: 2 },
        }
    }

    /// Catalog id of the card this nation starts with.
    #[must_use]
    pub const fn starting_card(self) -> &'static str {
        match self {
            Nation::Kingdom => "stone_wall",
            Nation::Republic => "trade_route",
            Nation::Theocracy => "divine_light",
            Nation::Khanate => "horse_archers",
        }
    }
}

impl std::fmt::Display for Nation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Nation::Kingdom => "Kingdom",
            Nation::Republic => "Republic",
            Nation::Theocracy => "Theocracy",
            Nation::Khanate => "Khanate",
        };
        f.write_str(name)
    }
}

/// Seat description handed to the engine when a match is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub is_bot: bool,
    pub nation: Nation,
}

impl PlayerSetup {
    pub fn human(name: impl Into<String>, nation: Nation) -> Self {
        Self { name: name.into(), is_bot: false, nation }
    }

    pub fn bot(name: impl Into<String>, nation: Nation) -> Self {
        Self { name: name.into(), is_bot: true, nation }
    }
}

/// A seated player.
///
/// Invariants kept by the engine: `0 <= hp <= max_hp`,
/// `0 <= mana <= max_mana`, `hand.len() <= max_hand_size`,
/// `lands.len() <= max_land_size`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_bot: bool,
    pub nation: Nation,
    pub hp: i64,
    pub max_hp: i64,
    pub mana: i64,
    pub max_mana: i64,
    pub gold: i64,
    /// Passive income per turn, excluding lands.
    pub income: i64,
    /// Bank deposit balance.
    pub deposit: i64,
    pub hand: Vector<Card>,
    /// Industry cards placed for recurring income.
    pub lands: Vector<Card>,
    pub is_dead: bool,
}

impl Player {
    /// Build a fresh player with nation bonuses applied and an empty hand.
    pub fn new(id: PlayerId, setup: &PlayerSetup, settings: &GameSettings) -> Self {
        let bonus = setup.nation.bonus();
        let max_hp = (((BASE_HP + bonus.max_hp) as f64) * settings.health_multiplier).floor() as i64;
        let max_hp = max_hp.max(1);
        let max_mana = (settings.max_mana + bonus.max_mana).max(0);

        Self {
            id,
            name: setup.name.clone(),
            is_bot: setup.is_bot,
            nation: setup.nation,
            hp: max_hp,
            max_hp,
            mana: (BASE_MANA + bonus.mana).clamp(0, max_mana),
            max_mana,
            gold: (settings.initial_gold + bonus.gold).max(0),
            income: BASE_INCOME + bonus.income,
            deposit: 0,
            hand: Vector::new(),
            lands: Vector::new(),
            is_dead: false,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Sum of land card values.
    #[must_use]
    pub fn land_income(&self) -> i64 {
        self.lands.iter().map(|c| c.value).sum()
    }

    /// Gold earned at the start of a turn, before bank interest.
    #[must_use]
    pub fn turn_income(&self, multiplier: f64) -> i64 {
        (((self.income + self.land_income()) as f64) * multiplier).floor() as i64
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn hand_position(&self, card_id: &str) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card_id)
    }

    /// Look up a card in hand.
    #[must_use]
    pub fn card_in_hand(&self, card_id: &str) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Remove a card from hand, returning it.
    pub fn take_from_hand(&mut self, card_id: &str) -> Option<Card> {
        let pos = self.hand_position(card_id)?;
        Some(self.hand.remove(pos))
    }

    pub fn heal(&mut self, amount: i64) {
        self.hp = (self.hp + amount).clamp(0, self.max_hp);
    }

    pub fn restore_mana(&mut self, amount: i64) {
        self.mana = (self.mana + amount).clamp(0, self.max_mana);
    }

    /// Apply damage. Returns true if this killed the player.
    pub fn take_damage(&mut self, amount: i64) -> bool {
        if self.is_dead {
            return false;
        }
        self.hp -= amount.max(0);
        if self.hp <= 0 {
            self.hp = 0;
            self.is_dead = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_nation_bonuses_applied() {
        let settings = GameSettings::default();

        let kingdom = Player::new(PlayerId::new(0), &PlayerSetup::human("a", Nation::Kingdom), &settings);
        assert_eq!(kingdom.max_hp, 120);
        assert_eq!(kingdom.hp, 120);

        let republic = Player::new(PlayerId::new(1), &PlayerSetup::bot("b", Nation::Republic), &settings);
        assert_eq!(republic.gold, 150);
        assert_eq!(republic.income, 15);
        assert!(republic.is_bot);

        let theocracy = Player::new(PlayerId::new(2), &PlayerSetup::bot("c", Nation::Theocracy), &settings);
        assert_eq!(theocracy.mana, 70);
        assert_eq!(theocracy.max_mana, 120);
    }

    #[test]
    fn test_health_multiplier() {
        let settings = GameSettings::default().with_multipliers(1.5, 1.0, 1.0);
        let player = Player::new(PlayerId::new(0), &PlayerSetup::human("a", Nation::Republic), &settings);
        assert_eq!(player.max_hp, 150);
    }

    #[test]
    fn test_take_damage_clamps_and_kills() {
        let settings = GameSettings::default();
        let mut player = Player::new(PlayerId::new(0), &PlayerSetup::human("a", Nation::Republic), &settings);
        player.hp = 15;

        assert!(player.take_damage(20));
        assert_eq!(player.hp, 0);
        assert!(player.is_dead);

        // Already dead: no second death
        assert!(!player.take_damage(5));
    }

    #[test]
    fn test_heal_and_mana_clamped() {
        let settings = GameSettings::default();
        let mut player = Player::new(PlayerId::new(0), &PlayerSetup::human("a", Nation::Republic), &settings);
        player.hp = 90;
        player.heal(50);
        assert_eq!(player.hp, player.max_hp);

        player.restore_mana(-500);
        assert_eq!(player.mana, 0);
    }

    #[test]
    fn test_nation_one_hot_order() {
        for (i, nation) in Nation::ALL.iter().enumerate() {
            assert_eq!(nation.index(), i);
        }
    }
}
