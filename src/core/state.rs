//! Game state snapshot.
//!
//! `GameState` is the complete, serializable match state. Engine calls take
//! a `&GameState` and return a new one; they never mutate their input.
//!
//! Collections use `im` persistent structures, so `clone()` is O(1) and the
//! clone shares no mutable substructure with the original: writes to either
//! copy trigger copy-on-write of only the touched path. This is what makes
//! speculative search over cloned states sound and cheap.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::CardIds;
use super::config::{GameSettings, LOG_CAPACITY};
use super::player::{Player, PlayerId};
use crate::cards::{Card, CardCategory};

/// Turn phase.
///
/// The engine runs in `Action`, switching to `Defense` while an attack is
/// pending. `Start` and `End` are available to hosts that want to gate input
/// around turn transitions; card actions are rejected in those phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Start,
    #[default]
    Action,
    Defense,
    End,
}

/// Log entry category (used by the presentation layer for styling).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Init,
    Turn,
    Event,
    Combat,
    Magic,
    Economy,
    Defense,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub kind: LogKind,
    pub message: String,
}

/// Structured description of the most recent card play, for animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAction {
    pub source: PlayerId,
    pub target: Option<PlayerId>,
    pub card_id: String,
    pub category: CardCategory,
    /// Per-game sequence number, increasing with every recorded play.
    pub sequence: u64,
}

/// An attack waiting for the defender's response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttack {
    pub attacker: PlayerId,
    pub target: PlayerId,
    pub damage: i64,
    pub card_ids: CardIds,
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Round counter (starts at 1, increments when play wraps to seat 0).
    pub turn: u32,

    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// All seats, fixed for the game's duration. `players[i].id == PlayerId(i)`.
    pub players: Vector<Player>,

    /// Cards currently offered for purchase.
    pub shop: Vector<Card>,

    /// Newest first, at most `LOG_CAPACITY` entries.
    pub log: Vector<LogEntry>,

    /// Categories played by the current player this turn.
    pub played_categories: SmallVec<[CardCategory; 4]>,

    pub phase: TurnPhase,

    /// Set once exactly one player remains alive; never cleared.
    pub winner: Option<PlayerId>,

    /// Message of the last global event, if any.
    pub event_message: Option<String>,

    pub settings: GameSettings,

    /// Cleared at the start of each turn.
    pub last_action: Option<LastAction>,

    /// Present while `phase == Defense`.
    pub pending_attack: Option<PendingAttack>,

    /// One shop purchase per turn.
    pub purchased_this_turn: bool,

    next_instance: u64,
    sequence: u64,
}

impl GameState {
    /// Create a state with the given players and settings.
    ///
    /// Turn 1, seat 0 to act, empty shop and log. Use
    /// `GameEngine::create_initial_state` for a ready-to-play match.
    #[must_use]
    pub fn new(players: Vector<Player>, settings: GameSettings) -> Self {
        assert!(!players.is_empty(), "Must have at least 1 player");
        assert!(players.len() <= 255, "At most 255 players supported");

        Self {
            turn: 1,
            current_player: PlayerId::new(0),
            players,
            shop: Vector::new(),
            log: Vector::new(),
            played_categories: SmallVec::new(),
            phase: TurnPhase::Action,
            winner: None,
            event_message: None,
            settings,
            last_action: None,
            pending_attack: None,
            purchased_this_turn: false,
            next_instance: 1,
            sequence: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player. Panics on an id outside the table.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Get a player if the id is on the table.
    #[must_use]
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        self.player(self.current_player)
    }

    /// Player entitled to act: the defender during a pending attack,
    /// otherwise the current player.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        match (&self.pending_attack, self.phase) {
            (Some(attack), TurnPhase::Defense) => attack.target,
            _ => self.current_player,
        }
    }

    /// Ids of all living players.
    pub fn living_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.is_alive()).map(|p| p.id)
    }

    /// Ids of living players other than `of`.
    pub fn living_enemies(&self, of: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.living_players().filter(move |&p| p != of)
    }

    /// Whether `category` was already played this turn.
    #[must_use]
    pub fn category_played(&self, category: CardCategory) -> bool {
        self.played_categories.contains(&category)
    }

    /// Prepend a log entry, keeping at most `LOG_CAPACITY`.
    pub fn push_log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.log.push_front(LogEntry {
            turn: self.turn,
            kind,
            message: message.into(),
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.truncate(LOG_CAPACITY);
        }
    }

    /// Allocate a unique instance id for a card copy.
    pub fn alloc_card_id(&mut self, catalog_id: &str) -> String {
        let id = format!("{catalog_id}#{}", self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Next last-action sequence number.
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Declare a winner if exactly one player remains alive.
    pub fn check_winner(&mut self) {
        if self.winner.is_some() {
            return;
        }
        let mut living = self.players.iter().filter(|p| p.is_alive());
        let survivor = match (living.next(), living.next()) {
            (Some(last), None) => Some(last.id),
            _ => None,
        };
        if survivor.is_some() {
            self.winner = survivor;
        }
    }

    /// Whether the match has a winner or everyone is dead.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.living_players().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Nation, PlayerSetup};

    fn make_state(count: usize) -> GameState {
        let settings = GameSettings::default();
        let players = (0..count)
            .map(|i| {
                let setup = PlayerSetup::bot(format!("bot{i}"), Nation::Republic);
                Player::new(PlayerId::new(i as u8), &setup, &settings)
            })
            .collect();
        GameState::new(players, settings)
    }

    #[test]
    fn test_state_new() {
        let state = make_state(3);
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.turn, 1);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.phase, TurnPhase::Action);
        assert!(state.winner.is_none());
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_state_requires_players() {
        let _ = GameState::new(Vector::new(), GameSettings::default());
    }

    #[test]
    fn test_log_capped_newest_first() {
        let mut state = make_state(2);
        for i in 0..60 {
            state.push_log(LogKind::Turn, format!("entry {i}"));
        }
        assert_eq!(state.log.len(), LOG_CAPACITY);
        assert_eq!(state.log[0].message, "entry 59");
    }

    #[test]
    fn test_alloc_card_id_unique() {
        let mut state = make_state(2);
        let a = state.alloc_card_id("farm");
        let b = state.alloc_card_id("farm");
        assert_ne!(a, b);
        assert!(a.starts_with("farm#"));
    }

    #[test]
    fn test_check_winner() {
        let mut state = make_state(3);
        state.check_winner();
        assert!(state.winner.is_none());

        state.player_mut(PlayerId::new(0)).is_dead = true;
        state.player_mut(PlayerId::new(2)).is_dead = true;
        state.check_winner();
        assert_eq!(state.winner, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_actor_during_defense() {
        let mut state = make_state(2);
        assert_eq!(state.actor(), PlayerId::new(0));

        state.phase = TurnPhase::Defense;
        state.pending_attack = Some(PendingAttack {
            attacker: PlayerId::new(0),
            target: PlayerId::new(1),
            damage: 10,
            card_ids: CardIds::new(),
        });
        assert_eq!(state.actor(), PlayerId::new(1));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = make_state(2);
        let mut cloned = original.clone();

        cloned.player_mut(PlayerId::new(0)).hp = 1;
        cloned.push_log(LogKind::Combat, "hit");

        assert_eq!(original.player(PlayerId::new(0)).hp, 100);
        assert!(original.log.is_empty());
        assert_ne!(original, cloned);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = make_state(2);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
