//! `GameEngine`: match setup, the action dispatcher and the public rule entry points.

use im::Vector;

use super::{economy, effects, legal, turn};
use crate::cards::CardCatalog;
use crate::core::{
    Action, CardIds, GameRng, GameSettings, GameState, LogKind, Player, PlayerId, PlayerSetup, TurnPhase,
};
use crate::rules::{ActionOutcome, GameResult, RejectReason, RulesEngine};

/// Rules engine for Card Conquest.
///
/// Holds the card catalog; all match data lives in `GameState`. Every
/// operation takes a snapshot and returns a new one, so the engine can be
/// shared freely between a live match and any number of search threads.
///
/// ## Entry points
///
/// - `apply`: tagged dispatcher, returns `ActionOutcome`
/// - `next_turn`, `execute_card_effect`, `buy_card`, `sell_card`,
///   `handle_bank_transaction`, `attack`, `repel`, `take_damage`: direct
///   calls that return the input state unchanged when the action is invalid
#[derive(Clone, Debug)]
pub struct GameEngine {
    catalog: CardCatalog,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Engine with the standard card set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(CardCatalog::standard())
    }

    #[must_use]
    pub fn with_catalog(catalog: CardCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Build a ready-to-play match.
    ///
    /// Seats follow `players` order (at most `settings.max_players`). Each
    /// player gets their nation's bonuses and starting card; the shop is
    /// dealt and seat 0 opens turn 1.
    ///
    /// # Panics
    ///
    /// Panics if `players` is empty.
    pub fn create_initial_state(&self, players: &[PlayerSetup], settings: &GameSettings, rng: &mut GameRng) -> GameState {
        let seats = settings.max_players.max(1);
        if players.len() > seats {
            log::warn!("{} players requested, seating the first {seats}", players.len());
        }

        let table: Vector<Player> = players
            .iter()
            .take(seats)
            .enumerate()
            .map(|(i, setup)| Player::new(PlayerId::new(i as u8), setup, settings))
            .collect();
        let mut state = GameState::new(table, settings.clone());

        for id in PlayerId::all(state.player_count()) {
            let nation = state.player(id).nation;
            match self.catalog.get(nation.starting_card()) {
                Some(def) => {
                    let card = def.instantiate(state.alloc_card_id(&def.id));
                    state.player_mut(id).hand.push_back(card);
                }
                None => log::warn!("starting card {} missing from catalog", nation.starting_card()),
            }
        }

        turn::refresh_shop(&self.catalog, &mut state, rng);

        let names: Vec<&str> = state.players.iter().map(|p| p.name.as_str()).collect();
        let message = format!("The conquest begins: {}", names.join(", "));
        state.push_log(LogKind::Init, message);
        log::info!("new match with {} players", state.player_count());
        state
    }

    /// Apply any action through the dispatcher.
    ///
    /// Everything is rejected once a winner is set.
    pub fn apply(&self, state: &GameState, action: &Action, rng: &mut GameRng) -> ActionOutcome {
        if state.winner.is_some() {
            return ActionOutcome::Rejected(RejectReason::GameOver);
        }
        match action {
            Action::EndTurn => {
                if state.phase == TurnPhase::Defense {
                    ActionOutcome::Rejected(RejectReason::WrongPhase)
                } else {
                    ActionOutcome::Applied(turn::next_turn(&self.catalog, state, rng))
                }
            }
            Action::PlayCard { card_id, target } => effects::play_card(state, card_id, *target, rng).into(),
            Action::Attack { card_ids, target } => effects::attack(state, card_ids, *target).into(),
            Action::BuyCard { card_id } => economy::buy_card(state, card_id).into(),
            Action::SellCard { card_id } => economy::sell_card(state, card_id).into(),
            Action::Repel { card_ids } => effects::repel(state, card_ids).into(),
            Action::TakeDamage => effects::take_damage(state).into(),
        }
    }

    /// Pass play to the next living player.
    ///
    /// Always advances, even mid-defense (the pending attack is dropped).
    #[must_use]
    pub fn next_turn(&self, state: &GameState, rng: &mut GameRng) -> GameState {
        turn::next_turn(&self.catalog, state, rng)
    }

    /// Resolve a card from the current player's hand immediately.
    #[must_use]
    pub fn execute_card_effect(
        &self,
        state: &GameState,
        card_id: &str,
        target: Option<PlayerId>,
        rng: &mut GameRng,
    ) -> GameState {
        ActionOutcome::from(effects::play_card(state, card_id, target, rng)).or_unchanged(state)
    }

    #[must_use]
    pub fn buy_card(&self, state: &GameState, card_id: &str) -> GameState {
        ActionOutcome::from(economy::buy_card(state, card_id)).or_unchanged(state)
    }

    #[must_use]
    pub fn sell_card(&self, state: &GameState, card_id: &str) -> GameState {
        ActionOutcome::from(economy::sell_card(state, card_id)).or_unchanged(state)
    }

    /// Deposit (`amount > 0`) or withdraw (`amount < 0`) gold.
    #[must_use]
    pub fn handle_bank_transaction(&self, state: &GameState, amount: i64) -> GameState {
        ActionOutcome::from(economy::bank_transaction(state, amount)).or_unchanged(state)
    }

    #[must_use]
    pub fn attack(&self, state: &GameState, card_ids: &CardIds, target: PlayerId) -> GameState {
        ActionOutcome::from(effects::attack(state, card_ids, target)).or_unchanged(state)
    }

    #[must_use]
    pub fn repel(&self, state: &GameState, card_ids: &CardIds) -> GameState {
        ActionOutcome::from(effects::repel(state, card_ids)).or_unchanged(state)
    }

    #[must_use]
    pub fn take_damage(&self, state: &GameState) -> GameState {
        ActionOutcome::from(effects::take_damage(state)).or_unchanged(state)
    }
}

impl RulesEngine for GameEngine {
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        legal::legal_actions(state)
    }

    fn apply_action(&self, state: &GameState, action: &Action, rng: &mut GameRng) -> ActionOutcome {
        self.apply(state, action, rng)
    }

    fn result(&self, state: &GameState) -> Option<GameResult> {
        if let Some(winner) = state.winner {
            return Some(GameResult::Winner(winner));
        }
        if state.living_players().next().is_none() {
            return Some(GameResult::Draw);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Nation;

    fn setups() -> Vec<PlayerSetup> {
        vec![
            PlayerSetup::human("Ada", Nation::Kingdom),
            PlayerSetup::bot("Bot", Nation::Khanate),
        ]
    }

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::new();
        let mut rng = GameRng::new(1);
        let state = engine.create_initial_state(&setups(), &GameSettings::default(), &mut rng);

        assert_eq!(state.turn, 1);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.phase, TurnPhase::Action);
        assert_eq!(state.shop.len(), 5);
        assert_eq!(state.log.len(), 1);
        assert_eq!(state.log[0].kind, LogKind::Init);

        let ada = state.player(PlayerId::new(0));
        assert_eq!(ada.max_hp, 120);
        assert_eq!(ada.hand.len(), 1);
        assert_eq!(ada.hand[0].catalog_id, "stone_wall");
    }

    #[test]
    fn test_initial_state_respects_max_players() {
        let engine = GameEngine::new();
        let mut rng = GameRng::new(1);
        let settings = GameSettings::default().with_max_players(1);
        let state = engine.create_initial_state(&setups(), &settings, &mut rng);
        assert_eq!(state.player_count(), 1);
    }

    #[test]
    fn test_apply_rejects_after_winner() {
        let engine = GameEngine::new();
        let mut rng = GameRng::new(1);
        let mut state = engine.create_initial_state(&setups(), &GameSettings::default(), &mut rng);
        state.winner = Some(PlayerId::new(0));

        let outcome = engine.apply(&state, &Action::EndTurn, &mut rng);
        assert_eq!(outcome.reason(), Some(RejectReason::GameOver));
        assert!(engine.legal_actions(&state).is_empty());
    }

    #[test]
    fn test_result_draw_when_all_dead() {
        let engine = GameEngine::new();
        let mut rng = GameRng::new(1);
        let mut state = engine.create_initial_state(&setups(), &GameSettings::default(), &mut rng);
        for id in PlayerId::all(2) {
            state.player_mut(id).is_dead = true;
        }
        assert_eq!(engine.result(&state), Some(GameResult::Draw));
    }
}
