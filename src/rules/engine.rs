//! The seam between a match and the bots that play it.

use crate::core::{Action, GameRng, GameState, PlayerId, TurnPhase};

use super::outcome::ActionOutcome;

/// How a finished match ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Last player standing.
    Winner(PlayerId),
    /// The final blows killed everyone left.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// +1 for the winner, -1 for everyone else, 0 on a draw.
    #[must_use]
    pub fn score_for(&self, player: PlayerId) -> f64 {
        match self {
            GameResult::Draw => 0.0,
            _ if self.is_winner(player) => 1.0,
            GameResult::Winner(_) => -1.0,
        }
    }
}

/// Everything a bot needs to know about the rules.
///
/// `legal_actions` must never list a move `apply_action` would reject, and
/// `apply_action` never touches its input snapshot.
pub trait RulesEngine {
    /// Who moves next: the defender while an attack is pending, otherwise
    /// the player whose turn it is.
    fn actor(&self, state: &GameState) -> PlayerId {
        state.actor()
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    fn apply_action(&self, state: &GameState, action: &Action, rng: &mut GameRng) -> ActionOutcome;

    /// `None` while the match is still running.
    fn result(&self, state: &GameState) -> Option<GameResult>;

    /// Move that always keeps the match going: absorb a pending attack or
    /// pass the turn.
    fn forced_action(&self, state: &GameState) -> Action {
        if state.phase == TurnPhase::Defense {
            Action::TakeDamage
        } else {
            Action::EndTurn
        }
    }
}

impl<T: RulesEngine + ?Sized> RulesEngine for &T {
    fn actor(&self, state: &GameState) -> PlayerId {
        (**self).actor(state)
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        (**self).legal_actions(state)
    }

    fn apply_action(&self, state: &GameState, action: &Action, rng: &mut GameRng) -> ActionOutcome {
        (**self).apply_action(state, action, rng)
    }

    fn result(&self, state: &GameState) -> Option<GameResult> {
        (**self).result(state)
    }

    fn forced_action(&self, state: &GameState) -> Action {
        (**self).forced_action(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_from_each_seat() {
        let result = GameResult::Winner(PlayerId::new(2));
        assert!(result.is_winner(PlayerId::new(2)));
        assert_eq!(result.score_for(PlayerId::new(2)), 1.0);
        assert_eq!(result.score_for(PlayerId::new(0)), -1.0);
        assert_eq!(GameResult::Draw.score_for(PlayerId::new(2)), 0.0);
        assert!(!GameResult::Draw.is_winner(PlayerId::new(0)));
    }
}
