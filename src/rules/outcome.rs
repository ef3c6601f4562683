//! Tagged result of applying an action.
//!
//! Internally every rule returns `ActionOutcome`; the public per-action
//! functions collapse a rejection back into the unchanged input state.

use thiserror::Error;

use crate::core::GameState;

/// Why the engine refused an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum RejectReason {
    #[error("the game is already over")]
    GameOver,
    #[error("action not allowed in the current phase")]
    WrongPhase,
    #[error("player is not entitled to act")]
    NotYourTurn,
    #[error("card is not in hand")]
    CardNotInHand,
    #[error("card is not in the shop")]
    CardNotInShop,
    #[error("not enough mana")]
    InsufficientMana,
    #[error("not enough hp to pay the card's hp cost")]
    InsufficientHp,
    #[error("not enough gold")]
    InsufficientGold,
    #[error("not enough gold on deposit")]
    InsufficientDeposit,
    #[error("hand is full")]
    HandFull,
    #[error("lands are full")]
    LandsFull,
    #[error("a card of this category was already played this turn")]
    CategoryAlreadyPlayed,
    #[error("already purchased a card this turn")]
    AlreadyPurchased,
    #[error("target is not a living opponent")]
    InvalidTarget,
    #[error("this card needs a target")]
    MissingTarget,
    #[error("card cannot be used for this action")]
    IncompatibleCard,
    #[error("no attack is pending")]
    NoPendingAttack,
    #[error("amount must be non-zero")]
    ZeroAmount,
    #[error("balance would overflow")]
    BalanceOverflow,
}

/// Result of an engine transition.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Applied(GameState),
    Rejected(RejectReason),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ActionOutcome::Applied(_) => None,
            ActionOutcome::Rejected(reason) => Some(*reason),
        }
    }

    /// The new state, or a clone of `original` when rejected.
    #[must_use]
    pub fn or_unchanged(self, original: &GameState) -> GameState {
        match self {
            ActionOutcome::Applied(state) => state,
            ActionOutcome::Rejected(reason) => {
                log::debug!("action rejected: {reason}");
                original.clone()
            }
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<GameState, RejectReason> {
        match self {
            ActionOutcome::Applied(state) => Ok(state),
            ActionOutcome::Rejected(reason) => Err(reason),
        }
    }
}

impl From<Result<GameState, RejectReason>> for ActionOutcome {
    fn from(result: Result<GameState, RejectReason>) -> Self {
        match result {
            Ok(state) => ActionOutcome::Applied(state),
            Err(reason) => ActionOutcome::Rejected(reason),
        }
    }
}
