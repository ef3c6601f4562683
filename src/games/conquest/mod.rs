//! Card Conquest: a turn-based strategy card game for 1-N nations.
//!
//! Each player leads a nation with HP, mana, gold and a hand of cards.
//! On their turn a player may play at most one card per category, buy one
//! card from the shared shop, sell cards and move gold to and from the
//! bank. Attack cards open a defense phase in which the target answers
//! with defense cards or takes the hit. Last nation standing wins.
//!
//! Rounds wrap when play passes seat 0: the turn counter advances, the
//! shop is re-dealt and every `event_frequency` rounds a global event
//! (blessing or magic storm) hits all living players.

mod economy;
mod effects;
mod game;
mod legal;
mod turn;

pub use game::GameEngine;
