//! Legal action enumeration for search agents.
//!
//! Every action returned here is accepted by the engine. Actions that would
//! be accepted but achieve nothing (healing at full HP, building with no
//! land slots) are left out to keep the branching factor down. Selling is
//! never enumerated: it only loses value for an agent.

use rustc_hash::FxHashSet;

use super::effects::{castable, defense_actions};
use crate::cards::{Card, CardCategory, EffectKind};
use crate::core::{Action, GameState, Player, PlayerId, TurnPhase};

/// Enumerate legal actions for the player entitled to act.
pub(crate) fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.winner.is_some() {
        return Vec::new();
    }
    match state.phase {
        TurnPhase::Defense => defense_actions(state),
        TurnPhase::Action => action_phase(state),
        TurnPhase::Start | TurnPhase::End => vec![Action::EndTurn],
    }
}

fn action_phase(state: &GameState) -> Vec<Action> {
    let actor_id = state.current_player;
    let actor = state.player(actor_id);
    let enemies: Vec<PlayerId> = state.living_enemies(actor_id).collect();

    let mut actions = vec![Action::EndTurn];
    if actor.is_alive() {
        for card in actor.hand.iter() {
            if castable(state, actor, card).is_ok() {
                push_card_actions(state, actor, card, &enemies, &mut actions);
            }
        }
        push_purchases(state, actor, &mut actions);
    }
    actions
}

fn push_card_actions(state: &GameState, actor: &Player, card: &Card, enemies: &[PlayerId], out: &mut Vec<Action>) {
    let hp_after = actor.hp - card.hp_cost();
    let mana_after = actor.mana - card.mana_cost;
    let wounded = hp_after < actor.max_hp;
    let drained = mana_after < actor.max_mana;

    match card.effect {
        EffectKind::Damage if card.is_attack() => {
            out.extend(enemies.iter().map(|&t| Action::attack(card.id.clone(), t)));
        }
        EffectKind::Damage if card.category == CardCategory::Missile => {
            if !enemies.is_empty() {
                out.push(Action::play(card.id.clone(), None));
            }
        }
        EffectKind::Damage => {
            out.extend(enemies.iter().map(|&t| Action::play(card.id.clone(), Some(t))));
        }
        EffectKind::GoldSteal => {
            out.extend(
                enemies
                    .iter()
                    .filter(|&&t| state.player(t).gold > 0)
                    .map(|&t| Action::play(card.id.clone(), Some(t))),
            );
        }
        EffectKind::Heal | EffectKind::FullRestoreHp if wounded => {
            out.push(Action::play(card.id.clone(), None));
        }
        EffectKind::Mana | EffectKind::FullRestoreMana if drained => {
            out.push(Action::play(card.id.clone(), None));
        }
        EffectKind::FullRestoreAll if wounded || drained => {
            out.push(Action::play(card.id.clone(), None));
        }
        EffectKind::Income if actor.lands.len() < state.settings.max_land_size => {
            out.push(Action::play(card.id.clone(), None));
        }
        EffectKind::GoldGain => {
            out.push(Action::play(card.id.clone(), None));
        }
        _ => {}
    }
}

fn push_purchases(state: &GameState, actor: &Player, out: &mut Vec<Action>) {
    if state.purchased_this_turn || actor.hand.len() >= state.settings.max_hand_size {
        return;
    }
    // Identical offers are interchangeable; keep one per catalog id and price.
    let mut seen: FxHashSet<(&str, i64)> = FxHashSet::default();
    for card in state.shop.iter() {
        if card.cost <= actor.gold && seen.insert((card.catalog_id.as_str(), card.cost)) {
            out.push(Action::buy(card.id.clone()));
        }
    }
}
