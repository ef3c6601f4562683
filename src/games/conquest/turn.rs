//! Turn rotation, round events, shop refresh and turn-start upkeep.

use im::Vector;

use crate::cards::{Card, CardCatalog};
use crate::core::config::{BANK_INTEREST_RATE, EVENT_MAGNITUDE};
use crate::core::{GameRng, GameState, LogKind, PlayerId, TurnPhase};

/// Deal a fresh shop offer of `shop_size` random catalog cards.
///
/// Prices are scaled by the price multiplier once, here; the scaled cost
/// stays on the card after purchase.
pub(crate) fn refresh_shop(catalog: &CardCatalog, state: &mut GameState, rng: &mut GameRng) {
    let mut shop: Vector<Card> = Vector::new();
    for _ in 0..state.settings.shop_size {
        let Some(def) = catalog.random(rng) else {
            break;
        };
        let id = state.alloc_card_id(&def.id);
        let mut card = def.instantiate(id);
        card.cost = state.settings.scale_price(card.cost);
        shop.push_back(card);
    }
    state.shop = shop;
}

/// Fire one random global event. Returns its message.
fn trigger_event(state: &mut GameState, rng: &mut GameRng) -> String {
    let living: Vec<PlayerId> = state.living_players().collect();
    if rng.gen_bool(0.5) {
        for id in living {
            state.player_mut(id).heal(EVENT_MAGNITUDE);
        }
        format!("Blessing of the harvest: every realm recovers {EVENT_MAGNITUDE} HP")
    } else {
        for id in living {
            let player = state.player_mut(id);
            player.mana = (player.mana - EVENT_MAGNITUDE).max(0);
        }
        format!("Magic storm: every realm loses {EVENT_MAGNITUDE} mana")
    }
}

/// Index of the next living seat after `from`, and whether rotation passed seat 0.
fn next_living_seat(state: &GameState, from: usize) -> (usize, bool) {
    let count = state.player_count();
    let mut index = from;
    let mut wrapped = false;
    for _ in 0..count {
        index = (index + 1) % count;
        if index == 0 {
            wrapped = true;
        }
        if state.players[index].is_alive() {
            break;
        }
    }
    (index, wrapped)
}

/// Pass play to the next living player and run their turn-start upkeep.
pub(crate) fn next_turn(catalog: &CardCatalog, state: &GameState, rng: &mut GameRng) -> GameState {
    let mut next = state.clone();
    let (index, wrapped) = next_living_seat(&next, next.current_player.index());

    next.current_player = PlayerId::new(index as u8);
    next.played_categories.clear();
    next.last_action = None;
    next.pending_attack = None;
    next.purchased_this_turn = false;
    next.phase = TurnPhase::Action;
    next.event_message = None;

    if wrapped {
        next.turn += 1;
        let frequency = next.settings.event_frequency;
        if frequency > 0 && next.turn % frequency == 0 {
            let message = trigger_event(&mut next, rng);
            log::debug!("turn {}: {message}", next.turn);
            next.push_log(LogKind::Event, message.clone());
            next.event_message = Some(message);
        }
        refresh_shop(catalog, &mut next, rng);
    }

    let actor = next.current_player;
    if next.player(actor).is_alive() {
        upkeep(catalog, &mut next, actor, rng);
    }

    let name = next.player(actor).name.clone();
    next.push_log(LogKind::Turn, format!("Turn {}: {name} takes the field", next.turn));
    next
}

/// Income, bank interest, mana regeneration and card draws.
fn upkeep(catalog: &CardCatalog, state: &mut GameState, actor: PlayerId, rng: &mut GameRng) {
    let multiplier = state.settings.income_multiplier;
    let regen = state.settings.mana_regen;
    let max_hand = state.settings.max_hand_size;

    {
        let player = state.player_mut(actor);
        let interest = ((player.deposit as f64) * BANK_INTEREST_RATE).floor() as i64;
        player.gold += player.turn_income(multiplier) + interest;
        player.restore_mana(regen);
    }

    for _ in 0..state.settings.cards_per_turn {
        let Some(def) = catalog.random(rng) else {
            break;
        };
        // Draws beyond the hand limit are discarded.
        if state.player(actor).hand.len() >= max_hand {
            continue;
        }
        let id = state.alloc_card_id(&def.id);
        let card = def.instantiate(id);
        state.player_mut(actor).hand.push_back(card);
    }
}
