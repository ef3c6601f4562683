//! Shop purchases, sales and the bank.

use crate::core::{GameState, LogKind, TurnPhase};
use crate::rules::RejectReason;

/// Buy a shop card for the current player.
pub(crate) fn buy_card(state: &GameState, card_id: &str) -> Result<GameState, RejectReason> {
    if state.phase != TurnPhase::Action {
        return Err(RejectReason::WrongPhase);
    }
    if state.purchased_this_turn {
        return Err(RejectReason::AlreadyPurchased);
    }
    let position = state
        .shop
        .iter()
        .position(|c| c.id == card_id)
        .ok_or(RejectReason::CardNotInShop)?;
    let buyer = state.current();
    if buyer.hand.len() >= state.settings.max_hand_size {
        return Err(RejectReason::HandFull);
    }
    let offered = &state.shop[position];
    if buyer.gold < offered.cost {
        return Err(RejectReason::InsufficientGold);
    }

    let mut next = state.clone();
    let offered = next.shop.remove(position);
    // The hand copy gets its own id so shop ids are never reused.
    let id = next.alloc_card_id(&offered.catalog_id);
    let card = offered.with_id(id);
    let actor_id = next.current_player;
    {
        let buyer = next.player_mut(actor_id);
        buyer.gold -= card.cost;
        buyer.hand.push_back(card.clone());
    }
    next.purchased_this_turn = true;

    let name = next.player(actor_id).name.clone();
    next.push_log(LogKind::Economy, format!("{name} buys {} for {} gold", card.name, card.cost));
    Ok(next)
}

/// Sell a card from the current player's hand for half its cost.
pub(crate) fn sell_card(state: &GameState, card_id: &str) -> Result<GameState, RejectReason> {
    if state.phase != TurnPhase::Action {
        return Err(RejectReason::WrongPhase);
    }
    let actor_id = state.current_player;
    if state.player(actor_id).card_in_hand(card_id).is_none() {
        return Err(RejectReason::CardNotInHand);
    }

    let mut next = state.clone();
    let seller = next.player_mut(actor_id);
    let Some(card) = seller.take_from_hand(card_id) else {
        return Err(RejectReason::CardNotInHand);
    };
    let price = card.sell_price();
    seller.gold += price;

    let name = seller.name.clone();
    next.push_log(LogKind::Economy, format!("{name} sells {} for {price} gold", card.name));
    Ok(next)
}

/// Move gold between the current player's purse and their deposit.
///
/// Positive amounts deposit, negative amounts withdraw. Not logged.
pub(crate) fn bank_transaction(state: &GameState, amount: i64) -> Result<GameState, RejectReason> {
    if state.phase != TurnPhase::Action {
        return Err(RejectReason::WrongPhase);
    }
    if amount == 0 {
        return Err(RejectReason::ZeroAmount);
    }
    let player = state.current();
    let balances = if amount > 0 {
        if player.gold < amount {
            return Err(RejectReason::InsufficientGold);
        }
        player.deposit.checked_add(amount).map(|deposit| (player.gold - amount, deposit))
    } else {
        // i64::MIN has no positive counterpart, so compare magnitudes unsigned.
        if player.deposit < 0 || player.deposit.unsigned_abs() < amount.unsigned_abs() {
            return Err(RejectReason::InsufficientDeposit);
        }
        player.gold.checked_sub(amount).map(|gold| (gold, player.deposit + amount))
    };
    let Some((gold, deposit)) = balances else {
        return Err(RejectReason::BalanceOverflow);
    };

    let mut next = state.clone();
    let actor_id = next.current_player;
    let player = next.player_mut(actor_id);
    player.gold = gold;
    player.deposit = deposit;
    Ok(next)
}
