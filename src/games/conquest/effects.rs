//! Card resolution and the attack / defense flow.

use crate::cards::{Card, CardCategory, EffectKind};
use crate::core::{
    Action, CardIds, GameRng, GameState, LastAction, LogKind, PendingAttack, Player, PlayerId, TurnPhase,
};
use crate::rules::RejectReason;

/// Check that `player` can pay for and is allowed to cast `card` now.
///
/// Shared by the engine and the action enumerator so the two never disagree.
pub(crate) fn castable(state: &GameState, player: &Player, card: &Card) -> Result<(), RejectReason> {
    if state.category_played(card.category) {
        return Err(RejectReason::CategoryAlreadyPlayed);
    }
    affordable(player, card)
}

/// Mana and HP cost check (no per-turn category limit).
pub(crate) fn affordable(player: &Player, card: &Card) -> Result<(), RejectReason> {
    if card.mana_cost > player.mana {
        return Err(RejectReason::InsufficientMana);
    }
    if card.hp_cost() > 0 && player.hp <= card.hp_cost() {
        return Err(RejectReason::InsufficientHp);
    }
    Ok(())
}

fn validate_enemy(state: &GameState, actor: PlayerId, target: PlayerId) -> Result<PlayerId, RejectReason> {
    match state.get_player(target) {
        Some(p) if p.is_alive() && target != actor => Ok(target),
        _ => Err(RejectReason::InvalidTarget),
    }
}

fn pay(player: &mut Player, card: &Card) {
    player.mana -= card.mana_cost;
    player.hp -= card.hp_cost();
}

fn record_play(state: &mut GameState, source: PlayerId, target: Option<PlayerId>, card: &Card) {
    let sequence = state.next_sequence();
    state.last_action = Some(LastAction {
        source,
        target,
        card_id: card.id.clone(),
        category: card.category,
        sequence,
    });
}

/// Apply damage to a player, logging a death and re-checking the winner.
pub(crate) fn deal_damage(state: &mut GameState, target: PlayerId, amount: i64) {
    let killed = state.player_mut(target).take_damage(amount);
    if killed {
        let name = state.player(target).name.clone();
        state.push_log(LogKind::Combat, format!("{name} has fallen"));
    }
    state.check_winner();
    if let Some(winner) = state.winner {
        if killed {
            let name = state.player(winner).name.clone();
            state.push_log(LogKind::Combat, format!("{name} is victorious"));
        }
    }
}

/// Resolve a card from the current player's hand immediately.
pub(crate) fn play_card(
    state: &GameState,
    card_id: &str,
    target: Option<PlayerId>,
    rng: &mut GameRng,
) -> Result<GameState, RejectReason> {
    if state.phase != TurnPhase::Action {
        return Err(RejectReason::WrongPhase);
    }
    let actor_id = state.current_player;
    let actor = state.player(actor_id);
    let card = actor.card_in_hand(card_id).ok_or(RejectReason::CardNotInHand)?.clone();
    castable(state, actor, &card)?;

    let target = match card.effect {
        EffectKind::Damage => match target {
            Some(t) => Some(validate_enemy(state, actor_id, t)?),
            None if card.category == CardCategory::Missile => {
                let enemies: Vec<PlayerId> = state.living_enemies(actor_id).collect();
                Some(*rng.choose(&enemies).ok_or(RejectReason::InvalidTarget)?)
            }
            None => return Err(RejectReason::MissingTarget),
        },
        EffectKind::GoldSteal => {
            let t = target.ok_or(RejectReason::MissingTarget)?;
            Some(validate_enemy(state, actor_id, t)?)
        }
        _ => None,
    };

    if card.effect == EffectKind::Income && actor.lands.len() >= state.settings.max_land_size {
        return Err(RejectReason::LandsFull);
    }

    let mut next = state.clone();
    {
        let actor = next.player_mut(actor_id);
        actor.take_from_hand(card_id);
        pay(actor, &card);
    }
    let actor_name = next.player(actor_id).name.clone();

    match card.effect {
        EffectKind::Damage => {
            // target is always Some for damage
            let t = target.ok_or(RejectReason::MissingTarget)?;
            let amount = next.settings.scale_damage(card.value);
            let target_name = next.player(t).name.clone();
            next.push_log(
                LogKind::Combat,
                format!("{actor_name} strikes {target_name} with {} for {amount}", card.name),
            );
            deal_damage(&mut next, t, amount);
        }
        EffectKind::Heal => {
            next.player_mut(actor_id).heal(card.value);
            next.push_log(LogKind::Magic, format!("{actor_name} casts {} and heals {}", card.name, card.value));
        }
        EffectKind::Mana => {
            next.player_mut(actor_id).restore_mana(card.value);
            next.push_log(LogKind::Magic, format!("{actor_name} channels {} for {} mana", card.name, card.value));
        }
        EffectKind::Income => {
            let value = card.value;
            next.player_mut(actor_id).lands.push_back(card.clone());
            next.push_log(LogKind::Economy, format!("{actor_name} builds {} (+{value} income)", card.name));
        }
        EffectKind::GoldGain => {
            next.player_mut(actor_id).gold += card.value;
            next.push_log(LogKind::Economy, format!("{actor_name} gains {} gold from {}", card.value, card.name));
        }
        EffectKind::GoldSteal => {
            let t = target.ok_or(RejectReason::MissingTarget)?;
            let stolen = next.player(t).gold.min(card.value).max(0);
            next.player_mut(t).gold -= stolen;
            next.player_mut(actor_id).gold += stolen;
            let target_name = next.player(t).name.clone();
            next.push_log(LogKind::Economy, format!("{actor_name} steals {stolen} gold from {target_name}"));
        }
        EffectKind::FullRestoreHp => {
            let actor = next.player_mut(actor_id);
            actor.hp = actor.max_hp;
            next.push_log(LogKind::Magic, format!("{actor_name} is fully healed by {}", card.name));
        }
        EffectKind::FullRestoreMana => {
            let actor = next.player_mut(actor_id);
            actor.mana = actor.max_mana;
            next.push_log(LogKind::Magic, format!("{actor_name} restores all mana with {}", card.name));
        }
        EffectKind::FullRestoreAll => {
            let actor = next.player_mut(actor_id);
            actor.hp = actor.max_hp;
            actor.mana = actor.max_mana;
            next.push_log(LogKind::Magic, format!("{actor_name} is fully restored by {}", card.name));
        }
    }

    next.played_categories.push(card.category);
    record_play(&mut next, actor_id, target, &card);
    next.check_winner();
    Ok(next)
}

/// Pick distinct cards out of a hand, in request order.
fn pick_cards(player: &Player, card_ids: &CardIds) -> Result<Vec<Card>, RejectReason> {
    if card_ids.is_empty() {
        return Err(RejectReason::IncompatibleCard);
    }
    let mut picked: Vec<Card> = Vec::with_capacity(card_ids.len());
    for id in card_ids {
        if picked.iter().any(|c| &c.id == id) {
            return Err(RejectReason::IncompatibleCard);
        }
        let card = player.card_in_hand(id).ok_or(RejectReason::CardNotInHand)?;
        picked.push(card.clone());
    }
    Ok(picked)
}

fn total_costs(cards: &[Card]) -> (i64, i64) {
    cards
        .iter()
        .fold((0, 0), |(mana, hp), c| (mana + c.mana_cost, hp + c.hp_cost()))
}

fn check_total_costs(player: &Player, cards: &[Card]) -> Result<(), RejectReason> {
    let (mana, hp) = total_costs(cards);
    if mana > player.mana {
        return Err(RejectReason::InsufficientMana);
    }
    if hp > 0 && player.hp <= hp {
        return Err(RejectReason::InsufficientHp);
    }
    Ok(())
}

/// Commit attack cards against `target`, opening its defense phase.
pub(crate) fn attack(state: &GameState, card_ids: &CardIds, target: PlayerId) -> Result<GameState, RejectReason> {
    if state.phase != TurnPhase::Action {
        return Err(RejectReason::WrongPhase);
    }
    if state.category_played(CardCategory::Attack) {
        return Err(RejectReason::CategoryAlreadyPlayed);
    }
    let actor_id = state.current_player;
    let target = validate_enemy(state, actor_id, target)?;
    let actor = state.player(actor_id);
    let cards = pick_cards(actor, card_ids)?;
    if !cards.iter().all(Card::is_attack) {
        return Err(RejectReason::IncompatibleCard);
    }
    check_total_costs(actor, &cards)?;

    let mut next = state.clone();
    let damage: i64 = cards.iter().map(|c| next.settings.scale_damage(c.value)).sum();
    {
        let actor = next.player_mut(actor_id);
        for card in &cards {
            actor.take_from_hand(&card.id);
            pay(actor, card);
        }
    }

    let actor_name = next.player(actor_id).name.clone();
    let target_name = next.player(target).name.clone();
    next.push_log(LogKind::Combat, format!("{actor_name} attacks {target_name} for {damage}"));

    next.played_categories.push(CardCategory::Attack);
    record_play(&mut next, actor_id, Some(target), &cards[0]);
    next.pending_attack = Some(PendingAttack {
        attacker: actor_id,
        target,
        damage,
        card_ids: card_ids.clone(),
    });
    next.phase = TurnPhase::Defense;
    Ok(next)
}

fn pending(state: &GameState) -> Result<&PendingAttack, RejectReason> {
    match (&state.pending_attack, state.phase) {
        (Some(attack), TurnPhase::Defense) => Ok(attack),
        _ => Err(RejectReason::NoPendingAttack),
    }
}

fn close_defense(state: &mut GameState) {
    state.pending_attack = None;
    if state.phase == TurnPhase::Defense {
        state.phase = TurnPhase::Action;
    }
}

/// Defender discards defense cards; their value is subtracted from the damage.
pub(crate) fn repel(state: &GameState, card_ids: &CardIds) -> Result<GameState, RejectReason> {
    let attack = pending(state)?.clone();
    let defender = state.player(attack.target);
    let cards = pick_cards(defender, card_ids)?;
    if !cards.iter().all(Card::can_repel) {
        return Err(RejectReason::IncompatibleCard);
    }
    check_total_costs(defender, &cards)?;

    let mut next = state.clone();
    let block: i64 = cards.iter().map(|c| c.value).sum();
    let remaining = (attack.damage - block).max(0);
    {
        let defender = next.player_mut(attack.target);
        for card in &cards {
            defender.take_from_hand(&card.id);
            pay(defender, card);
        }
    }

    let name = next.player(attack.target).name.clone();
    next.push_log(
        LogKind::Defense,
        format!("{name} repels {block} of {} damage, taking {remaining}", attack.damage),
    );
    record_play(&mut next, attack.target, Some(attack.attacker), &cards[0]);
    close_defense(&mut next);
    deal_damage(&mut next, attack.target, remaining);
    Ok(next)
}

/// Defender accepts the full pending damage.
pub(crate) fn take_damage(state: &GameState) -> Result<GameState, RejectReason> {
    let attack = pending(state)?.clone();

    let mut next = state.clone();
    let name = next.player(attack.target).name.clone();
    next.push_log(LogKind::Combat, format!("{name} takes {} damage", attack.damage));
    close_defense(&mut next);
    deal_damage(&mut next, attack.target, attack.damage);
    Ok(next)
}

/// Actions the defender can answer a pending attack with.
pub(crate) fn defense_actions(state: &GameState) -> Vec<Action> {
    let Ok(attack) = pending(state) else {
        return Vec::new();
    };
    let defender = state.player(attack.target);

    let mut actions = vec![Action::TakeDamage];
    for card in defender.hand.iter().filter(|c| c.can_repel()) {
        if affordable(defender, card).is_ok() {
            actions.push(Action::repel(card.id.clone()));
        }
    }
    actions
}
