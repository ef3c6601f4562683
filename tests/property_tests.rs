//! Property tests: state invariants hold along random legal play.

use proptest::prelude::*;

use card_conquest::core::{Action, GameRng, GameSettings, GameState, Nation, PlayerSetup};
use card_conquest::games::GameEngine;
use card_conquest::rules::RulesEngine;

fn nation() -> impl Strategy<Value = Nation> {
    prop::sample::select(Nation::ALL.to_vec())
}

fn settings() -> impl Strategy<Value = GameSettings> {
    (1usize..4, 2usize..8, 1usize..5, 0u32..4, 0.5f64..2.0, 0.5f64..2.0).prop_map(
        |(cards_per_turn, max_hand, max_lands, events, damage, price)| {
            GameSettings::default()
                .with_cards_per_turn(cards_per_turn)
                .with_max_hand_size(max_hand)
                .with_max_land_size(max_lands)
                .with_event_frequency(events)
                .with_multipliers(1.0, damage, price)
        },
    )
}

fn check_bounds(state: &GameState) -> Result<(), TestCaseError> {
    for p in state.players.iter() {
        prop_assert!(0 <= p.hp && p.hp <= p.max_hp, "hp {} / {}", p.hp, p.max_hp);
        prop_assert!(0 <= p.mana && p.mana <= p.max_mana, "mana {} / {}", p.mana, p.max_mana);
        prop_assert!(p.hand.len() <= state.settings.max_hand_size);
        prop_assert!(p.lands.len() <= state.settings.max_land_size);
        prop_assert!(p.gold >= 0);
        prop_assert!(p.deposit >= 0);
        prop_assert_eq!(p.is_dead, p.hp == 0);
    }
    prop_assert!(state.log.len() <= 50);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_bounds_hold_along_random_play(
        nations in prop::collection::vec(nation(), 2..5),
        settings in settings(),
        seed in any::<u64>(),
        steps in 20usize..200,
    ) {
        let engine = GameEngine::new();
        let players: Vec<PlayerSetup> = nations
            .iter()
            .enumerate()
            .map(|(i, &n)| PlayerSetup::bot(format!("p{i}"), n))
            .collect();
        let mut rng = GameRng::new(seed);
        let mut state = engine.create_initial_state(&players, &settings, &mut rng);
        check_bounds(&state)?;

        for _ in 0..steps {
            let actions = engine.legal_actions(&state);
            let Some(action) = rng.choose(&actions).cloned() else {
                break;
            };
            state = engine.apply(&state, &action, &mut rng).or_unchanged(&state);
            check_bounds(&state)?;

            // Bank moves are not enumerated; mix some in.
            if rng.gen_bool(0.2) {
                let gold = state.current().gold;
                state = engine.handle_bank_transaction(&state, gold / 2);
                check_bounds(&state)?;
            }
        }
    }

    #[test]
    fn prop_turn_rotation_lands_on_living_player(
        count in 2usize..6,
        dead_mask in any::<u8>(),
        seed in any::<u64>(),
    ) {
        let engine = GameEngine::new();
        let players: Vec<PlayerSetup> = (0..count)
            .map(|i| PlayerSetup::bot(format!("p{i}"), Nation::Kingdom))
            .collect();
        let settings = GameSettings::default().with_event_frequency(0);
        let mut rng = GameRng::new(seed);
        let mut state = engine.create_initial_state(&players, &settings, &mut rng);

        // Keep seat 0 alive so there is always somewhere to land.
        for i in 1..count {
            if dead_mask & (1 << i) != 0 {
                let player = state.player_mut(card_conquest::PlayerId::new(i as u8));
                player.is_dead = true;
                player.hp = 0;
            }
        }

        for _ in 0..count * 2 {
            let before = state.current_player.index();
            let turn = state.turn;
            state = engine.next_turn(&state, &mut rng);
            let after = state.current_player.index();

            prop_assert!(state.current().is_alive());
            let wrapped = after <= before;
            prop_assert_eq!(state.turn, if wrapped { turn + 1 } else { turn });
        }
    }

    #[test]
    fn prop_rejected_actions_leave_state_unchanged(
        seed in any::<u64>(),
        card in "[a-z_]{1,12}#[0-9]{1,3}",
    ) {
        let engine = GameEngine::new();
        let players = [PlayerSetup::bot("a", Nation::Kingdom), PlayerSetup::bot("b", Nation::Theocracy)];
        let mut rng = GameRng::new(seed);
        let state = engine.create_initial_state(&players, &GameSettings::default(), &mut rng);
        let in_hand = state.current().card_in_hand(&card).is_some();
        let in_shop = state.shop.iter().any(|c| c.id == card);
        prop_assume!(!in_hand && !in_shop);

        prop_assert_eq!(engine.execute_card_effect(&state, &card, None, &mut rng), state.clone());
        prop_assert_eq!(engine.buy_card(&state, &card), state.clone());
        prop_assert_eq!(engine.sell_card(&state, &card), state.clone());
        let outcome = engine.apply(&state, &Action::play(card, None), &mut rng);
        prop_assert!(!outcome.is_applied());
    }
}
