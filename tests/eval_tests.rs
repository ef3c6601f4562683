//! Evaluation tests: heuristic bounds, terminal values and weights loading.

use card_conquest::cards::CardCatalog;
use card_conquest::core::{GameRng, GameSettings, GameState, Nation, Player, PlayerId, PlayerSetup};
use card_conquest::eval::{Evaluation, Evaluator, HeuristicEvaluator, HeuristicWeights};
use card_conquest::games::GameEngine;
use card_conquest::nn::{ConquestEncoder, StateEncoder, WeightsDocument, WeightsError, INPUT_SIZE};
use card_conquest::rules::RulesEngine;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn table(nations: &[Nation]) -> GameState {
    let settings = GameSettings::default();
    let players = nations
        .iter()
        .enumerate()
        .map(|(i, &n)| Player::new(PlayerId::new(i as u8), &PlayerSetup::bot(format!("p{i}"), n), &settings))
        .collect();
    GameState::new(players, settings)
}

/// Model whose output ignores its input: `tanh(bias)`.
fn bias_only_weights(bias: f32) -> String {
    let mut doc = WeightsDocument::constant(4, 2, 0.0);
    doc.value_out.bias[0] = bias;
    doc.to_json().expect("serializable")
}

// =============================================================================
// Terminal Values
// =============================================================================

#[test]
fn test_dead_perspective_scores_minus_one() {
    let mut state = table(&[Nation::Kingdom, Nation::Republic]);
    state.player_mut(P0).is_dead = true;
    state.player_mut(P0).hp = 0;

    assert_eq!(HeuristicEvaluator::new().evaluate(&state, P0), -1.0);
    let learned = Evaluation::with_weights(&bias_only_weights(0.3)).expect("valid");
    assert_eq!(learned.evaluate(&state, P0), -1.0);
}

#[test]
fn test_last_standing_scores_plus_one() {
    let mut state = table(&[Nation::Kingdom, Nation::Republic, Nation::Khanate]);
    state.player_mut(P1).is_dead = true;
    state.player_mut(P2).is_dead = true;

    assert_eq!(HeuristicEvaluator::new().evaluate(&state, P0), 1.0);
    let learned = Evaluation::with_weights(&bias_only_weights(-0.3)).expect("valid");
    assert_eq!(learned.evaluate(&state, P0), 1.0);
}

// =============================================================================
// Heuristic
// =============================================================================

#[test]
fn test_heuristic_bounded_over_play() {
    let engine = GameEngine::new();
    let eval = HeuristicEvaluator::new();
    let players = [PlayerSetup::bot("a", Nation::Theocracy), PlayerSetup::bot("b", Nation::Khanate)];
    let mut rng = GameRng::new(21);
    let mut state = engine.create_initial_state(&players, &GameSettings::default(), &mut rng);

    for _ in 0..200 {
        for id in [P0, P1] {
            let score = eval.evaluate(&state, id);
            assert!((-1.0..=1.0).contains(&score), "score {score} out of range");
        }
        let actions = engine.legal_actions(&state);
        let Some(action) = rng.choose(&actions).cloned() else {
            break;
        };
        state = engine.apply(&state, &action, &mut rng).or_unchanged(&state);
    }
}

#[test]
fn test_heuristic_rewards_artifacts() {
    let mut state = table(&[Nation::Kingdom, Nation::Republic]);
    let eval = HeuristicEvaluator::new();
    let before = eval.evaluate(&state, P0);

    let relic = CardCatalog::standard()
        .get("ancient_relic")
        .expect("standard card")
        .instantiate("ancient_relic#1".into());
    state.player_mut(P0).hand.push_back(relic);

    let after = eval.evaluate(&state, P0);
    assert!((after - before - 0.02).abs() < 1e-9);
}

#[test]
fn test_heuristic_custom_weights() {
    let mut state = table(&[Nation::Kingdom, Nation::Kingdom]);
    state.player_mut(P1).hp = 60;
    let hp_only = HeuristicEvaluator::with_weights(HeuristicWeights {
        hp_advantage: 1.0,
        mana: 0.0,
        gold: 0.0,
        income: 0.0,
        artifact: 0.0,
        stalemate_penalty: 0.0,
        ..HeuristicWeights::default()
    });

    // (120 - 60) / 120
    assert!((hp_only.evaluate(&state, P0) - 0.5).abs() < 1e-9);
    assert!((hp_only.evaluate(&state, P1) + 0.5).abs() < 1e-9);
}

// =============================================================================
// Learned Evaluation
// =============================================================================

#[test]
fn test_evaluation_without_model_uses_heuristic() {
    let mut state = table(&[Nation::Kingdom, Nation::Republic]);
    state.player_mut(P1).hp = 30;
    let evaluation = Evaluation::new();

    assert!(!evaluation.has_model());
    assert_eq!(evaluation.evaluate(&state, P0), HeuristicEvaluator::new().evaluate(&state, P0));
}

#[test]
fn test_loaded_model_drives_evaluation() {
    let state = table(&[Nation::Kingdom, Nation::Republic]);
    let mut evaluation = Evaluation::new();
    evaluation.load_weights(&bias_only_weights(0.5)).expect("valid");

    assert!(evaluation.has_model());
    let expected = f64::from(0.5f32.tanh());
    assert!((evaluation.evaluate(&state, P0) - expected).abs() < 1e-6);
}

#[test]
fn test_malformed_weights_keep_previous_model() {
    let state = table(&[Nation::Kingdom, Nation::Republic]);
    let mut evaluation = Evaluation::with_weights(&bias_only_weights(0.5)).expect("valid");
    let before = evaluation.evaluate(&state, P0);

    assert!(matches!(evaluation.load_weights("{ not json"), Err(WeightsError::Parse(_))));

    let mut wrong_shape = WeightsDocument::constant(4, 2, 0.1);
    wrong_shape.blocks.truncate(1);
    let json = serde_json::to_string(&wrong_shape).expect("serializable");
    assert!(matches!(evaluation.load_weights(&json), Err(WeightsError::BlockCount { .. })));

    assert!(evaluation.has_model());
    assert_eq!(evaluation.evaluate(&state, P0), before);
}

#[test]
fn test_malformed_weights_without_model_stay_heuristic() {
    let state = table(&[Nation::Kingdom, Nation::Republic]);
    let mut evaluation = Evaluation::new();

    assert!(evaluation.load_weights("[]").is_err());
    assert!(!evaluation.has_model());
    assert_eq!(evaluation.evaluate(&state, P0), HeuristicEvaluator::new().evaluate(&state, P0));
}

#[test]
fn test_non_finite_weights_rejected() {
    let mut doc = WeightsDocument::constant(4, 2, 0.1);
    doc.input.bias[0] = f32::NAN;
    let mut evaluation = Evaluation::new();
    assert!(matches!(evaluation.load_document(&doc), Err(WeightsError::NonFinite { .. })));
    assert!(!evaluation.has_model());
}

#[test]
fn test_missing_weights_file() {
    let mut evaluation = Evaluation::new();
    let err = evaluation.load_weights_file("/nonexistent/weights.json").unwrap_err();
    assert!(matches!(err, WeightsError::Io(_)));
}

#[test]
fn test_clear_weights() {
    let mut evaluation = Evaluation::with_weights(&bias_only_weights(0.5)).expect("valid");
    evaluation.clear_weights();
    assert!(!evaluation.has_model());
}

// =============================================================================
// Encoder
// =============================================================================

#[test]
fn test_encoder_features_in_unit_range() {
    let engine = GameEngine::new();
    let players = [PlayerSetup::bot("a", Nation::Republic), PlayerSetup::bot("b", Nation::Kingdom)];
    let state = engine.create_initial_state(&players, &GameSettings::default(), &mut GameRng::new(2));
    let encoder = ConquestEncoder::new();

    let encoded = encoder.encode(&state, P0);
    assert_eq!(encoded.shape, vec![INPUT_SIZE]);
    assert!(encoded.tensor.iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(&encoded.tensor[6..], &[0.0, 1.0, 0.0, 0.0]);
    // Full health, one starting card out of ten.
    assert_eq!(encoded.tensor[0], 1.0);
    assert!((encoded.tensor[4] - 0.1).abs() < 1e-6);
}
