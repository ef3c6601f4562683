//! Self-play loop for generating training data.
//!
//! Bots play full matches against each other with MCTS; every searched
//! decision becomes a `TrainingRecord`. When the search reports no action
//! the engine's forced action keeps the game moving.

use crate::core::{GameRng, GameSettings, GameState, PlayerId, PlayerSetup};
use crate::eval::Evaluation;
use crate::games::GameEngine;
use crate::mcts::{MCTSConfig, MCTSSearch};
use crate::rules::{ActionOutcome, GameResult, RulesEngine};

use super::export::TrainingLog;
use super::record::TrainingRecord;

/// Configuration for self-play.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// MCTS iterations per move. `None` uses the settings' bot difficulty.
    pub iterations: Option<u32>,

    /// Maximum actions per game (to prevent endless games).
    pub max_moves: usize,

    pub exploration_constant: f64,

    /// Seed offset (combined with the game seed).
    pub seed_offset: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            max_moves: 500,
            exploration_constant: MCTSConfig::default().exploration_constant,
            seed_offset: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    #[must_use]
    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    #[must_use]
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }
}

/// Result of one self-play game.
#[derive(Clone, Debug)]
pub struct GameSummary {
    pub game_id: String,
    /// `None` if the move limit was hit first.
    pub result: Option<GameResult>,
    pub moves: usize,
    pub final_state: GameState,
    pub records: Vec<TrainingRecord>,
}

/// Worker for running self-play games.
pub struct SelfPlayWorker {
    engine: GameEngine,
    evaluation: Evaluation,
    config: SelfPlayConfig,
}

impl SelfPlayWorker {
    pub fn new(engine: GameEngine, evaluation: Evaluation, config: SelfPlayConfig) -> Self {
        Self {
            engine,
            evaluation,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play a single game.
    pub fn play_game(&self, players: &[PlayerSetup], settings: &GameSettings, game_id: &str, seed: u64) -> GameSummary {
        let seed = seed.wrapping_add(self.config.seed_offset);
        let mut rng = GameRng::new(seed);
        let mut state = self.engine.create_initial_state(players, settings, &mut rng);
        let mut bot_rng = rng.fork();
        let iterations = self
            .config
            .iterations
            .unwrap_or_else(|| settings.bot_difficulty.iterations());

        let mut records = Vec::new();
        let mut moves = 0;

        while moves < self.config.max_moves && self.engine.result(&state).is_none() {
            let actor = self.engine.actor(&state);
            let mcts_config = MCTSConfig::default()
                .with_exploration(self.config.exploration_constant)
                .with_seed(bot_rng.next_seed());
            let mut search = MCTSSearch::new(&self.engine, &self.evaluation, mcts_config);
            let (action, result) = search.decide(&state, iterations);

            if result.action.is_some() {
                records.push(TrainingRecord::new(game_id, &state, actor, &result.policy, result.value, &action));
            }

            state = match self.engine.apply(&state, &action, &mut rng) {
                ActionOutcome::Applied(next) => next,
                ActionOutcome::Rejected(reason) => {
                    log::warn!("{game_id}: {action} rejected ({reason}), forcing a transition");
                    let forced = self.engine.forced_action(&state);
                    match self.engine.apply(&state, &forced, &mut rng) {
                        ActionOutcome::Applied(next) => next,
                        ActionOutcome::Rejected(_) => break,
                    }
                }
            };
            moves += 1;
        }

        let result = self.engine.result(&state);
        for record in &mut records {
            record.outcome = Some(outcome_for(result.as_ref(), record.player));
        }
        log::debug!("{game_id}: finished after {moves} moves with {result:?}");

        GameSummary {
            game_id: game_id.to_string(),
            result,
            moves,
            final_state: state,
            records,
        }
    }

    /// Play `count` games, collecting every record.
    pub fn play_games(&self, count: usize, players: &[PlayerSetup], settings: &GameSettings, seed: u64) -> TrainingLog {
        let mut log = TrainingLog::new();
        for i in 0..count {
            let game_id = format!("game-{seed}-{i}");
            let summary = self.play_game(players, settings, &game_id, seed.wrapping_add(i as u64 * 7919));
            log.extend(summary.records);
        }
        log
    }
}

/// Unfinished games score 0 like a draw.
fn outcome_for(result: Option<&GameResult>, player: PlayerId) -> f64 {
    result.map_or(0.0, |r| r.score_for(player))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_for() {
        let win = GameResult::Winner(PlayerId::new(1));
        assert_eq!(outcome_for(Some(&win), PlayerId::new(1)), 1.0);
        assert_eq!(outcome_for(Some(&win), PlayerId::new(0)), -1.0);
        assert_eq!(outcome_for(Some(&GameResult::Draw), PlayerId::new(0)), 0.0);
        assert_eq!(outcome_for(None, PlayerId::new(0)), 0.0);
    }

    #[test]
    fn test_config_builder() {
        let config = SelfPlayConfig::new().with_iterations(5).with_max_moves(10).with_seed_offset(3);
        assert_eq!(config.iterations, Some(5));
        assert_eq!(config.max_moves, 10);
        assert_eq!(config.seed_offset, 3);
    }
}
