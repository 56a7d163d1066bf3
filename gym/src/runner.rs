use lib::{Agent, ConfigError, Grid, Session, SessionConfig, StepOutcome};

use crate::stats::GameResult;

/// Configuration shared by every game of a batch
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Games still running after this many ticks are cut off
    pub max_ticks: u64,
    /// Base seed; game `i` uses `seed + i`. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            max_ticks: 10_000,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn square(size: i32) -> Self {
        Self {
            width: size,
            height: size,
            ..Default::default()
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Session config for the `game`-th game of a batch
    pub fn session_config(&self, game: u64) -> Result<SessionConfig, ConfigError> {
        let grid = Grid::new(self.width, self.height)?;
        let config = SessionConfig::new(grid);
        let config = match self.seed {
            Some(seed) => config.with_seed(seed.wrapping_add(game)),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Plays one session to the end with `agent` steering
pub fn run_game(
    agent: &dyn Agent,
    config: &GameConfig,
    game: u64,
) -> Result<GameResult, ConfigError> {
    let mut session = Session::new(config.session_config(game)?)?;

    while session.ticks() < config.max_ticks {
        if let StepOutcome::Over(termination) = session.step_with(agent) {
            return Ok(GameResult::ended(agent.name(), termination));
        }
    }

    Ok(GameResult::cut_off(
        agent.name(),
        session.score(),
        session.ticks(),
        session.snake().len(),
    ))
}

/// Run multiple games and collect results
pub fn run_batch(
    agent: &dyn Agent,
    config: &GameConfig,
    num_games: usize,
) -> Result<Vec<GameResult>, ConfigError> {
    (0..num_games as u64)
        .map(|game| run_game(agent, config, game))
        .collect()
}

/// Run multiple games in parallel
pub fn run_batch_parallel(
    agent: &dyn Agent,
    config: &GameConfig,
    num_games: usize,
) -> Result<Vec<GameResult>, ConfigError> {
    use rayon::prelude::*;

    (0..num_games as u64)
        .into_par_iter()
        .map(|game| run_game(agent, config, game))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{Autopilot, GreedyAgent, RandomAgent};
    use crate::stats::AgentStats;
    use lib::Cause;

    #[test]
    fn test_autopilot_scores_on_small_grid() {
        let config = GameConfig::square(8).with_seed(Some(5));
        let result = run_game(&Autopilot, &config, 0).unwrap();
        assert!(result.score > 0, "autopilot should eat at least once");
        assert_eq!(result.length, result.score as usize + 1);
    }

    #[test]
    fn test_tick_limit_cuts_games_off() {
        let config = GameConfig::square(20).with_seed(Some(1)).with_max_ticks(3);
        let result = run_game(&GreedyAgent::new(), &config, 0).unwrap();
        assert_eq!(result.ticks, 3);
        assert_eq!(result.cause, None);
    }

    #[test]
    fn test_every_game_ends_or_is_cut_off() {
        let config = GameConfig::square(6).with_max_ticks(2_000);
        let results = run_batch_parallel(&RandomAgent::new(), &config, 8).unwrap();
        assert_eq!(results.len(), 8);
        for result in results {
            assert!(result.cause.is_some() || result.ticks == 2_000);
            assert!(!matches!(result.cause, Some(Cause::GridFilled)) || result.length == 36);
        }
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let config = GameConfig::square(10).with_seed(Some(99)).with_max_ticks(500);
        let a = run_batch(&Autopilot, &config, 3).unwrap();
        let b = run_batch_parallel(&Autopilot, &config, 3).unwrap();
        let scores = |results: &[GameResult]| results.iter().map(|r| (r.score, r.ticks)).collect::<Vec<_>>();
        assert_eq!(scores(&a), scores(&b));
    }

    #[test]
    fn test_agent_name_reaches_stats() {
        let config = GameConfig::square(6).with_seed(Some(2)).with_max_ticks(50);
        let agent = GreedyAgent::new();
        let results = run_batch(&agent, &config, 2).unwrap();
        assert!(results.iter().all(|r| r.agent == "Greedy"));
        let stats = AgentStats::from_results(agent.name(), &results);
        assert_eq!(stats.name, "Greedy");
        assert_eq!(stats.games, 2);
    }

    #[test]
    fn test_invalid_grid_is_reported() {
        let config = GameConfig::square(0);
        assert!(matches!(
            run_game(&Autopilot, &config, 0),
            Err(ConfigError::ZeroSized { .. })
        ));
    }
}
