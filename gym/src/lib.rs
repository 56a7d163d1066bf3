//! Snake Gym - A benchmarking framework for snake autopilot agents

pub mod agents;
pub mod runner;
pub mod stats;

pub use agents::{GreedyAgent, RandomAgent};
pub use lib::{Agent, Autopilot};
pub use runner::{GameConfig, run_batch, run_batch_parallel, run_game};
pub use stats::{AgentStats, ComparisonStats, GameResult};
