mod greedy_agent;
mod random_agent;

pub use greedy_agent::GreedyAgent;
pub use lib::{Agent, Autopilot};
pub use random_agent::RandomAgent;
