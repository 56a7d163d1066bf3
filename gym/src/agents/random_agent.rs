use lib::{Agent, Board, Direction};
use rand::seq::IndexedRandom;

/// A simple agent that picks a random safe move each tick.
/// Useful as a baseline for benchmarking.
pub struct RandomAgent {
    name: String,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_direction(&self, board: &Board<'_>) -> Direction {
        let head = board.snake.head();
        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| board.grid.is_safe(head.shifted(direction), board.snake))
            .collect();

        // Last resort: same forced move as the autopilot
        safe.choose(&mut rand::rng())
            .copied()
            .unwrap_or(lib::fallback::DEFAULT_DIRECTION)
    }
}
