use lib::{Agent, Board, Direction};

/// Steps to whichever safe neighbor is closest to the food as the crow flies,
/// without searching. Walks into dead ends the autopilot would route around.
pub struct GreedyAgent {
    name: String,
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self {
            name: "Greedy".to_string(),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_direction(&self, board: &Board<'_>) -> Direction {
        let head = board.snake.head();
        let mut best: Option<(u32, Direction)> = None;

        // Strict comparison keeps the earliest of equally close moves
        for direction in Direction::ALL {
            let next = head.shifted(direction);
            if !board.grid.is_safe(next, board.snake) {
                continue;
            }
            let distance = next.manhattan_distance(board.food);
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, direction));
            }
        }

        best.map(|(_, direction)| direction)
            .unwrap_or(lib::fallback::DEFAULT_DIRECTION)
    }
}
