use crate::fallback;
use crate::grid::{Cell, Direction, Grid};
use crate::pathfinder;
use crate::snake::Snake;

/// Read-only view of a running session handed to agents.
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    pub grid: &'a Grid,
    pub snake: &'a Snake,
    pub food: Cell,
}

/// Trait that defines a snake agent's decision-making interface.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Choose the direction the head moves this tick.
    fn choose_direction(&self, board: &Board<'_>) -> Direction;

    /// Optional: Reset any internal state between sessions.
    fn reset(&mut self) {}
}

impl Agent for Box<dyn Agent> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_direction(&self, board: &Board<'_>) -> Direction {
        (**self).choose_direction(board)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// First step of a shortest path of `length` cells.
    Path { length: usize },
    /// No route to the food; picked by the fallback policy.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub direction: Direction,
    pub source: PlanSource,
}

/// A* towards the food, falling back to the first safe neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn plan(&self, board: &Board<'_>) -> Plan {
        let search = pathfinder::search(board.grid, board.snake.head(), board.food, board.snake);
        match search.first_step() {
            Some(direction) => Plan {
                direction,
                source: PlanSource::Path {
                    length: search.path.len(),
                },
            },
            None => Plan {
                direction: fallback::choose(board.grid, board.snake),
                source: PlanSource::Fallback,
            },
        }
    }
}

impl Agent for Autopilot {
    fn name(&self) -> &str {
        "Autopilot"
    }

    fn choose_direction(&self, board: &Board<'_>) -> Direction {
        self.plan(board).direction
    }
}
