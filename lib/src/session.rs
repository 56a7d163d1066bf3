use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::agent::{Agent, Autopilot, Board};
use crate::error::ConfigError;
use crate::food::spawn_food;
use crate::grid::{Cell, Direction, Grid};
use crate::snake::Snake;

/// Start cell of the reference game.
pub const DEFAULT_START: Cell = Cell::new(9, 9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub grid: Grid,
    pub start: Cell,
    /// Seed for food placement. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            start: DEFAULT_START,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Config for `grid` with the start cell clamped into it.
    pub fn new(grid: Grid) -> Self {
        let start = Cell::new(
            DEFAULT_START.x.min(grid.width() - 1),
            DEFAULT_START.y.min(grid.height() - 1),
        );
        Self {
            grid,
            start,
            seed: None,
        }
    }

    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = start;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid.in_bounds(self.start) {
            return Err(ConfigError::StartOutOfBounds {
                start: self.start,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }
        if self.grid.area() < 2 {
            return Err(ConfigError::NoRoomForFood {
                cells: self.grid.area(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cause {
    Wall,
    SelfCollision,
    /// The snake covers every cell, no food can be placed.
    GridFilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub cause: Cause,
    pub score: u32,
    pub ticks: u64,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Terminated(Termination),
}

/// Fire-and-forget notifications for audio and other observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    FoodEaten { score: u32 },
    GameOver(Termination),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { direction: Direction, head: Cell },
    /// The head landed on the food; the snake grew and food moved.
    Ate {
        direction: Direction,
        head: Cell,
        score: u32,
    },
    /// The session is over. Returned again on every later call.
    Over(Termination),
}

impl StepOutcome {
    pub fn event(&self) -> Option<Event> {
        match *self {
            StepOutcome::Moved { .. } => None,
            StepOutcome::Ate { score, .. } => Some(Event::FoodEaten { score }),
            StepOutcome::Over(termination) => Some(Event::GameOver(termination)),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, StepOutcome::Over(_))
    }
}

/// Serializable read-only copy of the state for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub ticks: u64,
    pub direction: Option<Direction>,
    pub phase: Phase,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    snake: Snake,
    food: Cell,
    score: u32,
    ticks: u64,
    /// Last applied move, for display only.
    direction: Option<Direction>,
    phase: Phase,
    rng: StdRng,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let snake = Snake::new(config.start);
        let food = spawn_food(&config.grid, &snake, &mut rng).map_err(|_| {
            ConfigError::NoRoomForFood {
                cells: config.grid.area(),
            }
        })?;
        debug!(start = %config.start, %food, "session created");
        Ok(Self {
            config,
            grid: config.grid,
            snake,
            food,
            score: 0,
            ticks: 0,
            direction: None,
            phase: Phase::Running,
            rng,
        })
    }

    /// Starts from an arbitrary position, e.g. a recorded one or a test fixture.
    ///
    /// `food` must not lie on `snake`.
    pub fn from_state(grid: Grid, snake: Snake, food: Cell, seed: u64) -> Self {
        debug_assert!(!snake.contains(food), "food placed on the snake");
        let config = SessionConfig {
            grid,
            start: snake.head(),
            seed: Some(seed),
        };
        Self {
            config,
            grid,
            snake,
            food,
            score: 0,
            ticks: 0,
            direction: None,
            phase: Phase::Running,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Throws the current game away and starts over from the configured start
    /// cell. The RNG keeps running, so food positions differ between games.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.config.start);
        self.score = 0;
        self.ticks = 0;
        self.direction = None;
        self.phase = Phase::Running;
        match spawn_food(&self.grid, &self.snake, &mut self.rng) {
            Ok(food) => {
                self.food = food;
                debug!(%food, "session restarted");
            }
            Err(err) => {
                debug!(%err, "cannot place food after restart");
                self.terminate(Cause::GridFilled);
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn board(&self) -> Board<'_> {
        Board {
            grid: &self.grid,
            snake: &self.snake,
            food: self.food,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            snake: self.snake.to_vec(),
            food: self.food,
            score: self.score,
            ticks: self.ticks,
            direction: self.direction,
            phase: self.phase,
        }
    }

    /// Wall or self collision of the current head, if any.
    pub fn collision(&self) -> Option<Cause> {
        let head = self.snake.head();
        if !self.grid.in_bounds(head) {
            Some(Cause::Wall)
        } else if self.snake.body_contains(head) {
            Some(Cause::SelfCollision)
        } else {
            None
        }
    }

    pub fn step(&mut self) -> StepOutcome {
        self.step_with(&Autopilot)
    }

    pub fn step_with(&mut self, agent: &dyn Agent) -> StepOutcome {
        if let Phase::Terminated(termination) = self.phase {
            return StepOutcome::Over(termination);
        }
        if let Some(cause) = self.collision() {
            return StepOutcome::Over(self.terminate(cause));
        }

        let direction = agent.choose_direction(&self.board());
        let head = self.snake.head().shifted(direction);
        self.ticks += 1;
        self.direction = Some(direction);

        if head != self.food {
            self.snake.advance(head, false);
            trace!(%direction, %head, "moved");
            return StepOutcome::Moved { direction, head };
        }

        self.score += 1;
        self.snake.advance(head, true);
        match spawn_food(&self.grid, &self.snake, &mut self.rng) {
            Ok(food) => {
                self.food = food;
                debug!(score = self.score, %food, "food eaten");
                StepOutcome::Ate {
                    direction,
                    head,
                    score: self.score,
                }
            }
            Err(err) => {
                debug!(%err, "cannot place food");
                StepOutcome::Over(self.terminate(Cause::GridFilled))
            }
        }
    }

    fn terminate(&mut self, cause: Cause) -> Termination {
        let termination = Termination {
            cause,
            score: self.score,
            ticks: self.ticks,
            length: self.snake.len(),
        };
        self.phase = Phase::Terminated(termination);
        info!(?cause, score = self.score, ticks = self.ticks, "game over");
        termination
    }
}
