pub mod agent;
pub mod error;
pub mod fallback;
pub mod food;
pub mod grid;
pub mod pathfinder;
pub mod session;
pub mod snake;

pub use agent::{Agent, Autopilot, Board, Plan, PlanSource};
pub use error::{ConfigError, FoodError};
pub use grid::{Cell, Direction, Grid};
pub use pathfinder::find_path;
pub use session::{
    Cause, Event, Phase, Session, SessionConfig, Snapshot, StepOutcome, Termination,
};
pub use snake::Snake;
