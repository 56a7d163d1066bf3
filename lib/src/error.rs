use thiserror::Error;

use crate::grid::Cell;

/// Invalid session or grid configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 cells, got {width}x{height}")]
    ZeroSized { width: i32, height: i32 },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("start cell {start} lies outside the {width}x{height} grid")]
    StartOutOfBounds { start: Cell, width: i32, height: i32 },
    #[error("a grid of {cells} cells leaves no room for food")]
    NoRoomForFood { cells: usize },
}

/// Food could not be placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoodError {
    /// The snake covers every cell of the grid.
    #[error("no free cell left on a grid of {cells} cells")]
    GridFull { cells: usize },
}
