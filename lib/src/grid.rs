use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;
use crate::snake::Snake;

/// A grid-aligned coordinate in cell units. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`. May leave the grid.
    pub fn shifted(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Fixed preference order used when scanning for a safe move.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// Direction of travel from `from` towards `to`.
    ///
    /// The horizontal axis is checked first, so for non-adjacent cells this is
    /// only the dominant step. Returns `None` when the cells are equal.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        if to.x < from.x {
            Some(Direction::Left)
        } else if to.x > from.x {
            Some(Direction::Right)
        } else if to.y < from.y {
            Some(Direction::Up)
        } else if to.y > from.y {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// A finite `width` x `height` lattice with hard walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

/// The reference game: a 400x400 surface of 20px cells.
impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
        }
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::ZeroSized { width, height });
        }
        Ok(Self { width, height })
    }

    /// Derives the grid from a drawing surface measured in pixels.
    pub fn from_surface(width_px: u32, height_px: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let width = i32::try_from(width_px / cell_size).unwrap_or(i32::MAX);
        let height = i32::try_from(height_px / cell_size).unwrap_or(i32::MAX);
        Self::new(width, height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn is_occupied(&self, cell: Cell, snake: &Snake) -> bool {
        snake.contains(cell)
    }

    /// In bounds and not covered by any part of the snake, tail included.
    pub fn is_safe(&self, cell: Cell, snake: &Snake) -> bool {
        self.in_bounds(cell) && !self.is_occupied(cell, snake)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::new(10, 8).unwrap();
        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(9, 7)));
        assert!(!grid.in_bounds(Cell::new(10, 7)));
        assert!(!grid.in_bounds(Cell::new(9, 8)));
        assert!(!grid.in_bounds(Cell::new(-1, 3)));
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(ConfigError::ZeroSized { width: 0, height: 5 })
        );
        assert_eq!(Grid::from_surface(400, 400, 0), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn test_from_surface() {
        let grid = Grid::from_surface(400, 300, 20).unwrap();
        assert_eq!((grid.width(), grid.height()), (20, 15));
        assert_eq!(grid.area(), 300);
    }

    #[test]
    fn test_occupancy() {
        let grid = Grid::new(10, 10).unwrap();
        let snake = Snake::from_cells([Cell::new(2, 2), Cell::new(2, 3)]);
        assert!(grid.is_occupied(Cell::new(2, 3), &snake));
        assert!(!grid.is_occupied(Cell::new(3, 3), &snake));
        assert!(!grid.is_safe(Cell::new(2, 2), &snake));
        assert!(!grid.is_safe(Cell::new(-1, 0), &snake));
        assert!(grid.is_safe(Cell::new(1, 2), &snake));
    }

    #[test]
    fn test_direction_between() {
        let from = Cell::new(5, 5);
        assert_eq!(Direction::between(from, Cell::new(4, 5)), Some(Direction::Left));
        assert_eq!(Direction::between(from, Cell::new(6, 5)), Some(Direction::Right));
        assert_eq!(Direction::between(from, Cell::new(5, 4)), Some(Direction::Up));
        assert_eq!(Direction::between(from, Cell::new(5, 6)), Some(Direction::Down));
        assert_eq!(Direction::between(from, from), None);
    }

    #[test]
    fn test_shifted_round_trips_through_between() {
        let from = Cell::new(3, 3);
        for direction in Direction::ALL {
            assert_eq!(Direction::between(from, from.shifted(direction)), Some(direction));
        }
    }

    #[test]
    fn test_cells_covers_grid() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(2, 1));
    }
}
