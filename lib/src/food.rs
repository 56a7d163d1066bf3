use rand::Rng;
use tracing::debug;

use crate::error::FoodError;
use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Rejection-sampling attempts per grid cell before switching to an exhaustive
/// scan of the free cells.
const ATTEMPTS_PER_CELL: usize = 4;

/// Picks a uniformly random in-bounds cell not covered by `snake`.
///
/// Fails with [`FoodError::GridFull`] when the snake covers the whole grid.
pub fn spawn_food<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Result<Cell, FoodError> {
    let cells = grid.area();
    if snake.len() >= cells {
        return Err(FoodError::GridFull { cells });
    }

    for _ in 0..cells * ATTEMPTS_PER_CELL {
        let candidate = Cell::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if !snake.contains(candidate) {
            return Ok(candidate);
        }
    }

    // Crowded grid: sample from what is left instead.
    let free: Vec<Cell> = grid.cells().filter(|&cell| !snake.contains(cell)).collect();
    debug!(free = free.len(), "sampling food from remaining free cells");
    if free.is_empty() {
        return Err(FoodError::GridFull { cells });
    }
    Ok(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_avoids_snake() {
        let grid = Grid::new(4, 4).unwrap();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let food = spawn_food(&grid, &snake, &mut rng).unwrap();
            assert!(grid.in_bounds(food));
            assert!(!snake.contains(food));
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let grid = Grid::new(3, 1).unwrap();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawn_food(&grid, &snake, &mut rng), Ok(Cell::new(2, 0)));
    }

    #[test]
    fn test_full_grid_is_an_error() {
        let grid = Grid::new(2, 1).unwrap();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            spawn_food(&grid, &snake, &mut rng),
            Err(FoodError::GridFull { cells: 2 })
        );
    }

    #[test]
    fn test_seeded_placement_is_deterministic() {
        let grid = Grid::new(20, 20).unwrap();
        let snake = Snake::new(Cell::new(9, 9));
        let a = spawn_food(&grid, &snake, &mut StdRng::seed_from_u64(42));
        let b = spawn_food(&grid, &snake, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
