use tracing::debug;

use crate::grid::{Direction, Grid};
use crate::snake::Snake;

/// Direction forced when every neighbor is unsafe. May end the session.
pub const DEFAULT_DIRECTION: Direction = Direction::Right;

/// First direction, in LEFT, UP, RIGHT, DOWN order, whose target cell is in
/// bounds and not covered by the snake.
pub fn safe_direction(grid: &Grid, snake: &Snake) -> Option<Direction> {
    let head = snake.head();
    Direction::ALL
        .into_iter()
        .find(|&direction| grid.is_safe(head.shifted(direction), snake))
}

/// Second tier: the same scan as [`safe_direction`], then [`DEFAULT_DIRECTION`].
/// Only differs from tier one in never returning nothing.
pub fn follow_pattern(grid: &Grid, snake: &Snake) -> Direction {
    let head = snake.head();
    for direction in Direction::ALL {
        if grid.is_safe(head.shifted(direction), snake) {
            return direction;
        }
    }
    DEFAULT_DIRECTION
}

/// Tier one, then tier two. Always yields a direction.
pub fn choose(grid: &Grid, snake: &Snake) -> Direction {
    match safe_direction(grid, snake) {
        Some(direction) => {
            debug!(%direction, "no path to food, taking first safe neighbor");
            direction
        }
        None => {
            let direction = follow_pattern(grid, snake);
            debug!(%direction, "boxed in, forcing a move");
            direction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use proptest::prelude::*;

    fn grid(width: i32, height: i32) -> Grid {
        Grid::new(width, height).expect("valid grid")
    }

    #[test]
    fn test_prefers_left_first() {
        let snake = Snake::new(Cell::new(3, 3));
        assert_eq!(safe_direction(&grid(7, 7), &snake), Some(Direction::Left));
    }

    #[test]
    fn test_skips_walls_and_body() {
        // Head in the top-left corner with the body to its right.
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0)]);
        assert_eq!(safe_direction(&grid(5, 5), &snake), Some(Direction::Down));
    }

    #[test]
    fn test_enclosed_food_scenario() {
        // The body rings the food at (5, 5); the head sits on the ring.
        let snake = Snake::from_cells([
            Cell::new(5, 4),
            Cell::new(6, 4),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
            Cell::new(4, 6),
            Cell::new(4, 5),
            Cell::new(4, 4),
        ]);
        let g = grid(10, 10);
        let path = crate::pathfinder::find_path(&g, snake.head(), Cell::new(5, 5), &snake);
        assert_eq!(path.len(), 2, "food next to the head is still reachable");

        // Close the ring by moving the head away: (5, 5) now has no free neighbor.
        let snake = Snake::from_cells([
            Cell::new(2, 2),
            Cell::new(5, 4),
            Cell::new(6, 5),
            Cell::new(5, 6),
            Cell::new(4, 5),
        ]);
        let path = crate::pathfinder::find_path(&g, snake.head(), Cell::new(5, 5), &snake);
        assert_eq!(path, vec![Cell::new(2, 2)]);
        assert_eq!(choose(&g, &snake), Direction::Left);
    }

    #[test]
    fn test_boxed_in_defaults_right() {
        let snake = Snake::from_cells([
            Cell::new(1, 1),
            Cell::new(1, 0),
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(0, 2),
            Cell::new(1, 2),
            Cell::new(2, 2),
            Cell::new(2, 1),
        ]);
        let g = grid(3, 3);
        assert_eq!(safe_direction(&g, &snake), None);
        assert_eq!(follow_pattern(&g, &snake), DEFAULT_DIRECTION);
        assert_eq!(choose(&g, &snake), Direction::Right);
    }

    #[test]
    fn test_single_cell_grid_defaults_right() {
        let snake = Snake::new(Cell::new(0, 0));
        assert_eq!(choose(&grid(1, 1), &snake), DEFAULT_DIRECTION);
    }

    proptest! {
        #[test]
        fn prop_tiers_agree(
            (w, h, cells) in (1i32..8, 1i32..8).prop_flat_map(|(w, h)| {
                let cell = (0..w, 0..h).prop_map(|(x, y)| Cell::new(x, y));
                (Just(w), Just(h), prop::collection::vec(cell, 1..20))
            })
        ) {
            let g = grid(w, h);
            let snake = Snake::from_cells(cells);
            let chosen = choose(&g, &snake);
            match safe_direction(&g, &snake) {
                Some(direction) => {
                    prop_assert_eq!(chosen, direction);
                    prop_assert_eq!(follow_pattern(&g, &snake), direction);
                    prop_assert!(g.is_safe(snake.head().shifted(direction), &snake));
                }
                None => {
                    prop_assert_eq!(chosen, DEFAULT_DIRECTION);
                }
            }
        }
    }
}
