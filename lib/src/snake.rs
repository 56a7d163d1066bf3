use std::collections::VecDeque;

use crate::grid::Cell;

/// The snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        Self {
            body: VecDeque::from([start]),
        }
    }

    /// Builds a snake from head-first cells.
    ///
    /// # Panics
    /// If `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether `cell` coincides with any segment other than the head.
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    /// Prepends `head`. Unless `grow` is set the tail is dropped and returned.
    pub fn advance(&mut self, head: Cell, grow: bool) -> Option<Cell> {
        self.body.push_front(head);
        if grow { None } else { self.body.pop_back() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_trims_tail() {
        let mut snake = Snake::from_cells([Cell::new(3, 3), Cell::new(2, 3)]);
        let dropped = snake.advance(Cell::new(4, 3), false);
        assert_eq!(dropped, Some(Cell::new(2, 3)));
        assert_eq!(snake.to_vec(), vec![Cell::new(4, 3), Cell::new(3, 3)]);
    }

    #[test]
    fn test_advance_grows() {
        let mut snake = Snake::new(Cell::new(3, 3));
        assert_eq!(snake.advance(Cell::new(3, 2), true), None);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(3, 2));
        assert_eq!(snake.tail(), Cell::new(3, 3));
    }

    #[test]
    fn test_body_contains_ignores_head() {
        let snake = Snake::from_cells([Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 2)]);
        assert!(!snake.body_contains(Cell::new(1, 1)));
        assert!(snake.body_contains(Cell::new(2, 2)));
        assert!(snake.contains(Cell::new(1, 1)));
    }

    #[test]
    #[should_panic]
    fn test_empty_snake_panics() {
        Snake::from_cells(std::iter::empty());
    }
}
