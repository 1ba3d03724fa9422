use super::direction::Direction;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One square of the cave, addressed 1-based as `(row, col)`.
///
/// Rows grow towards North and columns towards East, so the start square
/// `(1, 1)` sits in the south-west corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const START: Cell = Cell { row: 1, col: 1 };

    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn in_bounds(self, size: u8) -> bool {
        self.row >= 1 && self.row <= size && self.col >= 1 && self.col <= size
    }

    /// Neighbouring cell one step along `direction`, or `None` past the edge.
    pub fn step(self, direction: Direction, size: u8) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        let next = Cell::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?);
        next.in_bounds(size).then_some(next)
    }

    /// In-bounds orthogonal neighbours, in compass order.
    pub fn neighbors(self, size: u8) -> impl Iterator<Item = Cell> {
        Direction::LOOP
            .into_iter()
            .filter_map(move |direction| self.step(direction, size))
    }

    /// Cells from `self` (inclusive) to the grid edge along `direction`.
    pub fn ray(self, direction: Direction, size: u8) -> impl Iterator<Item = Cell> {
        let first = self.in_bounds(size).then_some(self);
        std::iter::successors(first, move |cell| cell.step(direction, size))
    }

    /// Row-major offset into an `size * size` buffer.
    pub const fn index(self, size: u8) -> usize {
        (self.row as usize - 1) * size as usize + (self.col as usize - 1)
    }

    pub fn all(size: u8) -> impl Iterator<Item = Cell> {
        (1..=size).flat_map(move |row| (1..=size).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use crate::model::direction::Direction;

    #[test]
    fn corner_has_two_neighbors() {
        let neighbors: Vec<Cell> = Cell::START.neighbors(4).collect();
        assert_eq!(neighbors, vec![Cell::new(2, 1), Cell::new(1, 2)]);
    }

    #[test]
    fn interior_has_four_neighbors() {
        assert_eq!(Cell::new(2, 3).neighbors(4).count(), 4);
    }

    #[test]
    fn step_rejects_leaving_the_grid() {
        assert_eq!(Cell::START.step(Direction::South, 4), None);
        assert_eq!(Cell::START.step(Direction::West, 4), None);
        assert_eq!(Cell::new(4, 4).step(Direction::North, 4), None);
        assert_eq!(Cell::START.step(Direction::North, 4), Some(Cell::new(2, 1)));
        assert_eq!(Cell::START.step(Direction::East, 4), Some(Cell::new(1, 2)));
    }

    #[test]
    fn ray_runs_to_the_edge() {
        let ray: Vec<Cell> = Cell::new(2, 2).ray(Direction::East, 4).collect();
        assert_eq!(ray, vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)]);
        let ray: Vec<Cell> = Cell::new(3, 1).ray(Direction::South, 4).collect();
        assert_eq!(ray, vec![Cell::new(3, 1), Cell::new(2, 1), Cell::new(1, 1)]);
    }

    #[test]
    fn index_is_row_major() {
        assert_eq!(Cell::START.index(4), 0);
        assert_eq!(Cell::new(1, 4).index(4), 3);
        assert_eq!(Cell::new(4, 4).index(4), 15);
        assert_eq!(Cell::all(4).count(), 16);
    }
}
