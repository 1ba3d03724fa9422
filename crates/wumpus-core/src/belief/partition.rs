use crate::model::cell::Cell;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Known,
    Frontier,
    Unknown,
}

/// Splits the grid into visited, bordering and unexplored cells.
///
/// Every in-bounds cell is in exactly one of the three sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPartition {
    size: u8,
    known: BTreeSet<Cell>,
    frontier: BTreeSet<Cell>,
    unknown: BTreeSet<Cell>,
}

impl CellPartition {
    /// Nothing visited yet; the start square's neighbours seed the frontier.
    pub fn new(size: u8) -> Self {
        let frontier: BTreeSet<Cell> = Cell::START.neighbors(size).collect();
        let unknown = Cell::all(size)
            .filter(|cell| !frontier.contains(cell))
            .collect();
        Self {
            size,
            known: BTreeSet::new(),
            frontier,
            unknown,
        }
    }

    /// Records a visit to `cell` and returns the cells newly promoted to the frontier.
    pub fn visit(&mut self, cell: Cell) -> Vec<Cell> {
        if self.known.insert(cell) {
            self.frontier.remove(&cell);
            self.unknown.remove(&cell);
        }
        let mut promoted = Vec::new();
        for neighbor in cell.neighbors(self.size) {
            if self.unknown.remove(&neighbor) {
                self.frontier.insert(neighbor);
                promoted.push(neighbor);
            }
        }
        promoted
    }

    pub fn region(&self, cell: Cell) -> Option<Region> {
        if self.known.contains(&cell) {
            Some(Region::Known)
        } else if self.frontier.contains(&cell) {
            Some(Region::Frontier)
        } else if self.unknown.contains(&cell) {
            Some(Region::Unknown)
        } else {
            None
        }
    }

    pub fn is_known(&self, cell: Cell) -> bool {
        self.known.contains(&cell)
    }

    pub fn is_unknown(&self, cell: Cell) -> bool {
        self.unknown.contains(&cell)
    }

    pub fn known(&self) -> &BTreeSet<Cell> {
        &self.known
    }

    pub fn frontier(&self) -> &BTreeSet<Cell> {
        &self.frontier
    }

    pub fn unknown(&self) -> &BTreeSet<Cell> {
        &self.unknown
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }
}
