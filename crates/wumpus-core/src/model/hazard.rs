use super::cell::Cell;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Pit,
    Wumpus,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardKind::Pit => f.write_str("pit"),
            HazardKind::Wumpus => f.write_str("wumpus"),
        }
    }
}

/// Tri-state grade of a cell for one hazard type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardLabel {
    Safe,
    Possible,
    Danger,
}

impl HazardLabel {
    /// `Safe` and `Danger` are final; only `Possible` may still change.
    pub const fn is_resolved(self) -> bool {
        !matches!(self, HazardLabel::Possible)
    }
}

/// Per-cell hazard labels for one hazard type.
///
/// Every cell starts `Possible` except the start square, which is `Safe`.
/// Labels only move out of `Possible`; resolved labels are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardGrid {
    size: u8,
    labels: Vec<HazardLabel>,
}

impl HazardGrid {
    pub fn new(size: u8) -> Self {
        let mut labels = vec![HazardLabel::Possible; usize::from(size) * usize::from(size)];
        if let Some(start) = labels.get_mut(Cell::START.index(size)) {
            *start = HazardLabel::Safe;
        }
        Self { size, labels }
    }

    /// Label of `cell`; out-of-bounds cells read as `Safe` since nothing can live there.
    pub fn label(&self, cell: Cell) -> HazardLabel {
        if !cell.in_bounds(self.size) {
            return HazardLabel::Safe;
        }
        self.labels
            .get(cell.index(self.size))
            .copied()
            .unwrap_or(HazardLabel::Safe)
    }

    /// Marks `cell` safe unless it is already known dangerous. Returns true on change.
    pub fn mark_safe(&mut self, cell: Cell) -> bool {
        self.resolve(cell, HazardLabel::Safe)
    }

    /// Marks `cell` dangerous if it is still `Possible`. Returns true on change.
    pub fn mark_danger(&mut self, cell: Cell) -> bool {
        self.resolve(cell, HazardLabel::Danger)
    }

    fn resolve(&mut self, cell: Cell, label: HazardLabel) -> bool {
        if !cell.in_bounds(self.size) {
            return false;
        }
        let index = cell.index(self.size);
        match self.labels.get_mut(index) {
            Some(slot) if *slot == HazardLabel::Possible => {
                *slot = label;
                true
            }
            _ => false,
        }
    }

    /// Resolves every remaining `Possible` cell to `Safe`. Returns how many changed.
    pub fn sweep_safe(&mut self) -> usize {
        let mut changed = 0;
        for slot in self.labels.iter_mut() {
            if *slot == HazardLabel::Possible {
                *slot = HazardLabel::Safe;
                changed += 1;
            }
        }
        changed
    }

    pub fn count(&self, label: HazardLabel) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, HazardLabel)> + '_ {
        Cell::all(self.size).zip(self.labels.iter().copied())
    }

    /// Compact text rendering, north row first (`s`, `p`, `d`).
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.labels.len() + usize::from(self.size));
        for row in (1..=self.size).rev() {
            for col in 1..=self.size {
                out.push(match self.label(Cell::new(row, col)) {
                    HazardLabel::Safe => 's',
                    HazardLabel::Possible => 'p',
                    HazardLabel::Danger => 'd',
                });
            }
            if row > 1 {
                out.push('/');
            }
        }
        out
    }
}
