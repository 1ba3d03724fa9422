//! Rule-based hazard tracking driven by the per-turn percepts.

use super::partition::CellPartition;
use crate::config::WorldConfig;
use crate::model::cell::Cell;
use crate::model::direction::Direction;
use crate::model::hazard::{HazardGrid, HazardKind, HazardLabel};
use crate::model::percept::{AgentPose, Percepts};
use std::fmt;

/// Extra facts about the turn that the percepts alone do not carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservationCtx {
    /// The agent fired its arrow on the previous turn.
    pub arrow_shot_last_turn: bool,
}

/// What a single `observe` call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationReport {
    pub newly_visited: bool,
    pub new_frontier: Vec<Cell>,
    pub pits_deduced: Vec<Cell>,
    pub pit_sweep: bool,
    pub wumpus_deduced: Option<Cell>,
    pub wumpus_sweep: bool,
    pub ray_cleared: usize,
}

impl ObservationReport {
    pub fn has_deduction(&self) -> bool {
        !self.pits_deduced.is_empty() || self.wumpus_deduced.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationError {
    PoseOutOfBounds { position: Cell, grid_size: u8 },
}

impl fmt::Display for ObservationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationError::PoseOutOfBounds {
                position,
                grid_size,
            } => write!(
                f,
                "pose {position} lies outside the {grid_size}x{grid_size} grid"
            ),
        }
    }
}

impl std::error::Error for ObservationError {}

/// The agent's accumulated knowledge of the cave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeliefState {
    world: WorldConfig,
    partition: CellPartition,
    pits: HazardGrid,
    wumpus: HazardGrid,
    pits_found: u8,
    wumpus_found: bool,
    wumpus_location: Option<Cell>,
}

impl BeliefState {
    pub fn new(world: WorldConfig) -> Self {
        let size = world.grid_size;
        let mut pits = HazardGrid::new(size);
        if world.pit_count == 0 {
            pits.sweep_safe();
        }
        Self {
            world,
            partition: CellPartition::new(size),
            pits,
            wumpus: HazardGrid::new(size),
            pits_found: 0,
            wumpus_found: false,
            wumpus_location: None,
        }
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn grid_size(&self) -> u8 {
        self.world.grid_size
    }

    pub fn partition(&self) -> &CellPartition {
        &self.partition
    }

    pub fn pits(&self) -> &HazardGrid {
        &self.pits
    }

    pub fn wumpus(&self) -> &HazardGrid {
        &self.wumpus
    }

    pub fn grid(&self, kind: HazardKind) -> &HazardGrid {
        match kind {
            HazardKind::Pit => &self.pits,
            HazardKind::Wumpus => &self.wumpus,
        }
    }

    pub fn pits_found(&self) -> u8 {
        self.pits_found
    }

    pub fn wumpus_found(&self) -> bool {
        self.wumpus_found
    }

    pub fn wumpus_location(&self) -> Option<Cell> {
        self.wumpus_location
    }

    /// Updates the belief from this turn's percepts and pose.
    pub fn observe(
        &mut self,
        percepts: &Percepts,
        pose: &AgentPose,
    ) -> Result<ObservationReport, ObservationError> {
        self.observe_with(percepts, pose, &ObservationCtx::default())
    }

    /// Like [`observe`](Self::observe), also resolving an arrow fired last turn.
    pub fn observe_with(
        &mut self,
        percepts: &Percepts,
        pose: &AgentPose,
        ctx: &ObservationCtx,
    ) -> Result<ObservationReport, ObservationError> {
        let size = self.grid_size();
        if !pose.position.in_bounds(size) {
            return Err(ObservationError::PoseOutOfBounds {
                position: pose.position,
                grid_size: size,
            });
        }

        let mut report = ObservationReport {
            newly_visited: !self.partition.is_known(pose.position),
            ..ObservationReport::default()
        };
        report.new_frontier = self.partition.visit(pose.position);

        let adjacent: Vec<Cell> = pose.position.neighbors(size).collect();
        self.update_pit(percepts.breeze, &adjacent, &mut report);

        if ctx.arrow_shot_last_turn {
            report.ray_cleared = self.update_after_arrow_miss(pose.direction, pose);
        }

        if !self.wumpus_found {
            self.update_wumpus(percepts.stench, &adjacent, &mut report);
        }

        Ok(report)
    }

    /// Applies the breeze rule to the cells around the agent.
    pub fn update_pit(&mut self, breeze: bool, adjacent: &[Cell], report: &mut ObservationReport) {
        if !breeze {
            for &cell in adjacent {
                self.pits.mark_safe(cell);
            }
            return;
        }

        let Some(cell) = sole_unresolved(&self.pits, adjacent) else {
            return;
        };
        if self.pits.mark_danger(cell) {
            self.pits_found = self.pits_found.saturating_add(1);
            report.pits_deduced.push(cell);
            if self.pits_found >= self.world.pit_count {
                report.pit_sweep = self.pits.sweep_safe() > 0;
            }
        }
    }

    /// Applies the stench rule to the cells around the agent.
    pub fn update_wumpus(
        &mut self,
        stench: bool,
        adjacent: &[Cell],
        report: &mut ObservationReport,
    ) {
        if self.wumpus_found {
            return;
        }
        if !stench {
            for &cell in adjacent {
                self.wumpus.mark_safe(cell);
            }
            return;
        }

        let Some(cell) = sole_unresolved(&self.wumpus, adjacent) else {
            return;
        };
        if self.wumpus.mark_danger(cell) {
            self.wumpus_found = true;
            self.wumpus_location = Some(cell);
            report.wumpus_deduced = Some(cell);
            report.wumpus_sweep = self.wumpus.sweep_safe() > 0;
        }
    }

    /// A missed arrow proves the wumpus is nowhere along its flight path.
    /// Returns how many cells were cleared.
    pub fn update_after_arrow_miss(&mut self, direction: Direction, pose: &AgentPose) -> usize {
        pose.position
            .ray(direction, self.grid_size())
            .filter(|&cell| self.wumpus.mark_safe(cell))
            .count()
    }

    pub fn label(&self, kind: HazardKind, cell: Cell) -> HazardLabel {
        self.grid(kind).label(cell)
    }
}

/// The only still-`Possible` cell among `adjacent`, if there is exactly one.
fn sole_unresolved(grid: &HazardGrid, adjacent: &[Cell]) -> Option<Cell> {
    let mut candidates = adjacent
        .iter()
        .copied()
        .filter(|&cell| !grid.label(cell).is_resolved());
    let first = candidates.next()?;
    candidates.next().is_none().then_some(first)
}
