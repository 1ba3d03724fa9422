use super::reward::RewardParams;
use std::rc::Rc;
use wumpus_core::belief::BeliefState;
use wumpus_core::model::action::Action;
use wumpus_core::model::cell::Cell;
use wumpus_core::model::direction::Direction;
use wumpus_core::model::hazard::{HazardKind, HazardLabel};
use wumpus_core::model::percept::{AgentPose, Percepts};

/// Index of a node inside its [`DecisionTree`](super::DecisionTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Frozen copy of everything a hypothetical branch reasons about.
///
/// Snapshots are immutable once captured and shared between nodes by
/// reference count; percepts are the ones sensed this turn and are not
/// re-derived for hypothetical positions.
#[derive(Debug, Clone)]
pub struct BranchSnapshot {
    belief: BeliefState,
    percepts: Percepts,
    arrow_shot: bool,
    arrow_shot_last_turn: bool,
}

impl BranchSnapshot {
    pub fn new(
        belief: BeliefState,
        percepts: Percepts,
        arrow_shot: bool,
        arrow_shot_last_turn: bool,
    ) -> Self {
        Self {
            belief,
            percepts,
            arrow_shot,
            arrow_shot_last_turn,
        }
    }

    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    pub fn percepts(&self) -> &Percepts {
        &self.percepts
    }

    pub fn arrow_shot(&self) -> bool {
        self.arrow_shot
    }

    pub fn arrow_shot_last_turn(&self) -> bool {
        self.arrow_shot_last_turn
    }

    pub fn grid_size(&self) -> u8 {
        self.belief.grid_size()
    }

    pub fn grid_area(&self) -> u16 {
        self.belief.world().grid_area()
    }

    pub fn known_count(&self) -> usize {
        self.belief.partition().known_count()
    }

    pub fn is_known(&self, cell: Cell) -> bool {
        self.belief.partition().is_known(cell)
    }

    pub fn is_unknown(&self, cell: Cell) -> bool {
        self.belief.partition().is_unknown(cell)
    }

    pub fn label(&self, kind: HazardKind, cell: Cell) -> HazardLabel {
        self.belief.label(kind, cell)
    }

    pub fn pits_found(&self) -> u8 {
        self.belief.pits_found()
    }

    pub fn wumpus_location(&self) -> Option<Cell> {
        self.belief.wumpus_location()
    }
}

#[derive(Debug, Clone)]
pub struct DecisionNode {
    position: Cell,
    direction: Direction,
    action: Action,
    cumulative_reward: f64,
    depth: u8,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    snapshot: Rc<BranchSnapshot>,
}

impl DecisionNode {
    /// Root of a fresh tree; `previous_action` is the action the agent actually took last turn.
    pub fn root(pose: AgentPose, previous_action: Action, snapshot: BranchSnapshot) -> Self {
        Self {
            position: pose.position,
            direction: pose.direction,
            action: previous_action,
            cumulative_reward: 0.0,
            depth: 0,
            parent: None,
            children: Vec::new(),
            snapshot: Rc::new(snapshot),
        }
    }

    /// Hypothetical successor reached by `action`, with its reward folded in.
    pub(crate) fn successor(&self, id: NodeId, action: Action, params: &RewardParams) -> Self {
        let direction = next_direction(action, self.direction);
        let position = next_position(action, self.position, direction, self.snapshot.grid_size());
        let reward = params.reward(&self.snapshot, self.position, action, position);
        Self {
            position,
            direction,
            action,
            cumulative_reward: self.cumulative_reward + reward,
            depth: self.depth + 1,
            parent: Some(id),
            children: Vec::with_capacity(Action::EXPANSION_ORDER.len()),
            snapshot: Rc::clone(&self.snapshot),
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn pose(&self) -> AgentPose {
        AgentPose::new(self.position, self.direction)
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn snapshot(&self) -> &BranchSnapshot {
        &self.snapshot
    }
}

pub fn next_direction(action: Action, direction: Direction) -> Direction {
    direction.rotate(action.effect().rotation)
}

/// Only a forward move changes position; walking off the grid leaves it unchanged.
pub fn next_position(action: Action, position: Cell, direction: Direction, size: u8) -> Cell {
    if !action.effect().advances {
        return position;
    }
    position.step(direction, size).unwrap_or(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wumpus_core::config::WorldConfig;

    #[test]
    fn turns_change_heading_only() {
        assert_eq!(next_direction(Action::TurnRight, Direction::North), Direction::East);
        assert_eq!(next_direction(Action::TurnLeft, Direction::North), Direction::West);
        assert_eq!(next_direction(Action::Climb, Direction::South), Direction::South);
        let here = Cell::new(2, 2);
        assert_eq!(next_position(Action::TurnRight, here, Direction::East, 4), here);
        assert_eq!(next_position(Action::Climb, here, Direction::East, 4), here);
    }

    #[test]
    fn forward_moves_unless_blocked() {
        assert_eq!(
            next_position(Action::MoveForward, Cell::START, Direction::North, 4),
            Cell::new(2, 1)
        );
        assert_eq!(
            next_position(Action::MoveForward, Cell::START, Direction::West, 4),
            Cell::START
        );
    }

    #[test]
    fn successor_shares_snapshot_and_accumulates() {
        let belief = BeliefState::new(WorldConfig::default());
        let snapshot = BranchSnapshot::new(belief, Percepts::NONE, false, false);
        let root = DecisionNode::root(
            AgentPose::new(Cell::START, Direction::North),
            Action::NoOp,
            snapshot,
        );
        let params = RewardParams::default();
        let child = root.successor(NodeId(0), Action::TurnRight, &params);
        assert_eq!(child.direction(), Direction::East);
        assert_eq!(child.cumulative_reward(), -1.0);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent(), Some(NodeId(0)));
        assert!(Rc::ptr_eq(&root.snapshot, &child.snapshot));

        let grandchild = child.successor(NodeId(1), Action::TurnLeft, &params);
        assert_eq!(grandchild.cumulative_reward(), -2.0);
        assert_eq!(grandchild.direction(), Direction::North);
    }
}
