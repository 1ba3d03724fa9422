use super::node::BranchSnapshot;
use wumpus_core::model::action::Action;
use wumpus_core::model::cell::Cell;
use wumpus_core::model::hazard::{HazardKind, HazardLabel};

/// Edge rewards for the lookahead tree.
///
/// Small unit costs keep the agent from dithering while the thousand-scale
/// hazard and exploration terms decide every non-trivial choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardParams {
    /// Reward for climbing or otherwise standing still (default: 0)
    pub idle_reward: f64,

    /// Cost of a quarter turn (default: -1)
    pub turn_cost: f64,

    /// Cost of stepping onto an already visited cell (default: -1)
    pub revisit_cost: f64,

    /// Cost of walking into a wall (default: -1)
    pub blocked_cost: f64,

    /// Penalty for entering a cell graded dangerous (default: -1000)
    pub hazard_penalty: f64,

    /// Spread over the unvisited cells to reward exploration (default: 1000)
    pub exploration_budget: f64,

    /// Base multiplier of the frontier-risk penalty (default: 2)
    pub frontier_risk_base: f64,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            idle_reward: 0.0,
            turn_cost: -1.0,
            revisit_cost: -1.0,
            blocked_cost: -1.0,
            hazard_penalty: -1000.0,
            exploration_budget: 1000.0,
            frontier_risk_base: 2.0,
        }
    }
}

impl RewardParams {
    /// Immediate reward of taking `action` from `prev`, landing on `next`.
    pub fn reward(&self, snapshot: &BranchSnapshot, prev: Cell, action: Action, next: Cell) -> f64 {
        match action {
            Action::MoveForward => {}
            Action::Climb => return self.idle_reward,
            _ => return self.turn_cost,
        }

        if snapshot.is_known(next) {
            return self.revisit_cost;
        }
        if next == prev {
            return self.blocked_cost;
        }

        let pit = snapshot.label(HazardKind::Pit, next);
        let wumpus = snapshot.label(HazardKind::Wumpus, next);
        if pit == HazardLabel::Danger || wumpus == HazardLabel::Danger {
            return self.hazard_penalty;
        }

        let unexplored = f64::from(snapshot.grid_area()) - snapshot.known_count() as f64;
        if pit == HazardLabel::Possible || wumpus == HazardLabel::Possible {
            if snapshot.is_unknown(next) {
                self.exploration_budget / unexplored
            } else {
                let pits_found = f64::from(snapshot.pits_found());
                self.hazard_penalty * (self.frontier_risk_base - pits_found / unexplored)
            }
        } else if pit == HazardLabel::Safe && wumpus == HazardLabel::Safe {
            self.exploration_budget / unexplored
        } else {
            self.hazard_penalty
        }
    }
}
