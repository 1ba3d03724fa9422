use crate::tree::BranchSnapshot;
use wumpus_core::belief::{BeliefState, ObservationCtx, ObservationError, ObservationReport};
use wumpus_core::config::WorldConfig;
use wumpus_core::model::action::Action;
use wumpus_core::model::percept::{AgentPose, Percepts};

/// Everything the agent carries from one turn to the next.
///
/// Created once per episode and mutated exactly twice per turn by the
/// [`TurnController`](super::TurnController): once when percepts are
/// observed and once when the chosen action is recorded.
#[derive(Debug, Clone)]
pub struct AgentContext {
    belief: BeliefState,
    arrow_shot: bool,
    arrow_shot_last_turn: bool,
    previous_action: Action,
    turn: u32,
}

impl AgentContext {
    pub fn new(world: WorldConfig) -> Self {
        Self::with_belief(BeliefState::new(world))
    }

    /// Resumes from an existing belief, e.g. one rebuilt from a recorded trace.
    pub fn with_belief(belief: BeliefState) -> Self {
        Self {
            belief,
            arrow_shot: false,
            arrow_shot_last_turn: false,
            previous_action: Action::NoOp,
            turn: 0,
        }
    }

    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    pub fn arrow_shot(&self) -> bool {
        self.arrow_shot
    }

    pub fn arrow_shot_last_turn(&self) -> bool {
        self.arrow_shot_last_turn
    }

    pub fn previous_action(&self) -> Action {
        self.previous_action
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub(crate) fn observe(
        &mut self,
        percepts: &Percepts,
        pose: &AgentPose,
    ) -> Result<ObservationReport, ObservationError> {
        let ctx = ObservationCtx {
            arrow_shot_last_turn: self.arrow_shot_last_turn,
        };
        let report = self.belief.observe_with(percepts, pose, &ctx)?;
        self.arrow_shot_last_turn = false;
        Ok(report)
    }

    pub(crate) fn snapshot(&self, percepts: Percepts) -> BranchSnapshot {
        BranchSnapshot::new(
            self.belief.clone(),
            percepts,
            self.arrow_shot,
            self.arrow_shot_last_turn,
        )
    }

    pub(crate) fn record_action(&mut self, action: Action) {
        if action == Action::Shoot {
            self.arrow_shot = true;
            self.arrow_shot_last_turn = true;
        }
        self.previous_action = action;
        self.turn = self.turn.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::AgentContext;
    use wumpus_core::config::WorldConfig;
    use wumpus_core::model::action::Action;

    #[test]
    fn shooting_sets_both_arrow_flags() {
        let mut ctx = AgentContext::new(WorldConfig::default());
        ctx.record_action(Action::Shoot);
        assert!(ctx.arrow_shot());
        assert!(ctx.arrow_shot_last_turn());
        assert_eq!(ctx.previous_action(), Action::Shoot);
        assert_eq!(ctx.turn(), 1);

        ctx.record_action(Action::MoveForward);
        assert!(ctx.arrow_shot());
        assert!(ctx.arrow_shot_last_turn(), "cleared by the next observation, not the next action");
    }
}
