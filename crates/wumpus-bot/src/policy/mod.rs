mod lookahead;

pub use lookahead::{LookaheadPolicy, SearchFeatures};

use crate::agent::DecisionSummary;
use wumpus_core::belief::ObservationError;
use wumpus_core::model::action::Action;
use wumpus_core::model::percept::{AgentPose, Percepts};

/// Interface the game engine drives once per turn.
pub trait Policy: Send {
    /// Static identifier shown in harness logs.
    fn name(&self) -> &'static str;

    /// Consume this turn's percepts and pose, return the action to take.
    fn decide(&mut self, percepts: &Percepts, pose: AgentPose) -> Result<Action, ObservationError>;

    /// Optional: explanation of the most recent decision.
    fn last_decision(&self) -> Option<&DecisionSummary> {
        None
    }
}
