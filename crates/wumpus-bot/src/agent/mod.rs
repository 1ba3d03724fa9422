mod context;

pub use context::AgentContext;

use crate::tree::{
    DEFAULT_MAX_DEPTH, DecisionNode, DecisionReason, DecisionTree, RewardParams, SearchOutcome,
};
use wumpus_core::belief::{ObservationError, ObservationReport};
use wumpus_core::config::{ConfigError, WorldConfig};
use wumpus_core::model::action::Action;
use wumpus_core::model::percept::{AgentPose, Percepts};

pub const MAX_SEARCH_DEPTH: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Depths past 8 build over 87k nodes per turn and are rejected.
    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let max_depth = read("WUMPUS_SEARCH_DEPTH")
            .and_then(|raw| raw.trim().parse::<u8>().ok())
            .filter(|depth| (1..=MAX_SEARCH_DEPTH).contains(depth))
            .unwrap_or(DEFAULT_MAX_DEPTH);
        Self { max_depth }
    }
}

/// Everything the controller learned and decided on one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSummary {
    pub turn: u32,
    pub pose: AgentPose,
    pub percepts: Percepts,
    pub observation: ObservationReport,
    pub outcome: SearchOutcome,
    pub node_count: usize,
}

impl DecisionSummary {
    pub fn action(&self) -> Action {
        self.outcome.action
    }

    pub fn reason(&self) -> DecisionReason {
        self.outcome.reason
    }
}

/// Runs one decision cycle per call: observe, snapshot, search, record.
#[derive(Debug, Clone)]
pub struct TurnController {
    context: AgentContext,
    params: RewardParams,
    search: SearchConfig,
    last_decision: Option<DecisionSummary>,
}

impl TurnController {
    pub fn new(world: WorldConfig) -> Result<Self, ConfigError> {
        world.validate()?;
        Ok(Self::from_context(AgentContext::new(world)))
    }

    pub fn from_context(context: AgentContext) -> Self {
        Self {
            context,
            params: RewardParams::default(),
            search: SearchConfig::default(),
            last_decision: None,
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    pub fn search(&self) -> SearchConfig {
        self.search
    }

    pub fn last_decision(&self) -> Option<&DecisionSummary> {
        self.last_decision.as_ref()
    }

    /// Decides this turn's action. A pose off the grid aborts the turn
    /// without touching any state.
    pub fn process(
        &mut self,
        percepts: &Percepts,
        pose: AgentPose,
    ) -> Result<Action, ObservationError> {
        let observation = self.context.observe(percepts, &pose)?;

        let snapshot = self.context.snapshot(*percepts);
        let root = DecisionNode::root(pose, self.context.previous_action(), snapshot);
        let mut tree = DecisionTree::new(root, self.params);
        if !percepts.glitter {
            tree.build(self.search.max_depth);
        }
        let outcome = tree.find_best_action();
        let action = outcome.action;

        self.last_decision = Some(DecisionSummary {
            turn: self.context.turn(),
            pose,
            percepts: *percepts,
            observation,
            outcome,
            node_count: tree.len(),
        });
        self.context.record_action(action);
        Ok(action)
    }
}
