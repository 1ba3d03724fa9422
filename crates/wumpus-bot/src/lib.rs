pub mod agent;
pub mod policy;
pub mod tree;

pub use agent::{AgentContext, DecisionSummary, SearchConfig, TurnController};
pub use policy::{LookaheadPolicy, Policy, SearchFeatures};
pub use tree::{
    BranchSnapshot, DecisionNode, DecisionReason, DecisionTree, NodeId, RewardParams,
    SearchOutcome,
};
