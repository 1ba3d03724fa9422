//! Fixed-depth lookahead over hypothetical action sequences.
//!
//! The tree is an index-addressed arena rebuilt every turn. Every node
//! shares the same immutable [`BranchSnapshot`], so building 1365 nodes
//! clones the belief exactly once.

mod node;
mod reward;

pub use node::{BranchSnapshot, DecisionNode, NodeId, next_direction, next_position};
pub use reward::RewardParams;

use core::fmt;
use wumpus_core::model::action::Action;
use wumpus_core::model::cell::Cell;
use wumpus_core::model::percept::AgentPose;

pub const DEFAULT_MAX_DEPTH: u8 = 5;

/// Why the search settled on its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    Glitter,
    Search,
    ShootOverride,
}

impl DecisionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            DecisionReason::Glitter => "glitter",
            DecisionReason::Search => "search",
            DecisionReason::ShootOverride => "shoot_override",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub action: Action,
    pub reason: DecisionReason,
    /// First action picked by the leaf scan, before overrides.
    pub searched_action: Option<Action>,
    pub best_score: Option<f64>,
    /// Best leaf score reachable under each first action, in expansion order.
    pub first_action_scores: Vec<(Action, f64)>,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<DecisionNode>,
    params: RewardParams,
}

impl DecisionTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(root: DecisionNode, params: RewardParams) -> Self {
        Self {
            nodes: vec![root],
            params,
        }
    }

    /// Node count of a full tree of `depth` levels below the root.
    pub fn expected_nodes(depth: u8) -> usize {
        let branching = Action::EXPANSION_ORDER.len();
        (0..=u32::from(depth)).map(|level| branching.pow(level)).sum()
    }

    /// Expands the root to exactly `max_depth` levels, discarding any earlier build.
    pub fn build(&mut self, max_depth: u8) {
        self.nodes.truncate(1);
        self.nodes[Self::ROOT.0].clear_children();
        self.nodes.reserve(Self::expected_nodes(max_depth).saturating_sub(1));
        self.expand(Self::ROOT, max_depth);
    }

    fn expand(&mut self, id: NodeId, remaining: u8) {
        if remaining == 0 {
            return;
        }
        for action in Action::EXPANSION_ORDER {
            let child = self.nodes[id.0].successor(id, action, &self.params);
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(child);
            self.nodes[id.0].push_child(child_id);
            self.expand(child_id, remaining - 1);
        }
    }

    pub fn root(&self) -> &DecisionNode {
        &self.nodes[Self::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&DecisionNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn params(&self) -> &RewardParams {
        &self.params
    }

    /// Picks the action to take now.
    ///
    /// Glitter short-circuits to `Grab`. Otherwise every leaf is scored by
    /// its cumulative reward and credited to the first action on its path;
    /// only a strictly better score replaces the incumbent, so ties go to
    /// the earliest leaf in expansion order. A `Climb` result becomes
    /// `Shoot` when a shot is worth taking.
    pub fn find_best_action(&self) -> SearchOutcome {
        if self.root().snapshot().percepts().glitter {
            return SearchOutcome {
                action: Action::Grab,
                reason: DecisionReason::Glitter,
                searched_action: None,
                best_score: None,
                first_action_scores: Vec::new(),
            };
        }

        let mut best: Option<(f64, Action)> = None;
        let mut first_action_scores = Vec::with_capacity(Action::EXPANSION_ORDER.len());
        self.score_leaves(Self::ROOT, None, &mut best, &mut first_action_scores);

        let searched_action = best.map(|(_, action)| action);
        let best_score = best.map(|(score, _)| score);
        let (action, reason) = match searched_action {
            Some(Action::Climb) if self.shot_is_worth_taking() => {
                (Action::Shoot, DecisionReason::ShootOverride)
            }
            Some(action) => (action, DecisionReason::Search),
            None => (Action::NoOp, DecisionReason::Search),
        };

        SearchOutcome {
            action,
            reason,
            searched_action,
            best_score,
            first_action_scores,
        }
    }

    fn score_leaves(
        &self,
        id: NodeId,
        first_action: Option<Action>,
        best: &mut Option<(f64, Action)>,
        per_first: &mut Vec<(Action, f64)>,
    ) {
        let node = &self.nodes[id.0];
        if node.is_leaf() {
            let Some(first) = first_action else {
                return;
            };
            let score = node.cumulative_reward();
            if best.is_none_or(|(incumbent, _)| score > incumbent) {
                *best = Some((score, first));
            }
            match per_first.iter_mut().find(|(action, _)| *action == first) {
                Some((_, top)) if score > *top => *top = score,
                Some(_) => {}
                None => per_first.push((first, score)),
            }
            return;
        }
        for &child in node.children() {
            let first = first_action.or_else(|| Some(self.nodes[child.0].action()));
            self.score_leaves(child, first, best, per_first);
        }
    }

    fn shot_is_worth_taking(&self) -> bool {
        let root = self.root();
        let snapshot = root.snapshot();
        if snapshot.arrow_shot() {
            return false;
        }
        let pose: AgentPose = root.pose();
        let cornered = pose.position == Cell::START && snapshot.percepts().stench;
        let lined_up = snapshot
            .wumpus_location()
            .is_some_and(|wumpus| pose.faces(wumpus));
        cornered || lined_up
    }
}
