use super::Policy;
use crate::agent::{DecisionSummary, SearchConfig, TurnController};
use tracing::{Level, event};
use wumpus_core::AgentInfo;
use wumpus_core::belief::{BeliefState, ObservationError};
use wumpus_core::config::{ConfigError, WorldConfig};
use wumpus_core::model::action::Action;
use wumpus_core::model::percept::{AgentPose, Percepts};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFeatures {
    details: bool,
}

impl SearchFeatures {
    pub const fn new(details: bool) -> Self {
        Self { details }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn details_enabled(self) -> bool {
        self.details
    }

    pub fn with_details(mut self, enabled: bool) -> Self {
        self.details = enabled;
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let details = read("WUMPUS_SEARCH_DETAILS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);
        Self { details }
    }
}

/// Lookahead-tree agent with structured decision logging.
#[derive(Debug, Clone)]
pub struct LookaheadPolicy {
    controller: TurnController,
    features: SearchFeatures,
}

impl LookaheadPolicy {
    pub fn new(world: WorldConfig) -> Result<Self, ConfigError> {
        let controller = TurnController::new(world)?.with_search(SearchConfig::from_env());
        Ok(Self::from_controller(controller, SearchFeatures::from_env()))
    }

    pub fn from_controller(controller: TurnController, features: SearchFeatures) -> Self {
        Self {
            controller,
            features,
        }
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn features(&self) -> SearchFeatures {
        self.features
    }
}

impl Policy for LookaheadPolicy {
    fn name(&self) -> &'static str {
        AgentInfo::name()
    }

    fn decide(&mut self, percepts: &Percepts, pose: AgentPose) -> Result<Action, ObservationError> {
        let action = match self.controller.process(percepts, pose) {
            Ok(action) => action,
            Err(err) => {
                tracing::warn!(
                    target: "wumpus_bot::decide",
                    turn = self.controller.context().turn(),
                    error = %err,
                    "rejected observation"
                );
                return Err(err);
            }
        };

        if let Some(summary) = self.controller.last_decision() {
            log_observation(summary, self.controller.context().belief());
            log_decision(summary);
            if self.features.details_enabled() {
                log_search_details(summary);
            }
        }
        Ok(action)
    }

    fn last_decision(&self) -> Option<&DecisionSummary> {
        self.controller.last_decision()
    }
}

fn log_observation(summary: &DecisionSummary, belief: &BeliefState) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let report = &summary.observation;
    if !report.has_deduction() && report.ray_cleared == 0 {
        return;
    }

    let pits = report
        .pits_deduced
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let wumpus = report
        .wumpus_deduced
        .map(|cell| cell.to_string())
        .unwrap_or_default();

    event!(
        target: "wumpus_bot::belief",
        Level::DEBUG,
        turn = summary.turn,
        pits_deduced = %pits,
        pit_sweep = report.pit_sweep,
        wumpus_deduced = %wumpus,
        wumpus_sweep = report.wumpus_sweep,
        ray_cleared = report.ray_cleared,
        pits = %belief.pits().render(),
        wumpus = %belief.wumpus().render(),
    );
}

fn log_decision(summary: &DecisionSummary) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let outcome = &summary.outcome;
    event!(
        target: "wumpus_bot::decide",
        Level::INFO,
        turn = summary.turn,
        position = %summary.pose.position,
        direction = %summary.pose.direction,
        percepts = %summary.percepts.flags(),
        action = %outcome.action,
        code = outcome.action.code(),
        reason = %outcome.reason,
        best_score = outcome.best_score.unwrap_or(f64::NAN),
        nodes = summary.node_count,
    );
}

fn log_search_details(summary: &DecisionSummary) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let breakdown = summary
        .outcome
        .first_action_scores
        .iter()
        .map(|(action, score)| format!("{action}={score:.2}"))
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "wumpus_bot::search",
        Level::DEBUG,
        turn = summary.turn,
        searched = ?summary.outcome.searched_action,
        breakdown = %breakdown,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wumpus_core::model::cell::Cell;
    use wumpus_core::model::direction::Direction;

    #[test]
    fn search_features_default_off() {
        let features = SearchFeatures::from_reader(|_| None);
        assert!(!features.details_enabled());
    }

    #[test]
    fn search_features_respect_flag() {
        let mut vars = HashMap::new();
        vars.insert("WUMPUS_SEARCH_DETAILS".to_string(), "on".to_string());
        let features = SearchFeatures::from_reader(|key| vars.get(key).cloned());
        assert!(features.details_enabled());
        assert!(!features.with_details(false).details_enabled());
    }

    #[test]
    fn policy_reports_agent_name_and_decisions() {
        let controller = TurnController::new(WorldConfig::default()).unwrap();
        let mut policy = LookaheadPolicy::from_controller(controller, SearchFeatures::new(true));
        assert_eq!(policy.name(), "theaustronaut");
        assert!(Policy::last_decision(&policy).is_none());

        let action = policy
            .decide(&Percepts::NONE, AgentPose::new(Cell::START, Direction::North))
            .unwrap();
        assert_eq!(action, Action::MoveForward);
        let summary = Policy::last_decision(&policy).unwrap();
        assert_eq!(summary.action(), action);
        assert_eq!(summary.turn, 0);
    }
}
