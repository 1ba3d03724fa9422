use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};
use wumpus_bot::{LookaheadPolicy, Policy, SearchFeatures, TurnController};
use wumpus_core::belief::ObservationError;
use wumpus_core::model::cell::Cell;

use crate::config::{ReplayConfig, ResolvedOutputs};
use crate::trace::{TraceError, TraceTurn, read_trace};

/// Feeds a recorded percept trace through the agent and logs every decision.
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
    features: SearchFeatures,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub agent: &'static str,
    pub turns_replayed: usize,
    pub rows_written: usize,
    pub action_counts: BTreeMap<&'static str, usize>,
    pub jsonl_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct DecisionRow<'a> {
    run_id: &'a str,
    turn: usize,
    row: u8,
    col: u8,
    direction: &'static str,
    percepts: String,
    action: &'static str,
    code: u8,
    reason: &'static str,
    searched_action: Option<&'static str>,
    best_score: Option<f64>,
    nodes: usize,
    pits_deduced: Vec<Cell>,
    wumpus_deduced: Option<Cell>,
    elapsed_us: u64,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Self {
        let env = SearchFeatures::from_env();
        let features = env.with_details(config.logging.search_details || env.details_enabled());
        Self {
            config,
            outputs,
            features,
        }
    }

    fn policy(&self) -> Result<Box<dyn Policy>, ReplayError> {
        let controller =
            TurnController::new(self.config.world)?.with_search(self.config.search.search_config());
        Ok(Box::new(LookaheadPolicy::from_controller(
            controller,
            self.features,
        )))
    }

    /// Replay the trace, streaming one JSONL row per turn to disk.
    pub fn run(&self) -> Result<ReplaySummary, ReplayError> {
        let turns = read_trace(&self.outputs.trace)?;
        let mut policy = self.policy()?;

        ensure_parent(self.outputs.decisions_jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.decisions_jsonl)?);
        let mut action_counts = BTreeMap::new();

        event!(
            target: "wumpus_replay::run",
            Level::INFO,
            run_id = %self.config.run_id,
            agent = policy.name(),
            turns = turns.len(),
            max_depth = self.config.search.max_depth,
        );

        for (index, turn) in turns.iter().enumerate() {
            let row = self.replay_turn(policy.as_mut(), index, turn)?;
            *action_counts.entry(row.action).or_insert(0) += 1;
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        event!(
            target: "wumpus_replay::run",
            Level::INFO,
            run_id = %self.config.run_id,
            rows = turns.len(),
            path = %self.outputs.decisions_jsonl.display(),
        );

        Ok(ReplaySummary {
            agent: policy.name(),
            turns_replayed: turns.len(),
            rows_written: turns.len(),
            action_counts,
            jsonl_path: self.outputs.decisions_jsonl.clone(),
        })
    }

    fn replay_turn(
        &self,
        policy: &mut dyn Policy,
        index: usize,
        turn: &TraceTurn,
    ) -> Result<DecisionRow<'_>, ReplayError> {
        let start = Instant::now();
        let action = policy
            .decide(&turn.percepts, turn.pose)
            .map_err(|source| ReplayError::Observation {
                turn: index,
                source,
            })?;
        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        let summary = policy.last_decision();
        let outcome = summary.map(|summary| &summary.outcome);
        Ok(DecisionRow {
            run_id: &self.config.run_id,
            turn: index,
            row: turn.pose.position.row,
            col: turn.pose.position.col,
            direction: turn.pose.direction.as_str(),
            percepts: turn.percepts.flags(),
            action: action.as_str(),
            code: action.code(),
            reason: outcome.map_or("unknown", |outcome| outcome.reason.as_str()),
            searched_action: outcome
                .and_then(|outcome| outcome.searched_action)
                .map(|searched| searched.as_str()),
            best_score: outcome.and_then(|outcome| outcome.best_score),
            nodes: summary.map_or(0, |summary| summary.node_count),
            pits_deduced: summary
                .map(|summary| summary.observation.pits_deduced.clone())
                .unwrap_or_default(),
            wumpus_deduced: summary.and_then(|summary| summary.observation.wumpus_deduced),
            elapsed_us,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), ReplayError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("{0}")]
    Trace(#[from] TraceError),
    #[error("invalid world: {0}")]
    World(#[from] wumpus_core::config::ConfigError),
    #[error("turn {turn} rejected: {source}")]
    Observation {
        turn: usize,
        #[source]
        source: ObservationError,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize decision row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}
