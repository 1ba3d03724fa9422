use std::path::PathBuf;

use clap::Parser;

use wumpus_replay::config::{ReplayConfig, ResolvedOutputs};
use wumpus_replay::logging::init_logging;
use wumpus_replay::replay::ReplayRunner;

/// Replays recorded Wumpus World percepts through the lookahead agent.
#[derive(Debug, Parser)]
#[command(
    name = "wumpus-replay",
    author,
    version,
    about = "Deterministic decision replay for the Wumpus lookahead agent"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "replay/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the percept trace to replay.
    #[arg(long, value_name = "FILE")]
    trace: Option<String>,

    /// Override the lookahead depth.
    #[arg(long, value_name = "DEPTH")]
    depth: Option<u8>,

    /// Exit after validating the configuration (no turns are replayed).
    #[arg(long)]
    validate_only: bool,

    /// Log per-first-action search scores regardless of config.
    #[arg(long)]
    log_search_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(trace) = cli.trace {
        config.trace = trace;
    }

    if let Some(depth) = cli.depth {
        config.search.max_depth = depth;
    }

    if cli.log_search_details {
        config.logging.search_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    println!(
        "Loaded configuration '{run_id}' ({}x{} grid, {} pits, depth {})",
        config.world.grid_size,
        config.world.grid_size,
        config.world.pit_count,
        config.search.max_depth
    );

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = ReplayRunner::new(config, outputs);
    let summary = runner.run()?;

    println!(
        "Replay complete for '{run_id}': {} turns by {} -> {} rows at {}",
        summary.turns_replayed,
        summary.agent,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for (action, count) in &summary.action_counts {
        println!("  {action}: {count}");
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
