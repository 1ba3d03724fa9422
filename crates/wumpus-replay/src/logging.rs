use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Where decision telemetry lands: `logging.telemetry_file` beside the decisions file.
pub fn telemetry_path(logging: &LoggingConfig, outputs: &ResolvedOutputs) -> PathBuf {
    let dir = outputs
        .decisions_jsonl
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    dir.join(&logging.telemetry_file)
}

/// Routes `tracing` events as JSON lines into the telemetry file.
/// Does nothing when structured logging is off.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_path(logging, outputs);
    let file = open_telemetry(&telemetry_path)?;
    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    let default_level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // Only the first install wins; later runs in the same process keep it.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _worker: worker,
        telemetry_path,
    }))
}

fn open_telemetry(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating telemetry file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(decisions: &str) -> ResolvedOutputs {
        ResolvedOutputs {
            trace: PathBuf::from("trace.jsonl"),
            decisions_jsonl: PathBuf::from(decisions),
        }
    }

    #[test]
    fn telemetry_sits_beside_decisions() {
        let logging = LoggingConfig {
            telemetry_file: "events.jsonl".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(
            telemetry_path(&logging, &outputs("replay/out/run/decisions.jsonl")),
            PathBuf::from("replay/out/run/events.jsonl")
        );
    }

    #[test]
    fn bare_decisions_file_uses_current_dir() {
        let logging = LoggingConfig::default();
        assert_eq!(
            telemetry_path(&logging, &outputs("decisions.jsonl")),
            PathBuf::from("./telemetry.jsonl")
        );
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let logging = LoggingConfig::default();
        let guard = init_logging(&logging, &outputs("decisions.jsonl")).expect("no-op");
        assert!(guard.is_none());
    }
}
