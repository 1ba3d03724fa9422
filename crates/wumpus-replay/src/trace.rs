use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wumpus_core::model::percept::{AgentPose, Percepts};

/// One recorded turn: the five percept flags and the pose they were sensed at.
///
/// ```json
/// {"glitter":false,"breeze":true,"stench":false,"scream":false,"bump":false,
///  "position":{"row":1,"col":1},"direction":"north"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceTurn {
    #[serde(flatten)]
    pub percepts: Percepts,
    #[serde(flatten)]
    pub pose: AgentPose,
}

pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<TraceTurn>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TraceError::Read {
        source,
        path: path.to_path_buf(),
    })?;
    parse_trace(BufReader::new(file), path)
}

/// Parses JSONL turns, skipping blank lines. Line numbers in errors are 1-based.
pub fn parse_trace<R: BufRead>(reader: R, path: &Path) -> Result<Vec<TraceTurn>, TraceError> {
    let mut turns = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TraceError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let turn = serde_json::from_str(&line).map_err(|source| TraceError::Parse {
            source,
            path: path.to_path_buf(),
            line: index + 1,
        })?;
        turns.push(turn);
    }

    if turns.is_empty() {
        return Err(TraceError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(turns)
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("malformed turn at {path:?}:{line}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
        line: usize,
    },
    #[error("trace {path:?} contains no turns")]
    Empty { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wumpus_core::model::cell::Cell;
    use wumpus_core::model::direction::Direction;

    const TWO_TURNS: &str = r#"{"glitter":false,"breeze":false,"stench":false,"scream":false,"bump":false,"position":{"row":1,"col":1},"direction":"north"}

{"glitter":false,"breeze":true,"stench":false,"scream":false,"bump":false,"position":{"row":2,"col":1},"direction":"north"}
"#;

    #[test]
    fn parses_turns_and_skips_blank_lines() {
        let turns = parse_trace(Cursor::new(TWO_TURNS), Path::new("mem")).expect("parse");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].pose, AgentPose::new(Cell::START, Direction::North));
        assert!(turns[1].percepts.breeze);
        assert_eq!(turns[1].pose.position, Cell::new(2, 1));
    }

    #[test]
    fn reports_line_of_malformed_turn() {
        let text = TWO_TURNS.replace(r#""bump":false,"position":{"row":2"#, r#""position":{"row":2"#);
        let err = parse_trace(Cursor::new(text), Path::new("mem")).expect_err("missing bump");
        assert!(matches!(err, TraceError::Parse { line: 3, .. }));
    }

    #[test]
    fn empty_trace_is_rejected() {
        let err = parse_trace(Cursor::new("\n\n"), Path::new("mem")).expect_err("empty");
        assert!(matches!(err, TraceError::Empty { .. }));
    }
}
