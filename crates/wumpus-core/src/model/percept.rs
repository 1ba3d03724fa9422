use super::cell::Cell;
use super::direction::Direction;
use serde::{Deserialize, Serialize};

/// Boolean sensor readings delivered by the engine at the start of a turn.
///
/// No field has a serde default: a reading missing from the input is a
/// contract violation and must fail deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percepts {
    pub glitter: bool,
    pub breeze: bool,
    pub stench: bool,
    pub scream: bool,
    pub bump: bool,
}

impl Percepts {
    pub const NONE: Percepts = Percepts {
        glitter: false,
        breeze: false,
        stench: false,
        scream: false,
        bump: false,
    };

    /// Single-letter flags in `GBSCU` order, `-` when absent.
    pub fn flags(&self) -> String {
        [
            (self.glitter, 'G'),
            (self.breeze, 'B'),
            (self.stench, 'S'),
            (self.scream, 'C'),
            (self.bump, 'U'),
        ]
        .iter()
        .map(|&(on, c)| if on { c } else { '-' })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPose {
    pub position: Cell,
    pub direction: Direction,
}

impl AgentPose {
    pub const fn new(position: Cell, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// True when `target` lies strictly ahead on the agent's row or column.
    pub fn faces(&self, target: Cell) -> bool {
        let here = self.position;
        match self.direction {
            Direction::North => here.col == target.col && target.row > here.row,
            Direction::South => here.col == target.col && target.row < here.row,
            Direction::East => here.row == target.row && target.col > here.col,
            Direction::West => here.row == target.row && target.col < here.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentPose, Percepts};
    use crate::model::cell::Cell;
    use crate::model::direction::Direction;

    #[test]
    fn facing_west_along_row() {
        let pose = AgentPose::new(Cell::new(3, 4), Direction::West);
        assert!(pose.faces(Cell::new(3, 1)));
        assert!(!pose.faces(Cell::new(2, 1)));
        assert!(!pose.faces(Cell::new(3, 4)));
    }

    #[test]
    fn facing_requires_strictly_ahead() {
        let pose = AgentPose::new(Cell::new(2, 2), Direction::North);
        assert!(pose.faces(Cell::new(4, 2)));
        assert!(!pose.faces(Cell::new(1, 2)));

        let pose = AgentPose::new(Cell::new(2, 2), Direction::South);
        assert!(pose.faces(Cell::new(1, 2)));
        assert!(!pose.faces(Cell::new(3, 2)));

        let pose = AgentPose::new(Cell::new(2, 2), Direction::East);
        assert!(pose.faces(Cell::new(2, 3)));
        assert!(!pose.faces(Cell::new(2, 1)));
    }

    #[test]
    fn percepts_require_every_field() {
        let full = r#"{"glitter":false,"breeze":true,"stench":false,"scream":false,"bump":false}"#;
        let parsed: Percepts = serde_json::from_str(full).unwrap();
        assert!(parsed.breeze);
        assert_eq!(parsed.flags(), "-B---");

        let partial = r#"{"glitter":false,"breeze":true}"#;
        assert!(serde_json::from_str::<Percepts>(partial).is_err());
    }
}
