use super::direction::Rotation;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Actions understood by the game engine. The discriminants are the wire
/// codes the engine expects and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Action {
    NoOp = 0,
    MoveForward = 1,
    TurnRight = 2,
    TurnLeft = 3,
    Grab = 4,
    Shoot = 5,
    Climb = 6,
}

/// What an action does to the agent's pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEffect {
    pub rotation: Rotation,
    pub advances: bool,
}

impl ActionEffect {
    const STILL: ActionEffect = ActionEffect {
        rotation: Rotation::Hold,
        advances: false,
    };
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::NoOp,
        Action::MoveForward,
        Action::TurnRight,
        Action::TurnLeft,
        Action::Grab,
        Action::Shoot,
        Action::Climb,
    ];

    /// Branching set for hypothetical play, in the order children are expanded.
    pub const EXPANSION_ORDER: [Action; 4] = [
        Action::MoveForward,
        Action::TurnRight,
        Action::TurnLeft,
        Action::Climb,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Action::NoOp),
            1 => Some(Action::MoveForward),
            2 => Some(Action::TurnRight),
            3 => Some(Action::TurnLeft),
            4 => Some(Action::Grab),
            5 => Some(Action::Shoot),
            6 => Some(Action::Climb),
            _ => None,
        }
    }

    pub const fn effect(self) -> ActionEffect {
        match self {
            Action::MoveForward => ActionEffect {
                rotation: Rotation::Hold,
                advances: true,
            },
            Action::TurnRight => ActionEffect {
                rotation: Rotation::Right,
                advances: false,
            },
            Action::TurnLeft => ActionEffect {
                rotation: Rotation::Left,
                advances: false,
            },
            Action::NoOp | Action::Grab | Action::Shoot | Action::Climb => ActionEffect::STILL,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::NoOp => "no_op",
            Action::MoveForward => "move_forward",
            Action::TurnRight => "turn_right",
            Action::TurnLeft => "turn_left",
            Action::Grab => "grab",
            Action::Shoot => "shoot",
            Action::Climb => "climb",
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::NoOp
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
