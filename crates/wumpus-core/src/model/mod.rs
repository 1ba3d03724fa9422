pub mod action;
pub mod cell;
pub mod direction;
pub mod hazard;
pub mod percept;
