//! Belief tracking over the cave grid.
//!
//! - `partition`: known / frontier / unknown bookkeeping.
//! - `state`: the hazard grids and the breeze, stench and arrow rules that update them.

mod partition;
mod state;

pub use partition::{CellPartition, Region};
pub use state::{BeliefState, ObservationCtx, ObservationError, ObservationReport};
