//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the game state and executes commands, while the
//! ticker drives it with periodic ticks.

mod simulation;
mod ticker;

pub(crate) use simulation::{Command, Persistence, SimulationWorker};
pub(crate) use ticker::TickerWorker;
