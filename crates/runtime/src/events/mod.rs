//! Topic-based event bus for runtime events.
//!
//! The simulation worker publishes what each command changed. Consumers
//! subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{
    DebitRecord, ProgressEvent, PurchaseEvent, PurchaseKind, RepairRecord, TickEvent,
};
