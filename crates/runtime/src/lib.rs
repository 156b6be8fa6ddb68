//! Async runtime around the progression engine.
//!
//! This crate wires the engine, repositories and worker tasks into a cohesive
//! runtime API. Consumers embed [`Runtime`] to drive ticks, subscribe to
//! events, and purchase through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists state under named save slots
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{
    DebitRecord, Event, EventBus, ProgressEvent, PurchaseEvent, PurchaseKind, RepairRecord,
    TickEvent, Topic,
};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, SAVE_VERSION, SaveFile,
    StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
