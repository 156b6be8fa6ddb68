//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use game_core::{Catalog, GameState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::repository::StateRepository;
use crate::workers::{Command, Persistence, SimulationWorker, TickerWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Period of the built-in ticker. `None` leaves ticking to the caller.
    pub tick_interval: Option<Duration>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Save after this many ticks. Zero disables autosave.
    pub autosave_every_ticks: u64,
    /// Slot restored on build and written by saves.
    pub save_slot: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Some(Duration::from_millis(50)),
            event_buffer_size: 100,
            command_buffer_size: 32,
            autosave_every_ticks: 600,
            save_slot: "main".to_owned(),
        }
    }
}

impl RuntimeConfig {
    /// Config for callers that deliver every tick through the handle.
    pub fn manual() -> Self {
        Self {
            tick_interval: None,
            ..Self::default()
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
    ticker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for queued commands to drain. Handles cloned from this runtime
    /// keep the simulation worker alive until they are dropped too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        if let Some(ticker) = self.ticker_handle {
            ticker.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
#[derive(Default)]
pub struct RuntimeBuilder {
    catalog: Option<Arc<Catalog>>,
    config: RuntimeConfig,
    state: Option<GameState>,
    repository: Option<Arc<dyn StateRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Set the required layer catalog
    pub fn catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state. Takes precedence over a saved slot.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Persist through this repository
    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime
    ///
    /// The starting state is the explicit initial state, else the saved
    /// slot, else the catalog's fresh state. Loaded states are restored
    /// against the catalog before the first tick.
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;

        let saved = match (&self.state, &self.repository) {
            (None, Some(repository)) => repository.load(&self.config.save_slot)?,
            _ => None,
        };
        let initial_state = match self.state.or(saved) {
            Some(state) => {
                info!(
                    target: "runtime::worker",
                    slot = %self.config.save_slot,
                    day = state.day(),
                    "restoring state against catalog"
                );
                catalog.restore(&state)
            }
            None => catalog.initial_state(),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let persistence = self.repository.map(|repository| Persistence {
            repository,
            slot: self.config.save_slot.clone(),
            every_ticks: self.config.autosave_every_ticks,
        });

        let ticker_handle = self.config.tick_interval.map(|period| {
            let ticker = TickerWorker::new(command_tx.downgrade(), period);
            tokio::spawn(ticker.run())
        });

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            catalog,
            initial_state,
            command_rx,
            event_bus,
            persistence,
        );
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        Ok(Runtime {
            handle,
            sim_worker_handle,
            ticker_handle,
        })
    }
}
