//! Headless client that runs one play session.
//!
//! The client owns the [`Runtime`], logs what the simulation reports, and
//! saves the session when asked to stop.

mod builder;
pub mod config;
pub mod logging;

pub use builder::ClientBuilder;
pub use config::ClientConfig;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use game_core::Catalog;
use runtime::{Event, PurchaseEvent, Runtime, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;

/// Top-level client container.
pub struct Client {
    runtime: Runtime,
    catalog: Arc<Catalog>,
    session_id: String,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Runs until `shutdown` resolves, then saves and stops the runtime.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let handle = self.runtime.handle();
        let reporter = tokio::spawn(report_events(handle.clone()));

        tracing::info!("Session {} running", self.session_id);
        shutdown.await;
        tracing::info!("Shutdown requested, saving session {}", self.session_id);

        handle.save().await?;
        let state = handle.query_state().await?;
        drop(handle);
        self.runtime.shutdown().await?;

        reporter.abort();
        let _ = reporter.await;

        let view = self.catalog.view(&state);
        tracing::info!(
            "Day {}: {} daily goals completed",
            view.day(),
            view.days_completed()
        );
        if let Some(progress) = view.day_progress() {
            tracing::info!("Current goal progress: {}", progress);
        }

        Ok(())
    }
}

async fn report_events(handle: RuntimeHandle) {
    let mut progress = handle.subscribe(Topic::Progress);
    let mut purchases = handle.subscribe(Topic::Purchase);
    drop(handle);

    loop {
        let event = tokio::select! {
            event = progress.recv() => event,
            event = purchases.recv() => event,
        };
        match event {
            Ok(Event::Progress(event)) => tracing::info!("{:?}", event),
            Ok(Event::Purchase(PurchaseEvent::Rejected { item, reason, .. })) => {
                tracing::info!("Purchase of {} rejected: {}", item, reason)
            }
            Ok(event) => tracing::debug!("{:?}", event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Event reporter lagged, skipped {} events", skipped)
            }
            Err(RecvError::Closed) => break,
        }
    }
}
