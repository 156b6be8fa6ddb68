//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! ticking, purchasing and querying, or streaming events from specific topics.

use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    BuyableId, Decimal, GameState, LayerId, LayerSummary, PurchaseOutcome, ResourceId,
    TickReport, UpgradeId,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Run one update pass and wait for its report
    pub async fn tick(&self, delta_secs: f64) -> Result<TickReport> {
        self.request(|reply| Command::Tick {
            delta: delta_secs,
            reply: Some(reply),
        })
        .await
    }

    /// Try to buy one more of a buyable
    pub async fn purchase_buyable(&self, buyable: BuyableId) -> Result<PurchaseOutcome> {
        self.request(|reply| Command::PurchaseBuyable { buyable, reply })
            .await?
    }

    /// Try to buy a one-shot upgrade
    pub async fn purchase_upgrade(&self, upgrade: UpgradeId) -> Result<PurchaseOutcome> {
        self.request(|reply| Command::PurchaseUpgrade { upgrade, reply })
            .await?
    }

    /// Move the day counter. Returns the previous day.
    pub async fn set_day(&self, day: u32) -> Result<u32> {
        self.request(|reply| Command::SetDay { day, reply }).await
    }

    /// Overwrite a stored resource. Returns the previous value.
    pub async fn set_resource(&self, resource: ResourceId, value: Decimal) -> Result<Decimal> {
        self.request(|reply| Command::SetResource {
            resource,
            value,
            reply,
        })
        .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Query the display summary of one layer
    pub async fn query_layer(&self, layer: LayerId) -> Result<Option<LayerSummary>> {
        self.request(|reply| Command::QueryLayer { layer, reply })
            .await
    }

    /// Write the current state to the configured save slot
    pub async fn save(&self) -> Result<()> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Tick` - One event per processed tick
    /// - `Topic::Purchase` - Accepted and rejected purchases
    /// - `Topic::Progress` - Milestones, layer unlocks and completions, day changes
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
