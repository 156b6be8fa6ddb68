//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`] and the ticker, executes
//! them through [`game_core::GameEngine`], and publishes events to the
//! EventBus. Commands run one at a time, so every tick and purchase sees a
//! consistent state.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use game_core::{
    BuyableId, Catalog, Decimal, GameEngine, GameState, LayerId, LayerSummary, PurchaseOutcome,
    ResourceId, TickReport, UpgradeId,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, ProgressEvent, PurchaseEvent, PurchaseKind, TickEvent};
use crate::repository::StateRepository;

/// Commands that can be sent to the simulation worker
pub(crate) enum Command {
    /// Run one update pass. The ticker sends these without a reply.
    Tick {
        delta: f64,
        reply: Option<oneshot::Sender<TickReport>>,
    },
    PurchaseBuyable {
        buyable: BuyableId,
        reply: oneshot::Sender<Result<PurchaseOutcome>>,
    },
    PurchaseUpgrade {
        upgrade: UpgradeId,
        reply: oneshot::Sender<Result<PurchaseOutcome>>,
    },
    /// Replies with the previous day.
    SetDay { day: u32, reply: oneshot::Sender<u32> },
    /// Replies with the previous value.
    SetResource {
        resource: ResourceId,
        value: Decimal,
        reply: oneshot::Sender<Result<Decimal>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    QueryLayer {
        layer: LayerId,
        reply: oneshot::Sender<Option<LayerSummary>>,
    },
    /// Write the state to the configured save slot.
    Save { reply: oneshot::Sender<Result<()>> },
}

/// Where and how often the worker persists state.
pub(crate) struct Persistence {
    pub(crate) repository: Arc<dyn StateRepository>,
    pub(crate) slot: String,
    /// Zero disables autosave.
    pub(crate) every_ticks: u64,
}

/// Background task that processes gameplay commands.
pub(crate) struct SimulationWorker {
    catalog: Arc<Catalog>,
    state: GameState,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    persistence: Option<Persistence>,
    ticks: u64,
}

impl SimulationWorker {
    pub(crate) fn new(
        catalog: Arc<Catalog>,
        state: GameState,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        persistence: Option<Persistence>,
    ) -> Self {
        info!(
            target: "runtime::worker",
            day = state.day(),
            layers = catalog.layers().len(),
            "SimulationWorker initialized"
        );

        Self {
            catalog,
            state,
            command_rx,
            event_bus,
            persistence,
            ticks: 0,
        }
    }

    /// Main worker loop. Ends once every command sender is gone.
    pub(crate) async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", ticks = self.ticks, "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Tick { delta, reply } => {
                let report = self.handle_tick(delta);
                if let Some(reply) = reply
                    && reply.send(report).is_err()
                {
                    debug!("Tick reply channel closed (caller dropped)");
                }
            }
            Command::PurchaseBuyable { buyable, reply } => {
                let result = self.handle_purchase_buyable(buyable);
                if reply.send(result).is_err() {
                    debug!("PurchaseBuyable reply channel closed (caller dropped)");
                }
            }
            Command::PurchaseUpgrade { upgrade, reply } => {
                let result = self.handle_purchase_upgrade(upgrade);
                if reply.send(result).is_err() {
                    debug!("PurchaseUpgrade reply channel closed (caller dropped)");
                }
            }
            Command::SetDay { day, reply } => {
                let previous = self.handle_set_day(day);
                if reply.send(previous).is_err() {
                    debug!("SetDay reply channel closed (caller dropped)");
                }
            }
            Command::SetResource {
                resource,
                value,
                reply,
            } => {
                let result = self
                    .engine()
                    .set_resource(resource, value)
                    .map_err(RuntimeError::from);
                if let Err(error) = &result {
                    warn!(
                        target: "runtime::worker",
                        %resource,
                        severity = error.severity().as_str(),
                        %error,
                        "resource write rejected"
                    );
                }
                if reply.send(result).is_err() {
                    debug!("SetResource reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryLayer { layer, reply } => {
                let summary = self.catalog.view(&self.state).layer_summary(layer);
                if reply.send(summary).is_err() {
                    debug!("QueryLayer reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                let result = self.save();
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&self.catalog, &mut self.state)
    }

    fn handle_tick(&mut self, delta: f64) -> TickReport {
        let report = self.engine().tick(delta);
        self.ticks += 1;

        for repair in &report.repairs {
            warn!(
                target: "runtime::worker",
                buyable = %repair.buyable,
                from = %repair.from,
                to = %repair.to,
                "buyable amount exceeded its backing resource; clamped"
            );
        }
        for milestone in &report.earned {
            info!(target: "runtime::worker", %milestone, "milestone earned");
        }
        for layer in &report.unlocked {
            info!(target: "runtime::worker", %layer, "layer unlocked");
        }
        for layer in &report.completed {
            info!(target: "runtime::worker", %layer, "daily goal completed");
        }

        self.event_bus
            .publish(Event::Tick(TickEvent::new(self.ticks, delta, &report)));
        for event in ProgressEvent::from_report(&report) {
            self.event_bus.publish(Event::Progress(event));
        }

        self.autosave();
        report
    }

    fn handle_purchase_buyable(&mut self, buyable: BuyableId) -> Result<PurchaseOutcome> {
        let outcome = self.engine().purchase_buyable(buyable)?;
        self.publish_purchase(PurchaseKind::Buyable, buyable.to_string(), &outcome);
        Ok(outcome)
    }

    fn handle_purchase_upgrade(&mut self, upgrade: UpgradeId) -> Result<PurchaseOutcome> {
        let outcome = self.engine().purchase_upgrade(upgrade)?;
        self.publish_purchase(PurchaseKind::Upgrade, upgrade.to_string(), &outcome);
        Ok(outcome)
    }

    fn publish_purchase(&self, kind: PurchaseKind, item: String, outcome: &PurchaseOutcome) {
        let event = match outcome {
            PurchaseOutcome::Purchased(receipt) => {
                debug!(
                    target: "runtime::worker",
                    ?kind,
                    %item,
                    amount = %receipt.amount,
                    "purchase accepted"
                );
                PurchaseEvent::purchased(kind, item, receipt)
            }
            PurchaseOutcome::Rejected(reason) => {
                debug!(target: "runtime::worker", ?kind, %item, %reason, "purchase rejected");
                PurchaseEvent::Rejected {
                    kind,
                    item,
                    reason: reason.to_string(),
                }
            }
        };
        self.event_bus.publish(Event::Purchase(event));
    }

    fn handle_set_day(&mut self, day: u32) -> u32 {
        let previous = self.engine().set_day(day);
        if previous != day {
            info!(target: "runtime::worker", from = previous, to = day, "day changed");
            self.event_bus
                .publish(Event::Progress(ProgressEvent::DayChanged {
                    from: previous,
                    to: day,
                }));
        }
        previous
    }

    fn save(&self) -> Result<()> {
        let persistence = self
            .persistence
            .as_ref()
            .ok_or(RuntimeError::RepositoryNotConfigured)?;
        persistence
            .repository
            .save(&persistence.slot, &self.state)?;
        Ok(())
    }

    fn autosave(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        if persistence.every_ticks == 0 || self.ticks % persistence.every_ticks != 0 {
            return;
        }
        match persistence.repository.save(&persistence.slot, &self.state) {
            Ok(()) => debug!(
                target: "runtime::worker",
                slot = %persistence.slot,
                ticks = self.ticks,
                "autosaved"
            ),
            Err(error) => warn!(
                target: "runtime::worker",
                slot = %persistence.slot,
                %error,
                "autosave failed"
            ),
        }
    }
}
