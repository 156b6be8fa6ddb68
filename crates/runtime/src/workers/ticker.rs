//! Periodic tick source.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use super::Command;

/// Sends a `Tick` carrying the measured elapsed time at a fixed period.
///
/// Holds only a weak sender, so it never keeps the simulation worker alive
/// after every [`crate::RuntimeHandle`] is gone.
pub(crate) struct TickerWorker {
    command_tx: mpsc::WeakSender<Command>,
    period: Duration,
}

impl TickerWorker {
    pub(crate) fn new(command_tx: mpsc::WeakSender<Command>, period: Duration) -> Self {
        Self { command_tx, period }
    }

    pub(crate) async fn run(self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();

        loop {
            let now = interval.tick().await;
            let delta = now.duration_since(last).as_secs_f64();
            last = now;

            let Some(command_tx) = self.command_tx.upgrade() else {
                debug!(target: "runtime::ticker", "runtime handles dropped; ticker stopping");
                break;
            };
            if command_tx
                .send(Command::Tick { delta, reply: None })
                .await
                .is_err()
            {
                debug!(target: "runtime::ticker", "command channel closed; ticker stopping");
                break;
            }
        }
    }
}
