//! The periodic update pass.

use super::GameEngine;
use crate::num::Decimal;
use crate::state::{BuyableId, LayerId, MilestoneId, TrackerPhase};

/// A buyable amount clamped down to its mirrored resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repair {
    pub buyable: BuyableId,
    pub from: Decimal,
    pub to: Decimal,
}

/// Everything a tick changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Amounts that had drifted above their backing resource.
    pub repairs: Vec<Repair>,
    pub earned: Vec<MilestoneId>,
    /// Layers whose tracker left `Locked`.
    pub unlocked: Vec<LayerId>,
    pub completed: Vec<LayerId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.repairs.is_empty()
            && self.earned.is_empty()
            && self.unlocked.is_empty()
            && self.completed.is_empty()
    }
}

impl<'a> GameEngine<'a> {
    /// Runs one update over every layer in registration order.
    ///
    /// 1. Reconcile: on unlocked layers, clamp each mirrored buyable's amount
    ///    down to its resource.
    /// 2. Milestones: latch every due milestone of every layer, locked or
    ///    not. All conditions are judged against the same post-reconcile state.
    /// 3. Trackers: advance every layer's daily phase.
    ///
    /// The elapsed time is accepted for the tick contract and not consumed.
    /// Each pass is idempotent, so a repeated tick reports nothing.
    pub fn tick(&mut self, _delta_secs: f64) -> TickReport {
        let mut report = TickReport::default();
        self.reconcile(&mut report);
        self.latch_milestones(&mut report);
        self.advance_trackers(&mut report);
        report
    }

    fn reconcile(&mut self, report: &mut TickReport) {
        let catalog = self.catalog;
        for layer in catalog.layers() {
            if !self.view().is_layer_unlocked(layer.id) {
                continue;
            }
            for (buyable, mirror) in layer.bindings() {
                let (amount, backing) = {
                    let view = self.view();
                    (view.buyable_amount(buyable), view.resource(mirror))
                };
                if backing < amount {
                    self.state.set_buyable_amount(buyable, backing);
                    report.repairs.push(Repair {
                        buyable,
                        from: amount,
                        to: backing,
                    });
                }
            }
        }
    }

    fn latch_milestones(&mut self, report: &mut TickReport) {
        let catalog = self.catalog;
        let due: Vec<MilestoneId> = {
            let view = self.view();
            catalog
                .layers()
                .iter()
                .flat_map(|layer| layer.milestones.iter())
                .filter(|milestone| milestone.is_due(&view))
                .map(|milestone| milestone.id)
                .collect()
        };

        for id in due {
            if self.state.earn_milestone(id) {
                report.earned.push(id);
            }
        }
    }

    fn advance_trackers(&mut self, report: &mut TickReport) {
        let catalog = self.catalog;
        let inputs: Vec<(LayerId, bool, bool)> = {
            let view = self.view();
            catalog
                .layers()
                .iter()
                .map(|layer| {
                    let day_reached = view.day() >= layer.day;
                    let goal_reached = layer
                        .tracker
                        .as_ref()
                        .is_some_and(|tracker| tracker.goal_reached(&view));
                    (layer.id, day_reached, goal_reached)
                })
                .collect()
        };

        for (layer, day_reached, goal_reached) in inputs {
            let Some((before, after)) = self.state.advance_tracker(layer, day_reached, goal_reached)
            else {
                continue;
            };
            if before == TrackerPhase::Locked && after != TrackerPhase::Locked {
                report.unlocked.push(layer);
            }
            if !before.is_completed() && after.is_completed() {
                report.completed.push(layer);
            }
        }
    }
}
