//! Daily progress tracker.
//!
//! Gates a layer's completion behind the day counter reaching the layer's day
//! and a tracked total reaching the goal. The phase itself lives in
//! [`GameState`](crate::GameState) as a [`TrackerPhase`].

use crate::num::Decimal;
use crate::state::{LayerId, ResourceId, TrackerPhase};
use crate::view::GameView;

#[derive(Clone, Debug)]
pub struct TrackerDef {
    pub goal: Decimal,
    /// Resource whose current value is the running total.
    pub total: ResourceId,
}

impl TrackerDef {
    pub fn new(total: ResourceId, goal: impl Into<Decimal>) -> Self {
        Self {
            goal: goal.into(),
            total,
        }
    }

    pub fn total(&self, view: &GameView<'_>) -> Decimal {
        view.resource(self.total)
    }

    pub fn goal_reached(&self, view: &GameView<'_>) -> bool {
        self.total(view) >= self.goal
    }

    /// Fraction for the progress bar: `min(total / goal, 1)`.
    ///
    /// Locked layers report zero, completed layers one.
    pub fn progress(&self, view: &GameView<'_>, layer: LayerId) -> Decimal {
        match view.tracker_phase(layer) {
            TrackerPhase::Locked => Decimal::ZERO,
            TrackerPhase::Completed => Decimal::ONE,
            TrackerPhase::InProgress if self.goal <= Decimal::ZERO => Decimal::ONE,
            TrackerPhase::InProgress => (self.total(view) / self.goal)
                .min(Decimal::ONE)
                .max(Decimal::ZERO),
        }
    }
}
