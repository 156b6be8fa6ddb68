//! Read-only view over a catalog and a state snapshot.
//!
//! Every formula, predicate and cost in the catalog is evaluated against a
//! [`GameView`]. Derived resources are recomputed on each read, so a view
//! built after a mutation never observes stale values.

use crate::catalog::Catalog;
use crate::num::Decimal;
use crate::resource::ResourceSource;
use crate::state::{BuyableId, GameState, LayerId, MilestoneId, ResourceId, TrackerPhase, UpgradeId};
use crate::summary::LayerSummary;

#[derive(Clone, Copy, Debug)]
pub struct GameView<'a> {
    catalog: &'a Catalog,
    state: &'a GameState,
}

impl<'a> GameView<'a> {
    pub(crate) fn new(catalog: &'a Catalog, state: &'a GameState) -> Self {
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn state(&self) -> &'a GameState {
        self.state
    }

    pub fn day(&self) -> u32 {
        self.state.day()
    }

    /// Current value of a resource, or zero when the id is unknown.
    pub fn resource(&self, id: ResourceId) -> Decimal {
        self.try_resource(id).unwrap_or(Decimal::ZERO)
    }

    /// Current value of a resource.
    ///
    /// Stored resources are read from the snapshot; derived resources are
    /// recomputed from their formula.
    pub fn try_resource(&self, id: ResourceId) -> Option<Decimal> {
        let def = self.catalog.resource(id)?;
        match &def.source {
            ResourceSource::Stored { initial } => {
                Some(self.state.stored(id).unwrap_or(*initial))
            }
            ResourceSource::Derived(formula) => Some(formula.eval(self)),
        }
    }

    pub fn buyable_amount(&self, id: BuyableId) -> Decimal {
        self.state.buyable_amount(id).unwrap_or(Decimal::ZERO)
    }

    pub fn upgrade_bought(&self, id: UpgradeId) -> bool {
        self.state.upgrade_bought(id)
    }

    pub fn milestone_earned(&self, id: MilestoneId) -> bool {
        self.state.milestone(id).is_earned()
    }

    pub fn tracker_phase(&self, layer: LayerId) -> TrackerPhase {
        self.state.tracker(layer)
    }

    /// True once the day counter has reached the layer's unlock day.
    pub fn is_layer_unlocked(&self, layer: LayerId) -> bool {
        self.catalog
            .layer(layer)
            .is_some_and(|def| self.day() >= def.day)
    }

    /// True when purchases on the layer are accepted.
    pub fn is_layer_open(&self, layer: LayerId) -> bool {
        if self.catalog.config().lock_purchases_before_day {
            self.is_layer_unlocked(layer)
        } else {
            self.catalog.layer(layer).is_some()
        }
    }

    /// Evaluates a layer's named modifier pipeline from its own base.
    pub fn modifier(&self, layer: LayerId, key: &str) -> Option<Decimal> {
        let named = self.catalog.layer(layer)?.pipeline(key)?;
        Some(named.pipeline.evaluate(self, named.base))
    }

    /// Number of layers whose tracker has completed.
    pub fn days_completed(&self) -> usize {
        self.catalog
            .layers()
            .iter()
            .filter(|def| self.tracker_phase(def.id).is_completed())
            .count()
    }

    /// Progress of the most recently unlocked tracked layer, for the shared
    /// top-level bar.
    pub fn day_progress(&self) -> Option<Decimal> {
        self.catalog
            .layers()
            .iter()
            .filter(|def| def.day <= self.day())
            .filter_map(|def| def.tracker.as_ref().map(|tracker| (def, tracker)))
            .max_by_key(|(def, _)| def.day)
            .map(|(def, tracker)| tracker.progress(self, def.id))
    }

    pub fn layer_summary(&self, layer: LayerId) -> Option<LayerSummary> {
        let def = self.catalog.layer(layer)?;
        Some(LayerSummary::collect(self, def))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::testing::{fixture_catalog, fixture_layers, FACTORY, GEARS, SPRINGS, TOTAL, WORKSHOP};

    #[test]
    fn derived_resources_follow_their_inputs() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::from(3u32));
        state.set_stored(SPRINGS, Decimal::from(4u32));

        assert_eq!(catalog.view(&state).resource(TOTAL), Decimal::from(7u32));

        state.set_stored(GEARS, Decimal::ZERO);
        assert_eq!(catalog.view(&state).resource(TOTAL), Decimal::from(4u32));
    }

    #[test]
    fn unknown_resources_read_as_zero() {
        let catalog = fixture_catalog();
        let state = catalog.initial_state();
        let view = catalog.view(&state);
        let ghost = ResourceId::new(WORKSHOP, "ghost");

        assert_eq!(view.try_resource(ghost), None);
        assert_eq!(view.resource(ghost), Decimal::ZERO);
    }

    #[test]
    fn purchase_lock_follows_config() {
        let catalog = fixture_catalog();
        let state = catalog.initial_state();
        let view = catalog.view(&state);
        assert!(view.is_layer_open(WORKSHOP));
        assert!(!view.is_layer_open(FACTORY));

        let unlocked = Catalog::builder()
            .config(GameConfig::new().with_purchase_lock(false))
            .layers(fixture_layers())
            .build()
            .unwrap();
        let state = unlocked.initial_state();
        let view = unlocked.view(&state);
        assert!(!view.is_layer_unlocked(FACTORY));
        assert!(view.is_layer_open(FACTORY));
    }

    #[test]
    fn day_progress_tracks_latest_unlocked_layer() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::from(5u32));
        state.advance_tracker(WORKSHOP, true, false);

        let view = catalog.view(&state);
        assert_eq!(view.day_progress(), Some(Decimal::new(0.5)));
        assert_eq!(view.days_completed(), 0);
    }
}
