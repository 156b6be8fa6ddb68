//! Authoritative game state representation.
//!
//! [`GameState`] is the persisted snapshot: every stored resource, buyable
//! amount, upgrade flag, milestone latch and tracker phase, keyed by layer id
//! and field name. Derived resources never appear here. Runtime layers clone
//! or query this state but mutate it exclusively through the engine.
mod ids;
mod latch;

use std::collections::BTreeMap;

pub use ids::{BuyableId, LayerId, MilestoneId, ResourceId, UpgradeId};
pub use latch::{MilestoneState, TrackerPhase};

use crate::num::Decimal;

/// Canonical snapshot of the game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Process-wide day counter, advanced by collaborators outside the engine.
    day: u32,
    layers: BTreeMap<String, LayerState>,
}

impl GameState {
    /// Creates an empty state at the given day.
    pub fn new(day: u32) -> Self {
        Self {
            day,
            layers: BTreeMap::new(),
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub(crate) fn set_day(&mut self, day: u32) {
        self.day = day;
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerState> {
        self.layers.get(id.as_str())
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut LayerState> {
        self.layers.get_mut(id.as_str())
    }

    pub(crate) fn insert_layer(&mut self, id: LayerId, layer: LayerState) {
        self.layers.insert(id.as_str().to_owned(), layer);
    }

    /// Iterates persisted layers in key order.
    pub fn layers(&self) -> impl Iterator<Item = (&str, &LayerState)> {
        self.layers.iter().map(|(id, layer)| (id.as_str(), layer))
    }

    /// Current value of a stored resource.
    pub fn stored(&self, id: ResourceId) -> Option<Decimal> {
        self.layer(id.layer)?.resources.get(id.key).copied()
    }

    /// Replaces a stored resource value. Returns `false` if the field does not exist.
    pub(crate) fn set_stored(&mut self, id: ResourceId, value: Decimal) -> bool {
        match self
            .layer_mut(id.layer)
            .and_then(|layer| layer.resources.get_mut(id.key))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn buyable_amount(&self, id: BuyableId) -> Option<Decimal> {
        self.layer(id.layer)?.buyables.get(id.key).copied()
    }

    pub(crate) fn set_buyable_amount(&mut self, id: BuyableId, amount: Decimal) -> bool {
        match self
            .layer_mut(id.layer)
            .and_then(|layer| layer.buyables.get_mut(id.key))
        {
            Some(slot) => {
                *slot = amount;
                true
            }
            None => false,
        }
    }

    pub fn upgrade_bought(&self, id: UpgradeId) -> bool {
        self.layer(id.layer)
            .and_then(|layer| layer.upgrades.get(id.key))
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn mark_upgrade_bought(&mut self, id: UpgradeId) -> bool {
        match self
            .layer_mut(id.layer)
            .and_then(|layer| layer.upgrades.get_mut(id.key))
        {
            Some(bought) => {
                *bought = true;
                true
            }
            None => false,
        }
    }

    pub fn milestone(&self, id: MilestoneId) -> MilestoneState {
        self.layer(id.layer)
            .and_then(|layer| layer.milestones.get(id.key))
            .copied()
            .unwrap_or_default()
    }

    /// Latches a milestone. Returns `true` only when it was previously unearned.
    pub(crate) fn earn_milestone(&mut self, id: MilestoneId) -> bool {
        self.layer_mut(id.layer)
            .and_then(|layer| layer.milestones.get_mut(id.key))
            .is_some_and(MilestoneState::earn)
    }

    pub fn tracker(&self, layer: LayerId) -> TrackerPhase {
        self.layer(layer)
            .map(|layer| layer.tracker)
            .unwrap_or_default()
    }

    pub(crate) fn advance_tracker(
        &mut self,
        layer: LayerId,
        day_reached: bool,
        goal_reached: bool,
    ) -> Option<(TrackerPhase, TrackerPhase)> {
        let state = self.layer_mut(layer)?;
        let before = state.tracker;
        state.tracker = before.advance(day_reached, goal_reached);
        Some((before, state.tracker))
    }

    /// SHA-256 over the bincode encoding of this state.
    ///
    /// Maps are ordered, so equal states always produce equal roots.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

/// Persisted fields of a single layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerState {
    resources: BTreeMap<String, Decimal>,
    buyables: BTreeMap<String, Decimal>,
    upgrades: BTreeMap<String, bool>,
    milestones: BTreeMap<String, MilestoneState>,
    tracker: TrackerPhase,
}

impl LayerState {
    pub fn resources(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn buyables(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.buyables.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn upgrades(&self) -> impl Iterator<Item = (&str, bool)> {
        self.upgrades.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn milestones(&self) -> impl Iterator<Item = (&str, MilestoneState)> {
        self.milestones.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn tracker(&self) -> TrackerPhase {
        self.tracker
    }

    pub(crate) fn with_resource(mut self, key: &str, value: Decimal) -> Self {
        self.resources.insert(key.to_owned(), value);
        self
    }

    pub(crate) fn with_buyable(mut self, key: &str) -> Self {
        self.buyables.insert(key.to_owned(), Decimal::ZERO);
        self
    }

    pub(crate) fn with_upgrade(mut self, key: &str) -> Self {
        self.upgrades.insert(key.to_owned(), false);
        self
    }

    pub(crate) fn with_milestone(mut self, key: &str) -> Self {
        self.milestones.insert(key.to_owned(), MilestoneState::Unearned);
        self
    }

    /// Copies every field this layer already knows from `saved`.
    ///
    /// Unknown saved keys are dropped. Missing keys keep their initial value.
    pub(crate) fn merge_saved(&mut self, saved: &LayerState) {
        for (key, slot) in self.resources.iter_mut() {
            if let Some(value) = saved.resources.get(key) {
                *slot = *value;
            }
        }
        for (key, slot) in self.buyables.iter_mut() {
            if let Some(amount) = saved.buyables.get(key) {
                *slot = *amount;
            }
        }
        for (key, slot) in self.upgrades.iter_mut() {
            if let Some(bought) = saved.upgrades.get(key) {
                *slot = *bought;
            }
        }
        for (key, slot) in self.milestones.iter_mut() {
            if let Some(state) = saved.milestones.get(key) {
                *slot = *state;
            }
        }
        self.tracker = saved.tracker;
    }
}
