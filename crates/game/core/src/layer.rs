//! Content layers.
//!
//! A layer is the unit of content tied to one unlock day. It owns resources,
//! buyables, upgrades, milestones and modifier pipelines, and declares up
//! front which resources of other layers it reads or debits. Those
//! declarations form the cross-layer dependency graph: since layers only
//! exchange [`ResourceId`] handles, every layer can be constructed
//! independently of the others, regardless of day order.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::buyable::BuyableDef;
use crate::milestone::MilestoneDef;
use crate::modifier::{ModifierPipeline, NamedPipeline};
use crate::num::Decimal;
use crate::resource::{ResourceDef, ResourceSource};
use crate::state::{BuyableId, LayerId, LayerState, ResourceId};
use crate::tracker::TrackerDef;
use crate::upgrade::UpgradeDef;

#[derive(Clone, Debug)]
pub struct LayerDef {
    pub id: LayerId,
    pub name: Cow<'static, str>,
    /// In-game day on which the layer unlocks.
    pub day: u32,
    pub color: Option<&'static str>,
    pub resources: Vec<ResourceDef>,
    pub buyables: Vec<BuyableDef>,
    pub upgrades: Vec<UpgradeDef>,
    /// Milestones in display order.
    pub milestones: Vec<MilestoneDef>,
    pub modifiers: Vec<NamedPipeline>,
    /// Resources of other layers this layer reads or debits.
    pub dependencies: BTreeSet<ResourceId>,
    pub tracker: Option<TrackerDef>,
}

impl LayerDef {
    pub fn builder(id: LayerId, name: impl Into<Cow<'static, str>>, day: u32) -> LayerBuilder {
        LayerBuilder::new(id, name, day)
    }

    pub fn owns(&self, resource: ResourceId) -> bool {
        resource.layer == self.id
    }

    /// Owned resources and declared dependencies may be read or debited.
    pub fn may_use(&self, resource: ResourceId) -> bool {
        self.owns(resource) || self.dependencies.contains(&resource)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&ResourceDef> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn pipeline(&self, key: &str) -> Option<&NamedPipeline> {
        self.modifiers.iter().find(|p| p.key == key)
    }

    /// `(buyable, mirror)` pairs reconciled on every tick.
    pub fn bindings(&self) -> impl Iterator<Item = (BuyableId, ResourceId)> + '_ {
        self.buyables
            .iter()
            .filter_map(|b| b.mirror.map(|mirror| (b.id, mirror)))
    }

    /// Fresh persisted state: stored resources at their initial values, zero
    /// amounts, nothing bought or earned.
    pub fn initial_state(&self) -> LayerState {
        let mut state = LayerState::default();
        for resource in &self.resources {
            if let ResourceSource::Stored { initial } = resource.source {
                state = state.with_resource(resource.id.key, initial);
            }
        }
        for buyable in &self.buyables {
            state = state.with_buyable(buyable.id.key);
        }
        for upgrade in &self.upgrades {
            state = state.with_upgrade(upgrade.id.key);
        }
        for milestone in &self.milestones {
            state = state.with_milestone(milestone.id.key);
        }
        state
    }

    /// Replaces the unlock day and tracker goal.
    pub fn reschedule(&mut self, day: u32, goal: Option<Decimal>) {
        self.day = day;
        if let (Some(goal), Some(tracker)) = (goal, self.tracker.as_mut()) {
            tracker.goal = goal;
        }
    }
}

/// Fluent builder for [`LayerDef`].
pub struct LayerBuilder {
    layer: LayerDef,
}

impl LayerBuilder {
    fn new(id: LayerId, name: impl Into<Cow<'static, str>>, day: u32) -> Self {
        Self {
            layer: LayerDef {
                id,
                name: name.into(),
                day,
                color: None,
                resources: Vec::new(),
                buyables: Vec::new(),
                upgrades: Vec::new(),
                milestones: Vec::new(),
                modifiers: Vec::new(),
                dependencies: BTreeSet::new(),
                tracker: None,
            },
        }
    }

    pub fn color(mut self, color: &'static str) -> Self {
        self.layer.color = Some(color);
        self
    }

    pub fn resource(mut self, resource: ResourceDef) -> Self {
        self.layer.resources.push(resource);
        self
    }

    pub fn buyable(mut self, buyable: BuyableDef) -> Self {
        self.layer.buyables.push(buyable);
        self
    }

    pub fn upgrade(mut self, upgrade: UpgradeDef) -> Self {
        self.layer.upgrades.push(upgrade);
        self
    }

    pub fn milestone(mut self, milestone: MilestoneDef) -> Self {
        self.layer.milestones.push(milestone);
        self
    }

    pub fn modifiers(
        mut self,
        key: &'static str,
        title: impl Into<Cow<'static, str>>,
        base: impl Into<Decimal>,
        pipeline: ModifierPipeline,
    ) -> Self {
        self.layer.modifiers.push(NamedPipeline {
            key,
            title: title.into(),
            base: base.into(),
            pipeline,
        });
        self
    }

    /// Declare resources of other layers this layer reads or debits.
    pub fn depends_on(mut self, resources: impl IntoIterator<Item = ResourceId>) -> Self {
        self.layer.dependencies.extend(resources);
        self
    }

    pub fn tracker(mut self, tracker: TrackerDef) -> Self {
        self.layer.tracker = Some(tracker);
        self
    }

    pub fn build(self) -> LayerDef {
        self.layer
    }
}
