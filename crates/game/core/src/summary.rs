//! Owned, display-ready snapshots of a layer.
//!
//! A presentation layer renders these without touching formulas. Every field
//! is computed from one [`GameView`], so the numbers in a summary agree with
//! each other.

use crate::cost::CostMode;
use crate::layer::LayerDef;
use crate::modifier::ModifierLine;
use crate::num::Decimal;
use crate::state::TrackerPhase;
use crate::view::GameView;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerSummary {
    pub id: String,
    pub name: String,
    pub day: u32,
    pub unlocked: bool,
    pub phase: TrackerPhase,
    /// Tracker fraction in `[0, 1]`, if the layer has a tracker.
    pub progress: Option<Decimal>,
    pub resources: Vec<ResourceLine>,
    pub buyables: Vec<BuyableLine>,
    pub upgrades: Vec<UpgradeLine>,
    pub milestones: Vec<MilestoneLine>,
    pub modifiers: Vec<ModifierSection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLine {
    pub key: String,
    pub name: String,
    pub value: Decimal,
    pub derived: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostLine {
    /// Fully qualified `layer.key` of the required resource.
    pub resource: String,
    pub amount: Decimal,
    pub mode: CostMode,
    pub affordable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyableLine {
    pub key: String,
    pub title: String,
    pub amount: Decimal,
    pub cost: Vec<CostLine>,
    pub unlocked: bool,
    pub can_purchase: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeLine {
    pub key: String,
    pub title: String,
    pub description: String,
    pub cost: Decimal,
    pub resource: String,
    pub bought: bool,
    pub can_purchase: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MilestoneLine {
    pub key: String,
    pub requirement: String,
    pub effect: String,
    pub earned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSection {
    pub key: String,
    pub title: String,
    pub base: Decimal,
    pub lines: Vec<ModifierLine>,
    pub total: Decimal,
}

impl LayerSummary {
    pub(crate) fn collect(view: &GameView<'_>, def: &LayerDef) -> Self {
        let resources = def
            .resources
            .iter()
            .map(|r| ResourceLine {
                key: r.id.key.to_owned(),
                name: r.display_name.to_string(),
                value: view.resource(r.id),
                derived: !r.is_stored(),
            })
            .collect();

        let buyables = def
            .buyables
            .iter()
            .map(|b| {
                let cost = b.cost(view);
                BuyableLine {
                    key: b.id.key.to_owned(),
                    title: b.title.to_string(),
                    amount: b.amount(view),
                    cost: cost
                        .entries()
                        .iter()
                        .map(|e| CostLine {
                            resource: e.resource.to_string(),
                            amount: e.amount,
                            mode: e.mode,
                            affordable: view.resource(e.resource) >= e.amount,
                        })
                        .collect(),
                    unlocked: b.is_unlocked(view),
                    can_purchase: b.can_purchase(view),
                }
            })
            .collect();

        let upgrades = def
            .upgrades
            .iter()
            .map(|u| UpgradeLine {
                key: u.id.key.to_owned(),
                title: u.title.to_string(),
                description: u.description.to_string(),
                cost: u.cost,
                resource: u.resource.to_string(),
                bought: u.is_bought(view),
                can_purchase: u.can_purchase(view),
            })
            .collect();

        let milestones = def
            .milestones
            .iter()
            .map(|m| MilestoneLine {
                key: m.id.key.to_owned(),
                requirement: m.requirement.to_string(),
                effect: m.effect.to_string(),
                earned: m.is_earned(view),
            })
            .collect();

        let modifiers = def
            .modifiers
            .iter()
            .map(|named| ModifierSection {
                key: named.key.to_owned(),
                title: named.title.to_string(),
                base: named.base,
                lines: named.pipeline.describe(view, named.base),
                total: named.pipeline.evaluate(view, named.base),
            })
            .collect();

        Self {
            id: def.id.as_str().to_owned(),
            name: def.name.to_string(),
            day: def.day,
            unlocked: view.is_layer_unlocked(def.id),
            phase: view.tracker_phase(def.id),
            progress: def.tracker.as_ref().map(|t| t.progress(view, def.id)),
            resources,
            buyables,
            upgrades,
            milestones,
            modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{fixture_catalog, FACTORY, GEARS, WORKSHOP};
    use crate::Decimal;

    #[test]
    fn summary_reports_costs_and_affordability() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::from(10u32));
        let view = catalog.view(&state);

        let summary = view.layer_summary(WORKSHOP).unwrap();
        assert_eq!(summary.id, "workshop");
        assert!(summary.unlocked);

        let widget = &summary.buyables[0];
        assert_eq!(widget.cost[0].resource, "workshop.gears");
        assert_eq!(widget.cost[0].amount, Decimal::from(10u32));
        assert!(widget.can_purchase);

        let derived: Vec<_> = summary.resources.iter().filter(|r| r.derived).collect();
        assert_eq!(derived.len(), 1);
    }

    #[test]
    fn locked_layer_summary_is_not_purchasable() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::from(1000u32));
        let view = catalog.view(&state);

        let summary = view.layer_summary(FACTORY).unwrap();
        assert!(!summary.unlocked);
        assert!(summary.buyables.iter().all(|b| !b.can_purchase));
    }
}
