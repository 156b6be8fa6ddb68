//! Buyable and upgrade purchases.
//!
//! Each purchase is checked against one view of the current state and then
//! applied in full. A rejected purchase leaves the state untouched; an
//! accepted one debits every spent resource by exactly its cost.

use super::{EngineError, GameEngine};
use crate::cost::{Cost, CostMode};
use crate::layer::LayerDef;
use crate::num::Decimal;
use crate::resource::ResourceSource;
use crate::state::{BuyableId, ResourceId, UpgradeId};
use crate::view::GameView;

/// Why a purchase was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// The owning layer's unlock day has not been reached.
    Locked,
    /// The buyable's availability condition does not hold.
    Unavailable,
    /// At least one required resource holds less than its cost.
    Unaffordable,
    /// The cost names a resource the owning layer has not declared.
    UndeclaredDependency(ResourceId),
    /// The upgrade is already bought.
    AlreadyOwned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debit {
    pub resource: ResourceId,
    pub amount: Decimal,
}

/// Result of an accepted purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub debits: Vec<Debit>,
    /// Owned amount after the purchase. Always one for upgrades.
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased(Receipt),
    Rejected(RejectReason),
}

impl PurchaseOutcome {
    pub fn is_purchased(&self) -> bool {
        matches!(self, Self::Purchased(_))
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Purchased(_) => None,
        }
    }
}

impl<'a> GameEngine<'a> {
    /// Buys one unit of a buyable.
    ///
    /// On success every `Spend` entry of the cost is debited by its exact
    /// amount, the owned amount grows by one and the mirrored resource, if
    /// any, is set to the new amount.
    pub fn purchase_buyable(&mut self, id: BuyableId) -> Result<PurchaseOutcome, EngineError> {
        let catalog = self.catalog;
        let def = catalog.buyable(id).ok_or(EngineError::UnknownBuyable(id))?;
        let layer = catalog
            .layer(id.layer)
            .ok_or(EngineError::UnknownBuyable(id))?;

        let (debits, amount) = {
            let view = self.view();
            if !view.is_layer_open(layer.id) {
                return Ok(PurchaseOutcome::Rejected(RejectReason::Locked));
            }
            if !def.is_unlocked(&view) {
                return Ok(PurchaseOutcome::Rejected(RejectReason::Unavailable));
            }

            let cost = def.cost(&view);
            if let Some(reason) = check_cost(&view, layer, &cost)? {
                return Ok(PurchaseOutcome::Rejected(reason));
            }
            (plan_debits(&view, &cost), def.amount(&view) + Decimal::ONE)
        };

        self.apply_debits(&debits);
        self.state.set_buyable_amount(id, amount);
        if let Some(mirror) = def.mirror {
            self.state.set_stored(mirror, amount);
        }

        Ok(PurchaseOutcome::Purchased(Receipt {
            debits: debits
                .into_iter()
                .map(|(debit, _)| debit)
                .collect(),
            amount,
        }))
    }

    /// Buys a one-shot upgrade, debiting its cost from its resource.
    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> Result<PurchaseOutcome, EngineError> {
        let catalog = self.catalog;
        let def = catalog.upgrade(id).ok_or(EngineError::UnknownUpgrade(id))?;
        let layer = catalog
            .layer(id.layer)
            .ok_or(EngineError::UnknownUpgrade(id))?;

        let debits = {
            let view = self.view();
            if !view.is_layer_open(layer.id) {
                return Ok(PurchaseOutcome::Rejected(RejectReason::Locked));
            }
            if def.is_bought(&view) {
                return Ok(PurchaseOutcome::Rejected(RejectReason::AlreadyOwned));
            }

            let cost = Cost::new().spend(def.resource, def.cost);
            if let Some(reason) = check_cost(&view, layer, &cost)? {
                return Ok(PurchaseOutcome::Rejected(reason));
            }
            plan_debits(&view, &cost)
        };

        self.apply_debits(&debits);
        self.state.mark_upgrade_bought(id);

        Ok(PurchaseOutcome::Purchased(Receipt {
            debits: debits
                .into_iter()
                .map(|(debit, _)| debit)
                .collect(),
            amount: Decimal::ONE,
        }))
    }

    fn apply_debits(&mut self, debits: &[(Debit, Decimal)]) {
        for (debit, remaining) in debits {
            self.state.set_stored(debit.resource, *remaining);
        }
    }
}

/// Checks declaration, storage and affordability of every cost entry.
///
/// Returns the first rejection, or an error when a spent resource cannot be
/// written at all.
fn check_cost(
    view: &GameView<'_>,
    layer: &LayerDef,
    cost: &Cost,
) -> Result<Option<RejectReason>, EngineError> {
    for entry in cost.entries() {
        if !layer.may_use(entry.resource) {
            return Ok(Some(RejectReason::UndeclaredDependency(entry.resource)));
        }
        let def = view
            .catalog()
            .resource(entry.resource)
            .ok_or(EngineError::UnknownResource(entry.resource))?;
        if entry.mode == CostMode::Spend && !matches!(def.source, ResourceSource::Stored { .. }) {
            return Err(EngineError::DerivedResource(entry.resource));
        }
    }

    if !cost.is_affordable(view) {
        return Ok(Some(RejectReason::Unaffordable));
    }
    Ok(None)
}

/// Pairs every spent entry with the balance it leaves behind.
///
/// An infinite balance stays infinite whatever it pays.
fn plan_debits(view: &GameView<'_>, cost: &Cost) -> Vec<(Debit, Decimal)> {
    cost.spent()
        .map(|entry| {
            let debit = Debit {
                resource: entry.resource,
                amount: entry.amount,
            };
            let balance = view.resource(entry.resource);
            let remaining = if balance.is_finite() {
                balance - entry.amount
            } else {
                balance
            };
            (debit, remaining)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        fixture_catalog, FACTORY, GEARS, POLISH, PRESS, PRESSES, SPRINGS, WIDGET, WIDGETS,
    };

    #[test]
    fn purchase_debits_exact_cost_and_adds_one() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::new(12.5));
        let mut engine = GameEngine::new(&catalog, &mut state);

        let outcome = engine.purchase_buyable(WIDGET).unwrap();
        let PurchaseOutcome::Purchased(receipt) = outcome else {
            panic!("expected purchase, got {outcome:?}");
        };
        assert_eq!(receipt.amount, Decimal::ONE);
        assert_eq!(
            receipt.debits,
            vec![Debit {
                resource: GEARS,
                amount: Decimal::from(10u32)
            }]
        );

        let view = engine.view();
        assert_eq!(view.resource(GEARS), Decimal::new(2.5));
        assert_eq!(view.buyable_amount(WIDGET), Decimal::ONE);
        assert_eq!(view.resource(WIDGETS), Decimal::ONE);
    }

    #[test]
    fn unaffordable_purchase_is_a_no_op() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::new(9.99));
        let before = state.clone();

        let mut engine = GameEngine::new(&catalog, &mut state);
        let outcome = engine.purchase_buyable(WIDGET).unwrap();

        assert_eq!(outcome.rejection(), Some(RejectReason::Unaffordable));
        assert_eq!(state, before);
    }

    #[test]
    fn nan_balance_cannot_afford_anything() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        let mut engine = GameEngine::new(&catalog, &mut state);
        engine
            .set_resource(GEARS, Decimal::new(f64::NAN))
            .unwrap();

        assert_eq!(engine.view().resource(GEARS), Decimal::ZERO);
        assert_eq!(
            engine.purchase_buyable(WIDGET).unwrap().rejection(),
            Some(RejectReason::Unaffordable)
        );
        assert_eq!(engine.view().buyable_amount(WIDGET), Decimal::ZERO);
    }

    #[test]
    fn infinite_balance_survives_an_infinite_cost() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::INFINITY);
        state.set_buyable_amount(WIDGET, Decimal::from(2000u32));
        let mut engine = GameEngine::new(&catalog, &mut state);

        let outcome = engine.purchase_buyable(WIDGET).unwrap();
        let PurchaseOutcome::Purchased(receipt) = outcome else {
            panic!("expected purchase, got {outcome:?}");
        };
        assert_eq!(receipt.debits[0].amount, Decimal::INFINITY);

        let view = engine.view();
        assert_eq!(view.resource(GEARS), Decimal::INFINITY);
        assert_eq!(view.buyable_amount(WIDGET), Decimal::from(2001u32));
        assert_eq!(view.resource(WIDGETS), Decimal::from(2001u32));
    }

    #[test]
    fn cost_grows_with_amount() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::from(30u32));
        let mut engine = GameEngine::new(&catalog, &mut state);

        assert!(engine.purchase_buyable(WIDGET).unwrap().is_purchased());
        assert!(engine.purchase_buyable(WIDGET).unwrap().is_purchased());
        assert_eq!(
            engine.purchase_buyable(WIDGET).unwrap().rejection(),
            Some(RejectReason::Unaffordable)
        );
        assert_eq!(engine.view().resource(GEARS), Decimal::ZERO);
    }

    #[test]
    fn locked_layer_rejects_purchase() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(GEARS, Decimal::from(100u32));
        state.set_stored(SPRINGS, Decimal::from(100u32));
        let mut engine = GameEngine::new(&catalog, &mut state);

        assert_eq!(
            engine.purchase_buyable(PRESS).unwrap().rejection(),
            Some(RejectReason::Locked)
        );

        engine.set_day(3);
        assert!(engine.purchase_buyable(PRESS).unwrap().is_purchased());
    }

    #[test]
    fn hold_entries_are_checked_but_not_spent() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_day(3);
        state.set_stored(GEARS, Decimal::from(4u32));
        state.set_stored(SPRINGS, Decimal::from(1u32));
        let mut engine = GameEngine::new(&catalog, &mut state);

        assert_eq!(
            engine.purchase_buyable(PRESS).unwrap().rejection(),
            Some(RejectReason::Unaffordable)
        );

        engine.set_resource(SPRINGS, Decimal::from(2u32)).unwrap();
        assert!(engine.purchase_buyable(PRESS).unwrap().is_purchased());

        let view = engine.view();
        assert_eq!(view.resource(GEARS), Decimal::ZERO);
        assert_eq!(view.resource(SPRINGS), Decimal::from(2u32));
        assert_eq!(view.resource(PRESSES), Decimal::ONE);
    }

    #[test]
    fn upgrade_is_bought_once() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        state.set_stored(WIDGETS, Decimal::from(5u32));
        let mut engine = GameEngine::new(&catalog, &mut state);

        assert!(engine.purchase_upgrade(POLISH).unwrap().is_purchased());
        assert_eq!(engine.view().resource(WIDGETS), Decimal::from(2u32));
        assert_eq!(
            engine.purchase_upgrade(POLISH).unwrap().rejection(),
            Some(RejectReason::AlreadyOwned)
        );
    }

    #[test]
    fn unknown_ids_are_errors() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        let mut engine = GameEngine::new(&catalog, &mut state);
        let ghost = BuyableId::new(FACTORY, "ghost");

        assert_eq!(
            engine.purchase_buyable(ghost),
            Err(EngineError::UnknownBuyable(ghost))
        );
    }
}
