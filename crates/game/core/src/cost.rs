//! Purchase costs and the scaling curves used to build them.

use std::sync::Arc;

use crate::num::Decimal;
use crate::state::ResourceId;
use crate::view::GameView;

/// How a cost entry is charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CostMode {
    /// Checked for affordability and debited on purchase.
    Spend,
    /// Checked for affordability only. The resource is left untouched.
    Hold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostEntry {
    pub resource: ResourceId,
    pub amount: Decimal,
    pub mode: CostMode,
}

/// Mapping from required resource to required quantity.
///
/// Entries for the same resource and mode are merged by addition, so each
/// resource is compared against its full requirement exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cost {
    entries: Vec<CostEntry>,
}

impl Cost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to spend (builder pattern)
    pub fn spend(mut self, resource: ResourceId, amount: impl Into<Decimal>) -> Self {
        self.push(resource, amount.into(), CostMode::Spend);
        self
    }

    /// Add an amount that must be held but is not consumed (builder pattern)
    pub fn hold(mut self, resource: ResourceId, amount: impl Into<Decimal>) -> Self {
        self.push(resource, amount.into(), CostMode::Hold);
        self
    }

    fn push(&mut self, resource: ResourceId, amount: Decimal, mode: CostMode) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.resource == resource && e.mode == mode)
        {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CostEntry {
                resource,
                amount,
                mode,
            }),
        }
    }

    pub fn entries(&self) -> &[CostEntry] {
        &self.entries
    }

    pub fn spent(&self) -> impl Iterator<Item = &CostEntry> {
        self.entries.iter().filter(|e| e.mode == CostMode::Spend)
    }

    /// Amount required of `resource` in the given mode.
    pub fn get(&self, resource: ResourceId, mode: CostMode) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.resource == resource && e.mode == mode)
            .map(|e| e.amount)
    }

    /// Entries whose resource currently holds less than the required amount.
    pub fn shortfalls<'a>(&'a self, view: &'a GameView<'_>) -> impl Iterator<Item = &'a CostEntry> {
        self.entries
            .iter()
            .filter(move |e| view.resource(e.resource) < e.amount)
    }

    /// True iff every resource holds at least its required amount.
    ///
    /// Equality counts as affordable.
    pub fn is_affordable(&self, view: &GameView<'_>) -> bool {
        self.shortfalls(view).next().is_none()
    }
}

/// Cost as a function of the current view and the buyable's owned amount.
#[derive(Clone)]
pub struct CostFormula(Arc<dyn Fn(&GameView<'_>, Decimal) -> Cost + Send + Sync>);

impl CostFormula {
    pub fn new(f: impl Fn(&GameView<'_>, Decimal) -> Cost + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn eval(&self, view: &GameView<'_>, amount: Decimal) -> Cost {
        (self.0)(view, amount)
    }
}

impl core::fmt::Debug for CostFormula {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("CostFormula(..)")
    }
}

/// Standard cost-scaling curves.
pub mod curve {
    use crate::num::Decimal;

    /// `base × growth^(amount + 1)`
    pub fn geometric(base: impl Into<Decimal>, growth: impl Into<Decimal>, amount: Decimal) -> Decimal {
        base.into() * growth.into().pow(amount + Decimal::ONE)
    }

    /// `base × (amount + 1)^exponent`
    pub fn polynomial(
        base: impl Into<Decimal>,
        exponent: impl Into<Decimal>,
        amount: Decimal,
    ) -> Decimal {
        base.into() * (amount + Decimal::ONE).pow(exponent)
    }

    /// `max(floor(progress / step), 1)`
    ///
    /// Discount divisor derived from unrelated progress. Flooring means the
    /// discount only moves in whole-unit steps. The lower bound keeps a divisor
    /// of zero from turning a discount into an infinite price.
    pub fn whole_divisor(progress: Decimal, step: impl Into<Decimal>) -> Decimal {
        (progress / step.into()).floor().max(Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::curve::*;
    use super::*;
    use crate::testing::{fixture_catalog, GEARS, SPRINGS};

    #[test]
    fn curves_follow_formulas() {
        assert_eq!(geometric(10.0, 2.0, Decimal::ZERO), Decimal::from(20u32));
        assert_eq!(geometric(10.0, 2.0, Decimal::from(2u32)), Decimal::from(80u32));
        assert_eq!(polynomial(1.0, 3.0, Decimal::ONE), Decimal::from(8u32));
    }

    #[test]
    fn whole_divisor_floors_and_never_drops_below_one() {
        assert_eq!(whole_divisor(Decimal::from(250u32), 100.0), Decimal::from(2u32));
        assert_eq!(whole_divisor(Decimal::from(99u32), 100.0), Decimal::ONE);
        assert_eq!(whole_divisor(Decimal::ZERO, 100.0), Decimal::ONE);
    }

    #[test]
    fn entries_for_same_resource_merge() {
        let cost = Cost::new()
            .spend(GEARS, 5.0)
            .spend(GEARS, 7.0)
            .hold(GEARS, 1.0);

        assert_eq!(cost.entries().len(), 2);
        assert_eq!(cost.get(GEARS, CostMode::Spend), Some(Decimal::from(12u32)));
        assert_eq!(cost.get(GEARS, CostMode::Hold), Some(Decimal::ONE));
    }

    #[test]
    fn affordability_boundary_is_inclusive() {
        let catalog = fixture_catalog();
        let mut state = catalog.initial_state();
        let cost = Cost::new().spend(GEARS, 10.0).hold(SPRINGS, 3.0);

        state.set_stored(GEARS, Decimal::from(10u32));
        state.set_stored(SPRINGS, Decimal::from(3u32));
        assert!(cost.is_affordable(&catalog.view(&state)));

        state.set_stored(SPRINGS, Decimal::new(2.999));
        let view = catalog.view(&state);
        assert!(!cost.is_affordable(&view));
        let short: Vec<_> = cost.shortfalls(&view).map(|e| e.resource).collect();
        assert_eq!(short, vec![SPRINGS]);
    }
}
