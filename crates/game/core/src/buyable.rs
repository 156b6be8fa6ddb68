//! Repeatable purchases with scaling costs.
//!
//! A buyable owns a persisted `amount`. Its cost is recomputed from that amount
//! (and any other state the formula reads) on every call, so affordability
//! never goes stale after another purchase in the same tick.
//!
//! A buyable may mirror its amount into a stored resource of its own layer.
//! That pair forms a reconciliation binding: if the resource is later reduced
//! by something else (an upgrade spend, a reset), the tick clamps the amount
//! back down to it.

use std::borrow::Cow;

use crate::cost::{Cost, CostFormula};
use crate::formula::Predicate;
use crate::num::Decimal;
use crate::state::{BuyableId, ResourceId};
use crate::view::GameView;

#[derive(Clone, Debug)]
pub struct BuyableDef {
    pub id: BuyableId,
    pub title: Cow<'static, str>,
    pub cost: CostFormula,
    /// Stored resource of the owning layer that mirrors `amount`.
    pub mirror: Option<ResourceId>,
    pub unlocked: Option<Predicate>,
}

impl BuyableDef {
    pub fn new(
        id: BuyableId,
        title: impl Into<Cow<'static, str>>,
        cost: impl Fn(&GameView<'_>, Decimal) -> Cost + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            cost: CostFormula::new(cost),
            mirror: None,
            unlocked: None,
        }
    }

    /// Mirror the owned amount into `resource` after every purchase.
    pub fn mirrored_into(mut self, resource: ResourceId) -> Self {
        self.mirror = Some(resource);
        self
    }

    /// Only allow purchases while `condition` holds.
    pub fn unlocked_when(
        mut self,
        condition: impl Fn(&GameView<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.unlocked = Some(Predicate::new(condition));
        self
    }

    pub fn amount(&self, view: &GameView<'_>) -> Decimal {
        view.buyable_amount(self.id)
    }

    /// Cost of the next unit at the current amount.
    pub fn cost(&self, view: &GameView<'_>) -> Cost {
        self.cost.eval(view, self.amount(view))
    }

    pub fn is_unlocked(&self, view: &GameView<'_>) -> bool {
        self.unlocked.as_ref().is_none_or(|p| p.eval(view))
    }

    /// True iff the layer is open, the buyable is unlocked and every required
    /// resource holds at least its required quantity.
    pub fn can_purchase(&self, view: &GameView<'_>) -> bool {
        view.is_layer_open(self.id.layer) && self.is_unlocked(view) && self.cost(view).is_affordable(view)
    }
}
