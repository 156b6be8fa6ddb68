//! One-shot upgrades paid for with a single resource.

use std::borrow::Cow;

use crate::num::Decimal;
use crate::state::{ResourceId, UpgradeId};
use crate::view::GameView;

#[derive(Clone, Debug)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub title: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub cost: Decimal,
    /// Resource debited on purchase.
    pub resource: ResourceId,
}

impl UpgradeDef {
    pub fn new(
        id: UpgradeId,
        resource: ResourceId,
        cost: impl Into<Decimal>,
        title: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            cost: cost.into(),
            resource,
        }
    }

    pub fn is_bought(&self, view: &GameView<'_>) -> bool {
        view.upgrade_bought(self.id)
    }

    pub fn can_purchase(&self, view: &GameView<'_>) -> bool {
        view.is_layer_open(self.id.layer)
            && !self.is_bought(view)
            && view.resource(self.resource) >= self.cost
    }
}
