//! Two-layer catalog shared by unit tests.
//!
//! `workshop` (day 1) owns gears, springs, a derived total and a widget
//! buyable mirrored into `widgets`. `factory` (day 3) owns a press that
//! spends workshop gears and holds workshop springs.

use crate::buyable::BuyableDef;
use crate::catalog::Catalog;
use crate::cost::{curve, Cost};
use crate::layer::LayerDef;
use crate::milestone::MilestoneDef;
use crate::num::Decimal;
use crate::resource::ResourceDef;
use crate::state::{BuyableId, LayerId, MilestoneId, ResourceId, UpgradeId};
use crate::tracker::TrackerDef;
use crate::upgrade::UpgradeDef;

pub const WORKSHOP: LayerId = LayerId("workshop");
pub const FACTORY: LayerId = LayerId("factory");

pub const GEARS: ResourceId = ResourceId::new(WORKSHOP, "gears");
pub const SPRINGS: ResourceId = ResourceId::new(WORKSHOP, "springs");
pub const TOTAL: ResourceId = ResourceId::new(WORKSHOP, "total");
pub const WIDGETS: ResourceId = ResourceId::new(WORKSHOP, "widgets");
pub const WIDGET: BuyableId = BuyableId::new(WORKSHOP, "widget");
pub const POLISH: UpgradeId = UpgradeId::new(WORKSHOP, "polish");
pub const FLAG: MilestoneId = MilestoneId::new(WORKSHOP, "flag");

pub const PRESSES: ResourceId = ResourceId::new(FACTORY, "presses");
pub const PRESS: BuyableId = BuyableId::new(FACTORY, "press");

pub fn fixture_layers() -> Vec<LayerDef> {
    let workshop = LayerDef::builder(WORKSHOP, "Workshop", 1)
        .resource(ResourceDef::stored(GEARS, "gears"))
        .resource(ResourceDef::stored(SPRINGS, "springs"))
        .resource(ResourceDef::derived(TOTAL, "total parts", |view| {
            view.resource(GEARS) + view.resource(SPRINGS)
        }))
        .resource(ResourceDef::stored(WIDGETS, "widgets"))
        .buyable(
            BuyableDef::new(WIDGET, "Widget", |_, amount| {
                Cost::new().spend(GEARS, curve::geometric(5.0, 2.0, amount))
            })
            .mirrored_into(WIDGETS),
        )
        .upgrade(UpgradeDef::new(POLISH, WIDGETS, 3.0, "Polish", "Shinier widgets"))
        .milestone(MilestoneDef::new(FLAG, "10 gears", "Nothing", |view| {
            view.resource(GEARS) >= Decimal::from(10u32)
        }))
        .tracker(TrackerDef::new(GEARS, 10.0))
        .build();

    let factory = LayerDef::builder(FACTORY, "Factory", 3)
        .resource(ResourceDef::stored(PRESSES, "presses"))
        .buyable(
            BuyableDef::new(PRESS, "Press", |_, _| {
                Cost::new().spend(GEARS, 4.0).hold(SPRINGS, 2.0)
            })
            .mirrored_into(PRESSES),
        )
        .depends_on([GEARS, SPRINGS])
        .build();

    vec![workshop, factory]
}

pub fn fixture_catalog() -> Catalog {
    Catalog::builder()
        .layers(fixture_layers())
        .build()
        .expect("fixture catalog is valid")
}
