//! Day 11: dyes.
//!
//! Red, yellow and blue dye are held by the toys layer rather than spent.
//! Black dye is brewed from oil once the toys layer reaches 100 toys.

use game_core::{
    curve, BuyableDef, BuyableId, Cost, LayerDef, LayerId, ResourceDef, ResourceId,
};

use super::{oil, toys};

pub const ID: LayerId = LayerId("dyes");
pub const DAY: u32 = 11;

pub const RED: ResourceId = ResourceId::new(ID, "red");
pub const YELLOW: ResourceId = ResourceId::new(ID, "yellow");
pub const BLUE: ResourceId = ResourceId::new(ID, "blue");
pub const BLACK: ResourceId = ResourceId::new(ID, "black");

pub const BLACK_DYE: BuyableId = BuyableId::new(ID, "black_dye");

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Dyes", DAY)
        .color("#D4D4F4")
        .resource(ResourceDef::stored(RED, "red dye"))
        .resource(ResourceDef::stored(YELLOW, "yellow dye"))
        .resource(ResourceDef::stored(BLUE, "blue dye"))
        .resource(ResourceDef::stored(BLACK, "black dye"))
        .buyable(
            BuyableDef::new(BLACK_DYE, "Make Black Dye", |_, amount| {
                Cost::new().spend(oil::OIL, curve::geometric(1e3, 1.5, amount))
            })
            .mirrored_into(BLACK)
            .unlocked_when(|view| view.milestone_earned(toys::MILESTONE2)),
        )
        .depends_on([oil::OIL])
        .build()
}
