//! Day 7: metal.

use game_core::{
    Formula, LayerDef, LayerId, Modifier, ModifierPipeline, ResourceDef, ResourceId, TrackerDef,
};

use super::toys;

pub const ID: LayerId = LayerId("metal");
pub const DAY: u32 = 7;

pub const METAL: ResourceId = ResourceId::new(ID, "metal");

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Metal", DAY)
        .color("#777777")
        .resource(ResourceDef::stored(METAL, "metal ingots"))
        .modifiers(
            "ore_gain",
            "Ore per Mining Operation",
            1.0,
            ModifierPipeline::new().with(
                Modifier::multiplicative(
                    "Give elves clothes to wear",
                    Formula::new(|view| view.resource(toys::CLOTHES).max(1.0.into())),
                )
                .when(|view| view.upgrade_bought(toys::CLOTHES_UPGRADE)),
            ),
        )
        .depends_on([toys::CLOTHES])
        .tracker(TrackerDef::new(METAL, 1e6))
        .build()
}
