//! Day 9: oil.

use game_core::{LayerDef, LayerId, Modifier, ModifierPipeline, ResourceDef, ResourceId, TrackerDef};

use super::toys;

pub const ID: LayerId = LayerId("oil");
pub const DAY: u32 = 9;

pub const OIL: ResourceId = ResourceId::new(ID, "oil");

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Oil", DAY)
        .color("#333333")
        .resource(ResourceDef::stored(OIL, "oil"))
        .modifiers(
            "oil_gain",
            "Oil Gain",
            1.0,
            ModifierPipeline::new().with(
                Modifier::multiplicative("350 toys", 50.0)
                    .when(|view| view.milestone_earned(toys::MILESTONE4)),
            ),
        )
        .tracker(TrackerDef::new(OIL, 1e9))
        .build()
}
