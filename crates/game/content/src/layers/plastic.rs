//! Day 10: plastic.

use game_core::{LayerDef, LayerId, Modifier, ModifierPipeline, ResourceDef, ResourceId, TrackerDef};

use super::toys;

pub const ID: LayerId = LayerId("plastic");
pub const DAY: u32 = 10;

pub const PLASTIC: ResourceId = ResourceId::new(ID, "plastic");

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Plastic", DAY)
        .color("#DCD9CD")
        .resource(ResourceDef::stored(PLASTIC, "plastic"))
        .modifiers(
            "plastic_gain",
            "Plastic Gain",
            1.0,
            ModifierPipeline::new().with(
                Modifier::multiplicative("350 toys", 50.0)
                    .when(|view| view.milestone_earned(toys::MILESTONE4)),
            ),
        )
        .tracker(TrackerDef::new(PLASTIC, 1e6))
        .build()
}
