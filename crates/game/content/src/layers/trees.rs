//! Day 1: logs.

use game_core::{LayerDef, LayerId, Modifier, ModifierPipeline, ResourceDef, ResourceId, TrackerDef};

use super::toys;

pub const ID: LayerId = LayerId("trees");
pub const DAY: u32 = 1;

pub const LOGS: ResourceId = ResourceId::new(ID, "logs");

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Trees", DAY)
        .color("#D2691E")
        .resource(ResourceDef::stored(LOGS, "logs"))
        .modifiers(
            "log_gain",
            "Log Gain",
            1.0,
            ModifierPipeline::new().with(
                Modifier::multiplicative("Load logs onto trucks", 2.0)
                    .when(|view| view.upgrade_bought(toys::TRUCKS_UPGRADE)),
            ),
        )
        .tracker(TrackerDef::new(LOGS, 1e4))
        .build()
}
