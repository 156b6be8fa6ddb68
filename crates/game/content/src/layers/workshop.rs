//! Day 2: the workshop foundation.

use game_core::{LayerDef, LayerId, Modifier, ModifierPipeline, ResourceDef, ResourceId, TrackerDef};

use super::toys;

pub const ID: LayerId = LayerId("workshop");
pub const DAY: u32 = 2;

/// Percent of the foundation built. Every full hundred is one complete
/// workshop.
pub const FOUNDATION_PROGRESS: ResourceId = ResourceId::new(ID, "foundation_progress");

pub const FOUNDATION_LIMIT: &str = "foundation_limit";

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Workshop", DAY)
        .color("#D66F40")
        .resource(ResourceDef::stored(FOUNDATION_PROGRESS, "foundation progress"))
        .modifiers(
            FOUNDATION_LIMIT,
            "Foundation Limit",
            100.0,
            ModifierPipeline::new().with(
                Modifier::additive("Build wooden towers", 200.0)
                    .when(|view| view.upgrade_bought(toys::WOODEN_BLOCKS_UPGRADE)),
            ),
        )
        .tracker(TrackerDef::new(FOUNDATION_PROGRESS, 100.0))
        .build()
}
