//! Day 8: cloth.

use game_core::{LayerDef, LayerId, ResourceDef, ResourceId, TrackerDef};

pub const ID: LayerId = LayerId("cloth");
pub const DAY: u32 = 8;

pub const CLOTH: ResourceId = ResourceId::new(ID, "cloth");

pub fn layer() -> LayerDef {
    LayerDef::builder(ID, "Cloth", DAY)
        .color("#8B4513")
        .resource(ResourceDef::stored(CLOTH, "cloth"))
        .tracker(TrackerDef::new(CLOTH, 1e8))
        .build()
}
