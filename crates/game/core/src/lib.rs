//! Deterministic progression engine shared by the runtime and tools.
//!
//! `game-core` defines the generic mechanism every content layer
//! instantiates: resources, modifier pipelines, buyables, upgrades,
//! milestones and daily trackers, wired together by a [`Catalog`]. All
//! state mutation flows through [`engine::GameEngine`]; everything else reads
//! through a [`GameView`].
pub mod buyable;
pub mod catalog;
pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod formula;
pub mod layer;
pub mod milestone;
pub mod modifier;
pub mod num;
pub mod resource;
pub mod state;
pub mod summary;
pub mod tracker;
pub mod upgrade;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use buyable::BuyableDef;
pub use catalog::{Catalog, CatalogBuilder, CatalogError};
pub use config::GameConfig;
pub use cost::{curve, Cost, CostEntry, CostFormula, CostMode};
pub use engine::{
    Debit, EngineError, GameEngine, PurchaseOutcome, Receipt, RejectReason, Repair, TickReport,
};
pub use error::{ErrorSeverity, GameError};
pub use formula::{Formula, Predicate};
pub use layer::{LayerBuilder, LayerDef};
pub use milestone::MilestoneDef;
pub use modifier::{Modifier, ModifierKind, ModifierLine, ModifierPipeline, NamedPipeline};
pub use num::Decimal;
pub use resource::{ResourceDef, ResourceSource};
pub use state::{
    BuyableId, GameState, LayerId, LayerState, MilestoneId, MilestoneState, ResourceId,
    TrackerPhase, UpgradeId,
};
pub use summary::{
    BuyableLine, CostLine, LayerSummary, MilestoneLine, ModifierSection, ResourceLine, UpgradeLine,
};
pub use tracker::TrackerDef;
pub use upgrade::UpgradeDef;
pub use view::GameView;
