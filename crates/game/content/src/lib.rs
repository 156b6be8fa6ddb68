//! Built-in content layers and data-file loaders.
//!
//! The layers under [`layers`] instantiate the generic mechanism from
//! `game-core`. Loaders (feature `loaders`) read game configuration and
//! day/goal schedule overrides from TOML.
//!
//! Content is consumed by the runtime through a [`Catalog`] and never appears
//! in game state.

pub mod layers;

#[cfg(feature = "loaders")]
pub mod loaders;

use game_core::{Catalog, CatalogError, GameConfig};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, Schedule, ScheduleEntry, ScheduleLoader};

/// Builds the catalog of every built-in layer.
pub fn catalog(config: GameConfig) -> Result<Catalog, CatalogError> {
    Catalog::builder().config(config).layers(layers::all()).build()
}
