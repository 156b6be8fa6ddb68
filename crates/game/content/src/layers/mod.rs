//! Built-in content layers.
//!
//! Each module exports its handles as constants and a `layer()` constructor.
//! Layers import each other's constants only, so they can be built in any
//! order; [`all`] fixes the registration order used by the tick.

pub mod cloth;
pub mod dyes;
pub mod metal;
pub mod oil;
pub mod plastic;
pub mod toys;
pub mod trees;
pub mod workshop;

use game_core::LayerDef;

/// Every built-in layer, in unlock-day order.
pub fn all() -> Vec<LayerDef> {
    vec![
        trees::layer(),
        workshop::layer(),
        metal::layer(),
        cloth::layer(),
        oil::layer(),
        plastic::layer(),
        dyes::layer(),
        toys::layer(),
    ]
}
