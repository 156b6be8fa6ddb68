//! Resource definitions.
//!
//! A resource is either stored (persisted, mutated by purchases and external
//! collaborators) or derived (recomputed from other resources on every read).
//! Resources do no bounds checking of their own: every debit must be preceded
//! by an affordability check in the buyable or upgrade purchase path.

use std::borrow::Cow;

use crate::formula::Formula;
use crate::num::Decimal;
use crate::state::ResourceId;
use crate::view::GameView;

/// Where a resource value comes from.
#[derive(Clone, Debug)]
pub enum ResourceSource {
    /// Persisted value with its initial amount.
    Stored { initial: Decimal },
    /// Recomputed from other values on every read. Never persisted.
    Derived(Formula),
}

#[derive(Clone, Debug)]
pub struct ResourceDef {
    pub id: ResourceId,
    pub display_name: Cow<'static, str>,
    pub source: ResourceSource,
}

impl ResourceDef {
    /// Stored resource starting at zero.
    pub fn stored(id: ResourceId, display_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            source: ResourceSource::Stored {
                initial: Decimal::ZERO,
            },
        }
    }

    pub fn derived(
        id: ResourceId,
        display_name: impl Into<Cow<'static, str>>,
        formula: impl Fn(&GameView<'_>) -> Decimal + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            source: ResourceSource::Derived(Formula::new(formula)),
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self.source, ResourceSource::Stored { .. })
    }
}
