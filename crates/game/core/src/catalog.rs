//! Layer registry.
//!
//! The catalog holds every [`LayerDef`] in registration order together with
//! the [`GameConfig`]. Registration order is the order in which the tick
//! visits layers, so it must be stable for replays to be reproducible.
//! Content is validated once in [`CatalogBuilder::build`]; afterwards the
//! engine can rely on every handle it meets resolving to a definition.

use std::collections::{BTreeSet, HashMap};

use crate::buyable::BuyableDef;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::layer::LayerDef;
use crate::milestone::MilestoneDef;
use crate::resource::ResourceDef;
use crate::state::{BuyableId, GameState, LayerId, MilestoneId, ResourceId, UpgradeId};
use crate::upgrade::UpgradeDef;
use crate::view::GameView;

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("layer '{0}' registered twice")]
    DuplicateLayer(LayerId),

    #[error("layer '{layer}' defines {kind} '{key}' twice")]
    DuplicateField {
        layer: LayerId,
        kind: &'static str,
        key: &'static str,
    },

    #[error("{kind} '{key}' is registered on layer '{layer}' but belongs to '{owner}'")]
    ForeignField {
        layer: LayerId,
        owner: LayerId,
        kind: &'static str,
        key: &'static str,
    },

    #[error("layer '{layer}' depends on unknown resource '{resource}'")]
    UnknownDependency { layer: LayerId, resource: ResourceId },

    #[error("buyable '{buyable}' mirrors '{resource}', which is not a stored resource of its layer")]
    InvalidMirror {
        buyable: BuyableId,
        resource: ResourceId,
    },

    #[error("upgrade '{upgrade}' is paid with '{resource}', which its layer neither owns nor declares")]
    UndeclaredUpgradeResource {
        upgrade: UpgradeId,
        resource: ResourceId,
    },

    #[error("tracker of layer '{layer}' totals '{resource}', which the layer cannot read")]
    InvalidTrackerTotal { layer: LayerId, resource: ResourceId },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Content
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateLayer(_) => "CATALOG_DUPLICATE_LAYER",
            Self::DuplicateField { .. } => "CATALOG_DUPLICATE_FIELD",
            Self::ForeignField { .. } => "CATALOG_FOREIGN_FIELD",
            Self::UnknownDependency { .. } => "CATALOG_UNKNOWN_DEPENDENCY",
            Self::InvalidMirror { .. } => "CATALOG_INVALID_MIRROR",
            Self::UndeclaredUpgradeResource { .. } => "CATALOG_UNDECLARED_UPGRADE_RESOURCE",
            Self::InvalidTrackerTotal { .. } => "CATALOG_INVALID_TRACKER_TOTAL",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    config: GameConfig,
    layers: Vec<LayerDef>,
    index: HashMap<LayerId, usize>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Layers in registration order.
    pub fn layers(&self) -> &[LayerDef] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerDef> {
        self.index.get(&id).map(|&i| &self.layers[i])
    }

    pub fn resource(&self, id: ResourceId) -> Option<&ResourceDef> {
        self.layer(id.layer)?.resource(id)
    }

    pub fn buyable(&self, id: BuyableId) -> Option<&BuyableDef> {
        self.layer(id.layer)?.buyables.iter().find(|b| b.id == id)
    }

    pub fn upgrade(&self, id: UpgradeId) -> Option<&UpgradeDef> {
        self.layer(id.layer)?.upgrades.iter().find(|u| u.id == id)
    }

    pub fn milestone(&self, id: MilestoneId) -> Option<&MilestoneDef> {
        self.layer(id.layer)?.milestones.iter().find(|m| m.id == id)
    }

    /// Fresh state at the configured starting day.
    pub fn initial_state(&self) -> GameState {
        let mut state = GameState::new(self.config.starting_day);
        for layer in &self.layers {
            state.insert_layer(layer.id, layer.initial_state());
        }
        state
    }

    /// Rebuilds a state from a saved snapshot.
    ///
    /// Known fields are copied verbatim, fields missing from the save keep
    /// their initial values and fields this catalog no longer defines are
    /// dropped.
    pub fn restore(&self, saved: &GameState) -> GameState {
        let mut state = GameState::new(saved.day());
        for layer in &self.layers {
            let mut fresh = layer.initial_state();
            if let Some(saved) = saved.layer(layer.id) {
                fresh.merge_saved(saved);
            }
            state.insert_layer(layer.id, fresh);
        }
        state
    }

    pub fn view<'a>(&'a self, state: &'a GameState) -> GameView<'a> {
        GameView::new(self, state)
    }
}

/// Builder for [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    config: GameConfig,
    layers: Vec<LayerDef>,
}

impl CatalogBuilder {
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a layer. Registration order is tick order.
    pub fn layer(mut self, layer: LayerDef) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(mut self, layers: impl IntoIterator<Item = LayerDef>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Mutable access to an already registered layer, for schedule overrides.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut LayerDef> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Like [`layer_mut`](Self::layer_mut), keyed by the id's string form.
    pub fn layer_by_name_mut(&mut self, name: &str) -> Option<&mut LayerDef> {
        self.layers.iter_mut().find(|layer| layer.id.as_str() == name)
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut index = HashMap::with_capacity(self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            if index.insert(layer.id, i).is_some() {
                return Err(CatalogError::DuplicateLayer(layer.id));
            }
        }

        for layer in &self.layers {
            validate_fields(layer)?;
        }

        let catalog = Catalog {
            config: self.config,
            layers: self.layers,
            index,
        };
        for layer in &catalog.layers {
            validate_wiring(&catalog, layer)?;
        }
        Ok(catalog)
    }
}

fn validate_fields(layer: &LayerDef) -> Result<(), CatalogError> {
    check_keys(layer, "resource", layer.resources.iter().map(|r| (r.id.layer, r.id.key)))?;
    check_keys(layer, "buyable", layer.buyables.iter().map(|b| (b.id.layer, b.id.key)))?;
    check_keys(layer, "upgrade", layer.upgrades.iter().map(|u| (u.id.layer, u.id.key)))?;
    check_keys(
        layer,
        "milestone",
        layer.milestones.iter().map(|m| (m.id.layer, m.id.key)),
    )?;
    check_keys(layer, "modifier", layer.modifiers.iter().map(|p| (layer.id, p.key)))
}

fn check_keys(
    layer: &LayerDef,
    kind: &'static str,
    keys: impl Iterator<Item = (LayerId, &'static str)>,
) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for (owner, key) in keys {
        if owner != layer.id {
            return Err(CatalogError::ForeignField {
                layer: layer.id,
                owner,
                kind,
                key,
            });
        }
        if !seen.insert(key) {
            return Err(CatalogError::DuplicateField {
                layer: layer.id,
                kind,
                key,
            });
        }
    }
    Ok(())
}

fn validate_wiring(catalog: &Catalog, layer: &LayerDef) -> Result<(), CatalogError> {
    for &resource in &layer.dependencies {
        if catalog.resource(resource).is_none() {
            return Err(CatalogError::UnknownDependency {
                layer: layer.id,
                resource,
            });
        }
    }

    for (buyable, resource) in layer.bindings() {
        let stored = layer.resource(resource).is_some_and(ResourceDef::is_stored);
        if !stored {
            return Err(CatalogError::InvalidMirror { buyable, resource });
        }
    }

    for upgrade in &layer.upgrades {
        if !layer.may_use(upgrade.resource) || catalog.resource(upgrade.resource).is_none() {
            return Err(CatalogError::UndeclaredUpgradeResource {
                upgrade: upgrade.id,
                resource: upgrade.resource,
            });
        }
    }

    if let Some(tracker) = &layer.tracker {
        if !layer.may_use(tracker.total) || catalog.resource(tracker.total).is_none() {
            return Err(CatalogError::InvalidTrackerTotal {
                layer: layer.id,
                resource: tracker.total,
            });
        }
    }

    Ok(())
}
