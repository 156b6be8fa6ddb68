//! Error types for the engine.

use crate::error::{ErrorSeverity, GameError};
use crate::num::Decimal;
use crate::state::{BuyableId, ResourceId, UpgradeId};

/// Misuse of the engine API or content the catalog could not catch.
///
/// Unaffordable or locked purchases are not errors; they are reported as
/// [`PurchaseOutcome::Rejected`](super::PurchaseOutcome::Rejected).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown buyable '{0}'")]
    UnknownBuyable(BuyableId),

    #[error("unknown upgrade '{0}'")]
    UnknownUpgrade(UpgradeId),

    #[error("unknown resource '{0}'")]
    UnknownResource(ResourceId),

    #[error("resource '{0}' is derived and cannot be written")]
    DerivedResource(ResourceId),

    #[error("resource '{resource}' cannot hold negative value {value}")]
    NegativeValue { resource: ResourceId, value: Decimal },
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownBuyable(_) | Self::UnknownUpgrade(_) | Self::UnknownResource(_) => {
                ErrorSeverity::Validation
            }
            Self::NegativeValue { .. } => ErrorSeverity::Validation,
            Self::DerivedResource(_) => ErrorSeverity::Content,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBuyable(_) => "ENGINE_UNKNOWN_BUYABLE",
            Self::UnknownUpgrade(_) => "ENGINE_UNKNOWN_UPGRADE",
            Self::UnknownResource(_) => "ENGINE_UNKNOWN_RESOURCE",
            Self::DerivedResource(_) => "ENGINE_DERIVED_RESOURCE",
            Self::NegativeValue { .. } => "ENGINE_NEGATIVE_VALUE",
        }
    }
}
