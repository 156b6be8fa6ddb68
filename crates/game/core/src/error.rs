//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`EngineError`, `CatalogError`) live next to the
//! code that raises them. This module holds the shared classification they
//! all implement.
//!
//! Rejected purchases are not errors: they come back as
//! [`PurchaseOutcome::Rejected`](crate::PurchaseOutcome::Rejected). Errors are
//! reserved for malformed content and misuse of the engine API.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should not be retried without changes.
    ///
    /// Examples: unknown buyable id, writing a derived resource
    Validation,

    /// Content definitions are inconsistent with each other.
    ///
    /// Examples: duplicate layer id, dependency on an unknown resource
    Content,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Lowercase label for structured log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Content => "content",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all game-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to fix it, not on impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
