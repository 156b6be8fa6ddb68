//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories and the engine so
//! clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{EngineError, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("runtime requires a catalog to be configured before building")]
    MissingCatalog,

    #[error("no state repository configured")]
    RepositoryNotConfigured,
}

impl RuntimeError {
    /// Severity of the underlying failure, if it came from the engine.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Engine(err) => err.severity(),
            RuntimeError::MissingCatalog | RuntimeError::RepositoryNotConfigured => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Internal,
        }
    }
}
