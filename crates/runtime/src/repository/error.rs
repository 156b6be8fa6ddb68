//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("state repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("invalid save slot name: {0:?}")]
    InvalidSlot(String),

    #[error("save slot {slot} has format version {found}, expected {expected}")]
    UnsupportedVersion {
        slot: String,
        found: u32,
        expected: u32,
    },

    #[error("save slot {slot} checksum mismatch: recorded {recorded}, computed {computed}")]
    ChecksumMismatch {
        slot: String,
        recorded: String,
        computed: String,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
