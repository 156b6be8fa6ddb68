//! Repository layer for dynamic runtime data
//!
//! Repositories persist the [`game_core::GameState`] snapshot under named
//! save slots. Layer definitions are code and are never persisted.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileStateRepository, SAVE_VERSION, SaveFile};
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
