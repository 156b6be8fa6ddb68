//! File-backed repository implementations.

mod state;

pub use state::{FileStateRepository, SAVE_VERSION, SaveFile};
