//! Content loaders for reading game data from files.
//!
//! Both loaders read TOML. Built-in layers stay in code; files only tune the
//! game configuration and the per-layer unlock days and goals.

pub mod config;
pub mod factory;
pub mod schedule;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use schedule::{Schedule, ScheduleEntry, ScheduleLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
