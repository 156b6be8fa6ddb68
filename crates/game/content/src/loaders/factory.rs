//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use game_core::{Catalog, GameConfig};

use crate::layers;
use crate::loaders::{ConfigLoader, LoadResult, Schedule, ScheduleLoader};

/// Builds the game catalog from the built-in layers and an optional data
/// directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional, GameConfig)
/// └── schedule.toml   (optional, per-layer day/goal overrides)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(GameConfig::default())
        }
    }

    /// Load overrides from `schedule.toml`, or an empty schedule when absent.
    pub fn load_schedule(&self) -> LoadResult<Schedule> {
        let path = self.data_dir.join("schedule.toml");
        if path.exists() {
            ScheduleLoader::load(&path)
        } else {
            Ok(Schedule::default())
        }
    }

    /// Builds the catalog from this directory's config and schedule.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        Self::build(self.load_config()?, &self.load_schedule()?)
    }

    /// Builds the catalog of every built-in layer with overrides applied.
    pub fn build(config: GameConfig, schedule: &Schedule) -> LoadResult<Catalog> {
        let mut builder = Catalog::builder().config(config).layers(layers::all());
        schedule.apply(&mut builder)?;
        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid content catalog: {}", e))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
