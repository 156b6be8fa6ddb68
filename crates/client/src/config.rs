//! Client configuration structures and loaders.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use game_content::{ConfigLoader, ContentFactory, Schedule, ScheduleLoader};
use game_core::{Catalog, GameConfig};
use runtime::RuntimeConfig;

const DEFAULT_SESSION_ID: &str = "main";
const DEFAULT_TICK_MS: u64 = 50;
const DEFAULT_AUTOSAVE_TICKS: u64 = 600;

/// Settings needed to assemble the runtime for one play session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Names the save slot and the log directory.
    pub session_id: String,
    pub save_dir: Option<PathBuf>,
    pub tick_interval: Duration,
    pub autosave_every_ticks: u64,
    /// Day to move to after the save is restored.
    pub day: Option<u32>,
    pub game_config_path: Option<PathBuf>,
    pub schedule_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_id: DEFAULT_SESSION_ID.to_owned(),
            save_dir: None,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            autosave_every_ticks: DEFAULT_AUTOSAVE_TICKS,
            day: None,
            game_config_path: None,
            schedule_path: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ADVENT_SESSION_ID` - Save slot and log directory name (default: main)
    /// - `ADVENT_SAVE_DIR` - Directory for save files (default: platform data dir)
    /// - `ADVENT_TICK_MS` - Milliseconds between ticks (default: 50)
    /// - `ADVENT_AUTOSAVE_TICKS` - Ticks between autosaves, 0 disables (default: 600)
    /// - `ADVENT_DAY` - Day counter to apply on start
    /// - `ADVENT_CONFIG` - Game config TOML
    /// - `ADVENT_SCHEDULE` - Layer day/goal overrides TOML
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let parse = |key: &str| read(key).and_then(|value| value.parse::<u64>().ok());

        let mut config = Self::default();

        if let Some(session_id) = read("ADVENT_SESSION_ID") {
            config.session_id = session_id;
        }
        config.save_dir = read("ADVENT_SAVE_DIR").map(PathBuf::from);
        if let Some(ms) = parse("ADVENT_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(ticks) = parse("ADVENT_AUTOSAVE_TICKS") {
            config.autosave_every_ticks = ticks;
        }
        config.day = parse("ADVENT_DAY").and_then(|day| u32::try_from(day).ok());
        config.game_config_path = read("ADVENT_CONFIG").map(PathBuf::from);
        config.schedule_path = read("ADVENT_SCHEDULE").map(PathBuf::from);

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            tick_interval: Some(self.tick_interval),
            autosave_every_ticks: self.autosave_every_ticks,
            save_slot: self.session_id.clone(),
            ..RuntimeConfig::default()
        }
    }

    /// Save directory, falling back to the platform data dir.
    pub fn resolve_save_dir(&self) -> Result<PathBuf> {
        match &self.save_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().join("saves"))
                .context("no home directory to place save files in"),
        }
    }

    /// Builds the content catalog with the configured overrides.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let game_config = match &self.game_config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => GameConfig::default(),
        };
        let schedule = match &self.schedule_path {
            Some(path) => ScheduleLoader::load(path)?,
            None => Schedule::default(),
        };
        ContentFactory::build(game_config, &schedule)
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "advent")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.session_id, "main");
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.autosave_every_ticks, 600);
        assert!(config.day.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ADVENT_SESSION_ID", "speedrun"),
            ("ADVENT_TICK_MS", "20"),
            ("ADVENT_AUTOSAVE_TICKS", "soon"),
            ("ADVENT_DAY", "17"),
            ("ADVENT_SAVE_DIR", "/tmp/advent"),
        ]));
        assert_eq!(config.session_id, "speedrun");
        assert_eq!(config.tick_interval, Duration::from_millis(20));
        assert_eq!(config.autosave_every_ticks, 600);
        assert_eq!(config.day, Some(17));
        assert_eq!(config.resolve_save_dir().unwrap(), PathBuf::from("/tmp/advent"));

        let runtime = config.runtime_config();
        assert_eq!(runtime.save_slot, "speedrun");
        assert_eq!(runtime.tick_interval, Some(Duration::from_millis(20)));
    }

    #[test]
    fn loads_catalog_with_schedule_override() {
        let dir = tempfile::tempdir().unwrap();
        let schedule = dir.path().join("schedule.toml");
        std::fs::write(&schedule, "[[layers]]\nid = \"toys\"\nday = 3\n").unwrap();

        let config = ClientConfig {
            schedule_path: Some(schedule),
            ..ClientConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        let toys = game_content::layers::toys::ID;
        assert_eq!(catalog.layer(toys).map(|layer| layer.day), Some(3));
    }
}
