//! Unlock-day and goal overrides.

use std::path::Path;

use game_core::{CatalogBuilder, Decimal};

use crate::loaders::{LoadResult, read_file};

/// Per-layer overrides read from `schedule.toml`.
///
/// ```toml
/// [[layers]]
/// id = "toys"
/// day = 17
/// goal = 500.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub layers: Vec<ScheduleEntry>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub day: Option<u32>,
    pub goal: Option<f64>,
}

impl Schedule {
    /// Applies every override to the registered layers.
    ///
    /// Fails on an id no registered layer has, so typos do not silently
    /// leave a layer on its built-in schedule.
    pub fn apply(&self, builder: &mut CatalogBuilder) -> LoadResult<()> {
        for entry in &self.layers {
            let layer = builder
                .layer_by_name_mut(&entry.id)
                .ok_or_else(|| anyhow::anyhow!("schedule names unknown layer '{}'", entry.id))?;

            let day = entry.day.unwrap_or(layer.day);
            layer.reschedule(day, entry.goal.map(Decimal::new));
        }
        Ok(())
    }
}

/// Loader for [`Schedule`] from TOML files.
pub struct ScheduleLoader;

impl ScheduleLoader {
    pub fn load(path: &Path) -> LoadResult<Schedule> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Schedule> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse schedule TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{self, toys};
    use game_core::Catalog;

    #[test]
    fn overrides_day_and_goal() {
        let schedule = ScheduleLoader::parse(
            r#"
            [[layers]]
            id = "toys"
            day = 3
            goal = 50.0
            "#,
        )
        .unwrap();

        let mut builder = Catalog::builder().layers(layers::all());
        schedule.apply(&mut builder).unwrap();
        let catalog = builder.build().unwrap();

        let toys = catalog.layer(toys::ID).unwrap();
        assert_eq!(toys.day, 3);
        assert_eq!(toys.tracker.as_ref().map(|t| t.goal), Some(Decimal::new(50.0)));
    }

    #[test]
    fn unknown_layer_is_an_error() {
        let schedule = ScheduleLoader::parse("[[layers]]\nid = \"candy\"\nday = 4").unwrap();
        let mut builder = Catalog::builder().layers(layers::all());
        let err = schedule.apply(&mut builder).unwrap_err();
        assert!(err.to_string().contains("candy"));
    }
}
