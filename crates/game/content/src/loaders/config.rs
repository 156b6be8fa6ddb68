//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// ```toml
/// starting_day = 1
/// lock_purchases_before_day = true
/// ```
///
/// Missing keys take their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::parse("starting_day = 5").unwrap();
        assert_eq!(config.starting_day, 5);
        assert!(config.lock_purchases_before_day);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ConfigLoader::parse("starting_day = \"soon\"").is_err());
    }
}
