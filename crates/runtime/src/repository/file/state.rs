//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// Format version written into every save file.
pub const SAVE_VERSION: u32 = 1;

const SAVE_EXTENSION: &str = "sav";

/// On-disk envelope around a saved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// Hex-encoded state root of `state`
    pub checksum: String,
    pub state: GameState,
}

impl SaveFile {
    fn new(state: &GameState) -> Result<Self> {
        Ok(Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            checksum: checksum(state)?,
            state: state.clone(),
        })
    }
}

fn checksum(state: &GameState) -> Result<String> {
    state
        .state_root()
        .map(hex::encode)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// File-based implementation of StateRepository.
///
/// Each slot is stored as `{slot}.sav` holding a bincode [`SaveFile`].
/// Writes go to a temp file that is renamed over the slot, so a crash never
/// leaves a half-written save behind.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidSlot(slot.to_owned()));
        }
        Ok(self.base_dir.join(format!("{slot}.{SAVE_EXTENSION}")))
    }

    /// Reads and verifies the full save envelope of a slot.
    pub fn load_file(&self, slot: &str) -> Result<Option<SaveFile>> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let file: SaveFile = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if file.version != SAVE_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                slot: slot.to_owned(),
                found: file.version,
                expected: SAVE_VERSION,
            });
        }

        let computed = checksum(&file.state)?;
        if computed != file.checksum {
            return Err(RepositoryError::ChecksumMismatch {
                slot: slot.to_owned(),
                recorded: file.checksum,
                computed,
            });
        }

        Ok(Some(file))
    }

    /// Renders a slot's save as pretty-printed JSON.
    pub fn export_json(&self, slot: &str) -> Result<Option<String>> {
        self.load_file(slot)?
            .map(|file| {
                serde_json::to_string_pretty(&file).map_err(|e| RepositoryError::Json(e.to_string()))
            })
            .transpose()
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));

        let bytes = bincode::serialize(&SaveFile::new(state)?)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot {} to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let state = self.load_file(slot)?.map(|file| file.state);
        if state.is_some() {
            tracing::debug!("Loaded slot {} from {}", slot, self.base_dir.display());
        }
        Ok(state)
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted slot {}", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if path.extension().and_then(|s| s.to_str()) == Some(SAVE_EXTENSION)
                && let Some(slot) = path.file_stem().and_then(|s| s.to_str())
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
