//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Stores states indexed by slot name for testing and local development.
#[derive(Debug, Default)]
pub struct InMemoryStateRepo {
    states: RwLock<HashMap<String, GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial state already saved in `slot`.
    pub fn with_state(slot: impl Into<String>, state: GameState) -> Self {
        let mut states = HashMap::new();
        states.insert(slot.into(), state);
        Self {
            states: RwLock::new(states),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(slot.to_owned(), state.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = states.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_and_delete_by_slot() {
        let repo = InMemoryStateRepo::new();
        assert!(!repo.exists("main"));

        repo.save("main", &GameState::new(3)).unwrap();
        repo.save("backup", &GameState::new(1)).unwrap();

        assert_eq!(repo.load("main").unwrap().map(|s| s.day()), Some(3));
        assert_eq!(repo.list_slots().unwrap(), vec!["backup", "main"]);

        repo.delete("main").unwrap();
        assert!(repo.load("main").unwrap().is_none());
        repo.delete("main").unwrap();
    }
}
