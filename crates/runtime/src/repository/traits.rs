//! Repository contracts for saving and loading mutable runtime state.

use game_core::GameState;

use super::Result;

/// Repository for game state persistence and loading
///
/// States are indexed by save slot name. A loaded state may come from an
/// older build; callers pass it through `Catalog::restore` before use.
pub trait StateRepository: Send + Sync {
    /// Save a game state into a slot, replacing any previous save
    fn save(&self, slot: &str, state: &GameState) -> Result<()>;

    /// Load the game state stored in a slot
    fn load(&self, slot: &str) -> Result<Option<GameState>>;

    /// Check if a slot holds a save
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slots holding a save, sorted by name
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
