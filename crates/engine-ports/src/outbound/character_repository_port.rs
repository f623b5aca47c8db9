//! CRUD and membership operations for Character records.

use anyhow::Result;
use async_trait::async_trait;
use fray_domain::{Character, CharacterId, EncounterId, UserId};

/// Storage operations for characters.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Insert a new character
    async fn create(&self, character: &Character) -> Result<()>;

    /// Get a character by ID
    async fn get(&self, id: CharacterId) -> Result<Option<Character>>;

    /// List all characters
    async fn list(&self) -> Result<Vec<Character>>;

    /// List characters not currently in any encounter
    async fn list_available(&self) -> Result<Vec<Character>>;

    /// List characters owned by a user
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Character>>;

    /// List characters currently in an encounter
    async fn list_by_encounter(&self, encounter: EncounterId) -> Result<Vec<Character>>;

    /// Overwrite a stored character (used by link/unlink)
    async fn update(&self, character: &Character) -> Result<()>;

    /// Delete a character by ID. Deleting an absent id is a no-op.
    async fn delete(&self, id: CharacterId) -> Result<()>;

    /// Reset `encounter` to None on every character in an encounter.
    ///
    /// One idempotent cascade step; returns how many characters were reset.
    async fn clear_encounter(&self, encounter: EncounterId) -> Result<u64>;
}
