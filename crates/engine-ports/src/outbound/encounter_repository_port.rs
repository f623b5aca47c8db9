//! CRUD operations for Encounter records.

use anyhow::Result;
use async_trait::async_trait;
use fray_domain::{Encounter, EncounterId, UserId};

/// Storage operations for encounters.
///
/// Member characters and monsters are never stored on the encounter; the
/// child repositories answer the membership queries.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EncounterRepositoryPort: Send + Sync {
    /// Insert a new encounter
    async fn create(&self, encounter: &Encounter) -> Result<()>;

    /// Get an encounter by ID
    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>>;

    /// List all encounters
    async fn list(&self) -> Result<Vec<Encounter>>;

    /// List encounters run by a specific dungeon master
    async fn list_by_dungeon_master(&self, user: UserId) -> Result<Vec<Encounter>>;

    /// Delete an encounter by ID. Deleting an absent id is a no-op.
    async fn delete(&self, id: EncounterId) -> Result<()>;
}
