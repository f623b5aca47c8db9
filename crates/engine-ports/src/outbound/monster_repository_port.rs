//! CRUD and membership operations for Monster records.

use anyhow::Result;
use async_trait::async_trait;
use fray_domain::{EncounterId, Monster, MonsterId};

/// Storage operations for monsters (templates and instances alike).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MonsterRepositoryPort: Send + Sync {
    /// Insert a new monster
    async fn create(&self, monster: &Monster) -> Result<()>;

    /// Get a monster by ID
    async fn get(&self, id: MonsterId) -> Result<Option<Monster>>;

    /// List monsters attached to no encounter (the templates)
    async fn list_templates(&self) -> Result<Vec<Monster>>;

    /// List monster instances currently in an encounter
    async fn list_by_encounter(&self, encounter: EncounterId) -> Result<Vec<Monster>>;

    /// Delete a monster by ID. Deleting an absent id is a no-op.
    async fn delete(&self, id: MonsterId) -> Result<()>;

    /// Delete every monster instance in an encounter.
    ///
    /// One idempotent cascade step; returns how many were deleted.
    async fn delete_by_encounter(&self, encounter: EncounterId) -> Result<u64>;
}
