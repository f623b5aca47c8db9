//! Append and query operations for the encounter event log.

use anyhow::Result;
use async_trait::async_trait;
use fray_domain::{EncounterEvent, EncounterId, EventId};

/// Storage operations for encounter event log entries.
///
/// Entries are returned including soft-deleted ones; filtering on
/// `deleted_at` is the application layer's policy.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventRepositoryPort: Send + Sync {
    /// Append a new log entry
    async fn append(&self, event: &EncounterEvent) -> Result<()>;

    /// Get a log entry by ID
    async fn get(&self, id: EventId) -> Result<Option<EncounterEvent>>;

    /// List all entries for an encounter, soft-deleted included
    async fn list_by_encounter(&self, encounter: EncounterId) -> Result<Vec<EncounterEvent>>;

    /// Overwrite a stored entry (used for soft deletion)
    async fn update(&self, event: &EncounterEvent) -> Result<()>;

    /// Hard-delete every entry for an encounter.
    ///
    /// One idempotent cascade step; returns how many were deleted.
    async fn delete_by_encounter(&self, encounter: EncounterId) -> Result<u64>;
}
