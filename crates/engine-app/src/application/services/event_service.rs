//! Event Service - Application service for the encounter event log
//!
//! The log is written by the membership mutations in the other services;
//! this service is the read side plus soft deletion. Reading the log is
//! gated on encounter ownership, since entries reveal what the dungeon
//! master has been doing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use fray_domain::{EncounterEvent, EncounterId, EventId};
use fray_engine_ports::inbound::Caller;
use fray_engine_ports::outbound::EventRepositoryPort;

use super::access::AccessControl;
use super::errors::{AccessError, EventError};

/// Event log service trait defining the application use cases
#[async_trait]
pub trait EventService: Send + Sync {
    /// List the live (not soft-deleted) log entries for an encounter; a
    /// missing encounter yields an empty list
    async fn list_by_encounter(
        &self,
        caller: &Caller,
        encounter_id: EncounterId,
    ) -> Result<Vec<EncounterEvent>, EventError>;

    /// Soft-delete a log entry; absent or already-deleted entries succeed
    async fn soft_delete(&self, id: EventId) -> Result<(), EventError>;
}

/// Default implementation of EventService using port abstractions
#[derive(Clone)]
pub struct EventServiceImpl {
    events: Arc<dyn EventRepositoryPort>,
    access: AccessControl,
}

impl EventServiceImpl {
    pub fn new(events: Arc<dyn EventRepositoryPort>, access: AccessControl) -> Self {
        Self { events, access }
    }
}

#[async_trait]
impl EventService for EventServiceImpl {
    #[instrument(skip(self, caller))]
    async fn list_by_encounter(
        &self,
        caller: &Caller,
        encounter_id: EncounterId,
    ) -> Result<Vec<EncounterEvent>, EventError> {
        match self.access.authorize_encounter(caller, encounter_id).await {
            Ok(_) => {}
            Err(AccessError::NotFound) => {
                debug!(encounter_id = %encounter_id, "Encounter gone, returning empty log");
                return Ok(vec![]);
            }
            Err(AccessError::Forbidden) => return Err(EventError::Forbidden),
            Err(AccessError::Database(msg)) => return Err(EventError::Database(msg)),
        }

        let events = self
            .events
            .list_by_encounter(encounter_id)
            .await
            .map_err(|e| EventError::Database(e.to_string()))?;

        Ok(events.into_iter().filter(|e| !e.is_deleted()).collect())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: EventId) -> Result<(), EventError> {
        let Some(mut event) = self
            .events
            .get(id)
            .await
            .map_err(|e| EventError::Database(e.to_string()))?
        else {
            // Lenient like the other deletes: the entry being gone is the
            // state the caller asked for
            return Ok(());
        };

        if event.is_deleted() {
            return Ok(());
        }

        event.soft_delete();
        self.events
            .update(&event)
            .await
            .map_err(|e| EventError::Database(e.to_string()))?;

        info!(event_id = %id, "Soft-deleted log entry");
        Ok(())
    }
}
