//! Encounter event log entries

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{EncounterId, EventId};

/// The fixed set of event kinds an encounter log can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    EntityAdded,
    EntityRemoved,
    EntityUpdated,
    EntityAction,
    RollRequested,
    RollCompleted,
    RollCancelled,
    RoundStart,
    RoundEnd,
    TurnStart,
    TurnEnd,
    EncounterCompleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityAdded => "entity_added",
            Self::EntityRemoved => "entity_removed",
            Self::EntityUpdated => "entity_updated",
            Self::EntityAction => "entity_action",
            Self::RollRequested => "roll_requested",
            Self::RollCompleted => "roll_completed",
            Self::RollCancelled => "roll_cancelled",
            Self::RoundStart => "round_start",
            Self::RoundEnd => "round_end",
            Self::TurnStart => "turn_start",
            Self::TurnEnd => "turn_end",
            Self::EncounterCompleted => "encounter_completed",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entity_added" => Ok(Self::EntityAdded),
            "entity_removed" => Ok(Self::EntityRemoved),
            "entity_updated" => Ok(Self::EntityUpdated),
            "entity_action" => Ok(Self::EntityAction),
            "roll_requested" => Ok(Self::RollRequested),
            "roll_completed" => Ok(Self::RollCompleted),
            "roll_cancelled" => Ok(Self::RollCancelled),
            "round_start" => Ok(Self::RoundStart),
            "round_end" => Ok(Self::RoundEnd),
            "turn_start" => Ok(Self::TurnStart),
            "turn_end" => Ok(Self::TurnEnd),
            "encounter_completed" => Ok(Self::EncounterCompleted),
            _ => Err(DomainError::parse(format!("Unknown event type: {s}"))),
        }
    }
}

/// One entry in an encounter's event log.
///
/// Entries are soft-deleted: `deleted_at` marks an entry as removed without
/// dropping the record, so the log remains append-only until the owning
/// encounter is deleted (which hard-deletes its entries).
#[derive(Debug, Clone)]
pub struct EncounterEvent {
    pub id: EventId,
    pub encounter: EncounterId,
    pub event_type: EventType,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EncounterEvent {
    pub fn new(encounter: EncounterId, event_type: EventType) -> Self {
        Self {
            id: EventId::new(),
            encounter,
            event_type,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_round_trips_through_str() {
        for ty in [
            EventType::EntityAdded,
            EventType::RollCompleted,
            EventType::EncounterCompleted,
        ] {
            assert_eq!(ty.as_str().parse::<EventType>().unwrap(), ty);
        }
        assert!("initiative_rolled".parse::<EventType>().is_err());
    }

    #[test]
    fn event_type_serializes_as_its_literal() {
        let json = serde_json::to_string(&EventType::RollRequested).unwrap();
        assert_eq!(json, "\"roll_requested\"");
        let back: EventType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventType::RollRequested);
    }

    #[test]
    fn soft_delete_is_sticky() {
        let mut event = EncounterEvent::new(EncounterId::new(), EventType::RoundStart);
        assert!(!event.is_deleted());

        event.soft_delete();
        let first = event.deleted_at;
        assert!(event.is_deleted());

        event.soft_delete();
        assert_eq!(event.deleted_at, first);
    }
}
