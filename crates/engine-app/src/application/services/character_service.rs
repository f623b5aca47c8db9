//! Character Service - Application service for player characters
//!
//! Membership is a single field on the character (`encounter`); the
//! link/unlink pair toggles it and records the matching log entry. Both
//! link and unlink check existence of the two records only - any
//! authenticated caller may move a character in or out of an encounter,
//! ownership gates creation and deletion.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use fray_domain::{Character, CharacterId, EncounterEvent, EncounterId, EventType, UserId};
use fray_engine_ports::inbound::Caller;
use fray_engine_ports::outbound::{
    CharacterRepositoryPort, EncounterRepositoryPort, EventRepositoryPort,
};

use super::access::AccessControl;
use super::errors::CharacterError;

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub name: String,
    /// Explicit owner, required for privileged callers and ignored otherwise
    pub owner: Option<UserId>,
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// List every character
    async fn list_all(&self) -> Result<Vec<Character>, CharacterError>;

    /// List characters not currently in any encounter
    async fn list_available(&self) -> Result<Vec<Character>, CharacterError>;

    /// List characters owned by the caller, or by the explicit owner for
    /// privileged callers
    async fn list_by_owner(
        &self,
        caller: &Caller,
        owner: Option<UserId>,
    ) -> Result<Vec<Character>, CharacterError>;

    /// List member characters of an encounter; a missing encounter yields
    /// an empty list
    async fn list_by_encounter(
        &self,
        encounter_id: EncounterId,
    ) -> Result<Vec<Character>, CharacterError>;

    /// Create a character owned by the resolved user
    async fn create(
        &self,
        caller: &Caller,
        request: CreateCharacterRequest,
    ) -> Result<CharacterId, CharacterError>;

    /// Put a character into an encounter
    async fn link_to_encounter(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
    ) -> Result<(), CharacterError>;

    /// Take a character out of an encounter
    async fn unlink_from_encounter(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
    ) -> Result<(), CharacterError>;

    /// Delete a character the caller owns, unlinking it from any encounter
    async fn delete(&self, caller: &Caller, id: CharacterId) -> Result<(), CharacterError>;
}

/// Default implementation of CharacterService using port abstractions
#[derive(Clone)]
pub struct CharacterServiceImpl {
    characters: Arc<dyn CharacterRepositoryPort>,
    encounters: Arc<dyn EncounterRepositoryPort>,
    events: Arc<dyn EventRepositoryPort>,
    access: AccessControl,
}

impl CharacterServiceImpl {
    pub fn new(
        characters: Arc<dyn CharacterRepositoryPort>,
        encounters: Arc<dyn EncounterRepositoryPort>,
        events: Arc<dyn EventRepositoryPort>,
        access: AccessControl,
    ) -> Self {
        Self {
            characters,
            encounters,
            events,
            access,
        }
    }

    fn validate_name(name: &str) -> Result<(), CharacterError> {
        if name.trim().is_empty() {
            return Err(CharacterError::Validation(
                "Character name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the membership pair for link/unlink, failing NotFound on
    /// whichever record is absent.
    async fn load_pair(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
    ) -> Result<Character, CharacterError> {
        self.encounters
            .get(encounter_id)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?
            .ok_or(CharacterError::EncounterNotFound(encounter_id))?;

        self.characters
            .get(character_id)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?
            .ok_or(CharacterError::NotFound(character_id))
    }

    async fn record(
        &self,
        encounter_id: EncounterId,
        event_type: EventType,
    ) -> Result<(), CharacterError> {
        let event = EncounterEvent::new(encounter_id, event_type);
        self.events
            .append(&event)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Character>, CharacterError> {
        self.characters
            .list()
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_available(&self) -> Result<Vec<Character>, CharacterError> {
        self.characters
            .list_available()
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))
    }

    #[instrument(skip(self, caller))]
    async fn list_by_owner(
        &self,
        caller: &Caller,
        owner: Option<UserId>,
    ) -> Result<Vec<Character>, CharacterError> {
        let owner = caller
            .resolve_owner(owner)
            .ok_or(CharacterError::OwnerRequired)?;
        self.characters
            .list_by_owner(owner)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_by_encounter(
        &self,
        encounter_id: EncounterId,
    ) -> Result<Vec<Character>, CharacterError> {
        let encounter = self
            .encounters
            .get(encounter_id)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?;

        // A deleted encounter is an empty roster, not an error; reactive
        // clients re-fetch after deletions and must not see failures.
        if encounter.is_none() {
            debug!(encounter_id = %encounter_id, "Encounter gone, returning empty member list");
            return Ok(vec![]);
        }

        self.characters
            .list_by_encounter(encounter_id)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))
    }

    #[instrument(skip(self, caller, request), fields(name = %request.name))]
    async fn create(
        &self,
        caller: &Caller,
        request: CreateCharacterRequest,
    ) -> Result<CharacterId, CharacterError> {
        Self::validate_name(&request.name)?;

        let owner = caller
            .resolve_owner(request.owner)
            .ok_or(CharacterError::OwnerRequired)?;

        let character = Character::new(owner, request.name);
        self.characters
            .create(&character)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?;

        info!(character_id = %character.id, owner = %owner, "Created character: {}", character.name);
        Ok(character.id)
    }

    #[instrument(skip(self))]
    async fn link_to_encounter(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
    ) -> Result<(), CharacterError> {
        let mut character = self.load_pair(encounter_id, character_id).await?;

        character.encounter = Some(encounter_id);
        self.characters
            .update(&character)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?;

        self.record(encounter_id, EventType::EntityAdded).await?;

        info!(character_id = %character_id, encounter_id = %encounter_id, "Linked character to encounter");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn unlink_from_encounter(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
    ) -> Result<(), CharacterError> {
        let mut character = self.load_pair(encounter_id, character_id).await?;

        character.encounter = None;
        self.characters
            .update(&character)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?;

        self.record(encounter_id, EventType::EntityRemoved).await?;

        info!(character_id = %character_id, encounter_id = %encounter_id, "Unlinked character from encounter");
        Ok(())
    }

    #[instrument(skip(self, caller), fields(character_id = %id))]
    async fn delete(&self, caller: &Caller, id: CharacterId) -> Result<(), CharacterError> {
        let character = self
            .access
            .authorize_character(caller, id)
            .await
            .map_err(|e| CharacterError::from_access(e, id))?;

        self.characters
            .delete(id)
            .await
            .map_err(|e| CharacterError::Database(e.to_string()))?;

        // Deleting the record is the unlink; the log entry keeps the
        // encounter's history aware of the departure.
        if let Some(encounter_id) = character.encounter {
            self.record(encounter_id, EventType::EntityRemoved).await?;
        }

        info!(character_id = %id, "Deleted character: {}", character.name);
        Ok(())
    }
}
