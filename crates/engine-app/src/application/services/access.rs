//! Authorization helper
//!
//! The single decision point for "may this caller touch this record".
//! Both checks are read-only: they load the record, compare ownership
//! against the caller capability, and hand the loaded record back so the
//! calling service does not fetch it twice.

use std::sync::Arc;

use fray_domain::{Character, CharacterId, Encounter, EncounterId};
use fray_engine_ports::inbound::Caller;
use fray_engine_ports::outbound::{CharacterRepositoryPort, EncounterRepositoryPort};

use super::errors::AccessError;

/// Read-only ownership checks for encounters and characters.
#[derive(Clone)]
pub struct AccessControl {
    encounters: Arc<dyn EncounterRepositoryPort>,
    characters: Arc<dyn CharacterRepositoryPort>,
}

impl AccessControl {
    pub fn new(
        encounters: Arc<dyn EncounterRepositoryPort>,
        characters: Arc<dyn CharacterRepositoryPort>,
    ) -> Self {
        Self {
            encounters,
            characters,
        }
    }

    /// Load an encounter and require that `caller` may mutate it.
    ///
    /// Fails `NotFound` if the encounter is absent and `Forbidden` if the
    /// caller is neither privileged nor its dungeon master.
    pub async fn authorize_encounter(
        &self,
        caller: &Caller,
        id: EncounterId,
    ) -> Result<Encounter, AccessError> {
        let encounter = self
            .encounters
            .get(id)
            .await
            .map_err(|e| AccessError::Database(e.to_string()))?
            .ok_or(AccessError::NotFound)?;

        if !caller.may_act_for(encounter.dungeon_master) {
            return Err(AccessError::Forbidden);
        }

        Ok(encounter)
    }

    /// Load a character and require that `caller` may mutate it.
    pub async fn authorize_character(
        &self,
        caller: &Caller,
        id: CharacterId,
    ) -> Result<Character, AccessError> {
        let character = self
            .characters
            .get(id)
            .await
            .map_err(|e| AccessError::Database(e.to_string()))?
            .ok_or(AccessError::NotFound)?;

        if !caller.may_act_for(character.owner) {
            return Err(AccessError::Forbidden);
        }

        Ok(character)
    }
}
