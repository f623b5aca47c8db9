//! Monster Service - Application service for monster templates and instances
//!
//! A template is a monster with no encounter; spawning stamps a copy of it
//! into an encounter with a letter suffix on the name. The suffix comes
//! from the live count of same-template instances in that encounter, not a
//! counter, so deleting an instance and spawning again can reuse a letter
//! that is still on the table. That behaviour is intentional and covered
//! by the tests in the store adapter.
//!
//! Template creation carries no ownership check (any authenticated caller
//! may create one); spawning gates on encounter ownership; deletion checks
//! nothing at all.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use fray_domain::{EncounterEvent, EncounterId, EventType, Monster, MonsterId};
use fray_engine_ports::inbound::Caller;
use fray_engine_ports::outbound::{EventRepositoryPort, MonsterRepositoryPort};

use super::access::AccessControl;
use super::errors::{AccessError, MonsterError};

/// Monster service trait defining the application use cases
#[async_trait]
pub trait MonsterService: Send + Sync {
    /// List every template (monsters attached to no encounter)
    async fn list_templates(&self) -> Result<Vec<Monster>, MonsterError>;

    /// List monster instances in an encounter; a missing encounter yields
    /// an empty list
    async fn list_by_encounter(
        &self,
        caller: &Caller,
        encounter_id: EncounterId,
    ) -> Result<Vec<Monster>, MonsterError>;

    /// Create a new template
    async fn create_template(&self, name: String) -> Result<MonsterId, MonsterError>;

    /// Stamp an instance of a template into an encounter
    async fn spawn_into_encounter(
        &self,
        caller: &Caller,
        encounter_id: EncounterId,
        template_id: MonsterId,
    ) -> Result<MonsterId, MonsterError>;

    /// Delete a monster by id, existence not required
    async fn delete(&self, id: MonsterId) -> Result<(), MonsterError>;
}

/// Default implementation of MonsterService using port abstractions
#[derive(Clone)]
pub struct MonsterServiceImpl {
    monsters: Arc<dyn MonsterRepositoryPort>,
    events: Arc<dyn EventRepositoryPort>,
    access: AccessControl,
}

impl MonsterServiceImpl {
    pub fn new(
        monsters: Arc<dyn MonsterRepositoryPort>,
        events: Arc<dyn EventRepositoryPort>,
        access: AccessControl,
    ) -> Self {
        Self {
            monsters,
            events,
            access,
        }
    }

    fn validate_name(name: &str) -> Result<(), MonsterError> {
        if name.trim().is_empty() {
            return Err(MonsterError::Validation(
                "Monster name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MonsterService for MonsterServiceImpl {
    #[instrument(skip(self))]
    async fn list_templates(&self) -> Result<Vec<Monster>, MonsterError> {
        self.monsters
            .list_templates()
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))
    }

    #[instrument(skip(self, caller))]
    async fn list_by_encounter(
        &self,
        caller: &Caller,
        encounter_id: EncounterId,
    ) -> Result<Vec<Monster>, MonsterError> {
        match self.access.authorize_encounter(caller, encounter_id).await {
            Ok(_) => {}
            // A deleted encounter has no roster; reactive clients re-fetch
            // after deletions and must not see failures.
            Err(AccessError::NotFound) => {
                debug!(encounter_id = %encounter_id, "Encounter gone, returning empty member list");
                return Ok(vec![]);
            }
            Err(e) => return Err(MonsterError::from_encounter_access(e, encounter_id)),
        }

        self.monsters
            .list_by_encounter(encounter_id)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))
    }

    #[instrument(skip(self), fields(name = %name))]
    async fn create_template(&self, name: String) -> Result<MonsterId, MonsterError> {
        Self::validate_name(&name)?;

        let template = Monster::template(name);
        self.monsters
            .create(&template)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))?;

        info!(monster_id = %template.id, "Created monster template: {}", template.name);
        Ok(template.id)
    }

    #[instrument(skip(self, caller))]
    async fn spawn_into_encounter(
        &self,
        caller: &Caller,
        encounter_id: EncounterId,
        template_id: MonsterId,
    ) -> Result<MonsterId, MonsterError> {
        self.access
            .authorize_encounter(caller, encounter_id)
            .await
            .map_err(|e| MonsterError::from_encounter_access(e, encounter_id))?;

        let template = self
            .monsters
            .get(template_id)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))?
            .ok_or(MonsterError::TemplateNotFound(template_id))?;

        // An instance cannot be used as a template
        if !template.is_template() {
            return Err(MonsterError::TemplateNotFound(template_id));
        }

        let live_count = self
            .monsters
            .list_by_encounter(encounter_id)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))?
            .iter()
            .filter(|m| m.is_instance_of(template_id))
            .count();

        let instance = Monster::instance(&template, encounter_id, live_count);
        self.monsters
            .create(&instance)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))?;

        let event = EncounterEvent::new(encounter_id, EventType::EntityAdded);
        self.events
            .append(&event)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))?;

        info!(
            monster_id = %instance.id,
            encounter_id = %encounter_id,
            template_id = %template_id,
            "Spawned monster: {}",
            instance.name
        );
        Ok(instance.id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MonsterId) -> Result<(), MonsterError> {
        self.monsters
            .delete(id)
            .await
            .map_err(|e| MonsterError::Database(e.to_string()))?;

        info!(monster_id = %id, "Deleted monster");
        Ok(())
    }
}
