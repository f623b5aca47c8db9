//! Encounter Service - Application service for combat encounters
//!
//! Creation and listing are thin wrappers over the repository; deletion is
//! the membership cascade. The cascade runs as four idempotent steps
//! (delete member monsters, delete log entries, unlink member characters,
//! delete the encounter), so a re-run after a partial failure converges to
//! the same end state instead of erroring.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use fray_domain::{Encounter, EncounterId, UserId};
use fray_engine_ports::inbound::Caller;
use fray_engine_ports::outbound::{
    CharacterRepositoryPort, EncounterRepositoryPort, EventRepositoryPort, MonsterRepositoryPort,
};

use super::access::AccessControl;
use super::errors::EncounterError;

/// Request to create a new encounter
#[derive(Debug, Clone)]
pub struct CreateEncounterRequest {
    pub name: String,
    /// Explicit owner, required for privileged callers and ignored otherwise
    pub owner: Option<UserId>,
}

/// Encounter service trait defining the application use cases
#[async_trait]
pub trait EncounterService: Send + Sync {
    /// List every encounter. Public read, no authorization.
    async fn list(&self) -> Result<Vec<Encounter>, EncounterError>;

    /// List the caller's encounters; privileged callers see all of them
    async fn list_by_owner(&self, caller: &Caller) -> Result<Vec<Encounter>, EncounterError>;

    /// Create an encounter owned by the resolved dungeon master
    async fn create(
        &self,
        caller: &Caller,
        request: CreateEncounterRequest,
    ) -> Result<EncounterId, EncounterError>;

    /// Delete an encounter and cascade over its members and log
    async fn delete(&self, caller: &Caller, id: EncounterId) -> Result<(), EncounterError>;
}

/// Default implementation of EncounterService using port abstractions
#[derive(Clone)]
pub struct EncounterServiceImpl {
    encounters: Arc<dyn EncounterRepositoryPort>,
    characters: Arc<dyn CharacterRepositoryPort>,
    monsters: Arc<dyn MonsterRepositoryPort>,
    events: Arc<dyn EventRepositoryPort>,
    access: AccessControl,
}

impl EncounterServiceImpl {
    pub fn new(
        encounters: Arc<dyn EncounterRepositoryPort>,
        characters: Arc<dyn CharacterRepositoryPort>,
        monsters: Arc<dyn MonsterRepositoryPort>,
        events: Arc<dyn EventRepositoryPort>,
        access: AccessControl,
    ) -> Self {
        Self {
            encounters,
            characters,
            monsters,
            events,
            access,
        }
    }

    fn validate_name(name: &str) -> Result<(), EncounterError> {
        if name.trim().is_empty() {
            return Err(EncounterError::Validation(
                "Encounter name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EncounterService for EncounterServiceImpl {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Encounter>, EncounterError> {
        self.encounters
            .list()
            .await
            .map_err(|e| EncounterError::Database(e.to_string()))
    }

    #[instrument(skip(self, caller))]
    async fn list_by_owner(&self, caller: &Caller) -> Result<Vec<Encounter>, EncounterError> {
        match caller.user_id() {
            // Privileged callers are not bound to a user; they see everything
            None => self.encounters.list().await,
            Some(user) => self.encounters.list_by_dungeon_master(user).await,
        }
        .map_err(|e| EncounterError::Database(e.to_string()))
    }

    #[instrument(skip(self, caller, request), fields(name = %request.name))]
    async fn create(
        &self,
        caller: &Caller,
        request: CreateEncounterRequest,
    ) -> Result<EncounterId, EncounterError> {
        Self::validate_name(&request.name)?;

        let owner = caller
            .resolve_owner(request.owner)
            .ok_or(EncounterError::OwnerRequired)?;

        let encounter = Encounter::new(owner, request.name);
        self.encounters
            .create(&encounter)
            .await
            .map_err(|e| EncounterError::Database(e.to_string()))?;

        info!(encounter_id = %encounter.id, dungeon_master = %owner, "Created encounter: {}", encounter.name);
        Ok(encounter.id)
    }

    #[instrument(skip(self, caller), fields(encounter_id = %id))]
    async fn delete(&self, caller: &Caller, id: EncounterId) -> Result<(), EncounterError> {
        let encounter = self
            .access
            .authorize_encounter(caller, id)
            .await
            .map_err(|e| EncounterError::from_access(e, id))?;

        // Each step is an idempotent bulk operation keyed on the encounter
        // id, so a partially-completed cascade can be re-run safely.
        let monsters_deleted = self
            .monsters
            .delete_by_encounter(id)
            .await
            .map_err(|e| EncounterError::Database(e.to_string()))?;
        debug!(count = monsters_deleted, "Deleted member monster records");

        let events_deleted = self
            .events
            .delete_by_encounter(id)
            .await
            .map_err(|e| EncounterError::Database(e.to_string()))?;
        debug!(count = events_deleted, "Deleted event log records");

        let characters_unlinked = self
            .characters
            .clear_encounter(id)
            .await
            .map_err(|e| EncounterError::Database(e.to_string()))?;
        debug!(count = characters_unlinked, "Unlinked member characters");

        self.encounters
            .delete(id)
            .await
            .map_err(|e| EncounterError::Database(e.to_string()))?;

        info!(
            encounter_id = %id,
            monsters_deleted,
            events_deleted,
            characters_unlinked,
            "Deleted encounter: {}",
            encounter.name
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fray_engine_ports::outbound::{
        MockCharacterRepositoryPort, MockEncounterRepositoryPort, MockEventRepositoryPort,
        MockMonsterRepositoryPort,
    };

    struct Mocks {
        encounters: MockEncounterRepositoryPort,
        characters: MockCharacterRepositoryPort,
        monsters: MockMonsterRepositoryPort,
        events: MockEventRepositoryPort,
        access_encounters: MockEncounterRepositoryPort,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                encounters: MockEncounterRepositoryPort::new(),
                characters: MockCharacterRepositoryPort::new(),
                monsters: MockMonsterRepositoryPort::new(),
                events: MockEventRepositoryPort::new(),
                access_encounters: MockEncounterRepositoryPort::new(),
            }
        }

        fn build(self) -> EncounterServiceImpl {
            let access = AccessControl::new(
                Arc::new(self.access_encounters),
                Arc::new(MockCharacterRepositoryPort::new()),
            );
            EncounterServiceImpl::new(
                Arc::new(self.encounters),
                Arc::new(self.characters),
                Arc::new(self.monsters),
                Arc::new(self.events),
                access,
            )
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let service = Mocks::new().build();
        let err = service
            .create(
                &Caller::EndUser(UserId::new()),
                CreateEncounterRequest {
                    name: "   ".to_string(),
                    owner: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EncounterError::Validation(_)));
    }

    #[tokio::test]
    async fn create_requires_owner_for_privileged_caller() {
        let service = Mocks::new().build();
        let err = service
            .create(
                &Caller::Privileged,
                CreateEncounterRequest {
                    name: "Goblin Ambush".to_string(),
                    owner: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EncounterError::OwnerRequired));
    }

    #[tokio::test]
    async fn create_binds_the_explicit_owner_under_privilege() {
        let owner = UserId::new();
        let mut mocks = Mocks::new();
        mocks
            .encounters
            .expect_create()
            .withf(move |e| e.dungeon_master == owner)
            .returning(|_| Ok(()));

        let service = mocks.build();
        service
            .create(
                &Caller::Privileged,
                CreateEncounterRequest {
                    name: "Goblin Ambush".to_string(),
                    owner: Some(owner),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_by_owner_filters_for_end_users() {
        let dm = UserId::new();
        let mut mocks = Mocks::new();
        mocks
            .encounters
            .expect_list_by_dungeon_master()
            .withf(move |user| *user == dm)
            .returning(|_| Ok(vec![]));

        let service = mocks.build();
        assert!(service
            .list_by_owner(&Caller::EndUser(dm))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn list_by_owner_is_unfiltered_for_privileged_callers() {
        let mut mocks = Mocks::new();
        mocks.encounters.expect_list().returning(|| {
            Ok(vec![
                Encounter::new(UserId::new(), "One"),
                Encounter::new(UserId::new(), "Two"),
            ])
        });

        let service = mocks.build();
        assert_eq!(service.list_by_owner(&Caller::Privileged).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_runs_all_four_cascade_steps() {
        let dm = UserId::new();
        let encounter = Encounter::new(dm, "Goblin Ambush");
        let id = encounter.id;

        let mut mocks = Mocks::new();
        mocks
            .access_encounters
            .expect_get()
            .returning(move |_| Ok(Some(encounter.clone())));
        mocks
            .monsters
            .expect_delete_by_encounter()
            .withf(move |e| *e == id)
            .returning(|_| Ok(2));
        mocks
            .events
            .expect_delete_by_encounter()
            .withf(move |e| *e == id)
            .returning(|_| Ok(5));
        mocks
            .characters
            .expect_clear_encounter()
            .withf(move |e| *e == id)
            .returning(|_| Ok(3));
        mocks
            .encounters
            .expect_delete()
            .withf(move |e| *e == id)
            .returning(|_| Ok(()));

        let service = mocks.build();
        service.delete(&Caller::EndUser(dm), id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_a_stranger_is_forbidden() {
        let encounter = Encounter::new(UserId::new(), "Goblin Ambush");
        let id = encounter.id;

        let mut mocks = Mocks::new();
        mocks
            .access_encounters
            .expect_get()
            .returning(move |_| Ok(Some(encounter.clone())));

        let service = mocks.build();
        let err = service
            .delete(&Caller::EndUser(UserId::new()), id)
            .await
            .unwrap_err();
        assert!(matches!(err, EncounterError::Forbidden));
    }

    #[tokio::test]
    async fn delete_of_a_missing_encounter_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.access_encounters.expect_get().returning(|_| Ok(None));

        let service = mocks.build();
        let id = EncounterId::new();
        let err = service.delete(&Caller::Privileged, id).await.unwrap_err();
        assert!(matches!(err, EncounterError::NotFound(got) if got == id));
    }
}
