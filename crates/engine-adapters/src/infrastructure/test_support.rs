//! Test wiring: a full AppState over a fresh in-memory store

use std::sync::Arc;

use fray_engine_app::application::services::{
    AccessControl, CharacterServiceImpl, EncounterServiceImpl, EventServiceImpl, MonsterServiceImpl,
};
use fray_engine_ports::outbound::{
    CharacterRepositoryPort, EncounterRepositoryPort, EventRepositoryPort, MonsterRepositoryPort,
};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::in_memory::{
    InMemoryCharacterRepository, InMemoryEncounterRepository, InMemoryEventRepository,
    InMemoryMonsterRepository,
};
use crate::infrastructure::state::AppState;

/// Build an AppState over a fresh in-memory store, optionally with a
/// configured service credential.
pub(crate) fn test_state(service_api_key: Option<&str>) -> Arc<AppState> {
    let config = AppConfig {
        service_api_key: service_api_key.map(str::to_string),
        ..AppConfig::default()
    };

    let encounters: Arc<dyn EncounterRepositoryPort> = Arc::new(InMemoryEncounterRepository::new());
    let characters: Arc<dyn CharacterRepositoryPort> = Arc::new(InMemoryCharacterRepository::new());
    let monsters: Arc<dyn MonsterRepositoryPort> = Arc::new(InMemoryMonsterRepository::new());
    let events: Arc<dyn EventRepositoryPort> = Arc::new(InMemoryEventRepository::new());

    let access = AccessControl::new(encounters.clone(), characters.clone());

    Arc::new(AppState {
        config,
        encounter_service: Arc::new(EncounterServiceImpl::new(
            encounters.clone(),
            characters.clone(),
            monsters.clone(),
            events.clone(),
            access.clone(),
        )),
        character_service: Arc::new(CharacterServiceImpl::new(
            characters,
            encounters,
            events.clone(),
            access.clone(),
        )),
        monster_service: Arc::new(MonsterServiceImpl::new(monsters, events.clone(), access.clone())),
        event_service: Arc::new(EventServiceImpl::new(events, access)),
    })
}
