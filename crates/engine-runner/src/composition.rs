//! Service wiring
//!
//! Builds the store, hangs the application services off it, and bundles
//! everything into the shared `AppState`.

use std::sync::Arc;

use fray_engine_adapters::infrastructure::config::AppConfig;
use fray_engine_adapters::infrastructure::in_memory::{
    InMemoryCharacterRepository, InMemoryEncounterRepository, InMemoryEventRepository,
    InMemoryMonsterRepository,
};
use fray_engine_adapters::infrastructure::state::AppState;
use fray_engine_app::application::services::{
    AccessControl, CharacterServiceImpl, EncounterServiceImpl, EventServiceImpl, MonsterServiceImpl,
};
use fray_engine_ports::outbound::{
    CharacterRepositoryPort, EncounterRepositoryPort, EventRepositoryPort, MonsterRepositoryPort,
};

/// Assemble the application state over a fresh in-memory store.
pub fn new_app_state(config: AppConfig) -> AppState {
    let encounters: Arc<dyn EncounterRepositoryPort> = Arc::new(InMemoryEncounterRepository::new());
    let characters: Arc<dyn CharacterRepositoryPort> = Arc::new(InMemoryCharacterRepository::new());
    let monsters: Arc<dyn MonsterRepositoryPort> = Arc::new(InMemoryMonsterRepository::new());
    let events: Arc<dyn EventRepositoryPort> = Arc::new(InMemoryEventRepository::new());

    let access = AccessControl::new(encounters.clone(), characters.clone());

    AppState {
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
        monster_service: Arc::new(MonsterServiceImpl::new(
            monsters,
            events.clone(),
            access.clone(),
        )),
        event_service: Arc::new(EventServiceImpl::new(events, access)),
    }
}
