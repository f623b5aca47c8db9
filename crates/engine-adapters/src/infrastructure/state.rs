//! Shared application state

use std::sync::Arc;

use fray_engine_app::application::services::{
    CharacterService, EncounterService, EventService, MonsterService,
};

use crate::infrastructure::config::AppConfig;

/// Shared application state handed to every route handler.
///
/// Handlers talk to the application layer through the service traits only;
/// the store behind them is whatever the composition root wired in.
pub struct AppState {
    pub config: AppConfig,
    pub encounter_service: Arc<dyn EncounterService>,
    pub character_service: Arc<dyn CharacterService>,
    pub monster_service: Arc<dyn MonsterService>,
    pub event_service: Arc<dyn EventService>,
}
