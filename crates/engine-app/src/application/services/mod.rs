//! Application services
//!
//! Each entity gets a service trait plus its default implementation over
//! the repository ports. `AccessControl` is the shared authorization
//! decision point; `errors` holds the per-service error enums and the
//! `ErrorCode` trait adapters use for status mapping.

mod access;
mod character_service;
mod encounter_service;
mod errors;
mod event_service;
mod monster_service;

pub use access::AccessControl;
pub use character_service::{
    CharacterService, CharacterServiceImpl, CreateCharacterRequest,
};
pub use encounter_service::{
    CreateEncounterRequest, EncounterService, EncounterServiceImpl,
};
pub use errors::{
    AccessError, CharacterError, EncounterError, ErrorCode, EventError, MonsterError,
};
pub use event_service::{EventService, EventServiceImpl};
pub use monster_service::{MonsterService, MonsterServiceImpl};
