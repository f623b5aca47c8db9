//! Entity types for the tracker

mod character;
mod encounter;
mod event;
mod monster;

pub use character::Character;
pub use encounter::Encounter;
pub use event::{EncounterEvent, EventType};
pub use monster::Monster;
