//! Fray Domain - Core types for the combat-encounter tracker
//!
//! This crate contains the entity types, typed ids, and domain errors shared
//! by every other crate. No I/O, no async, no framework types.

pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{Character, Encounter, EncounterEvent, EventType, Monster};
pub use error::DomainError;
pub use ids::{CharacterId, EncounterId, EventId, MonsterId, UserId};
