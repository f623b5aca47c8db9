//! Fray Engine App - application services for the combat-encounter tracker
//!
//! This crate holds the authorization helper and the domain operations
//! (encounters, characters, monsters, the event log) behind service traits.
//! It depends only on the domain types and the repository ports; adapters
//! plug in the store and the HTTP surface.

pub mod application;
