//! Fray Engine Adapters - infrastructure around the application core
//!
//! This crate is the *composition surface* for the engine: the HTTP routes
//! and middleware on the inbound side, the store adapter on the outbound
//! side, plus configuration and shared state. The runner crate wires these
//! together and starts the server.

pub mod infrastructure;
