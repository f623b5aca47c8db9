//! Service error types
//!
//! Each service has its own error enum with:
//! - Meaningful variants with domain context
//! - Display implementation for user-facing messages
//! - ErrorCode implementation for error code extraction
//!
//! # Error Code Conventions
//!
//! - Use SCREAMING_SNAKE_CASE
//! - Start with the entity name when relevant (ENCOUNTER_NOT_FOUND)
//! - Adapters own the mapping from code to protocol status

use std::fmt::Display;

use thiserror::Error;

use fray_domain::{CharacterId, EncounterId, MonsterId};

/// Trait for extracting error codes from service errors.
///
/// The HTTP adapter converts codes to response statuses in one place, so
/// the application layer stays protocol-agnostic.
pub trait ErrorCode: Display {
    /// Get the error code string (e.g., "ENCOUNTER_NOT_FOUND")
    fn code(&self) -> &'static str;
}

// =============================================================================
// Authorization Errors
// =============================================================================

/// Errors from the shared authorization helper.
///
/// Entity-agnostic on purpose: each service maps these onto its own
/// variants, attaching the id it was asked about.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The record being authorized against does not exist
    #[error("record not found")]
    NotFound,

    /// Caller is neither the owning user nor privileged
    #[error("caller does not own this record")]
    Forbidden,

    /// Repository failure during the ownership lookup
    #[error("{0}")]
    Database(String),
}

// =============================================================================
// Encounter Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("Encounter not found: {0}")]
    NotFound(EncounterId),

    #[error("You are not authorized to access this encounter")]
    Forbidden,

    /// Privileged call without an explicit owner id
    #[error("An owner id is required when calling with a service credential")]
    OwnerRequired,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl EncounterError {
    /// Map an authorization failure for `id` onto this error type.
    pub fn from_access(err: AccessError, id: EncounterId) -> Self {
        match err {
            AccessError::NotFound => Self::NotFound(id),
            AccessError::Forbidden => Self::Forbidden,
            AccessError::Database(msg) => Self::Database(msg),
        }
    }
}

impl ErrorCode for EncounterError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ENCOUNTER_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::OwnerRequired => "OWNER_REQUIRED",
            Self::Validation(_) => "VALIDATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

// =============================================================================
// Character Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    #[error("Encounter not found: {0}")]
    EncounterNotFound(EncounterId),

    #[error("You are not authorized to access this character")]
    Forbidden,

    /// Privileged call without an explicit owner id
    #[error("An owner id is required when calling with a service credential")]
    OwnerRequired,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl CharacterError {
    /// Map an authorization failure for character `id` onto this error type.
    pub fn from_access(err: AccessError, id: CharacterId) -> Self {
        match err {
            AccessError::NotFound => Self::NotFound(id),
            AccessError::Forbidden => Self::Forbidden,
            AccessError::Database(msg) => Self::Database(msg),
        }
    }
}

impl ErrorCode for CharacterError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CHARACTER_NOT_FOUND",
            Self::EncounterNotFound(_) => "ENCOUNTER_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::OwnerRequired => "OWNER_REQUIRED",
            Self::Validation(_) => "VALIDATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

// =============================================================================
// Monster Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum MonsterError {
    /// Template absent, or the referenced monster is not a template
    #[error("Monster template not found: {0}")]
    TemplateNotFound(MonsterId),

    #[error("Encounter not found: {0}")]
    EncounterNotFound(EncounterId),

    #[error("You are not authorized to access this encounter")]
    Forbidden,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl MonsterError {
    /// Map an authorization failure for encounter `id` onto this error type.
    pub fn from_encounter_access(err: AccessError, id: EncounterId) -> Self {
        match err {
            AccessError::NotFound => Self::EncounterNotFound(id),
            AccessError::Forbidden => Self::Forbidden,
            AccessError::Database(msg) => Self::Database(msg),
        }
    }
}

impl ErrorCode for MonsterError {
    fn code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            Self::EncounterNotFound(_) => "ENCOUNTER_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

// =============================================================================
// Event Log Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum EventError {
    #[error("You are not authorized to access this encounter")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(String),
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
