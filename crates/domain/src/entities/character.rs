//! Character entity - player characters owned by users

use chrono::{DateTime, Utc};

use crate::ids::{CharacterId, EncounterId, UserId};

/// A player character owned by a user.
///
/// The `encounter` field is the only membership record: a character is a
/// member of an encounter exactly when `encounter` points at it. The
/// link/unlink mutation pair keeps this consistent; there is no forward
/// member list on the encounter side.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// The user who owns (and may delete) this character
    pub owner: UserId,
    /// The encounter this character currently fights in, if any
    pub encounter: Option<EncounterId>,
    pub created_at: DateTime<Utc>,
}

impl Character {
    pub fn new(owner: UserId, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            owner,
            encounter: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.encounter.is_none()
    }
}
