//! Encounter entity - a combat scene run by a dungeon master

use chrono::{DateTime, Utc};

use crate::ids::{EncounterId, UserId};

/// A combat encounter.
///
/// Member characters and monster instances are tracked by back-reference
/// from the members themselves (`Character::encounter`,
/// `Monster::encounter`), never by a cached list here.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub id: EncounterId,
    pub name: String,
    /// The user running this encounter; the only user allowed to mutate it
    pub dungeon_master: UserId,
    pub created_at: DateTime<Utc>,
}

impl Encounter {
    pub fn new(dungeon_master: UserId, name: impl Into<String>) -> Self {
        Self {
            id: EncounterId::new(),
            name: name.into(),
            dungeon_master,
            created_at: Utc::now(),
        }
    }

    pub fn is_run_by(&self, user: UserId) -> bool {
        self.dungeon_master == user
    }
}
