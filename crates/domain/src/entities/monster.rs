//! Monster entity - templates and the instances spawned from them
//!
//! A monster record plays one of two roles:
//!
//! - **Template**: `encounter == None && template == None`. A reusable
//!   stat stamp ("Goblin") that never fights directly.
//! - **Instance**: `encounter == Some(..)`. Spawned from a template into a
//!   specific encounter; `template` points back at the origin record.
//!
//! Instance display names carry a single-letter suffix derived from the
//! live count of same-template instances already in the encounter at spawn
//! time: the first "Goblin" becomes "Goblin A", the second "Goblin B".
//! The suffix is recomputed from the live count on every spawn, so it is
//! unique within an encounter only until an instance is deleted; it is not
//! defined past 26 instances of one template.

use chrono::{DateTime, Utc};

use crate::ids::{EncounterId, MonsterId};

#[derive(Debug, Clone)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    /// The encounter this monster fights in; None for templates
    pub encounter: Option<EncounterId>,
    /// The template this instance was spawned from; None for templates
    pub template: Option<MonsterId>,
    pub created_at: DateTime<Utc>,
}

impl Monster {
    /// Create a template: a monster attached to no encounter.
    pub fn template(name: impl Into<String>) -> Self {
        Self {
            id: MonsterId::new(),
            name: name.into(),
            encounter: None,
            template: None,
            created_at: Utc::now(),
        }
    }

    /// Spawn an instance of `template` into an encounter.
    ///
    /// `live_count` is the number of instances of the same template already
    /// in the encounter; it picks the letter suffix.
    pub fn instance(template: &Monster, encounter: EncounterId, live_count: usize) -> Self {
        Self {
            id: MonsterId::new(),
            name: format!("{} {}", template.name, instance_suffix(live_count)),
            encounter: Some(encounter),
            template: Some(template.id),
            created_at: Utc::now(),
        }
    }

    pub fn is_template(&self) -> bool {
        self.encounter.is_none() && self.template.is_none()
    }

    pub fn is_instance_of(&self, template: MonsterId) -> bool {
        self.template == Some(template)
    }
}

/// Letter suffix for the nth live instance of a template (0-based).
pub fn instance_suffix(live_count: usize) -> char {
    (b'A' + live_count as u8) as char
}
