//! In-memory store adapter
//!
//! Reference implementation of the repository ports over
//! `tokio::sync::RwLock<HashMap>`, one map per entity. This is the store
//! the server runs on; a document-database adapter would implement the
//! same four ports.
//!
//! Writes are last-write-wins at the record level; list results come back
//! sorted by creation time.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use fray_domain::{
    Character, CharacterId, Encounter, EncounterEvent, EncounterId, EventId, Monster, MonsterId,
    UserId,
};
use fray_engine_ports::outbound::{
    CharacterRepositoryPort, EncounterRepositoryPort, EventRepositoryPort, MonsterRepositoryPort,
};

fn sorted_by_creation<T, F>(mut records: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    records.sort_by_key(|r| created_at(r));
    records
}

// =============================================================================
// Encounters
// =============================================================================

#[derive(Default)]
pub struct InMemoryEncounterRepository {
    records: RwLock<HashMap<EncounterId, Encounter>>,
}

impl InMemoryEncounterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EncounterRepositoryPort for InMemoryEncounterRepository {
    async fn create(&self, encounter: &Encounter) -> Result<()> {
        self.records
            .write()
            .await
            .insert(encounter.id, encounter.clone());
        Ok(())
    }

    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Encounter>> {
        let records = self.records.read().await.values().cloned().collect();
        Ok(sorted_by_creation(records, |e: &Encounter| e.created_at))
    }

    async fn list_by_dungeon_master(&self, user: UserId) -> Result<Vec<Encounter>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|e| e.dungeon_master == user)
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |e: &Encounter| e.created_at))
    }

    async fn delete(&self, id: EncounterId) -> Result<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Default)]
pub struct InMemoryCharacterRepository {
    records: RwLock<HashMap<CharacterId, Character>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn create(&self, character: &Character) -> Result<()> {
        self.records
            .write()
            .await
            .insert(character.id, character.clone());
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Character>> {
        let records = self.records.read().await.values().cloned().collect();
        Ok(sorted_by_creation(records, |c: &Character| c.created_at))
    }

    async fn list_available(&self) -> Result<Vec<Character>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|c| c.encounter.is_none())
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |c: &Character| c.created_at))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Character>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |c: &Character| c.created_at))
    }

    async fn list_by_encounter(&self, encounter: EncounterId) -> Result<Vec<Character>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|c| c.encounter == Some(encounter))
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |c: &Character| c.created_at))
    }

    async fn update(&self, character: &Character) -> Result<()> {
        self.records
            .write()
            .await
            .insert(character.id, character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn clear_encounter(&self, encounter: EncounterId) -> Result<u64> {
        let mut records = self.records.write().await;
        let mut cleared = 0;
        for character in records.values_mut() {
            if character.encounter == Some(encounter) {
                character.encounter = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

// =============================================================================
// Monsters
// =============================================================================

#[derive(Default)]
pub struct InMemoryMonsterRepository {
    records: RwLock<HashMap<MonsterId, Monster>>,
}

impl InMemoryMonsterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MonsterRepositoryPort for InMemoryMonsterRepository {
    async fn create(&self, monster: &Monster) -> Result<()> {
        self.records
            .write()
            .await
            .insert(monster.id, monster.clone());
        Ok(())
    }

    async fn get(&self, id: MonsterId) -> Result<Option<Monster>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_templates(&self) -> Result<Vec<Monster>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|m| m.encounter.is_none())
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |m: &Monster| m.created_at))
    }

    async fn list_by_encounter(&self, encounter: EncounterId) -> Result<Vec<Monster>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|m| m.encounter == Some(encounter))
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |m: &Monster| m.created_at))
    }

    async fn delete(&self, id: MonsterId) -> Result<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn delete_by_encounter(&self, encounter: EncounterId) -> Result<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, m| m.encounter != Some(encounter));
        Ok((before - records.len()) as u64)
    }
}

// =============================================================================
// Event log
// =============================================================================

#[derive(Default)]
pub struct InMemoryEventRepository {
    records: RwLock<HashMap<EventId, EncounterEvent>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepositoryPort for InMemoryEventRepository {
    async fn append(&self, event: &EncounterEvent) -> Result<()> {
        self.records.write().await.insert(event.id, event.clone());
        Ok(())
    }

    async fn get(&self, id: EventId) -> Result<Option<EncounterEvent>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_by_encounter(&self, encounter: EncounterId) -> Result<Vec<EncounterEvent>> {
        let records = self
            .records
            .read()
            .await
            .values()
            .filter(|e| e.encounter == encounter)
            .cloned()
            .collect();
        Ok(sorted_by_creation(records, |e: &EncounterEvent| {
            e.created_at
        }))
    }

    async fn update(&self, event: &EncounterEvent) -> Result<()> {
        self.records.write().await.insert(event.id, event.clone());
        Ok(())
    }

    async fn delete_by_encounter(&self, encounter: EncounterId) -> Result<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, e| e.encounter != encounter);
        Ok((before - records.len()) as u64)
    }
}

// =============================================================================
// Scenario tests: real services over the real store
// =============================================================================
