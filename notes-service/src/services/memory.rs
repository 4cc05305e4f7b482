use super::store::{NoteStore, StoreError};
use crate::models::Note;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-local [`NoteStore`] used by tests and for running without MongoDB.
///
/// Uses the same id format as [`super::MongoNoteStore`]. Notes are listed in
/// id order, which for ObjectIds is creation order.
pub struct InMemoryNoteStore {
    notes: RwLock<BTreeMap<ObjectId, Note>>,
    unavailable: bool,
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(BTreeMap::new()),
            unavailable: false,
        }
    }

    /// A store whose every call fails with [`StoreError::Persistence`], standing
    /// in for an unreachable database.
    pub fn unavailable() -> Self {
        Self {
            notes: RwLock::new(BTreeMap::new()),
            unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.read().map(|notes| notes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Persistence(anyhow::anyhow!(
                "in-memory store marked unavailable"
            )));
        }
        Ok(())
    }

    fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
        ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Persistence(anyhow::anyhow!("In-memory store lock poisoned: {}", e))
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn create_note(&self, content: String) -> Result<Note, StoreError> {
        self.check_available()?;
        let note = Note::new(content);
        self.notes
            .write()
            .map_err(poisoned)?
            .insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.check_available()?;
        let notes = self.notes.read().map_err(poisoned)?;
        Ok(notes.values().cloned().collect())
    }

    async fn get_note(&self, id: &str) -> Result<Note, StoreError> {
        self.check_available()?;
        let oid = Self::parse_id(id)?;
        self.notes
            .read()
            .map_err(poisoned)?
            .get(&oid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_note(&self, id: &str, content: String) -> Result<Note, StoreError> {
        self.check_available()?;
        let oid = Self::parse_id(id)?;
        let mut notes = self.notes.write().map_err(poisoned)?;
        let note = notes
            .get_mut(&oid)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        note.content = content;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &str) -> Result<Note, StoreError> {
        self.check_available()?;
        let oid = Self::parse_id(id)?;
        self.notes
            .write()
            .map_err(poisoned)?
            .remove(&oid)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
