use crate::models::Note;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Note {0} not found")]
    NotFound(String),

    #[error("Invalid note id: {0}")]
    InvalidId(String),

    #[error("Persistence error: {0}")]
    Persistence(anyhow::Error),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Persistence(anyhow::Error::new(err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) | StoreError::InvalidId(_) => {
                AppError::NotFound(anyhow::anyhow!(err.to_string()))
            }
            StoreError::Persistence(source) => AppError::DatabaseError(source),
        }
    }
}

/// Persistence seam for notes.
///
/// Ids are the store's own textual form; implementations reject malformed ids
/// with [`StoreError::InvalidId`] before touching storage.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, content: String) -> Result<Note, StoreError>;
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;
    async fn get_note(&self, id: &str) -> Result<Note, StoreError>;
    async fn update_note(&self, id: &str, content: String) -> Result<Note, StoreError>;
    /// Returns the removed note.
    async fn delete_note(&self, id: &str) -> Result<Note, StoreError>;
    async fn health_check(&self) -> Result<(), StoreError>;
}
