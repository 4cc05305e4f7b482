use crate::models::Note;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /note` and `PUT /note/:id`.
///
/// `content` is optional at the serde level so a missing field reaches
/// validation and is reported as a 400 like an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content must not be empty")
    )]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteResponse {
    pub id: String,
    pub content: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_hex(),
            content: note.content,
        }
    }
}

/// Confirmation returned by create and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteMessageResponse {
    pub message: String,
    pub note: NoteResponse,
}
