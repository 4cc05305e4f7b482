use crate::dtos::{NoteMessageResponse, NoteRequest, NoteResponse};
use crate::services::{record_operation, StoreError};
use crate::startup::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn hello() -> &'static str {
    "Hello world"
}

pub async fn list_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let notes = observe("list", state.store.list_notes().await)?;
    tracing::debug!(count = notes.len(), "Listed notes");

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

pub async fn get_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<NoteResponse>, AppError> {
    let id = note_id(id)?;
    let note = observe("get", state.store.get_note(&id).await)?;

    Ok(Json(NoteResponse::from(note)))
}

pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<NoteMessageResponse>, AppError> {
    let content = required_content(payload)?;

    let note = observe("create", state.store.create_note(content).await)?;
    tracing::info!(note_id = %note.id, "Note created");

    Ok(Json(NoteMessageResponse {
        message: "Note created".to_string(),
        note: NoteResponse::from(note),
    }))
}

pub async fn update_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<NoteResponse>, AppError> {
    let id = note_id(id)?;
    let content = required_content(payload)?;

    let note = observe("update", state.store.update_note(&id, content).await)?;
    tracing::info!(note_id = %note.id, "Note updated");

    Ok(Json(NoteResponse::from(note)))
}

pub async fn delete_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<NoteMessageResponse>, AppError> {
    let id = note_id(id)?;
    let note = observe("delete", state.store.delete_note(&id).await)?;
    tracing::info!(note_id = %note.id, "Note deleted");

    Ok(Json(NoteMessageResponse {
        message: "Note deleted".to_string(),
        note: NoteResponse::from(note),
    }))
}

/// Unwraps a note body, rejecting anything without non-empty `content`
/// before the store is touched.
fn required_content(payload: Result<Json<NoteRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected malformed note body");
        AppError::BadRequest(anyhow::anyhow!(
            "Malformed request body: {}",
            rejection.body_text()
        ))
    })?;

    request.validate()?;

    request
        .content
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("content is required")))
}

fn note_id(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    let Path(id) = path.map_err(|rejection| {
        AppError::BadRequest(anyhow::anyhow!("Invalid note id: {}", rejection.body_text()))
    })?;
    Ok(id)
}

fn observe<T>(operation: &'static str, result: Result<T, StoreError>) -> Result<T, AppError> {
    record_operation(operation, result.is_ok());
    // Persistence failures are logged once, when the AppError is rendered.
    result.map_err(|e| {
        if !matches!(e, StoreError::Persistence(_)) {
            tracing::debug!(operation, error = %e, "Note lookup failed");
        }
        AppError::from(e)
    })
}
