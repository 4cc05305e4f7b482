pub mod notes;

pub use notes::{NoteMessageResponse, NoteRequest, NoteResponse};
