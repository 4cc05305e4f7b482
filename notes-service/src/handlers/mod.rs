pub mod health;
pub mod notes;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use notes::{create_note, delete_note, get_note, hello, list_notes, update_note};
