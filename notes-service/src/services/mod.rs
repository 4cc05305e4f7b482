pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::{MongoDb, MongoNoteStore};
pub use memory::InMemoryNoteStore;
pub use self::metrics::{get_metrics, init_metrics, record_operation};
pub use store::{NoteStore, StoreError};
