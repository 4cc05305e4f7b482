use super::store::{NoteStore, StoreError};
use crate::models::Note;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

pub const NOTES_COLLECTION: &str = "notes";
pub const FALLBACK_DATABASE: &str = "notes";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Builds the client from a connection string.
    ///
    /// The driver connects lazily, so this only fails on a malformed
    /// connection string; reachability is checked by [`MongoDb::health_check`].
    /// The database is `database` if given, else the one named in `uri`.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        options.app_name = Some("notes-service".to_string());

        let database = database
            .map(str::to_string)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| FALLBACK_DATABASE.to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&database);
        tracing::info!(database = %database, "MongoDB client created");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    pub fn notes(&self) -> Collection<Note> {
        self.db.collection(NOTES_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// [`NoteStore`] over the `notes` collection.
#[derive(Clone)]
pub struct MongoNoteStore {
    db: MongoDb,
}

impl MongoNoteStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl NoteStore for MongoNoteStore {
    async fn create_note(&self, content: String) -> Result<Note, StoreError> {
        let note = Note::new(content);
        self.db.notes().insert_one(&note, None).await?;
        Ok(note)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        let cursor = self.db.notes().find(None, None).await?;
        let notes: Vec<Note> = cursor.try_collect().await?;
        Ok(notes)
    }

    async fn get_note(&self, id: &str) -> Result<Note, StoreError> {
        let oid = parse_id(id)?;
        self.db
            .notes()
            .find_one(doc! { "_id": oid }, None)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_note(&self, id: &str, content: String) -> Result<Note, StoreError> {
        let oid = parse_id(id)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.db
            .notes()
            .find_one_and_update(
                doc! { "_id": oid },
                doc! { "$set": { "content": content } },
                options,
            )
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete_note(&self, id: &str) -> Result<Note, StoreError> {
        let oid = parse_id(id)?;
        self.db
            .notes()
            .find_one_and_delete(doc! { "_id": oid }, None)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.db.health_check().await.map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_rejected_before_querying() {
        assert!(matches!(parse_id("123"), Err(StoreError::InvalidId(_))));
        assert!(matches!(
            parse_id("zzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(parse_id("507f1f77bcf86cd799439011").is_ok());
    }

    #[tokio::test]
    async fn database_name_comes_from_uri() {
        let db = MongoDb::connect("mongodb://localhost:27017/week5", None)
            .await
            .unwrap();
        assert_eq!(db.database().name(), "week5");
    }

    #[tokio::test]
    async fn explicit_database_name_overrides_uri() {
        let db = MongoDb::connect("mongodb://localhost:27017/week5", Some("other"))
            .await
            .unwrap();
        assert_eq!(db.database().name(), "other");
    }

    #[tokio::test]
    async fn database_name_falls_back_when_uri_has_none() {
        let db = MongoDb::connect("mongodb://localhost:27017", None)
            .await
            .unwrap();
        assert_eq!(db.database().name(), FALLBACK_DATABASE);
    }

    #[tokio::test]
    async fn malformed_connection_string_is_a_config_error() {
        let result = MongoDb::connect("not-a-mongo-uri", None).await;
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
