use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A persisted note, stored as `{ _id, content }` in the `notes` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub content: String,
}

impl Note {
    pub fn new(content: String) -> Self {
        Self {
            id: ObjectId::new(),
            content,
        }
    }
}
