//! Console configuration

use std::collections::HashMap;

use crate::model::Collection;

/// Where the console's data lives on the backend.
///
/// Collection IDs default to [`Collection::default_id`] and can be
/// overridden one by one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Database holding every collection.
    pub database: String,
    /// Bucket member avatars are uploaded to.
    pub avatar_bucket: String,
    collections: HashMap<Collection, String>,
}

impl ConsoleConfig {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            avatar_bucket: "avatars".to_string(),
            collections: HashMap::new(),
        }
    }

    /// Overrides the ID of one collection.
    pub fn with_collection(mut self, collection: Collection, id: impl Into<String>) -> Self {
        self.collections.insert(collection, id.into());
        self
    }

    pub fn with_avatar_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.avatar_bucket = bucket.into();
        self
    }

    /// Returns the collection ID to use on the backend.
    pub fn collection_id(&self, collection: Collection) -> &str {
        self.collections
            .get(&collection)
            .map(String::as_str)
            .unwrap_or_else(|| collection.default_id())
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new("sparknet")
    }
}
