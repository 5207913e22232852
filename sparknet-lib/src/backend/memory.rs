//! In-process backend on DashMap
//!
//! Used by tests and by offline mode. Documents are kept per collection,
//! sessions per secret, files per bucket.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use dashmap::DashMap;
use url::Url;

use super::Account;
use super::AuthService;
use super::DocumentStore;
use super::FileStore;
use super::Query;
use super::Session;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::Record;

/// How long in-memory sessions live.
const SESSION_TTL_DAYS: i64 = 365;

/// In-memory document store.
///
/// # Example
///
/// ```
/// use sparknet_lib::backend::memory::MemoryDocumentStore;
///
/// let store = MemoryDocumentStore::new();
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, DashMap<String, Record>>,
    sequence: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with documents.
    ///
    /// Records without an ID get one. Records without a creation time are
    /// stamped in order, so later records count as newer.
    pub fn with_records(collection: &str, records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        store.insert_all(collection, records);
        store
    }

    /// Inserts documents directly, keeping any IDs and timestamps they carry.
    pub fn insert_all(&self, collection: &str, records: impl IntoIterator<Item = Record>) {
        let docs = self.collections.entry(collection.to_string()).or_default();
        for record in records {
            let record = self.stamp(collection, record);
            if let Some(id) = record.id() {
                docs.insert(id.to_string(), record);
            }
        }
    }

    /// Returns the number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |docs| docs.len())
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Fills in ID, collection and timestamps that the record lacks.
    fn stamp(&self, collection: &str, mut record: Record) -> Record {
        if record.id().is_none() {
            record.set_id(uuid::Uuid::new_v4().simple().to_string());
        }
        record.set_collection(collection);
        if record.created_at().is_none() {
            // Strictly increasing, so creation order survives equal clock reads.
            let seq = self.sequence.fetch_add(1, Ordering::Relaxed) as i64;
            let at = Utc::now() + Duration::microseconds(seq);
            record.set_created_at(at);
        }
        if record.updated_at().is_none()
            && let Some(at) = record.created_at()
        {
            record.set_updated_at(at);
        }
        record
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Record>, Error> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut records: Vec<Record> = docs
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|record| {
                query.filters().iter().all(|(field, expected)| {
                    record
                        .get(field)
                        .is_some_and(|actual| actual.matches_equal(expected))
                })
            })
            .collect();

        if query.is_newest_first() {
            records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        } else {
            records.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        }
        if let Some(limit) = query.max_results() {
            records.truncate(limit as usize);
        }

        log::debug!("Listed {} documents from {collection}", records.len());
        Ok(records)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Record, Error> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.get(id).map(|entry| entry.value().clone()))
            .ok_or_else(|| Error::not_found(collection, id))
    }

    async fn create(&self, collection: &str, record: &Record) -> Result<Record, Error> {
        let mut record = record.clone();
        record.created_at = None;
        record.updated_at = None;
        let record = self.stamp(collection, record);

        let docs = self.collections.entry(collection.to_string()).or_default();
        let id = record.id().unwrap_or_default().to_string();
        if docs.contains_key(&id) {
            return Err(Error::InvalidOperation(format!(
                "document '{id}' already exists in '{collection}'"
            )));
        }
        docs.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, collection: &str, id: &str, record: &Record) -> Result<Record, Error> {
        let docs = self
            .collections
            .get(collection)
            .ok_or_else(|| Error::not_found(collection, id))?;
        let mut existing = docs
            .get_mut(id)
            .ok_or_else(|| Error::not_found(collection, id))?;

        existing.merge(record);
        existing.set_updated_at(Utc::now());
        Ok(existing.value().clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| Error::not_found(collection, id))
    }
}

struct Credentials {
    password: String,
    account: Account,
}

/// In-memory accounts and sessions.
#[derive(Default)]
pub struct MemoryAuth {
    accounts: DashMap<String, Credentials>,
    sessions: DashMap<String, Session>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account and returns it.
    pub fn register(&self, email: &str, password: &str, name: &str) -> Account {
        let account = Account {
            id: uuid::Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            name: name.to_string(),
        };
        self.accounts.insert(
            email.to_ascii_lowercase(),
            Credentials {
                password: password.to_string(),
                account: account.clone(),
            },
        );
        account
    }

    /// Returns the number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl AuthService for MemoryAuth {
    async fn create_session(&self, email: &str, password: &str) -> Result<Session, Error> {
        let account_id = self
            .accounts
            .get(&email.to_ascii_lowercase())
            .filter(|creds| creds.password == password)
            .map(|creds| creds.account.id.clone())
            .ok_or(AuthError::InvalidCredentials)?;

        let secret = uuid::Uuid::new_v4().simple().to_string();
        let session = Session {
            id: uuid::Uuid::new_v4().simple().to_string(),
            account_id,
            secret: Some(secret.clone()),
            expires_at: Some(Utc::now() + Duration::days(SESSION_TTL_DAYS)),
        };
        self.sessions.insert(secret, session.clone());
        Ok(session)
    }

    async fn current_account(&self, session: &Session) -> Result<Account, Error> {
        let secret = session.secret.as_deref().ok_or(AuthError::NoSession)?;
        let stored = self
            .sessions
            .get(secret)
            .map(|s| s.value().clone())
            .ok_or_else(|| AuthError::SessionExpired {
                session_id: session.id.clone(),
            })?;
        if stored.is_expired() {
            return Err(AuthError::SessionExpired {
                session_id: stored.id,
            }
            .into());
        }

        self.accounts
            .iter()
            .find(|entry| entry.account.id == stored.account_id)
            .map(|entry| entry.account.clone())
            .ok_or_else(|| AuthError::SessionExpired { session_id: stored.id }.into())
    }

    async fn delete_session(&self, session: &Session) -> Result<(), Error> {
        let secret = session.secret.as_deref().ok_or(AuthError::NoSession)?;
        self.sessions.remove(secret);
        Ok(())
    }
}

/// In-memory file buckets.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: DashMap<(String, String), StoredFile>,
}

/// A file held by [`MemoryFileStore`].
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a stored file.
    pub fn file(&self, bucket: &str, file_id: &str) -> Option<StoredFile> {
        self.files
            .get(&(bucket.to_string(), file_id.to_string()))
            .map(|f| f.value().clone())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn upload(&self, bucket: &str, file_name: &str, bytes: Vec<u8>) -> Result<String, Error> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.files.insert(
            (bucket.to_string(), id.clone()),
            StoredFile {
                name: file_name.to_string(),
                bytes,
            },
        );
        Ok(id)
    }

    fn preview_url(&self, bucket: &str, file_id: &str, width: u32, height: u32) -> Result<Url, Error> {
        let mut url = Url::parse("memory://files/")?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidOperation("memory URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend([bucket, file_id, "preview"]);
        url.query_pairs_mut()
            .append_pair("width", &width.to_string())
            .append_pair("height", &height.to_string());
        Ok(url)
    }

    async fn delete(&self, bucket: &str, file_id: &str) -> Result<(), Error> {
        self.files
            .remove(&(bucket.to_string(), file_id.to_string()))
            .map(|_| ())
            .ok_or_else(|| Error::not_found(bucket, file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_url() {
        let files = MemoryFileStore::new();
        let url = files.preview_url("avatars", "f1", 64, 32).unwrap();
        assert_eq!(url.as_str(), "memory://files/avatars/f1/preview?width=64&height=32");
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let auth = MemoryAuth::new();
        auth.register("kevin@example.com", "hunter2", "Kevin Ivan");

        let err = auth.create_session("kevin@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    }
}
