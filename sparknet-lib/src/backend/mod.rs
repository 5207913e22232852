//! Backend collaborators: documents, sessions and files
//!
//! The console only talks to the backend through these traits. The REST
//! client in [`rest`] implements them against the hosted service and
//! [`memory`] implements them in process.

pub mod memory;
mod query;
pub mod rest;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

pub use query::*;

use crate::error::Error;
use crate::model::Record;

/// Document database over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists the documents of a collection matching the query.
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Record>, Error>;

    /// Fetches one document.
    async fn get(&self, collection: &str, id: &str) -> Result<Record, Error>;

    /// Creates a document and returns it as stored.
    ///
    /// The store assigns the ID unless the record already has one.
    async fn create(&self, collection: &str, record: &Record) -> Result<Record, Error>;

    /// Applies the record's fields to an existing document.
    async fn update(&self, collection: &str, id: &str, record: &Record) -> Result<Record, Error>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error>;
}

/// Email/password account sessions.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn create_session(&self, email: &str, password: &str) -> Result<Session, Error>;

    /// Resolves the account a session belongs to.
    async fn current_account(&self, session: &Session) -> Result<Account, Error>;

    async fn delete_session(&self, session: &Session) -> Result<(), Error>;
}

/// File buckets.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Uploads a file and returns its ID.
    async fn upload(&self, bucket: &str, file_name: &str, bytes: Vec<u8>) -> Result<String, Error>;

    /// Builds the URL of a resized preview. Does not contact the backend.
    fn preview_url(&self, bucket: &str, file_id: &str, width: u32, height: u32) -> Result<Url, Error>;

    async fn delete(&self, bucket: &str, file_id: &str) -> Result<(), Error>;
}

/// An authenticated account session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub account_id: String,
    /// Secret sent with requests made on behalf of the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(rename = "expire", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Returns `true` if the session has expired.
    ///
    /// Returns `false` if the expiry is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }
}

/// The account behind a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}
