//! REST implementation of the backend traits
//!
//! Paths and headers follow the hosted backend's HTTP API:
//!
//! - documents under `/databases/{db}/collections/{collection}/documents`
//! - sessions under `/account`
//! - files under `/storage/buckets/{bucket}/files`

use async_trait::async_trait;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::Account;
use super::AuthService;
use super::DocumentStore;
use super::FileStore;
use super::Query;
use super::Session;
use crate::SparkNetClient;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::Record;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const SESSION_HEADER: &str = "X-Appwrite-Session";

/// Placeholder ID that asks the backend to generate one.
const UNIQUE_ID: &str = "unique()";

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: u64,
    documents: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    #[serde(rename = "$id")]
    id: String,
}

impl SparkNetClient {
    /// Builds a URL under the endpoint from path segments.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.inner.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidOperation("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn default_headers(&self, session: Option<&str>) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(PROJECT_HEADER, header_value(&self.inner.project)?);
        if let Some(key) = &self.inner.api_key {
            headers.insert(KEY_HEADER, header_value(key)?);
        }
        if let Some(secret) = session.or(self.session.as_deref()) {
            headers.insert(SESSION_HEADER, header_value(secret)?);
        }
        Ok(headers)
    }

    fn request(&self, method: Method, url: Url, session: Option<&str>) -> Result<RequestBuilder, Error> {
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(self.default_headers(session)?);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    /// Sends a request, turning non-success responses into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send().await.map_err(|e| self.network_error(e))?;
        let status = response.status();
        log::debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await.into())
        }
    }

    fn network_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidOperation(format!("'{value}' is not a valid header value")))
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message,
            kind: Some(kind),
        }) => ApiError::http_with_kind(status, message, kind),
        Ok(ErrorBody { message, kind: None }) => ApiError::http(status, message),
        Err(_) => ApiError::http(status, body),
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, Error> {
    let body = response.text().await.map_err(ApiError::from)?;
    serde_json::from_str(&body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
}

// =============================================================================
// Documents
// =============================================================================

/// Document store over one database of a [`SparkNetClient`].
#[derive(Clone)]
pub struct Documents {
    client: SparkNetClient,
    database: String,
}

impl Documents {
    pub(crate) fn new(client: SparkNetClient, database: String) -> Self {
        Self { client, database }
    }

    /// Returns the database ID.
    pub fn database(&self) -> &str {
        &self.database
    }

    fn documents_url(&self, collection: &str, id: Option<&str>) -> Result<Url, Error> {
        let mut segments = vec![
            "databases",
            self.database.as_str(),
            "collections",
            collection,
            "documents",
        ];
        segments.extend(id);
        self.client.url(&segments)
    }
}

#[async_trait]
impl DocumentStore for Documents {
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Record>, Error> {
        let mut url = self.documents_url(collection, None)?;
        {
            let mut pairs = url.query_pairs_mut();
            for param in query.to_params() {
                pairs.append_pair("queries[]", &param);
            }
        }

        let request = self.client.request(Method::GET, url, None)?;
        let list: DocumentList = parse_json(self.client.send(request).await?).await?;
        log::debug!(
            "Listed {} of {} documents from {collection}",
            list.documents.len(),
            list.total
        );
        Ok(list.documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Record, Error> {
        let url = self.documents_url(collection, Some(id))?;
        let request = self.client.request(Method::GET, url, None)?;
        match self.client.send(request).await {
            Ok(response) => parse_json(response).await,
            Err(e) if e.is_not_found() => Err(Error::not_found(collection, id)),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, collection: &str, record: &Record) -> Result<Record, Error> {
        let url = self.documents_url(collection, None)?;
        let body = json!({
            "documentId": record.id().unwrap_or(UNIQUE_ID),
            "data": record,
        });
        let request = self.client.request(Method::POST, url, None)?.json(&body);
        parse_json(self.client.send(request).await?).await
    }

    async fn update(&self, collection: &str, id: &str, record: &Record) -> Result<Record, Error> {
        let url = self.documents_url(collection, Some(id))?;
        let body = json!({ "data": record });
        let request = self.client.request(Method::PATCH, url, None)?.json(&body);
        match self.client.send(request).await {
            Ok(response) => parse_json(response).await,
            Err(e) if e.is_not_found() => Err(Error::not_found(collection, id)),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        let url = self.documents_url(collection, Some(id))?;
        let request = self.client.request(Method::DELETE, url, None)?;
        match self.client.send(request).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(Error::not_found(collection, id)),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Account sessions
// =============================================================================

#[async_trait]
impl AuthService for SparkNetClient {
    async fn create_session(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.url(&["account", "sessions", "email"])?;
        let body = json!({ "email": email, "password": password });
        let request = self.request(Method::POST, url, None)?.json(&body);

        match self.send(request).await {
            Ok(response) => parse_json(response).await,
            Err(Error::Api(api)) if api.status_code() == Some(StatusCode::UNAUTHORIZED.as_u16()) => {
                Err(AuthError::InvalidCredentials.into())
            }
            Err(e) => Err(e),
        }
    }

    async fn current_account(&self, session: &Session) -> Result<Account, Error> {
        let secret = session.secret.as_deref().ok_or(AuthError::NoSession)?;
        let url = self.url(&["account"])?;
        let request = self.request(Method::GET, url, Some(secret))?;

        match self.send(request).await {
            Ok(response) => parse_json(response).await,
            Err(Error::Api(api)) if api.status_code() == Some(StatusCode::UNAUTHORIZED.as_u16()) => {
                Err(AuthError::SessionExpired {
                    session_id: session.id.clone(),
                }
                .into())
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_session(&self, session: &Session) -> Result<(), Error> {
        let secret = session.secret.as_deref().ok_or(AuthError::NoSession)?;
        let url = self.url(&["account", "sessions", "current"])?;
        let request = self.request(Method::DELETE, url, Some(secret))?;
        self.send(request).await?;
        Ok(())
    }
}

// =============================================================================
// Files
// =============================================================================

#[async_trait]
impl FileStore for SparkNetClient {
    async fn upload(&self, bucket: &str, file_name: &str, bytes: Vec<u8>) -> Result<String, Error> {
        let url = self.url(&["storage", "buckets", bucket, "files"])?;
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .text("fileId", UNIQUE_ID)
            .part("file", part);

        let request = self.request(Method::POST, url, None)?.multipart(form);
        let file: UploadedFile = parse_json(self.send(request).await?).await?;
        log::info!("Uploaded {file_name} to {bucket} as {}", file.id);
        Ok(file.id)
    }

    fn preview_url(&self, bucket: &str, file_id: &str, width: u32, height: u32) -> Result<Url, Error> {
        let mut url = self.url(&["storage", "buckets", bucket, "files", file_id, "preview"])?;
        url.query_pairs_mut()
            .append_pair("width", &width.to_string())
            .append_pair("height", &height.to_string())
            .append_pair("project", &self.inner.project);
        Ok(url)
    }

    async fn delete(&self, bucket: &str, file_id: &str) -> Result<(), Error> {
        let url = self.url(&["storage", "buckets", bucket, "files", file_id])?;
        let request = self.request(Method::DELETE, url, None)?;
        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(Error::not_found(bucket, file_id)),
            Err(e) => Err(e),
        }
    }
}
