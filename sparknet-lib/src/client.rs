//! Main SparkNetClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::backend::Session;
use crate::backend::rest::Documents;
use crate::error::ApiError;
use crate::error::Error;

/// REST client for the hosted SparkNet backend.
///
/// Cheap to clone (uses `Arc` internally). Implements
/// [`AuthService`](crate::backend::AuthService) and
/// [`FileStore`](crate::backend::FileStore) directly; documents are reached
/// through [`SparkNetClient::documents`], which pins a database.
///
/// # Example
///
/// ```ignore
/// use sparknet_lib::SparkNetClient;
///
/// let client = SparkNetClient::builder()
///     .endpoint("https://cloud.example.com/v1")
///     .project("sparknet")
///     .api_key(std::env::var("SPARKNET_API_KEY")?)
///     .build()?;
///
/// let members = client.documents("sparknet");
/// ```
#[derive(Clone)]
pub struct SparkNetClient {
    pub(crate) inner: Arc<SparkNetClientInner>,
    pub(crate) session: Option<String>,
}

pub(crate) struct SparkNetClientInner {
    pub(crate) endpoint: Url,
    pub(crate) project: String,
    pub(crate) api_key: Option<String>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl SparkNetClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SparkNetClientBuilder<Missing, Missing> {
        SparkNetClientBuilder::new()
    }

    /// Returns a client that acts on behalf of `session`.
    ///
    /// The session secret is sent with every request made through the
    /// returned client.
    pub fn with_session(&self, session: &Session) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            session: session.secret.clone(),
        }
    }

    /// Returns a document store over one database.
    pub fn documents(&self, database: impl Into<String>) -> Documents {
        Documents::new(self.clone(), database.into())
    }

    /// Returns the API endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Returns the project ID.
    pub fn project(&self) -> &str {
        &self.inner.project
    }

    /// Returns `true` if requests carry a session secret.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SparkNetClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `endpoint` - The API endpoint, e.g. `https://cloud.example.com/v1`
/// - `project` - The project ID
pub struct SparkNetClientBuilder<Endpoint, Project> {
    endpoint: Endpoint,
    project: Project,
    api_key: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl SparkNetClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: Missing,
            project: Missing,
            api_key: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for SparkNetClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SparkNetClientBuilder<Missing, P> {
    /// Sets the API endpoint.
    pub fn endpoint(self, endpoint: impl Into<String>) -> SparkNetClientBuilder<Set<String>, P> {
        SparkNetClientBuilder {
            endpoint: Set(endpoint.into()),
            project: self.project,
            api_key: self.api_key,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<E> SparkNetClientBuilder<E, Missing> {
    /// Sets the project ID.
    pub fn project(self, project: impl Into<String>) -> SparkNetClientBuilder<E, Set<String>> {
        SparkNetClientBuilder {
            endpoint: self.endpoint,
            project: Set(project.into()),
            api_key: self.api_key,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<E, P> SparkNetClientBuilder<E, P> {
    /// Sets the server API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl SparkNetClientBuilder<Set<String>, Set<String>> {
    /// Builds the [`SparkNetClient`].
    ///
    /// Fails if the endpoint is not a valid base URL or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<SparkNetClient, Error> {
        let endpoint = Url::parse(&self.endpoint.0)?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::InvalidOperation(format!(
                "endpoint '{endpoint}' cannot be used as a base URL"
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(SparkNetClient {
            inner: Arc::new(SparkNetClientInner {
                endpoint,
                project: self.project.0,
                api_key: self.api_key,
                http_client,
                timeout: self.timeout,
            }),
            session: None,
        })
    }
}
