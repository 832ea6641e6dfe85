//! Client types for connecting to a Sensu Go backend.
//!
//! The SDK uses a hierarchical client structure:
//! - [`Client`]: Top-level client, owns the transport and authentication
//! - [`NamespacedClient`] / [`ClusterClient`]: CRUD for one resource kind
//! - [`Resource`](crate::Resource): one resource instance, bound to its client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sensu_go::prelude::*;
//! use serde_json::json;
//!
//! let client = Client::builder()
//!     .url("https://sensu.example.com:8080")
//!     .credentials(UserPassCredentialsConfig::new("admin", "P@ssw0rd!"))
//!     .build()?;
//!
//! let mut check = client.checks().get("check-cpu").await?;
//! check.spec_mut().insert("interval".into(), json!(30));
//! check.save().await?;
//! ```

mod builder;
mod inner;

pub use builder::{
    ClientBuilder, DEFAULT_NAMESPACE, DEFAULT_TIMEOUT, HasCredentials, HasUrl, NoCredentials, NoUrl,
};
pub(crate) use inner::ClientInner;

use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::resources::client::ResourceClient;
use crate::resources::{ClusterClient, NamespacedClient};
use crate::transport::Response;
use crate::types::{ResourceType, builtin};

/// The Sensu Go client.
///
/// This is the main entry point for the SDK. Create a client using
/// [`Client::builder()`], then pick a resource client per kind.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share the transport and the
/// cached login.
///
/// ## Example
///
/// ```rust,ignore
/// use sensu_go::Client;
///
/// let client = Client::builder()
///     .url("https://sensu.example.com:8080")
///     .credentials(config)
///     .build()?;
///
/// // Clone for use across tasks
/// let client2 = client.clone();
/// tokio::spawn(async move {
///     let entities = client2.entities().list().await;
///     // ...
/// });
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// The builder uses the typestate pattern to ensure required
    /// configuration is provided at compile time.
    pub fn builder() -> ClientBuilder<NoUrl, NoCredentials> {
        ClientBuilder::new()
    }

    /// Returns the backend address, without trailing slashes.
    pub fn address(&self) -> &str {
        &self.inner.address
    }

    /// Returns the namespace namespaced clients start out in.
    pub fn default_namespace(&self) -> &str {
        &self.inner.default_namespace
    }

    /// Returns the request timeout configured on the builder.
    ///
    /// Only the built-in transport applies it; a custom transport brings its
    /// own.
    pub fn timeout(&self) -> std::time::Duration {
        self.inner.timeout
    }

    /// Returns a client for a namespaced kind, in the default namespace.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sensu_go::builtin;
    ///
    /// let handlers = client.namespaced(&builtin::HANDLER);
    /// ```
    pub fn namespaced(&self, kind: &'static ResourceType) -> NamespacedClient {
        NamespacedClient::new(
            ResourceClient::new(self.inner.clone(), kind),
            self.inner.default_namespace.clone(),
        )
    }

    /// Returns a client for a cluster-wide kind.
    pub fn cluster(&self, kind: &'static ResourceType) -> ClusterClient {
        ClusterClient::new(ResourceClient::new(self.inner.clone(), kind))
    }

    /// Assets (`core/v2`).
    pub fn assets(&self) -> NamespacedClient {
        self.namespaced(&builtin::ASSET)
    }

    /// Check configurations (`core/v2`).
    pub fn checks(&self) -> NamespacedClient {
        self.namespaced(&builtin::CHECK)
    }

    /// Entities (`core/v2`).
    pub fn entities(&self) -> NamespacedClient {
        self.namespaced(&builtin::ENTITY)
    }

    /// Events (`core/v2`), named `<entity>/<check>`.
    pub fn events(&self) -> NamespacedClient {
        self.namespaced(&builtin::EVENT)
    }

    /// Event filters (`core/v2`).
    pub fn filters(&self) -> NamespacedClient {
        self.namespaced(&builtin::FILTER)
    }

    /// Handlers (`core/v2`).
    pub fn handlers(&self) -> NamespacedClient {
        self.namespaced(&builtin::HANDLER)
    }

    /// Hook configurations (`core/v2`).
    pub fn hooks(&self) -> NamespacedClient {
        self.namespaced(&builtin::HOOK)
    }

    /// Mutators (`core/v2`).
    pub fn mutators(&self) -> NamespacedClient {
        self.namespaced(&builtin::MUTATOR)
    }

    /// Secrets (`secrets/v1`).
    pub fn secrets(&self) -> NamespacedClient {
        self.namespaced(&builtin::SECRET)
    }

    /// Silencing entries (`core/v2`).
    pub fn silences(&self) -> NamespacedClient {
        self.namespaced(&builtin::SILENCE)
    }

    /// Namespaces.
    pub fn namespaces(&self) -> ClusterClient {
        self.cluster(&builtin::NAMESPACE)
    }

    /// Secrets providers (`secrets/v1`).
    pub fn secrets_providers(&self) -> ClusterClient {
        self.cluster(&builtin::SECRETS_PROVIDER)
    }

    /// Users. Users cannot be deleted.
    pub fn users(&self) -> ClusterClient {
        self.cluster(&builtin::USER)
    }

    /// Sends an authenticated `GET` and returns the reply as is.
    ///
    /// No status check is made.
    pub async fn get(&self, path: &str) -> Result<Response, Error> {
        self.inner.get(path, &[]).await
    }

    /// Sends an authenticated `POST` with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> Result<Response, Error> {
        self.inner.post(path, body).await
    }

    /// Sends an authenticated `PUT` with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> Result<Response, Error> {
        self.inner.put(path, body).await
    }

    /// Sends an authenticated `DELETE`.
    pub async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.inner.delete(path).await
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("address", &self.inner.address)
            .field("default_namespace", &self.inner.default_namespace)
            .finish_non_exhaustive()
    }
}
