//! Client for namespaced resources.

use serde_json::Value;

use super::ResourceList;
use super::client::{ResourceClient, into_object};
use crate::error::Error;
use crate::types::{Resource, ResourceType};

/// CRUD for one namespaced resource kind.
///
/// Paths are resolved against the client's namespace, which starts out as
/// the root client's default namespace. Use [`namespace`](Self::namespace) to
/// address another one.
///
/// ## Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// // Default namespace
/// let check = client
///     .checks()
///     .create(
///         json!({"command": "check-cpu.sh", "interval": 60, "subscriptions": ["linux"]}),
///         json!({"name": "check-cpu"}),
///     )
///     .await?;
///
/// // Explicit namespace
/// let prod = client.checks().namespace("prod");
/// let check = prod.get("check-cpu").await?;
/// ```
#[derive(Debug, Clone)]
pub struct NamespacedClient {
    client: ResourceClient,
    namespace: String,
}

impl NamespacedClient {
    pub(crate) fn new(client: ResourceClient, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// Returns a client for the same kind in another namespace.
    #[must_use]
    pub fn namespace(&self, namespace: impl Into<String>) -> Self {
        Self::new(self.client.clone(), namespace)
    }

    /// Returns the namespace paths are resolved against.
    pub fn current_namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the resource kind this client manages.
    pub fn kind(&self) -> &'static ResourceType {
        self.client.kind()
    }

    fn path(&self, name: &str) -> String {
        self.kind().instance_path(Some(&self.namespace), name)
    }

    /// Fetches a resource by name.
    ///
    /// Event names have the form `<entity>/<check>`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedStatus`](crate::ErrorKind::UnexpectedStatus)
    /// unless the backend answers `200`, including for missing resources.
    pub async fn get(&self, name: &str) -> Result<Resource, Error> {
        self.client.get(&self.path(name)).await
    }

    /// Fetches a resource by name; `None` if it does not exist.
    pub async fn find(&self, name: &str) -> Result<Option<Resource>, Error> {
        self.client.find(&self.path(name)).await
    }

    /// Creates a resource.
    ///
    /// When `metadata` has no `namespace`, this client's namespace is used.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument) if
    ///   the resource fails validation
    /// - [`ErrorKind::AlreadyExists`](crate::ErrorKind::AlreadyExists) if the
    ///   resource exists; nothing is written
    pub async fn create(&self, spec: Value, metadata: Value) -> Result<Resource, Error> {
        self.create_inner(spec, metadata, None).await
    }

    /// Creates a resource with an explicit type.
    pub async fn create_with_type(
        &self,
        spec: Value,
        metadata: Value,
        type_name: impl Into<String>,
    ) -> Result<Resource, Error> {
        self.create_inner(spec, metadata, Some(type_name.into())).await
    }

    async fn create_inner(
        &self,
        spec: Value,
        metadata: Value,
        type_name: Option<String>,
    ) -> Result<Resource, Error> {
        let mut metadata = into_object(metadata, "metadata")?;
        metadata
            .entry("namespace")
            .or_insert_with(|| Value::String(self.namespace.clone()));
        self.client.create(spec, metadata, type_name).await
    }

    /// Deletes a resource by name.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedStatus`](crate::ErrorKind::UnexpectedStatus)
    /// unless the backend answers `204`.
    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.client.delete(&self.path(name)).await
    }

    /// Lists the resources of this kind in this client's namespace.
    pub fn list(&self) -> ResourceList {
        self.client
            .list(self.kind().collection_path(Some(&self.namespace)))
    }
}
