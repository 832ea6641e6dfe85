//! Client for cluster-wide resources.

use serde_json::Value;

use super::ResourceList;
use super::client::{ResourceClient, into_object};
use crate::error::Error;
use crate::types::{Resource, ResourceType};

/// CRUD for one cluster-wide resource kind (namespaces, users, secrets
/// providers).
///
/// Paths are `<collection>/<name>`.
///
/// ## Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let ns = client.namespaces().create(json!({}), json!({"name": "dev"})).await?;
/// assert!(client.namespaces().find("dev").await?.is_some());
/// client.namespaces().delete("dev").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ClusterClient {
    client: ResourceClient,
}

impl ClusterClient {
    pub(crate) fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Returns the resource kind this client manages.
    pub fn kind(&self) -> &'static ResourceType {
        self.client.kind()
    }

    fn path(&self, name: &str) -> String {
        self.kind().instance_path(None, name)
    }

    /// Fetches a resource by name.
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
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument) if
    ///   the resource fails validation
    /// - [`ErrorKind::AlreadyExists`](crate::ErrorKind::AlreadyExists) if a
    ///   resource with that name exists; nothing is written
    pub async fn create(&self, spec: Value, metadata: Value) -> Result<Resource, Error> {
        self.create_inner(spec, metadata, None).await
    }

    /// Creates a resource with an explicit type, for kinds without a fixed
    /// one (e.g. `VaultProvider` secrets providers).
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
        let metadata = into_object(metadata, "metadata")?;
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

    /// Lists every resource of this kind.
    pub fn list(&self) -> ResourceList {
        self.client.list(self.kind().collection_path(None))
    }
}
