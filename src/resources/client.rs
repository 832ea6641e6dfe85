//! CRUD operations shared by cluster and namespaced clients.

use std::sync::Arc;

use serde_json::Value;

use super::ResourceList;
use crate::client::ClientInner;
use crate::error::{Error, ErrorKind};
use crate::types::{JsonObject, Resource, ResourceType};

/// Generic CRUD against one resource kind, addressed by path.
///
/// [`ClusterClient`](super::ClusterClient) and
/// [`NamespacedClient`](super::NamespacedClient) compute the paths and
/// delegate here.
#[derive(Clone)]
pub(crate) struct ResourceClient {
    inner: Arc<ClientInner>,
    kind: &'static ResourceType,
}

impl ResourceClient {
    pub(crate) fn new(inner: Arc<ClientInner>, kind: &'static ResourceType) -> Self {
        Self { inner, kind }
    }

    pub(crate) fn kind(&self) -> &'static ResourceType {
        self.kind
    }

    /// `GET <path>`, which must answer `200`.
    pub(crate) async fn get(&self, path: &str) -> Result<Resource, Error> {
        let response = self.inner.get(path, &[]).await?;
        response.expect_status(&[200], "Expected 200 when fetching resource")?;
        Resource::from_api(self.kind, Arc::downgrade(&self.inner), response.json()?)
    }

    /// Like [`get`](Self::get), but a `404` yields `None`.
    pub(crate) async fn find(&self, path: &str) -> Result<Option<Resource>, Error> {
        match self.get(path).await {
            Ok(resource) => Ok(Some(resource)),
            Err(e) if e.kind() == ErrorKind::UnexpectedStatus && e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `DELETE <path>`, which must answer `204`.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        tracing::debug!(path, "Deleting resource");
        let response = self.inner.delete(path).await?;
        response.expect_status(&[204], "Expected 204 when deleting resource")
    }

    /// Builds a resource, refuses to overwrite an existing one and saves it.
    ///
    /// Creation goes through `PUT`, not `POST`; not every kind supports the
    /// latter.
    pub(crate) async fn create(
        &self,
        spec: Value,
        metadata: JsonObject,
        type_name: Option<String>,
    ) -> Result<Resource, Error> {
        let spec = into_object(spec, "spec")?;
        let mut resource = Resource::new(
            self.kind,
            Arc::downgrade(&self.inner),
            spec,
            metadata,
            type_name,
        )?;
        let path = resource.path()?;

        if self.find(&path).await?.is_some() {
            return Err(Error::already_exists(format!(
                "Resource at {} already exists.",
                path
            )));
        }

        tracing::debug!(path = %path, "Creating resource");
        resource.save().await?;
        Ok(resource)
    }

    pub(crate) fn list(&self, path: String) -> ResourceList {
        ResourceList::new(self.inner.clone(), self.kind, path)
    }
}

/// Unwraps a JSON object argument; `null` counts as empty.
pub(crate) fn into_object(value: Value, what: &str) -> Result<JsonObject, Error> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Null => Ok(JsonObject::new()),
        _ => Err(Error::invalid_argument(format!(
            "Resource {} must be a JSON object.",
            what
        ))),
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &self.kind.type_name)
            .finish_non_exhaustive()
    }
}
