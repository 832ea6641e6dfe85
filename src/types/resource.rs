//! Resource instances.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use super::resource_type::NativeParts;
use super::{JsonObject, Naming, ResourceType, builtin};
use crate::client::ClientInner;
use crate::error::{Error, ErrorKind};
use crate::resources::ResourceList;
use crate::selector::Selector;

/// A single backend resource.
///
/// Holds the resource's `spec`, `metadata` and type. Instances come either
/// from the backend (`get`, `find`, listings) or from `create`. They are
/// plain values owned by the caller; edits are local until
/// [`save`](Self::save) is called.
///
/// A resource keeps a non-owning reference to the client that produced it.
/// Once that client (and every clone of it) is dropped, network operations
/// on the resource fail with [`ErrorKind::Configuration`].
///
/// ## Example
///
/// ```rust,ignore
/// let mut check = client.checks().get("check-cpu").await?;
/// check.spec_mut().insert("interval".into(), 30.into());
/// check.save().await?;
/// ```
#[derive(Clone)]
pub struct Resource {
    kind: &'static ResourceType,
    spec: JsonObject,
    metadata: JsonObject,
    type_name: String,
    client: Weak<ClientInner>,
}

impl Resource {
    /// Builds a resource locally and validates its shape.
    ///
    /// A missing `type_name` falls back to the kind's type tag.
    pub(crate) fn new(
        kind: &'static ResourceType,
        client: Weak<ClientInner>,
        spec: JsonObject,
        metadata: JsonObject,
        type_name: Option<String>,
    ) -> Result<Self, Error> {
        let type_name = type_name
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| kind.type_name.to_string());
        let resource = Self {
            kind,
            spec,
            metadata,
            type_name,
            client,
        };
        resource.validate()?;
        Ok(resource)
    }

    /// Builds a resource from wire data.
    pub(crate) fn from_api(
        kind: &'static ResourceType,
        client: Weak<ClientInner>,
        data: Value,
    ) -> Result<Self, Error> {
        let NativeParts {
            spec,
            metadata,
            type_name,
        } = kind.api_to_native(data)?;
        Self::new(kind, client, spec, metadata, Some(type_name))
    }

    /// Returns the resource kind.
    pub fn kind(&self) -> &'static ResourceType {
        self.kind
    }

    /// Returns the spec.
    pub fn spec(&self) -> &JsonObject {
        &self.spec
    }

    /// Returns the spec for in-place edits.
    pub fn spec_mut(&mut self) -> &mut JsonObject {
        &mut self.spec
    }

    /// Replaces the spec.
    pub fn set_spec(&mut self, spec: JsonObject) {
        self.spec = spec;
    }

    /// Returns the metadata.
    pub fn metadata(&self) -> &JsonObject {
        &self.metadata
    }

    /// Returns the metadata for in-place edits.
    pub fn metadata_mut(&mut self) -> &mut JsonObject {
        &mut self.metadata
    }

    /// Replaces the metadata.
    pub fn set_metadata(&mut self, metadata: JsonObject) {
        self.metadata = metadata;
    }

    /// Returns the type, e.g. `CheckConfig` or `VaultProvider`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the API version, e.g. `core/v2`.
    pub fn api_version(&self) -> &'static str {
        self.kind.api_version
    }

    /// Returns the resource name, if its identifying fields are present.
    ///
    /// Events are named `<entity>/<check>`, users by their `username`,
    /// everything else by `metadata.name`.
    pub fn name(&self) -> Option<Cow<'_, str>> {
        match self.kind.naming {
            Naming::Metadata => self
                .metadata
                .get("name")
                .and_then(Value::as_str)
                .map(Cow::Borrowed),
            Naming::User => self
                .spec
                .get("username")
                .and_then(Value::as_str)
                .map(Cow::Borrowed),
            Naming::Event => {
                let scoped_name = |scope: &str| {
                    self.spec
                        .get(scope)?
                        .get("metadata")?
                        .get("name")?
                        .as_str()
                };
                let entity = scoped_name("entity")?;
                let check = scoped_name("check")?;
                Some(Cow::Owned(format!("{}/{}", entity, check)))
            }
        }
    }

    /// Returns `metadata.namespace`.
    pub fn namespace(&self) -> Option<&str> {
        self.metadata.get("namespace").and_then(Value::as_str)
    }

    /// Returns the path of the collection this resource belongs to.
    pub fn collection_path(&self) -> String {
        self.kind.collection_path(self.namespace())
    }

    /// Returns the resource's own path.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if the resource has no name.
    pub fn path(&self) -> Result<String, Error> {
        let name = self
            .name()
            .ok_or_else(|| Error::invalid_argument("Resource has no name."))?;
        Ok(self.kind.instance_path(self.namespace(), &name))
    }

    /// Returns the wire representation sent on save.
    pub fn to_api(&self) -> Value {
        self.kind
            .native_to_api(&self.spec, &self.metadata, &self.type_name)
    }

    /// Pushes the current state to the backend, then reloads it.
    ///
    /// `PUT <path>` must answer `200` or `201`. The reload picks up defaults
    /// the backend filled in.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidArgument`] if the resource fails validation
    /// - [`ErrorKind::UnexpectedStatus`] on any other status
    /// - errors from [`reload`](Self::reload)
    pub async fn save(&mut self) -> Result<(), Error> {
        self.validate()?;
        let client = self.client()?;
        let path = self.path()?;

        tracing::debug!(path = %path, "Saving resource");
        let response = client.put(&path, self.to_api()).await?;
        response.expect_status(&[200, 201], "Expected 200 or 201 when updating resource")?;

        self.reload().await
    }

    /// Replaces spec and metadata with the backend's current version.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedStatus`] unless `GET <path>` answers `200`.
    pub async fn reload(&mut self) -> Result<(), Error> {
        let client = self.client()?;
        let path = self.path()?;

        let response = client.get(&path, &[]).await?;
        response.expect_status(&[200], "Expected 200 when fetching resource")?;

        let native = self.kind.api_to_native(response.json()?)?;
        self.spec = native.spec;
        self.metadata = native.metadata;
        Ok(())
    }

    /// Deletes the resource. The instance is consumed.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidArgument`] for kinds that cannot be deleted
    /// - [`ErrorKind::UnexpectedStatus`] unless `DELETE <path>` answers `204`
    pub async fn delete(self) -> Result<(), Error> {
        if !self.kind.deletable {
            return Err(Error::invalid_argument(format!(
                "{}s cannot be deleted",
                self.type_name
            )));
        }
        let client = self.client()?;
        let path = self.path()?;

        tracing::debug!(path = %path, "Deleting resource");
        let response = client.delete(&path).await?;
        response.expect_status(&[204], "Expected 204 when deleting resource")
    }

    /// Lists the events produced by this check.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if this resource is not a check.
    pub fn events(&self) -> Result<ResourceList, Error> {
        if self.kind != &builtin::CHECK {
            return Err(Error::invalid_argument(format!(
                "{} resources have no events",
                self.type_name
            )));
        }
        let name = self
            .name()
            .ok_or_else(|| Error::invalid_argument("Resource has no name."))?;
        let path = builtin::EVENT.collection_path(self.namespace());
        Ok(ResourceList::new(self.client()?, &builtin::EVENT, path)
            .field_selector(Selector::equal("check.name", name.into_owned())))
    }

    fn validate(&self) -> Result<(), Error> {
        let errors = self
            .kind
            .validate(&self.spec, &self.metadata, &self.type_name);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::InvalidArgument, errors.join("\n")))
        }
    }

    fn client(&self) -> Result<Arc<ClientInner>, Error> {
        self.client
            .upgrade()
            .ok_or_else(|| Error::configuration("The client this resource belongs to was dropped"))
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("type", &self.type_name)
            .field("api_version", &self.kind.api_version)
            .field("metadata", &self.metadata)
            .field("spec", &self.spec)
            .finish()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Ok(path) => write!(f, "{}({})", self.type_name, path),
            Err(_) => write!(f, "{}({})", self.type_name, self.collection_path()),
        }
    }
}
