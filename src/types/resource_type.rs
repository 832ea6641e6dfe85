//! Resource type descriptors.
//!
//! A [`ResourceType`] is static configuration: where a kind of resource lives,
//! how it is represented on the wire and how its identity is derived. Every
//! built-in kind is a `static` in [`builtin`](super::builtin); custom kinds
//! can be declared the same way.

use serde_json::Value;

use super::JsonObject;
use crate::Error;
use crate::error::ErrorKind;

/// Where a resource lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Cluster-wide: `/<api-base>/<collection>[/<name>]`.
    Cluster,
    /// Per namespace: `/<api-base>/namespaces/<namespace>/<collection>[/<name>]`.
    Namespaced,
}

/// Wire representation of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// `core/v2` objects: spec fields at the top level next to `metadata`.
    Flat,
    /// Enterprise `*/v1` objects: `{type, api_version, metadata, spec}`.
    Envelope,
    /// The object is the spec itself; there is no metadata (users).
    Bare,
    /// `{name, ...}` objects; `name` is the only metadata (namespaces).
    NameOnly,
}

/// How a resource's name is derived, and which fields it must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Naming {
    /// `metadata.name`.
    Metadata,
    /// `<spec.entity.metadata.name>/<spec.check.metadata.name>`.
    Event,
    /// `spec.username`.
    User,
}

/// A resource split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NativeParts {
    pub spec: JsonObject,
    pub metadata: JsonObject,
    pub type_name: String,
}

/// Describes one kind of backend resource.
///
/// ## Example: declaring a custom kind
///
/// ```rust
/// use sensu_go::{ResourceType, Scope};
///
/// static ROLE: ResourceType =
///     ResourceType::namespaced("Role", "core/v2", "/api/core/v2/namespaces/{namespace}/roles")
///         .with_field_prefix("role");
///
/// assert_eq!(ROLE.scope, Scope::Namespaced);
/// assert_eq!(
///     ROLE.instance_path(Some("default"), "admin"),
///     "/api/core/v2/namespaces/default/roles/admin",
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceType {
    /// Type tag sent with `Envelope` resources and reported by
    /// [`Resource::type_name`](crate::Resource::type_name). Empty when the
    /// caller has to supply it.
    pub type_name: &'static str,
    /// API version string, e.g. `core/v2`.
    pub api_version: &'static str,
    /// Collection path; namespaced kinds contain a `{namespace}` placeholder.
    pub path_template: &'static str,
    /// Cluster-wide or per namespace.
    pub scope: Scope,
    /// Prefix applied to field selectors, e.g. `check`.
    pub field_prefix: Option<&'static str>,
    /// Wire representation.
    pub format: WireFormat,
    /// Identity derivation and required fields.
    pub naming: Naming,
    /// Whether instances can be deleted.
    pub deletable: bool,
}

impl ResourceType {
    /// A namespaced `core/v2`-style kind named by `metadata.name`.
    pub const fn namespaced(
        type_name: &'static str,
        api_version: &'static str,
        path_template: &'static str,
    ) -> Self {
        Self {
            type_name,
            api_version,
            path_template,
            scope: Scope::Namespaced,
            field_prefix: None,
            format: WireFormat::Flat,
            naming: Naming::Metadata,
            deletable: true,
        }
    }

    /// A cluster-wide `core/v2`-style kind named by `metadata.name`.
    pub const fn cluster(
        type_name: &'static str,
        api_version: &'static str,
        path_template: &'static str,
    ) -> Self {
        Self {
            scope: Scope::Cluster,
            ..Self::namespaced(type_name, api_version, path_template)
        }
    }

    /// Sets the field selector prefix.
    pub const fn with_field_prefix(mut self, prefix: &'static str) -> Self {
        self.field_prefix = Some(prefix);
        self
    }

    /// Sets the wire format.
    pub const fn with_format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the naming scheme.
    pub const fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// Marks instances as non-deletable.
    pub const fn undeletable(mut self) -> Self {
        self.deletable = false;
        self
    }

    /// Collection path, with the namespace substituted for namespaced kinds.
    pub fn collection_path(&self, namespace: Option<&str>) -> String {
        match self.scope {
            Scope::Cluster => self.path_template.to_string(),
            Scope::Namespaced => self
                .path_template
                .replace("{namespace}", namespace.unwrap_or_default()),
        }
    }

    /// Instance path: the collection path plus `/<name>`.
    ///
    /// Names are appended verbatim; event names contain a `/`.
    pub fn instance_path(&self, namespace: Option<&str>, name: &str) -> String {
        let mut path = self.collection_path(namespace);
        if !name.is_empty() {
            path.push('/');
            path.push_str(name);
        }
        path
    }

    /// Splits wire data into spec, metadata and type.
    pub(crate) fn api_to_native(&self, data: Value) -> Result<NativeParts, Error> {
        let Value::Object(mut object) = data else {
            return Err(malformed("expected a JSON object"));
        };

        match self.format {
            WireFormat::Flat => {
                let metadata = match object.remove("metadata") {
                    Some(Value::Object(metadata)) => metadata,
                    None | Some(Value::Null) => JsonObject::new(),
                    Some(_) => return Err(malformed("'metadata' is not an object")),
                };
                Ok(NativeParts {
                    spec: object,
                    metadata,
                    type_name: self.type_name.to_string(),
                })
            }
            WireFormat::Envelope => {
                let type_name = match object.remove("type") {
                    Some(Value::String(t)) => t,
                    _ => return Err(malformed("missing 'type'")),
                };
                let Some(Value::Object(metadata)) = object.remove("metadata") else {
                    return Err(malformed("missing 'metadata'"));
                };
                let Some(Value::Object(spec)) = object.remove("spec") else {
                    return Err(malformed("missing 'spec'"));
                };
                Ok(NativeParts {
                    spec,
                    metadata,
                    type_name,
                })
            }
            WireFormat::Bare => Ok(NativeParts {
                spec: object,
                metadata: JsonObject::new(),
                type_name: self.type_name.to_string(),
            }),
            WireFormat::NameOnly => {
                let mut metadata = JsonObject::new();
                if let Some(name) = object.remove("name") {
                    metadata.insert("name".to_string(), name);
                }
                Ok(NativeParts {
                    spec: object,
                    metadata,
                    type_name: self.type_name.to_string(),
                })
            }
        }
    }

    /// Assembles wire data from spec, metadata and type.
    pub(crate) fn native_to_api(
        &self,
        spec: &JsonObject,
        metadata: &JsonObject,
        type_name: &str,
    ) -> Value {
        match self.format {
            WireFormat::Flat => {
                let mut object = spec.clone();
                object.insert("metadata".to_string(), Value::Object(metadata.clone()));
                Value::Object(object)
            }
            WireFormat::Envelope => serde_json::json!({
                "type": type_name,
                "api_version": self.api_version,
                "metadata": metadata,
                "spec": spec,
            }),
            WireFormat::Bare => Value::Object(spec.clone()),
            WireFormat::NameOnly => {
                let mut object = spec.clone();
                if let Some(name) = metadata.get("name") {
                    object.insert("name".to_string(), name.clone());
                }
                Value::Object(object)
            }
        }
    }

    /// Lists every shape problem of a resource of this kind. Empty means valid.
    pub(crate) fn validate(
        &self,
        spec: &JsonObject,
        metadata: &JsonObject,
        type_name: &str,
    ) -> Vec<&'static str> {
        let mut errors = Vec::new();

        match self.naming {
            Naming::Event => {
                if !metadata.contains_key("namespace") {
                    errors.push("Event needs to have a namespace.");
                }
                if !spec.contains_key("entity") {
                    errors.push("Event needs to reference an entity.");
                }
                if !spec.contains_key("check") && !spec.contains_key("metrics") {
                    errors.push("Event needs to have a check or a metrics scope.");
                }
            }
            Naming::User => {
                if !is_set(spec.get("username")) {
                    errors.push("Users needs to have a 'username'.");
                }
                if !is_set(spec.get("password")) && !is_set(spec.get("password_hash")) {
                    errors.push("Users needs to have a 'password' or 'password_hash'.");
                }
            }
            Naming::Metadata => match self.scope {
                Scope::Cluster => {
                    if !has_string(metadata, "name") {
                        errors.push("Cluster resources need to have a 'name'.");
                    }
                }
                Scope::Namespaced => {
                    if !has_string(metadata, "name") {
                        errors.push("Namespaced resources need to have a 'name'.");
                    }
                    if !has_string(metadata, "namespace") {
                        errors.push("Namespaced resources need to have a 'namespace'.");
                    }
                }
            },
        }

        if type_name.is_empty() {
            errors.push("Type not set. Please specify a resource type.");
        }

        errors
    }
}

fn has_string(object: &JsonObject, key: &str) -> bool {
    matches!(object.get(key), Some(Value::String(_)))
}

/// Truthiness of an optional field: present, not null, not an empty string.
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn malformed(detail: &str) -> Error {
    Error::new(
        ErrorKind::InvalidResponse,
        format!("Malformed resource data: {}", detail),
    )
}
