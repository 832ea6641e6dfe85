//! Resource model.
//!
//! - [`ResourceType`]: static description of a kind of resource
//! - [`Resource`]: one resource instance (spec, metadata, type)
//! - [`builtin`]: descriptors for every kind the backend ships with

pub mod builtin;
mod resource;
mod resource_type;

pub use resource::Resource;
pub use resource_type::{Naming, ResourceType, Scope, WireFormat};

/// A JSON object, as used for `spec` and `metadata`.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
