//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use sensu_go::prelude::*;
//! ```
//!
//! This provides access to:
//! - Core client types
//! - Error types
//! - Authentication types
//! - Resources and selectors

pub use crate::{
    auth::{ApiKeyCredentialsConfig, AuthProvider, Credentials, UserPassCredentialsConfig},
    client::{Client, ClientBuilder},
    config::TlsConfig,
    error::{Error, ErrorKind, Result},
    resources::{ClusterClient, NamespacedClient, ResourceList},
    selector::{Literal, Selector, SetOperand},
    types::{JsonObject, Resource, ResourceType, Scope, builtin},
};
