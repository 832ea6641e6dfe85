//! # Sensu Go Rust SDK
//!
//! Async client for the Sensu Go backend REST API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sensu_go::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sensu_go::Error> {
//!     // Create client
//!     let client = Client::builder()
//!         .url("https://sensu.example.com:8080")
//!         .credentials(UserPassCredentialsConfig::new("admin", "P@ssw0rd!"))
//!         .build()?;
//!
//!     // Create a check in the default namespace
//!     let check = client
//!         .checks()
//!         .create(
//!             json!({"command": "check-cpu.sh", "interval": 60, "subscriptions": ["linux"]}),
//!             json!({"name": "check-cpu"}),
//!         )
//!         .await?;
//!
//!     // List its events
//!     for event in check.events()?.await? {
//!         println!("{}", event);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client Hierarchy**: `Client` → `NamespacedClient` / `ClusterClient` → `Resource`
//! - **Lazy login**: username/password clients log in on the first request and
//!   reuse the token afterwards
//! - **`get` vs `find`**: a missing resource is an error for `get` and `None`
//!   for `find`
//! - **Listings are lazy**: `list()` fetches pages only while it is consumed
//!
//! ## Features
//!
//! - `rest` (default): Built-in HTTP transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod selector;
pub mod types;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg(feature = "rest")]
mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use resources::{ClusterClient, NamespacedClient, ResourceList};
pub use selector::{Literal, Selector, SetOperand};
pub use types::{JsonObject, Naming, Resource, ResourceType, Scope, WireFormat, builtin};

// Re-export auth types
pub use auth::{
    ApiKeyAuth, ApiKeyCredentialsConfig, AuthFuture, AuthProvider, Credentials, UserPassAuth,
    UserPassCredentialsConfig,
};

// Re-export config types
pub use config::TlsConfig;

// Re-export transport types
pub use transport::{BasicAuth, Method, Request, Response, TransportClient};
#[cfg(feature = "rest")]
#[cfg_attr(docsrs, doc(cfg(feature = "rest")))]
pub use transport::{RestTransport, RestTransportBuilder};
