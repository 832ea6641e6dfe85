//! Authentication and credentials for the Sensu Go client.
//!
//! - [`Credentials`]: what the caller hands to the builder
//! - [`AuthProvider`]: trait producing the `Authorization` header value
//! - [`UserPassAuth`]: username/password exchanged once for a bearer token
//! - [`ApiKeyAuth`]: static `Key` header
//!
//! ## Username and password
//!
//! ```rust,ignore
//! use sensu_go::{Client, UserPassCredentialsConfig};
//!
//! let client = Client::builder()
//!     .url("https://sensu.example.com:8080")
//!     .credentials(UserPassCredentialsConfig::new("admin", "P@ssw0rd!"))
//!     .build()?;
//! ```
//!
//! No request is made until the first API call; that call logs in first.
//!
//! ## API key
//!
//! ```rust,ignore
//! use sensu_go::{ApiKeyCredentialsConfig, Client};
//!
//! let client = Client::builder()
//!     .url("https://sensu.example.com:8080")
//!     .credentials(ApiKeyCredentialsConfig::new("83abef1e-e7d7-4beb-91fc-79ad90084d5b"))
//!     .build()?;
//! ```

mod credentials;
mod provider;

pub use credentials::{ApiKeyCredentialsConfig, Credentials, UserPassCredentialsConfig};
pub use provider::{ApiKeyAuth, AuthFuture, AuthProvider, UserPassAuth};
