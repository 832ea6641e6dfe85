//! Testing utilities for the Sensu Go SDK.
//!
//! [`MockTransport`] replaces the HTTP layer with a queue of canned replies,
//! so code built on [`Client`](crate::Client) can be tested without a backend.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sensu_go::testing::MockTransport;
//! use sensu_go::{ApiKeyCredentialsConfig, Client};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), sensu_go::Error> {
//! let transport = Arc::new(MockTransport::new());
//! transport.push_json(200, json!({"command": "true", "metadata": {"name": "a", "namespace": "default"}}));
//!
//! let client = Client::builder()
//!     .url("https://sensu.example.com")
//!     .credentials(ApiKeyCredentialsConfig::new("key"))
//!     .transport(transport.clone())
//!     .build()?;
//!
//! let check = client.checks().get("a").await?;
//! assert_eq!(check.spec()["command"], "true");
//! assert_eq!(
//!     transport.last_request().map(|r| r.url.path().to_string()).as_deref(),
//!     Some("/api/core/v2/namespaces/default/checks/a"),
//! );
//! # Ok(())
//! # }
//! ```

pub use crate::transport::mock::MockTransport;
