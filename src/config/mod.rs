//! Configuration types for the Sensu Go client.
//!
//! - [`TlsConfig`]: certificate verification for the REST transport
//!
//! Everything else (address, credentials, namespace, timeout) is set on
//! [`ClientBuilder`](crate::ClientBuilder).

mod tls;

pub use tls::TlsConfig;
