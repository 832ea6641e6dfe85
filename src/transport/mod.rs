//! Transport layer for Sensu Go communication.
//!
//! This module provides the underlying transport implementations:
//!
//! - REST transport (via reqwest) - the default
//! - Mock transport - for testing without network
//!
//! Both implement [`TransportClient`]. Callers can plug their own
//! implementation into [`ClientBuilder::transport`](crate::ClientBuilder::transport).
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable the reqwest-backed transport

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub(crate) mod mock;

pub use traits::{BasicAuth, Method, Request, Response, TransportClient};

pub(crate) use traits::build_url;

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
