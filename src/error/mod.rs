//! Error types for the Sensu Go client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//! Errors raised in response to a backend reply carry the request URL, the
//! HTTP status and the raw response body so callers can log or re-raise them
//! with full context.
//!
//! ## Key Invariant
//!
//! A `404` is only recoverable in `find()`, where it becomes `Ok(None)`. Every
//! other operation surfaces it as [`ErrorKind::UnexpectedStatus`]:
//!
//! ```rust,ignore
//! // find() - missing resource is Ok(None)
//! let check = client.checks().find("check-cpu").await?;
//!
//! // get() - missing resource is Err(UnexpectedStatus) with status 404
//! match client.checks().get("check-cpu").await {
//!     Err(e) if e.is_not_found() => println!("no such check"),
//!     other => { other?; }
//! }
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for Sensu Go client operations.
pub type Result<T> = std::result::Result<T, Error>;
