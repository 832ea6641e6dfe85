//! Resource clients.
//!
//! - [`NamespacedClient`]: kinds that live in a namespace (checks, entities, ...)
//! - [`ClusterClient`]: cluster-wide kinds (namespaces, users, secrets providers)
//! - [`ResourceList`]: lazy, paginated listing returned by `list()`
//!
//! Obtain them from the root [`Client`](crate::Client):
//!
//! ```rust,ignore
//! let checks = client.checks();              // NamespacedClient
//! let namespaces = client.namespaces();      // ClusterClient
//! let all = checks.list().await?;            // Vec<Resource>
//! ```
//!
//! ## Status handling
//!
//! | Operation | Expected status | `404` |
//! |-----------|-----------------|-------|
//! | `get`     | `200`           | error |
//! | `find`    | `200`           | `None` |
//! | `create`  | `200`/`201` on `PUT` | n/a |
//! | `delete`  | `204`           | error |
//! | `list`    | `200` per page  | error |

pub(crate) mod client;
mod cluster;
mod list;
mod namespaced;

pub use cluster::ClusterClient;
pub use list::{DEFAULT_PAGE_SIZE, ResourceList};
pub use namespaced::NamespacedClient;
