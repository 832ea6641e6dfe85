//! Internal client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::auth::AuthProvider;
use crate::error::Error;
use crate::transport::{Method, Request, Response, TransportClient, build_url};

/// State shared by the root client, every resource client, every listing and
/// (weakly) every resource instance.
///
/// Read-only after construction.
pub(crate) struct ClientInner {
    /// The backend address, without trailing slashes.
    pub address: String,

    /// Namespace used when none is given.
    pub default_namespace: String,

    /// Request timeout of the built-in transport.
    pub timeout: Duration,

    /// Transport all requests go through.
    pub transport: Arc<dyn TransportClient>,

    /// Source of the `Authorization` header.
    pub auth: Arc<dyn AuthProvider>,
}

impl ClientInner {
    /// Sends an authenticated request and returns the raw reply.
    ///
    /// The auth header is resolved before the request is built, so the first
    /// call on a username/password client performs the login.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Response, Error> {
        let url = build_url(&self.address, path, query)?;
        let authorization = self.auth.auth_header().await?;

        let mut request = Request::new(method, url).with_header("Authorization", authorization);
        if let Some(body) = body {
            request = request.with_json(body);
        }

        let response = self.transport.send(request).await?;
        tracing::debug!(%method, path, status = response.status(), "Backend replied");
        Ok(response)
    }

    pub(crate) async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Response, Error> {
        self.request(Method::Get, path, query, None).await
    }

    pub(crate) async fn put(&self, path: &str, body: Value) -> Result<Response, Error> {
        self.request(Method::Put, path, &[], Some(body)).await
    }

    pub(crate) async fn post(&self, path: &str, body: Value) -> Result<Response, Error> {
        self.request(Method::Post, path, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.request(Method::Delete, path, &[], None).await
    }
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("address", &self.address)
            .field("default_namespace", &self.default_namespace)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
