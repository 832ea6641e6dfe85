//! REST transport implementation using reqwest.
//!
//! Sends fully-formed [`Request`]s and hands back the raw status, headers and
//! body. Status codes are never interpreted here.

use std::time::Duration;

use crate::Error;
use crate::config::TlsConfig;
use crate::error::ErrorKind;
use crate::transport::traits::{Method, Request, Response, TransportClient};
use crate::user_agent;

// ============================================================================
// REST Transport
// ============================================================================

/// REST transport using reqwest.
///
/// One `reqwest::Client` (and therefore one connection pool) is shared by
/// every request issued through this transport.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Creates a new REST transport with the given configuration.
    pub fn new(tls_config: &TlsConfig, timeout: Duration) -> Result<Self, Error> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent::user_agent());

        if tls_config.skip_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref ca_cert_file) = tls_config.ca_cert_file {
            let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("Failed to read CA bundle {:?}: {}", ca_cert_file, e),
                )
            })?;
            let source = format!("CA bundle {:?}", ca_cert_file);
            for cert in load_ca_bundle(&cert_pem, &source)? {
                client_builder = client_builder.add_root_certificate(cert);
            }
        }

        if let Some(ref ca_cert_pem) = tls_config.ca_cert_pem {
            for cert in load_ca_bundle(ca_cert_pem.as_bytes(), "CA certificate PEM")? {
                client_builder = client_builder.add_root_certificate(cert);
            }
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self { client, timeout })
    }
}

/// Parses every certificate of a PEM bundle.
///
/// Input that yields no certificate at all is rejected.
fn load_ca_bundle(pem: &[u8], source: &str) -> Result<Vec<reqwest::Certificate>, Error> {
    let certs = reqwest::Certificate::from_pem_bundle(pem).map_err(|e| {
        Error::new(ErrorKind::Configuration, format!("Invalid {}: {}", source, e))
    })?;
    if certs.is_empty() {
        return Err(Error::new(
            ErrorKind::Configuration,
            format!("Invalid {}: no certificates found", source),
        ));
    }
    Ok(certs)
}

#[async_trait::async_trait]
impl TransportClient for RestTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref auth) = request.basic_auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let url = response.url().to_string();
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let text = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(method = %request.method, url = %url, status, "HTTP exchange");

        Ok(headers
            .into_iter()
            .fold(Response::new(url, status, text), |resp, (name, value)| {
                resp.with_header(name, value)
            }))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`RestTransport`].
#[derive(Debug)]
pub struct RestTransportBuilder {
    tls_config: TlsConfig,
    timeout: Duration,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            tls_config: TlsConfig::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        RestTransport::new(&self.tls_config, self.timeout)
    }
}

/// Maps reqwest errors to client errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    let err = if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("Connection failed: {}", e))
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e))
    };
    tracing::debug!(error = %err, "HTTP exchange failed");
    err.with_source(e)
}
