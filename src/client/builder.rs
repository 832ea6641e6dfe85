//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{Client, Error, auth::Credentials, config::TlsConfig, transport::TransportClient};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Marker type: Credentials not yet provided.
pub struct NoCredentials;

/// Marker type: Credentials have been provided.
pub struct HasCredentials;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern to ensure required configuration
/// (URL and credentials) is provided at compile time.
///
/// ## Required Configuration
///
/// - `url()`: The Sensu Go backend address
/// - `credentials()`: Authentication credentials
///
/// ## Optional Configuration
///
/// - `default_namespace()`: Namespace for namespaced resources (`"default"`)
/// - `timeout()`: Request timeout (30 seconds)
/// - `tls_config()`: Custom TLS settings
/// - `transport()`: A custom transport, replacing the built-in one
///
/// ## Example
///
/// ```rust,ignore
/// use sensu_go::{Client, UserPassCredentialsConfig};
///
/// let client = Client::builder()
///     .url("https://sensu.example.com:8080")
///     .credentials(UserPassCredentialsConfig::new("admin", "P@ssw0rd!"))
///     .default_namespace("prod")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ClientBuilder<UrlState, CredentialsState> {
    url: Option<String>,
    credentials: Option<Credentials>,
    default_namespace: String,
    tls_config: TlsConfig,
    timeout: Duration,
    transport: Option<Arc<dyn TransportClient>>,
    _url_state: PhantomData<UrlState>,
    _credentials_state: PhantomData<CredentialsState>,
}

impl ClientBuilder<NoUrl, NoCredentials> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            credentials: None,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            tls_config: TlsConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            transport: None,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl, NoCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, C> ClientBuilder<U, C> {
    fn into_state<U2, C2>(self) -> ClientBuilder<U2, C2> {
        ClientBuilder {
            url: self.url,
            credentials: self.credentials,
            default_namespace: self.default_namespace,
            tls_config: self.tls_config,
            timeout: self.timeout,
            transport: self.transport,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl<C> ClientBuilder<NoUrl, C> {
    /// Sets the backend address.
    ///
    /// Trailing slashes are removed. A path prefix is kept, so request paths
    /// are appended to it.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let builder = Client::builder()
    ///     .url("https://sensu.example.com:8080");
    /// ```
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl, C> {
        let mut builder = self.into_state();
        builder.url = Some(url.into());
        builder
    }
}

impl<U> ClientBuilder<U, NoCredentials> {
    /// Sets the authentication credentials.
    ///
    /// Accepts any type that can be converted into [`Credentials`]:
    /// - [`UserPassCredentialsConfig`](crate::UserPassCredentialsConfig)
    /// - [`ApiKeyCredentialsConfig`](crate::ApiKeyCredentialsConfig)
    /// - an `Arc<dyn AuthProvider>` for custom header sources
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sensu_go::ApiKeyCredentialsConfig;
    ///
    /// let builder = Client::builder()
    ///     .credentials(ApiKeyCredentialsConfig::new("83abef1e-e7d7-4beb-91fc-79ad90084d5b"));
    /// ```
    pub fn credentials(
        self,
        credentials: impl Into<Credentials>,
    ) -> ClientBuilder<U, HasCredentials> {
        let mut builder = self.into_state();
        builder.credentials = Some(credentials.into());
        builder
    }
}

impl<U, C> ClientBuilder<U, C> {
    /// Sets the namespace namespaced resource clients start out in.
    #[must_use]
    pub fn default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Sets the request timeout of the built-in transport.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let builder = builder.timeout(Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TLS configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sensu_go::TlsConfig;
    ///
    /// let builder = builder.tls_config(
    ///     TlsConfig::builder().ca_cert_file("/etc/sensu/ca.pem").build()
    /// );
    /// ```
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used for local development.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Uses a custom transport instead of the built-in HTTP one.
    ///
    /// TLS and timeout settings are then up to the transport.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sensu_go::testing::MockTransport;
    ///
    /// let transport = Arc::new(MockTransport::new());
    /// let builder = builder.transport(transport.clone());
    /// ```
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn TransportClient>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl ClientBuilder<HasUrl, HasCredentials> {
    /// Builds the client.
    ///
    /// No request is sent: username/password clients log in on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if:
    /// - The URL is invalid
    /// - The CA bundle cannot be loaded
    /// - No transport was given and the `rest` feature is disabled
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = Client::builder()
    ///     .url("https://sensu.example.com:8080")
    ///     .credentials(credentials)
    ///     .build()?;
    /// ```
    pub fn build(self) -> Result<Client, Error> {
        let url = self.url.ok_or_else(|| Error::configuration("URL is required"))?;
        let credentials =
            self.credentials.ok_or_else(|| Error::configuration("credentials are required"))?;

        url::Url::parse(&url)?;
        let address = url.trim_end_matches('/').to_string();

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.tls_config, self.timeout)?,
        };
        let auth = credentials.into_provider(&address, transport.clone());

        tracing::debug!(address = %address, namespace = %self.default_namespace, "Client built");

        Ok(Client::from_inner(ClientInner {
            address,
            default_namespace: self.default_namespace,
            timeout: self.timeout,
            transport,
            auth,
        }))
    }
}

#[cfg(feature = "rest")]
fn default_transport(tls_config: &TlsConfig, timeout: Duration) -> Result<Arc<dyn TransportClient>, Error> {
    Ok(Arc::new(RestTransport::new(tls_config, timeout)?))
}

#[cfg(not(feature = "rest"))]
fn default_transport(_: &TlsConfig, _: Duration) -> Result<Arc<dyn TransportClient>, Error> {
    Err(Error::configuration(
        "No transport configured and the 'rest' feature is not enabled",
    ))
}
