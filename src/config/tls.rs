//! TLS configuration for connections to the backend.

use std::path::PathBuf;

/// Certificate verification settings for the REST transport.
///
/// By default the system root certificates are used and server certificates
/// are verified. A backend with a private CA can be trusted by pointing
/// `ca_cert_file` at a PEM bundle (or passing the PEM text directly).
///
/// ## Example: Private CA
///
/// ```rust
/// use sensu_go::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/sensu/tls/ca.pem")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
///
/// ## Example: Self-signed development backend
///
/// ```rust
/// use sensu_go::TlsConfig;
///
/// let config = TlsConfig::insecure();
/// assert!(!config.verifies_certificates());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Path to a PEM CA bundle used to verify the backend certificate.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// PEM CA certificate data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used against
    /// development backends with self-signed certificates.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a config that accepts any server certificate.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    /// Returns `true` unless verification has been switched off.
    pub fn verifies_certificates(&self) -> bool {
        !self.skip_verification
    }
}
