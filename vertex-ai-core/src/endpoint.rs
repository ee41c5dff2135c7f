//! # Endpoint Selection
//!
//! Clients default to the standard service endpoint and switch to the
//! mutual-TLS sibling based on two environment toggles:
//!
//! * `GOOGLE_API_USE_MTLS_ENDPOINT` — `always`, `never`, or `auto` (default).
//! * `GOOGLE_API_USE_CLIENT_CERTIFICATE` — `true` or `false` (default),
//!   gating whether a configured client certificate source is consulted at
//!   all.
//!
//! In `auto` mode the mutual-TLS endpoint is chosen exactly when a
//! certificate source is present and enabled. A caller-supplied explicit
//! endpoint always wins. Loading the certificate materials is the only mTLS
//! work done here; wiring them into the channel belongs to the transport's
//! owner.

use crate::BoxError;
use crate::auth::Credentials;
use crate::error::Error;
use crate::rpc::TransportKind;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default service authority.
pub const DEFAULT_ENDPOINT: &str = "aiplatform.googleapis.com";

/// Mutual-TLS sibling of [`DEFAULT_ENDPOINT`].
pub const DEFAULT_MTLS_ENDPOINT: &str = "aiplatform.mtls.googleapis.com";

/// Default service port.
pub const DEFAULT_PORT: u16 = 443;

pub const USE_MTLS_ENDPOINT_ENV: &str = "GOOGLE_API_USE_MTLS_ENDPOINT";
pub const USE_CLIENT_CERTIFICATE_ENV: &str = "GOOGLE_API_USE_CLIENT_CERTIFICATE";

/// Client certificate materials in PEM form.
#[derive(Debug, Clone)]
pub struct ClientCertificate {
    pub cert: Vec<u8>,
    pub key: Vec<u8>,
}

/// Produces client certificate materials on demand.
pub type ClientCertSource = Arc<dyn Fn() -> Result<ClientCertificate, BoxError> + Send + Sync>;

/// Construction-time options shared by every facade.
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Explicit endpoint, overriding environment-based selection.
    pub endpoint: Option<String>,
    /// Inline credential. Mutually exclusive with `credentials_file`.
    pub credentials: Option<Credentials>,
    /// Path to a credentials file resolved by the caller's auth layer.
    /// Mutually exclusive with `credentials`.
    pub credentials_file: Option<PathBuf>,
    /// Source of client certificate materials for mutual TLS.
    pub client_cert_source: Option<ClientCertSource>,
    /// Which transport to construct. Defaults to gRPC.
    pub transport: TransportKind,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    pub fn with_client_cert_source(mut self, source: ClientCertSource) -> Self {
        self.client_cert_source = Some(source);
        self
    }

    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    /// Checks caller-supplied options for contradictions.
    pub fn validate(&self) -> Result<(), Error> {
        if self.credentials.is_some() && self.credentials_file.is_some() {
            return Err(Error::invalid_argument(
                "credentials and credentials_file are mutually exclusive",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("credentials_file", &self.credentials_file)
            .field(
                "client_cert_source",
                &self.client_cert_source.as_ref().map(|_| "<fn>"),
            )
            .field("transport", &self.transport)
            .finish()
    }
}

/// `GOOGLE_API_USE_MTLS_ENDPOINT` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtlsEndpointMode {
    Always,
    Never,
    Auto,
}

impl MtlsEndpointMode {
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(USE_MTLS_ENDPOINT_ENV) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(MtlsEndpointMode::Auto),
        }
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "always" => Ok(MtlsEndpointMode::Always),
            "never" => Ok(MtlsEndpointMode::Never),
            "auto" | "" => Ok(MtlsEndpointMode::Auto),
            other => Err(Error::mutual_tls_setup(format!(
                "unsupported {USE_MTLS_ENDPOINT_ENV} value '{other}'; \
                 expected 'always', 'never', or 'auto'"
            ))),
        }
    }
}

/// Reads `GOOGLE_API_USE_CLIENT_CERTIFICATE`.
pub fn use_client_certificate_from_env() -> Result<bool, Error> {
    match std::env::var(USE_CLIENT_CERTIFICATE_ENV) {
        Ok(value) => parse_use_client_certificate(&value),
        Err(_) => Ok(false),
    }
}

pub fn parse_use_client_certificate(value: &str) -> Result<bool, Error> {
    match value {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        other => Err(Error::invalid_argument(format!(
            "unsupported {USE_CLIENT_CERTIFICATE_ENV} value '{other}'; \
             expected 'true' or 'false'"
        ))),
    }
}

/// Resolves the endpoint for `options` using the process environment.
pub fn resolve_endpoint(options: &ClientOptions) -> Result<String, Error> {
    let mode = MtlsEndpointMode::from_env()?;
    let use_cert = use_client_certificate_from_env()?;
    resolve_endpoint_with(options, mode, use_cert)
}

/// Resolves the endpoint with explicit toggle values. When the mutual-TLS
/// endpoint is chosen and a certificate source is configured, the source is
/// invoked once so that broken materials fail at construction rather than on
/// the first call.
pub fn resolve_endpoint_with(
    options: &ClientOptions,
    mode: MtlsEndpointMode,
    use_client_certificate: bool,
) -> Result<String, Error> {
    options.validate()?;

    if let Some(endpoint) = &options.endpoint {
        return Ok(endpoint.clone());
    }

    let cert_source = if use_client_certificate {
        options.client_cert_source.as_ref()
    } else {
        None
    };

    let use_mtls = match mode {
        MtlsEndpointMode::Always => true,
        MtlsEndpointMode::Never => false,
        MtlsEndpointMode::Auto => cert_source.is_some(),
    };

    if use_mtls {
        if let Some(source) = cert_source {
            load_client_certificate(source)?;
        }
        Ok(DEFAULT_MTLS_ENDPOINT.to_string())
    } else {
        Ok(DEFAULT_ENDPOINT.to_string())
    }
}

/// Invokes a certificate source, mapping failures to the mTLS setup error.
pub fn load_client_certificate(source: &ClientCertSource) -> Result<ClientCertificate, Error> {
    source().map_err(|e| Error::mutual_tls_setup(format!("client certificate source failed: {e}")))
}
