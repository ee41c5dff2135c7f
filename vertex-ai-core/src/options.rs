//! # Per-Call Options
//!
//! Every facade method accepts a [`CallOptions`] value. Unset fields fall back
//! to the method defaults resolved by the method wrapper: no retry, and the
//! runtime-wide default timeout.

use crate::retry::RetryPolicy;
use std::time::Duration;

/// Request metadata forwarded to the server, in insertion order.
pub type Metadata = Vec<(String, String)>;

/// Metadata key carrying the client library identifier.
pub const CLIENT_INFO_METADATA_KEY: &str = "x-goog-api-client";

/// Caller-supplied overrides for a single RPC invocation.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Retry policy for this call. `None` means the method default (no retry).
    pub retry: Option<RetryPolicy>,
    /// Per-attempt timeout. `None` means the method default.
    pub timeout: Option<Duration>,
    /// Metadata to attach to the call. Routing metadata is appended after it.
    pub metadata: Metadata,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Identifies the client library in outbound metadata.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub lib_name: &'static str,
    pub lib_version: &'static str,
}

impl ClientInfo {
    pub fn metadata_entry(&self) -> (String, String) {
        (
            CLIENT_INFO_METADATA_KEY.to_string(),
            format!("gl-rust {}/{}", self.lib_name, self.lib_version),
        )
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            lib_name: env!("CARGO_PKG_NAME"),
            lib_version: env!("CARGO_PKG_VERSION"),
        }
    }
}
