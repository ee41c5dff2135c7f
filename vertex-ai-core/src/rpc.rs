//! # RPC Descriptors
//!
//! Each RPC in the generated surface is described by a static
//! [`RpcDescriptor`]: its wire identity on the binary transport, the request
//! field used for routing metadata, its HTTP binding for the JSON transport,
//! and an optional per-method timeout override. The facade crates declare one
//! descriptor constant per RPC; everything in the runtime is keyed off them.

/// Static description of a single RPC.
#[derive(Debug, Clone, Copy)]
pub struct RpcDescriptor {
    /// Fully qualified service name, e.g. `google.cloud.aiplatform.v1.JobService`.
    pub service: &'static str,
    /// Method name, e.g. `CreateCustomJob`.
    pub method: &'static str,
    /// Dotted request field whose value is emitted as routing metadata.
    pub routing_field: Option<&'static str>,
    /// HTTP binding used by the JSON transport.
    pub http: Option<HttpRule>,
    /// Per-method default timeout in milliseconds. `None` falls back to the
    /// runtime-wide default.
    pub default_timeout_ms: Option<u64>,
}

impl RpcDescriptor {
    /// The key under which this RPC is registered, e.g.
    /// `google.cloud.aiplatform.v1.JobService/CreateCustomJob`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.service, self.method)
    }

    /// The HTTP/2 request path used by the binary transport.
    pub fn grpc_path(&self) -> String {
        format!("/{}/{}", self.service, self.method)
    }
}

/// HTTP binding of an RPC for the JSON transport.
///
/// `body` names the request field serialized as the request body; `"*"` means
/// the whole remaining request. Fields captured by the URI template and the
/// body field never appear in the query string.
#[derive(Debug, Clone, Copy)]
pub struct HttpRule {
    pub method: &'static str,
    pub template: &'static str,
    pub body: Option<&'static str>,
}

/// Registry of transport implementations, keyed by a short label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Grpc,
    Rest,
}

impl TransportKind {
    /// Resolves a label to a transport kind, defaulting to gRPC.
    ///
    /// The `grpc_asyncio` label is accepted for compatibility with other
    /// generated surfaces; blocking and cooperative clients share a transport
    /// here.
    pub fn resolve(label: Option<&str>) -> Option<Self> {
        match label {
            None => Some(TransportKind::Grpc),
            Some("grpc") | Some("grpc_asyncio") => Some(TransportKind::Grpc),
            Some("rest") => Some(TransportKind::Rest),
            Some(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportKind::Grpc => "grpc",
            TransportKind::Rest => "rest",
        }
    }
}

impl Default for TransportKind {
    fn default() -> Self {
        TransportKind::Grpc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAKE: RpcDescriptor = RpcDescriptor {
        service: "google.cloud.aiplatform.v1.JobService",
        method: "GetCustomJob",
        routing_field: Some("name"),
        http: None,
        default_timeout_ms: None,
    };

    #[test]
    fn wire_identifiers() {
        assert_eq!(
            FAKE.full_name(),
            "google.cloud.aiplatform.v1.JobService/GetCustomJob"
        );
        assert_eq!(
            FAKE.grpc_path(),
            "/google.cloud.aiplatform.v1.JobService/GetCustomJob"
        );
    }

    #[test]
    fn transport_labels_resolve_with_default() {
        assert_eq!(TransportKind::resolve(None), Some(TransportKind::Grpc));
        assert_eq!(
            TransportKind::resolve(Some("grpc_asyncio")),
            Some(TransportKind::Grpc)
        );
        assert_eq!(TransportKind::resolve(Some("rest")), Some(TransportKind::Rest));
        assert_eq!(TransportKind::resolve(Some("smoke-signals")), None);
    }
}
