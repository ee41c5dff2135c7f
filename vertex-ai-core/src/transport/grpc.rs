//! # Binary Transport
//!
//! Wraps a `tonic` client to carry the generated surface's typed messages
//! over a framed HTTP/2 channel. The adapter is agnostic to the concrete
//! messages being exchanged; each call instantiates a `ProstCodec` for its
//! request/response pair and addresses the server by the RPC's fully
//! qualified path.
//!
//! ## Features
//!
//! * **Stub memoization**: the HTTP/2 path for each RPC is built once and
//!   cached per transport, keyed by the RPC's full name. Concurrent
//!   initialization is harmless; every initialization produces an equivalent
//!   path.
//! * **Metadata handling**: converts the runtime's string-pair metadata into
//!   Tonic's `MetadataMap`, attaching the credential as `authorization`.
//! * **Shared channel**: clones share the underlying channel; it is torn
//!   down once when the last clone drops.

use crate::BoxError;
use crate::auth::Credentials;
use crate::endpoint::{self, ClientOptions};
use crate::error::Error;
use crate::options::Metadata;
use crate::rpc::{RpcDescriptor, TransportKind};
use crate::transport::{ApiMessage, Transport};
use http_body::Body as HttpBody;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tonic::{
    client::GrpcService,
    metadata::{MetadataKey, MetadataValue},
    transport::{Channel, Endpoint},
};

/// The binary transport. `S` is any Tonic service; production clients use a
/// [`Channel`], tests can wire a server implementation directly.
pub struct GrpcTransport<S = Channel> {
    grpc: tonic::client::Grpc<S>,
    host: String,
    credentials: Option<Credentials>,
    paths: Arc<Mutex<HashMap<String, http::uri::PathAndQuery>>>,
}

impl<S: Clone> Clone for GrpcTransport<S> {
    fn clone(&self) -> Self {
        Self {
            grpc: self.grpc.clone(),
            host: self.host.clone(),
            credentials: self.credentials.clone(),
            paths: Arc::clone(&self.paths),
        }
    }
}

impl<S> std::fmt::Debug for GrpcTransport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrpcTransport")
            .field("host", &self.host)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl GrpcTransport<Channel> {
    /// Resolves the endpoint per the environment toggles and connects.
    pub async fn connect(options: &ClientOptions) -> Result<Self, Error> {
        let host = endpoint::resolve_endpoint(options)?;

        let uri = format!("https://{host}");
        let target = Endpoint::new(uri.clone())
            .map_err(|e| Error::invalid_argument(format!("invalid endpoint '{uri}': {e}")))?;

        let channel = target.connect().await.map_err(|e| Error::Transient {
            code: tonic::Code::Unavailable as i32,
            message: format!("failed to connect to '{host}': {e}"),
        })?;

        Ok(Self::from_service(channel, host).with_credentials(options.credentials.clone()))
    }
}

impl<S> GrpcTransport<S> {
    /// Wraps an existing Tonic service or channel.
    pub fn from_service(service: S, host: impl Into<String>) -> Self {
        Self {
            grpc: tonic::client::Grpc::new(service),
            host: host.into(),
            credentials: None,
            paths: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    fn path_for(&self, rpc: &RpcDescriptor) -> http::uri::PathAndQuery {
        let mut paths = self.paths.lock().expect("path cache poisoned");
        paths
            .entry(rpc.full_name())
            .or_insert_with(|| {
                http::uri::PathAndQuery::from_str(&rpc.grpc_path()).expect("valid gRPC path")
            })
            .clone()
    }
}

impl<S> Transport for GrpcTransport<S>
where
    S: GrpcService<tonic::body::Body> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    fn host(&self) -> &str {
        &self.host
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Grpc
    }

    fn unary<Req, Res>(
        &mut self,
        rpc: &'static RpcDescriptor,
        request: Req,
        metadata: Metadata,
    ) -> impl Future<Output = Result<Res, Error>> + Send
    where
        Req: ApiMessage,
        Res: ApiMessage,
    {
        async move {
            self.grpc.ready().await.map_err(|e| {
                let source: BoxError = e.into();
                Error::Transient {
                    code: tonic::Code::Unavailable as i32,
                    message: format!("channel was not ready: {source}"),
                }
            })?;

            let codec = tonic_prost::ProstCodec::<Req, Res>::default();
            let path = self.path_for(rpc);
            let request = build_request(request, metadata, self.credentials.as_ref())?;

            tracing::trace!(rpc = %rpc.full_name(), "sending unary call");
            match self.grpc.unary(request, path, codec).await {
                Ok(response) => Ok(response.into_inner()),
                Err(status) => Err(Error::from_grpc_status(&status)),
            }
        }
    }
}

fn build_request<T>(
    payload: T,
    metadata: Metadata,
    credentials: Option<&Credentials>,
) -> Result<tonic::Request<T>, Error> {
    let mut request = tonic::Request::new(payload);
    for (key, value) in credentials
        .and_then(|c| c.authorization_value())
        .map(|v| ("authorization".to_string(), v))
        .into_iter()
        .chain(metadata)
    {
        let parsed_key = MetadataKey::from_str(&key)
            .map_err(|e| Error::invalid_argument(format!("invalid metadata key '{key}': {e}")))?;
        let parsed_value = MetadataValue::from_str(&value).map_err(|e| {
            Error::invalid_argument(format!("invalid metadata value for '{key}': {e}"))
        })?;
        request.metadata_mut().append(parsed_key, parsed_value);
    }
    Ok(request)
}
