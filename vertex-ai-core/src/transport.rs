//! # Transports
//!
//! The runtime consumes transports through a narrow interface: an authority,
//! and one unary callable per RPC that serializes a typed request and
//! deserializes a typed response. Two adapters are provided:
//!
//! * [`grpc::GrpcTransport`] — binary framed RPC over an HTTP/2 channel,
//!   generic over any `tonic` service so tests can run in process.
//! * [`rest::RestTransport`] — JSON over HTTP/1.1 through an injected wire
//!   callable; this crate performs the transcoding, not the I/O.
//!
//! Transports are cheap to clone and share their underlying channel or
//! session; the channel is closed exactly once when the last clone is
//! dropped.

pub mod grpc;
pub mod rest;

use crate::error::Error;
use crate::options::Metadata;
use crate::rpc::{RpcDescriptor, TransportKind};

/// Message bound shared by every request and response record: prost for the
/// binary transport, serde for the JSON transport.
pub trait ApiMessage:
    prost::Message + serde::Serialize + serde::de::DeserializeOwned + Clone + Default + 'static
{
}

impl<M> ApiMessage for M where
    M: prost::Message + serde::Serialize + serde::de::DeserializeOwned + Clone + Default + 'static
{
}

/// A client transport: an authority plus per-RPC unary callables.
pub trait Transport: Clone + Send + Sync + 'static {
    /// Target authority, including port when non-default.
    fn host(&self) -> &str;

    /// Which registry label this transport answers to.
    fn kind(&self) -> TransportKind;

    /// Invokes a unary RPC. One wire attempt per call; retries live above
    /// this layer.
    fn unary<Req, Res>(
        &mut self,
        rpc: &'static RpcDescriptor,
        request: Req,
        metadata: Metadata,
    ) -> impl Future<Output = Result<Res, Error>> + Send
    where
        Req: ApiMessage,
        Res: ApiMessage;
}
