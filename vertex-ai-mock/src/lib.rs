//! # Mock Transport
//!
//! **INTERNAL USE ONLY**: this crate exists solely to provide an in-process
//! transport implementation for integration-testing the `vertex-ai` facades.
//! It is not intended for production use.
//!
//! A [`MockTransport`] is the transport interface reduced to its essence: a
//! dictionary of per-RPC byte-level handlers keyed by the RPC's full name,
//! plus a record of every call observed (request bytes and metadata, in
//! order), so tests can assert on routing and metadata ordering.

use prost::Message;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use vertex_ai_core::error::Error;
use vertex_ai_core::options::Metadata;
use vertex_ai_core::rpc::{RpcDescriptor, TransportKind};
use vertex_ai_core::transport::{ApiMessage, Transport};

type Handler = Box<dyn FnMut(Vec<u8>) -> Result<Vec<u8>, Error> + Send>;

/// One observed call: which RPC, the encoded request, and the metadata that
/// accompanied it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub rpc: String,
    pub request: Vec<u8>,
    pub metadata: Metadata,
}

/// In-process transport backed by per-RPC handlers.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    handlers: HashMap<String, Handler>,
    calls: Vec<RecordedCall>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a typed handler for `rpc`, replacing any previous one. The
    /// handler runs once per attempt, so retry behavior is observable.
    pub fn on_unary<Req, Res, F>(&self, rpc: &RpcDescriptor, mut handler: F)
    where
        Req: Message + Default,
        Res: Message,
        F: FnMut(Req) -> Result<Res, Error> + Send + 'static,
    {
        let wrapped: Handler = Box::new(move |bytes| {
            let request = Req::decode(bytes.as_slice())
                .map_err(|e| Error::codec(format!("mock failed to decode request: {e}")))?;
            handler(request).map(|response| response.encode_to_vec())
        });
        self.inner
            .lock()
            .unwrap()
            .handlers
            .insert(rpc.full_name(), wrapped);
    }

    /// Installs a handler that serves the given responses in order and then
    /// fails. Handy for poll sequences.
    pub fn respond_with<Req, Res>(&self, rpc: &RpcDescriptor, responses: Vec<Res>)
    where
        Req: Message + Default,
        Res: Message + Send + 'static,
    {
        let mut queue: VecDeque<Res> = responses.into();
        self.on_unary::<Req, Res, _>(rpc, move |_request| {
            queue
                .pop_front()
                .ok_or_else(|| Error::internal("mock response queue exhausted"))
        });
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls observed for one RPC, in order.
    pub fn calls_for(&self, rpc: &RpcDescriptor) -> Vec<RecordedCall> {
        let key = rpc.full_name();
        self.calls().into_iter().filter(|c| c.rpc == key).collect()
    }

    pub fn call_count(&self, rpc: &RpcDescriptor) -> usize {
        self.calls_for(rpc).len()
    }

    /// Decoded requests observed for one RPC, in order.
    pub fn requests_for<Req: Message + Default>(&self, rpc: &RpcDescriptor) -> Vec<Req> {
        self.calls_for(rpc)
            .iter()
            .map(|call| Req::decode(call.request.as_slice()).expect("recorded request decodes"))
            .collect()
    }
}

impl Transport for MockTransport {
    fn host(&self) -> &str {
        "mock.localhost"
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
        let inner = Arc::clone(&self.inner);
        async move {
            let key = rpc.full_name();
            let bytes = request.encode_to_vec();

            let mut guard = inner.lock().unwrap();
            guard.calls.push(RecordedCall {
                rpc: key.clone(),
                request: bytes.clone(),
                metadata,
            });
            let handler = guard
                .handlers
                .get_mut(&key)
                .ok_or_else(|| Error::internal(format!("no mock handler for '{key}'")))?;
            let response = handler(bytes)?;
            drop(guard);

            Res::decode(response.as_slice())
                .map_err(|e| Error::codec(format!("mock failed to decode response: {e}")))
        }
    }
}
