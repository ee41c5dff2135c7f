//! Per-RPC callable plumbing shared by the facades: page fetchers for list
//! RPCs and operation futures wired to the operations sub-client.

use crate::model::longrunning::Operation;
use crate::operations::OperationsClient;
use vertex_ai_core::lro::{CancelOperationCall, GetOperationCall, OperationFuture, PollingPolicy};
use vertex_ai_core::method::{self, MethodRuntime};
use vertex_ai_core::options::{CallOptions, Metadata};
use vertex_ai_core::pager::{PageFetcher, PageRequest, PageResponse};
use vertex_ai_core::rpc::RpcDescriptor;
use vertex_ai_core::transport::{ApiMessage, Transport};

/// Builds the callable a pager re-invokes for follow-up pages. Every page
/// fetch goes through the full method pipeline, so per-page retries follow
/// the caller's policy.
pub(crate) fn page_fetcher<T, Req, Res>(
    transport: T,
    rpc: &'static RpcDescriptor,
    runtime: MethodRuntime,
    options: CallOptions,
) -> PageFetcher<Req, Res>
where
    T: Transport,
    Req: ApiMessage + PageRequest,
    Res: ApiMessage + PageResponse,
{
    Box::new(move |request, metadata| {
        let transport = transport.clone();
        let runtime = runtime.clone();
        let mut options = options.clone();
        options.metadata = metadata;
        Box::pin(async move { method::invoke(&transport, rpc, request, options, &runtime).await })
    })
}

/// Wraps an operation handle and the operations sub-client into a typed
/// future.
pub(crate) fn operation_future<T, R, M>(
    operations: OperationsClient<T>,
    polling: PollingPolicy,
    operation: Operation,
    metadata: Metadata,
) -> OperationFuture<Operation, R, M>
where
    T: Transport,
    R: prost::Message + prost::Name + Default,
    M: prost::Message + prost::Name + Default,
{
    let get: GetOperationCall<Operation> = {
        let operations = operations.clone();
        Box::new(move |name, metadata| {
            let operations = operations.clone();
            Box::pin(async move {
                let options = CallOptions {
                    metadata,
                    ..CallOptions::default()
                };
                operations.get_operation(name, options).await
            })
        })
    };

    let cancel: CancelOperationCall = Box::new(move |name, metadata| {
        let operations = operations.clone();
        Box::pin(async move {
            let options = CallOptions {
                metadata,
                ..CallOptions::default()
            };
            operations.cancel_operation(name, options).await
        })
    });

    OperationFuture::new(operation, get, cancel, polling, metadata)
}
