//! # Operations Sub-Client
//!
//! Pass-through client for the operations service owning this surface's
//! long-running work. Lazily constructed and cached by each facade; the LRO
//! future polls and cancels through it. Calls route on the operation `name`
//! like any other RPC.

use crate::model::common::Empty;
use crate::model::longrunning::{
    CancelOperationRequest, DeleteOperationRequest, GetOperationRequest, ListOperationsRequest,
    ListOperationsResponse, Operation, WaitOperationRequest,
};
use crate::rpcs;
use crate::stub;
use std::time::Duration;
use vertex_ai_core::error::Error;
use vertex_ai_core::method::{self, MethodRuntime};
use vertex_ai_core::options::CallOptions;
use vertex_ai_core::pager::Pager;
use vertex_ai_core::transport::Transport;
use vertex_ai_core::transport::grpc::GrpcTransport;

pub type ListOperationsPager = Pager<ListOperationsRequest, ListOperationsResponse>;

/// Client for `google.longrunning.Operations`.
#[derive(Debug, Clone)]
pub struct OperationsClient<T = GrpcTransport> {
    transport: T,
    runtime: MethodRuntime,
}

impl<T: Transport> OperationsClient<T> {
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport,
            runtime: MethodRuntime::new().with_client_info(crate::default_client_info()),
        }
    }

    pub fn with_method_runtime(mut self, runtime: MethodRuntime) -> Self {
        self.runtime = runtime;
        self
    }

    /// Latest state of the named operation.
    pub async fn get_operation(
        &self,
        name: impl Into<String>,
        options: CallOptions,
    ) -> Result<Operation, Error> {
        let request = GetOperationRequest { name: name.into() };
        method::invoke(
            &self.transport,
            &rpcs::operations::GET_OPERATION,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    /// Requests cancellation; the operation's terminal state is
    /// authoritative.
    pub async fn cancel_operation(
        &self,
        name: impl Into<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        let request = CancelOperationRequest { name: name.into() };
        let Empty {} = method::invoke(
            &self.transport,
            &rpcs::operations::CANCEL_OPERATION,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(())
    }

    /// Removes the record of a finished operation.
    pub async fn delete_operation(
        &self,
        name: impl Into<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        let request = DeleteOperationRequest { name: name.into() };
        let Empty {} = method::invoke(
            &self.transport,
            &rpcs::operations::DELETE_OPERATION,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(())
    }

    /// Waits server-side until the operation is done or `timeout` elapses,
    /// returning the latest state either way.
    pub async fn wait_operation(
        &self,
        name: impl Into<String>,
        timeout: Option<Duration>,
        options: CallOptions,
    ) -> Result<Operation, Error> {
        let request = WaitOperationRequest {
            name: name.into(),
            timeout: timeout.map(Into::into),
        };
        method::invoke(
            &self.transport,
            &rpcs::operations::WAIT_OPERATION,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    /// Lists operations under the named owning resource, optionally
    /// filtered.
    pub async fn list_operations(
        &self,
        name: impl Into<String>,
        filter: impl Into<String>,
        options: CallOptions,
    ) -> Result<ListOperationsPager, Error> {
        let request = ListOperationsRequest {
            name: name.into(),
            filter: filter.into(),
            ..Default::default()
        };
        let first = method::invoke(
            &self.transport,
            &rpcs::operations::LIST_OPERATIONS,
            request.clone(),
            options.clone(),
            &self.runtime,
        )
        .await?;
        let fetch = stub::page_fetcher(
            self.transport.clone(),
            &rpcs::operations::LIST_OPERATIONS,
            self.runtime.clone(),
            options.clone(),
        );
        Ok(Pager::new(fetch, request, first, options.metadata))
    }
}
