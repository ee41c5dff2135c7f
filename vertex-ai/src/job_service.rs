//! # JobService
//!
//! Typed client for `google.cloud.aiplatform.v1.JobService`: custom jobs and
//! batch prediction jobs.
//!
//! Every method accepts either a full request record or the RPC's flattened
//! convenience fields, never both, plus a [`CallOptions`] for per-call retry,
//! timeout, and metadata. List RPCs return a [`Pager`]; delete RPCs return an
//! operation future that resolves once the server finishes the work.
//!
//! The blocking projection lives in [`crate::blocking`].

use crate::model::common::{DeleteOperationMetadata, Empty};
use crate::model::job::{
    BatchPredictionJob, CancelBatchPredictionJobRequest, CancelCustomJobRequest,
    CreateBatchPredictionJobRequest, CreateCustomJobRequest, CustomJob,
    DeleteBatchPredictionJobRequest, DeleteCustomJobRequest, GetBatchPredictionJobRequest,
    GetCustomJobRequest, ListBatchPredictionJobsRequest, ListBatchPredictionJobsResponse,
    ListCustomJobsRequest, ListCustomJobsResponse,
};
use crate::model::longrunning::Operation;
use crate::operations::OperationsClient;
use crate::rpcs::job_service as rpcs;
use crate::stub;
use once_cell::sync::OnceCell;
use vertex_ai_core::coerce::coerce;
use vertex_ai_core::endpoint::ClientOptions;
use vertex_ai_core::error::Error;
use vertex_ai_core::lro::{OperationFuture, PollingPolicy};
use vertex_ai_core::method::{self, MethodRuntime};
use vertex_ai_core::options::CallOptions;
use vertex_ai_core::pager::Pager;
use vertex_ai_core::rpc::TransportKind;
use vertex_ai_core::transport::Transport;
use vertex_ai_core::transport::grpc::GrpcTransport;

pub type ListCustomJobsPager = Pager<ListCustomJobsRequest, ListCustomJobsResponse>;
pub type ListBatchPredictionJobsPager =
    Pager<ListBatchPredictionJobsRequest, ListBatchPredictionJobsResponse>;
pub type DeleteCustomJobOperation = OperationFuture<Operation, Empty, DeleteOperationMetadata>;
pub type DeleteBatchPredictionJobOperation =
    OperationFuture<Operation, Empty, DeleteOperationMetadata>;

/// Client for `google.cloud.aiplatform.v1.JobService`.
#[derive(Debug, Clone)]
pub struct JobServiceClient<T = GrpcTransport> {
    transport: T,
    runtime: MethodRuntime,
    polling: PollingPolicy,
    operations: OnceCell<OperationsClient<T>>,
}

impl JobServiceClient<GrpcTransport> {
    /// Resolves the endpoint per [`ClientOptions`] and the environment
    /// toggles, then connects over gRPC.
    ///
    /// The REST transport owns no wire client; build one with
    /// [`RestTransport::new`](vertex_ai_core::transport::rest::RestTransport)
    /// and use [`from_transport`](Self::from_transport).
    pub async fn connect(options: ClientOptions) -> Result<Self, Error> {
        if options.transport != TransportKind::Grpc {
            return Err(Error::invalid_argument(format!(
                "cannot connect a '{}' transport here; construct it and use from_transport",
                options.transport.label()
            )));
        }
        let transport = GrpcTransport::connect(&options).await?;
        tracing::debug!(host = transport.host(), "JobService client connected");
        Ok(Self::from_transport(transport))
    }
}

impl<T: Transport> JobServiceClient<T> {
    /// Builds a client over an existing transport.
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport,
            runtime: MethodRuntime::new().with_client_info(crate::default_client_info()),
            polling: PollingPolicy::default(),
            operations: OnceCell::new(),
        }
    }

    /// Replaces the method runtime: default timeout, client info,
    /// interceptors.
    pub fn with_method_runtime(mut self, runtime: MethodRuntime) -> Self {
        self.runtime = runtime;
        self
    }

    /// Polling cadence for the operation futures this client returns.
    pub fn with_polling_policy(mut self, polling: PollingPolicy) -> Self {
        self.polling = polling;
        self
    }

    /// The operations sub-client used by this facade's operation futures.
    pub fn operations_client(&self) -> OperationsClient<T> {
        self.operations
            .get_or_init(|| {
                OperationsClient::from_transport(self.transport.clone())
                    .with_method_runtime(self.runtime.clone())
            })
            .clone()
    }

    pub async fn create_custom_job(
        &self,
        request: Option<CreateCustomJobRequest>,
        parent: Option<String>,
        custom_job: Option<CustomJob>,
        options: CallOptions,
    ) -> Result<CustomJob, Error> {
        let any_flattened = parent.is_some() || custom_job.is_some();
        let request = coerce(request, any_flattened, |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
            if let Some(custom_job) = custom_job {
                r.custom_job = Some(custom_job);
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::CREATE_CUSTOM_JOB,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn get_custom_job(
        &self,
        request: Option<GetCustomJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<CustomJob, Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::GET_CUSTOM_JOB,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn list_custom_jobs(
        &self,
        request: Option<ListCustomJobsRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListCustomJobsPager, Error> {
        let request = coerce(request, parent.is_some(), |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
        })?;
        let first = method::invoke(
            &self.transport,
            &rpcs::LIST_CUSTOM_JOBS,
            request.clone(),
            options.clone(),
            &self.runtime,
        )
        .await?;
        let fetch = stub::page_fetcher(
            self.transport.clone(),
            &rpcs::LIST_CUSTOM_JOBS,
            self.runtime.clone(),
            options.clone(),
        );
        Ok(Pager::new(fetch, request, first, options.metadata))
    }

    pub async fn delete_custom_job(
        &self,
        request: Option<DeleteCustomJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<DeleteCustomJobOperation, Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        let metadata = options.metadata.clone();
        let operation: Operation = method::invoke(
            &self.transport,
            &rpcs::DELETE_CUSTOM_JOB,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(stub::operation_future(
            self.operations_client(),
            self.polling.clone(),
            operation,
            metadata,
        ))
    }

    /// Best-effort cancellation; poll the job to observe its terminal state.
    pub async fn cancel_custom_job(
        &self,
        request: Option<CancelCustomJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        let Empty {} = method::invoke(
            &self.transport,
            &rpcs::CANCEL_CUSTOM_JOB,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(())
    }

    pub async fn create_batch_prediction_job(
        &self,
        request: Option<CreateBatchPredictionJobRequest>,
        parent: Option<String>,
        batch_prediction_job: Option<BatchPredictionJob>,
        options: CallOptions,
    ) -> Result<BatchPredictionJob, Error> {
        let any_flattened = parent.is_some() || batch_prediction_job.is_some();
        let request = coerce(request, any_flattened, |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
            if let Some(batch_prediction_job) = batch_prediction_job {
                r.batch_prediction_job = Some(batch_prediction_job);
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::CREATE_BATCH_PREDICTION_JOB,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn get_batch_prediction_job(
        &self,
        request: Option<GetBatchPredictionJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<BatchPredictionJob, Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::GET_BATCH_PREDICTION_JOB,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn list_batch_prediction_jobs(
        &self,
        request: Option<ListBatchPredictionJobsRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListBatchPredictionJobsPager, Error> {
        let request = coerce(request, parent.is_some(), |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
        })?;
        let first = method::invoke(
            &self.transport,
            &rpcs::LIST_BATCH_PREDICTION_JOBS,
            request.clone(),
            options.clone(),
            &self.runtime,
        )
        .await?;
        let fetch = stub::page_fetcher(
            self.transport.clone(),
            &rpcs::LIST_BATCH_PREDICTION_JOBS,
            self.runtime.clone(),
            options.clone(),
        );
        Ok(Pager::new(fetch, request, first, options.metadata))
    }

    pub async fn delete_batch_prediction_job(
        &self,
        request: Option<DeleteBatchPredictionJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<DeleteBatchPredictionJobOperation, Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        let metadata = options.metadata.clone();
        let operation: Operation = method::invoke(
            &self.transport,
            &rpcs::DELETE_BATCH_PREDICTION_JOB,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(stub::operation_future(
            self.operations_client(),
            self.polling.clone(),
            operation,
            metadata,
        ))
    }

    /// Best-effort cancellation; poll the job to observe its terminal state.
    pub async fn cancel_batch_prediction_job(
        &self,
        request: Option<CancelBatchPredictionJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        let Empty {} = method::invoke(
            &self.transport,
            &rpcs::CANCEL_BATCH_PREDICTION_JOB,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(())
    }
}
