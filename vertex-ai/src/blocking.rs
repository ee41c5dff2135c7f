//! # Blocking Clients
//!
//! Synchronous projections of the service facades. Each blocking client owns
//! a dedicated current-thread runtime and drives the async client's futures
//! to completion; the runtime pipeline itself is not duplicated. Pagers come
//! back as blocking iterators and long-running operations as blocking
//! futures.
//!
//! Construct these from synchronous code only; building one inside an async
//! context would block its executor.

use crate::job_service;
use crate::model::job::{
    BatchPredictionJob, CancelBatchPredictionJobRequest, CancelCustomJobRequest,
    CreateBatchPredictionJobRequest, CreateCustomJobRequest, CustomJob,
    DeleteBatchPredictionJobRequest, DeleteCustomJobRequest, GetBatchPredictionJobRequest,
    GetCustomJobRequest, ListBatchPredictionJobsRequest, ListCustomJobsRequest,
    ListCustomJobsResponse,
};
use crate::model::job::ListBatchPredictionJobsResponse;
use crate::model::longrunning::Operation;
use crate::model::study::{
    CreateStudyRequest, CreateTrialRequest, DeleteStudyRequest, DeleteTrialRequest,
    GetStudyRequest, GetTrialRequest, ListStudiesRequest, ListStudiesResponse, ListTrialsRequest,
    ListTrialsResponse, LookupStudyRequest, Study, SuggestTrialsMetadata, SuggestTrialsRequest,
    SuggestTrialsResponse, Trial,
};
use crate::model::common::{DeleteOperationMetadata, Empty};
use crate::vizier_service;
use std::sync::Arc;
use tokio::runtime::Runtime;
use vertex_ai_core::blocking::{BlockingOperationFuture, BlockingPager};
use vertex_ai_core::endpoint::ClientOptions;
use vertex_ai_core::error::Error;
use vertex_ai_core::options::CallOptions;
use vertex_ai_core::transport::Transport;
use vertex_ai_core::transport::grpc::GrpcTransport;

pub type ListCustomJobsPager = BlockingPager<ListCustomJobsRequest, ListCustomJobsResponse>;
pub type ListBatchPredictionJobsPager =
    BlockingPager<ListBatchPredictionJobsRequest, ListBatchPredictionJobsResponse>;
pub type ListStudiesPager = BlockingPager<ListStudiesRequest, ListStudiesResponse>;
pub type ListTrialsPager = BlockingPager<ListTrialsRequest, ListTrialsResponse>;
pub type DeleteJobOperation = BlockingOperationFuture<Operation, Empty, DeleteOperationMetadata>;
pub type SuggestTrialsOperation =
    BlockingOperationFuture<Operation, SuggestTrialsResponse, SuggestTrialsMetadata>;

fn blocking_runtime() -> Result<Arc<Runtime>, Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map(Arc::new)
        .map_err(|e| Error::internal(format!("failed to build the blocking runtime: {e}")))
}

/// Blocking counterpart of [`job_service::JobServiceClient`].
#[derive(Debug)]
pub struct JobServiceClient<T = GrpcTransport> {
    inner: job_service::JobServiceClient<T>,
    runtime: Arc<Runtime>,
}

impl JobServiceClient<GrpcTransport> {
    pub fn connect(options: ClientOptions) -> Result<Self, Error> {
        let runtime = blocking_runtime()?;
        let inner = runtime.block_on(job_service::JobServiceClient::connect(options))?;
        Ok(Self { inner, runtime })
    }
}

impl<T: Transport> JobServiceClient<T> {
    pub fn from_transport(transport: T) -> Result<Self, Error> {
        Ok(Self {
            inner: job_service::JobServiceClient::from_transport(transport),
            runtime: blocking_runtime()?,
        })
    }

    pub fn create_custom_job(
        &self,
        request: Option<CreateCustomJobRequest>,
        parent: Option<String>,
        custom_job: Option<CustomJob>,
        options: CallOptions,
    ) -> Result<CustomJob, Error> {
        self.runtime
            .block_on(self.inner.create_custom_job(request, parent, custom_job, options))
    }

    pub fn get_custom_job(
        &self,
        request: Option<GetCustomJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<CustomJob, Error> {
        self.runtime
            .block_on(self.inner.get_custom_job(request, name, options))
    }

    pub fn list_custom_jobs(
        &self,
        request: Option<ListCustomJobsRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListCustomJobsPager, Error> {
        let pager = self
            .runtime
            .block_on(self.inner.list_custom_jobs(request, parent, options))?;
        Ok(BlockingPager::new(pager, self.runtime.clone()))
    }

    pub fn delete_custom_job(
        &self,
        request: Option<DeleteCustomJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<DeleteJobOperation, Error> {
        let operation = self
            .runtime
            .block_on(self.inner.delete_custom_job(request, name, options))?;
        Ok(BlockingOperationFuture::new(operation, self.runtime.clone()))
    }

    pub fn cancel_custom_job(
        &self,
        request: Option<CancelCustomJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        self.runtime
            .block_on(self.inner.cancel_custom_job(request, name, options))
    }

    pub fn create_batch_prediction_job(
        &self,
        request: Option<CreateBatchPredictionJobRequest>,
        parent: Option<String>,
        batch_prediction_job: Option<BatchPredictionJob>,
        options: CallOptions,
    ) -> Result<BatchPredictionJob, Error> {
        self.runtime.block_on(self.inner.create_batch_prediction_job(
            request,
            parent,
            batch_prediction_job,
            options,
        ))
    }

    pub fn get_batch_prediction_job(
        &self,
        request: Option<GetBatchPredictionJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<BatchPredictionJob, Error> {
        self.runtime
            .block_on(self.inner.get_batch_prediction_job(request, name, options))
    }

    pub fn list_batch_prediction_jobs(
        &self,
        request: Option<ListBatchPredictionJobsRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListBatchPredictionJobsPager, Error> {
        let pager = self
            .runtime
            .block_on(self.inner.list_batch_prediction_jobs(request, parent, options))?;
        Ok(BlockingPager::new(pager, self.runtime.clone()))
    }

    pub fn delete_batch_prediction_job(
        &self,
        request: Option<DeleteBatchPredictionJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<DeleteJobOperation, Error> {
        let operation = self
            .runtime
            .block_on(self.inner.delete_batch_prediction_job(request, name, options))?;
        Ok(BlockingOperationFuture::new(operation, self.runtime.clone()))
    }

    pub fn cancel_batch_prediction_job(
        &self,
        request: Option<CancelBatchPredictionJobRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        self.runtime
            .block_on(self.inner.cancel_batch_prediction_job(request, name, options))
    }
}

/// Blocking counterpart of [`vizier_service::VizierServiceClient`].
#[derive(Debug)]
pub struct VizierServiceClient<T = GrpcTransport> {
    inner: vizier_service::VizierServiceClient<T>,
    runtime: Arc<Runtime>,
}

impl VizierServiceClient<GrpcTransport> {
    pub fn connect(options: ClientOptions) -> Result<Self, Error> {
        let runtime = blocking_runtime()?;
        let inner = runtime.block_on(vizier_service::VizierServiceClient::connect(options))?;
        Ok(Self { inner, runtime })
    }
}

impl<T: Transport> VizierServiceClient<T> {
    pub fn from_transport(transport: T) -> Result<Self, Error> {
        Ok(Self {
            inner: vizier_service::VizierServiceClient::from_transport(transport),
            runtime: blocking_runtime()?,
        })
    }

    pub fn create_study(
        &self,
        request: Option<CreateStudyRequest>,
        parent: Option<String>,
        study: Option<Study>,
        options: CallOptions,
    ) -> Result<Study, Error> {
        self.runtime
            .block_on(self.inner.create_study(request, parent, study, options))
    }

    pub fn get_study(
        &self,
        request: Option<GetStudyRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<Study, Error> {
        self.runtime
            .block_on(self.inner.get_study(request, name, options))
    }

    pub fn list_studies(
        &self,
        request: Option<ListStudiesRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListStudiesPager, Error> {
        let pager = self
            .runtime
            .block_on(self.inner.list_studies(request, parent, options))?;
        Ok(BlockingPager::new(pager, self.runtime.clone()))
    }

    pub fn delete_study(
        &self,
        request: Option<DeleteStudyRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        self.runtime
            .block_on(self.inner.delete_study(request, name, options))
    }

    pub fn lookup_study(
        &self,
        request: Option<LookupStudyRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<Study, Error> {
        self.runtime
            .block_on(self.inner.lookup_study(request, parent, options))
    }

    pub fn suggest_trials(
        &self,
        request: Option<SuggestTrialsRequest>,
        parent: Option<String>,
        suggestion_count: Option<i32>,
        client_id: Option<String>,
        options: CallOptions,
    ) -> Result<SuggestTrialsOperation, Error> {
        let operation = self.runtime.block_on(self.inner.suggest_trials(
            request,
            parent,
            suggestion_count,
            client_id,
            options,
        ))?;
        Ok(BlockingOperationFuture::new(operation, self.runtime.clone()))
    }

    pub fn create_trial(
        &self,
        request: Option<CreateTrialRequest>,
        parent: Option<String>,
        trial: Option<Trial>,
        options: CallOptions,
    ) -> Result<Trial, Error> {
        self.runtime
            .block_on(self.inner.create_trial(request, parent, trial, options))
    }

    pub fn get_trial(
        &self,
        request: Option<GetTrialRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<Trial, Error> {
        self.runtime
            .block_on(self.inner.get_trial(request, name, options))
    }

    pub fn list_trials(
        &self,
        request: Option<ListTrialsRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListTrialsPager, Error> {
        let pager = self
            .runtime
            .block_on(self.inner.list_trials(request, parent, options))?;
        Ok(BlockingPager::new(pager, self.runtime.clone()))
    }

    pub fn delete_trial(
        &self,
        request: Option<DeleteTrialRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<(), Error> {
        self.runtime
            .block_on(self.inner.delete_trial(request, name, options))
    }
}
