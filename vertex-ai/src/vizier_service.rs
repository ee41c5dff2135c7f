//! # VizierService
//!
//! Typed client for `google.cloud.aiplatform.v1.VizierService`: studies,
//! trials, and trial suggestion. Follows the same conventions as
//! [`crate::job_service`]; `suggest_trials` is the long-running entry point.

use crate::model::study::{
    CreateStudyRequest, CreateTrialRequest, DeleteStudyRequest, DeleteTrialRequest,
    GetStudyRequest, GetTrialRequest, ListStudiesRequest, ListStudiesResponse, ListTrialsRequest,
    ListTrialsResponse, LookupStudyRequest, Study, SuggestTrialsMetadata, SuggestTrialsRequest,
    SuggestTrialsResponse, Trial,
};
use crate::model::common::Empty;
use crate::model::longrunning::Operation;
use crate::operations::OperationsClient;
use crate::rpcs::vizier_service as rpcs;
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

pub type ListStudiesPager = Pager<ListStudiesRequest, ListStudiesResponse>;
pub type ListTrialsPager = Pager<ListTrialsRequest, ListTrialsResponse>;
pub type SuggestTrialsOperation =
    OperationFuture<Operation, SuggestTrialsResponse, SuggestTrialsMetadata>;

/// Client for `google.cloud.aiplatform.v1.VizierService`.
#[derive(Debug, Clone)]
pub struct VizierServiceClient<T = GrpcTransport> {
    transport: T,
    runtime: MethodRuntime,
    polling: PollingPolicy,
    operations: OnceCell<OperationsClient<T>>,
}

impl VizierServiceClient<GrpcTransport> {
    pub async fn connect(options: ClientOptions) -> Result<Self, Error> {
        if options.transport != TransportKind::Grpc {
            return Err(Error::invalid_argument(format!(
                "cannot connect a '{}' transport here; construct it and use from_transport",
                options.transport.label()
            )));
        }
        let transport = GrpcTransport::connect(&options).await?;
        tracing::debug!(host = transport.host(), "VizierService client connected");
        Ok(Self::from_transport(transport))
    }
}

impl<T: Transport> VizierServiceClient<T> {
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport,
            runtime: MethodRuntime::new().with_client_info(crate::default_client_info()),
            polling: PollingPolicy::default(),
            operations: OnceCell::new(),
        }
    }

    pub fn with_method_runtime(mut self, runtime: MethodRuntime) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_polling_policy(mut self, polling: PollingPolicy) -> Self {
        self.polling = polling;
        self
    }

    pub fn operations_client(&self) -> OperationsClient<T> {
        self.operations
            .get_or_init(|| {
                OperationsClient::from_transport(self.transport.clone())
                    .with_method_runtime(self.runtime.clone())
            })
            .clone()
    }

    pub async fn create_study(
        &self,
        request: Option<CreateStudyRequest>,
        parent: Option<String>,
        study: Option<Study>,
        options: CallOptions,
    ) -> Result<Study, Error> {
        let any_flattened = parent.is_some() || study.is_some();
        let request = coerce(request, any_flattened, |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
            if let Some(study) = study {
                r.study = Some(study);
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::CREATE_STUDY,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn get_study(
        &self,
        request: Option<GetStudyRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<Study, Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::GET_STUDY,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn list_studies(
        &self,
        request: Option<ListStudiesRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListStudiesPager, Error> {
        let request = coerce(request, parent.is_some(), |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
        })?;
        let first = method::invoke(
            &self.transport,
            &rpcs::LIST_STUDIES,
            request.clone(),
            options.clone(),
            &self.runtime,
        )
        .await?;
        let fetch = stub::page_fetcher(
            self.transport.clone(),
            &rpcs::LIST_STUDIES,
            self.runtime.clone(),
            options.clone(),
        );
        Ok(Pager::new(fetch, request, first, options.metadata))
    }

    pub async fn delete_study(
        &self,
        request: Option<DeleteStudyRequest>,
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
            &rpcs::DELETE_STUDY,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(())
    }

    /// Looks a study up by its display name under a location.
    pub async fn lookup_study(
        &self,
        request: Option<LookupStudyRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<Study, Error> {
        let request = coerce(request, parent.is_some(), |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::LOOKUP_STUDY,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    /// Asks the study for trial suggestions; resolves once the suggestions
    /// are computed.
    pub async fn suggest_trials(
        &self,
        request: Option<SuggestTrialsRequest>,
        parent: Option<String>,
        suggestion_count: Option<i32>,
        client_id: Option<String>,
        options: CallOptions,
    ) -> Result<SuggestTrialsOperation, Error> {
        let any_flattened =
            parent.is_some() || suggestion_count.is_some() || client_id.is_some();
        let request = coerce(request, any_flattened, |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
            if let Some(suggestion_count) = suggestion_count {
                r.suggestion_count = suggestion_count;
            }
            if let Some(client_id) = client_id {
                r.client_id = client_id;
            }
        })?;
        let metadata = options.metadata.clone();
        let operation: Operation = method::invoke(
            &self.transport,
            &rpcs::SUGGEST_TRIALS,
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

    pub async fn create_trial(
        &self,
        request: Option<CreateTrialRequest>,
        parent: Option<String>,
        trial: Option<Trial>,
        options: CallOptions,
    ) -> Result<Trial, Error> {
        let any_flattened = parent.is_some() || trial.is_some();
        let request = coerce(request, any_flattened, |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
            if let Some(trial) = trial {
                r.trial = Some(trial);
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::CREATE_TRIAL,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn get_trial(
        &self,
        request: Option<GetTrialRequest>,
        name: Option<String>,
        options: CallOptions,
    ) -> Result<Trial, Error> {
        let request = coerce(request, name.is_some(), |r| {
            if let Some(name) = name {
                r.name = name;
            }
        })?;
        method::invoke(
            &self.transport,
            &rpcs::GET_TRIAL,
            request,
            options,
            &self.runtime,
        )
        .await
    }

    pub async fn list_trials(
        &self,
        request: Option<ListTrialsRequest>,
        parent: Option<String>,
        options: CallOptions,
    ) -> Result<ListTrialsPager, Error> {
        let request = coerce(request, parent.is_some(), |r| {
            if let Some(parent) = parent {
                r.parent = parent;
            }
        })?;
        let first = method::invoke(
            &self.transport,
            &rpcs::LIST_TRIALS,
            request.clone(),
            options.clone(),
            &self.runtime,
        )
        .await?;
        let fetch = stub::page_fetcher(
            self.transport.clone(),
            &rpcs::LIST_TRIALS,
            self.runtime.clone(),
            options.clone(),
        );
        Ok(Pager::new(fetch, request, first, options.metadata))
    }

    pub async fn delete_trial(
        &self,
        request: Option<DeleteTrialRequest>,
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
            &rpcs::DELETE_TRIAL,
            request,
            options,
            &self.runtime,
        )
        .await?;
        Ok(())
    }
}
