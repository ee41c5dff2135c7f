//! # RPC Tables
//!
//! One [`RpcDescriptor`] constant per RPC: the wire identity, the routing
//! field, and the HTTP binding consumed by the REST transport. The facades
//! never spell any of this inline.

use vertex_ai_core::rpc::{HttpRule, RpcDescriptor};

pub mod job_service {
    use super::*;

    const SERVICE: &str = "google.cloud.aiplatform.v1.JobService";

    pub const CREATE_CUSTOM_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CreateCustomJob",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*}/customJobs",
            body: Some("custom_job"),
        }),
        default_timeout_ms: None,
    };

    pub const GET_CUSTOM_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "GetCustomJob",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{name=projects/*/locations/*/customJobs/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const LIST_CUSTOM_JOBS: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "ListCustomJobs",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{parent=projects/*/locations/*}/customJobs",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const DELETE_CUSTOM_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "DeleteCustomJob",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "DELETE",
            template: "/v1/{name=projects/*/locations/*/customJobs/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const CANCEL_CUSTOM_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CancelCustomJob",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{name=projects/*/locations/*/customJobs/*}:cancel",
            body: Some("*"),
        }),
        default_timeout_ms: None,
    };

    pub const CREATE_BATCH_PREDICTION_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CreateBatchPredictionJob",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*}/batchPredictionJobs",
            body: Some("batch_prediction_job"),
        }),
        default_timeout_ms: None,
    };

    pub const GET_BATCH_PREDICTION_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "GetBatchPredictionJob",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{name=projects/*/locations/*/batchPredictionJobs/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const LIST_BATCH_PREDICTION_JOBS: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "ListBatchPredictionJobs",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{parent=projects/*/locations/*}/batchPredictionJobs",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const DELETE_BATCH_PREDICTION_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "DeleteBatchPredictionJob",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "DELETE",
            template: "/v1/{name=projects/*/locations/*/batchPredictionJobs/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const CANCEL_BATCH_PREDICTION_JOB: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CancelBatchPredictionJob",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{name=projects/*/locations/*/batchPredictionJobs/*}:cancel",
            body: Some("*"),
        }),
        default_timeout_ms: None,
    };
}

pub mod vizier_service {
    use super::*;

    const SERVICE: &str = "google.cloud.aiplatform.v1.VizierService";

    pub const CREATE_STUDY: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CreateStudy",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*}/studies",
            body: Some("study"),
        }),
        default_timeout_ms: None,
    };

    pub const GET_STUDY: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "GetStudy",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{name=projects/*/locations/*/studies/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const LIST_STUDIES: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "ListStudies",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{parent=projects/*/locations/*}/studies",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const DELETE_STUDY: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "DeleteStudy",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "DELETE",
            template: "/v1/{name=projects/*/locations/*/studies/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const LOOKUP_STUDY: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "LookupStudy",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*}/studies:lookup",
            body: Some("*"),
        }),
        default_timeout_ms: None,
    };

    pub const SUGGEST_TRIALS: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "SuggestTrials",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*/studies/*}/trials:suggest",
            body: Some("*"),
        }),
        default_timeout_ms: None,
    };

    pub const CREATE_TRIAL: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CreateTrial",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*/studies/*}/trials",
            body: Some("trial"),
        }),
        default_timeout_ms: None,
    };

    pub const GET_TRIAL: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "GetTrial",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{name=projects/*/locations/*/studies/*/trials/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const LIST_TRIALS: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "ListTrials",
        routing_field: Some("parent"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{parent=projects/*/locations/*/studies/*}/trials",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const DELETE_TRIAL: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "DeleteTrial",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "DELETE",
            template: "/v1/{name=projects/*/locations/*/studies/*/trials/*}",
            body: None,
        }),
        default_timeout_ms: None,
    };
}

pub mod operations {
    use super::*;

    const SERVICE: &str = "google.longrunning.Operations";

    pub const GET_OPERATION: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "GetOperation",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{name=projects/*/locations/*/operations/**}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const LIST_OPERATIONS: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "ListOperations",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "GET",
            template: "/v1/{name=projects/*/locations/*}/operations",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const CANCEL_OPERATION: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "CancelOperation",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{name=projects/*/locations/*/operations/**}:cancel",
            body: Some("*"),
        }),
        default_timeout_ms: None,
    };

    pub const DELETE_OPERATION: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "DeleteOperation",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "DELETE",
            template: "/v1/{name=projects/*/locations/*/operations/**}",
            body: None,
        }),
        default_timeout_ms: None,
    };

    pub const WAIT_OPERATION: RpcDescriptor = RpcDescriptor {
        service: SERVICE,
        method: "WaitOperation",
        routing_field: Some("name"),
        http: Some(HttpRule {
            method: "POST",
            template: "/v1/{name=projects/*/locations/*/operations/**}:wait",
            body: Some("*"),
        }),
        default_timeout_ms: None,
    };
}
