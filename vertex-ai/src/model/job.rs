//! JobService records: custom jobs and batch prediction jobs, with their
//! request/response pairs.

use super::common::Status;
use super::enum_as_name;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vertex_ai_core::pager::{PageRequest, PageResponse};

/// Lifecycle state shared by job resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum JobState {
    Unspecified = 0,
    Queued = 1,
    Pending = 2,
    Running = 3,
    Succeeded = 4,
    Failed = 5,
    Cancelling = 6,
    Cancelled = 7,
    Paused = 8,
    Expired = 9,
}

impl JobState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            JobState::Unspecified => "JOB_STATE_UNSPECIFIED",
            JobState::Queued => "JOB_STATE_QUEUED",
            JobState::Pending => "JOB_STATE_PENDING",
            JobState::Running => "JOB_STATE_RUNNING",
            JobState::Succeeded => "JOB_STATE_SUCCEEDED",
            JobState::Failed => "JOB_STATE_FAILED",
            JobState::Cancelling => "JOB_STATE_CANCELLING",
            JobState::Cancelled => "JOB_STATE_CANCELLED",
            JobState::Paused => "JOB_STATE_PAUSED",
            JobState::Expired => "JOB_STATE_EXPIRED",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "JOB_STATE_UNSPECIFIED" => Some(JobState::Unspecified),
            "JOB_STATE_QUEUED" => Some(JobState::Queued),
            "JOB_STATE_PENDING" => Some(JobState::Pending),
            "JOB_STATE_RUNNING" => Some(JobState::Running),
            "JOB_STATE_SUCCEEDED" => Some(JobState::Succeeded),
            "JOB_STATE_FAILED" => Some(JobState::Failed),
            "JOB_STATE_CANCELLING" => Some(JobState::Cancelling),
            "JOB_STATE_CANCELLED" => Some(JobState::Cancelled),
            "JOB_STATE_PAUSED" => Some(JobState::Paused),
            "JOB_STATE_EXPIRED" => Some(JobState::Expired),
            _ => None,
        }
    }
}

enum_as_name!(job_state_name, super::JobState);

/// A user-submitted training job.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomJob {
    /// Server-assigned resource name.
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub display_name: String,
    #[prost(enumeration = "JobState", tag = "5")]
    #[serde(with = "job_state_name")]
    pub state: i32,
    #[prost(message, optional, tag = "10")]
    pub error: Option<Status>,
    #[prost(map = "string, string", tag = "11")]
    pub labels: HashMap<String, String>,
}

impl prost::Name for CustomJob {
    const NAME: &'static str = "CustomJob";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

/// A batch prediction job over a trained model.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchPredictionJob {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub display_name: String,
    /// Resource name of the model producing the predictions.
    #[prost(string, tag = "3")]
    pub model: String,
    #[prost(enumeration = "JobState", tag = "9")]
    #[serde(with = "job_state_name")]
    pub state: i32,
    #[prost(message, optional, tag = "10")]
    pub error: Option<Status>,
}

impl prost::Name for BatchPredictionJob {
    const NAME: &'static str = "BatchPredictionJob";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCustomJobRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(message, optional, tag = "2")]
    pub custom_job: Option<CustomJob>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetCustomJobRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListCustomJobsRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(string, tag = "2")]
    pub filter: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    #[prost(string, tag = "4")]
    pub page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListCustomJobsResponse {
    #[prost(message, repeated, tag = "1")]
    pub custom_jobs: Vec<CustomJob>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteCustomJobRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CancelCustomJobRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBatchPredictionJobRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(message, optional, tag = "2")]
    pub batch_prediction_job: Option<BatchPredictionJob>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetBatchPredictionJobRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListBatchPredictionJobsRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(string, tag = "2")]
    pub filter: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    #[prost(string, tag = "4")]
    pub page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListBatchPredictionJobsResponse {
    #[prost(message, repeated, tag = "1")]
    pub batch_prediction_jobs: Vec<BatchPredictionJob>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteBatchPredictionJobRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CancelBatchPredictionJobRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

impl PageRequest for ListCustomJobsRequest {
    fn set_page_token(&mut self, token: String) {
        self.page_token = token;
    }
}

impl PageResponse for ListCustomJobsResponse {
    type Item = CustomJob;

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn into_items(self) -> Vec<CustomJob> {
        self.custom_jobs
    }
}

impl PageRequest for ListBatchPredictionJobsRequest {
    fn set_page_token(&mut self, token: String) {
        self.page_token = token;
    }
}

impl PageResponse for ListBatchPredictionJobsResponse {
    type Item = BatchPredictionJob;

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn into_items(self) -> Vec<BatchPredictionJob> {
        self.batch_prediction_jobs
    }
}
