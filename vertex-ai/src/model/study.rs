//! VizierService records: studies, trials, and the suggestion surface.

use super::common::GenericOperationMetadata;
use super::enum_as_name;
use serde::{Deserialize, Serialize};
use vertex_ai_core::pager::{PageRequest, PageResponse};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum StudyState {
    Unspecified = 0,
    Active = 1,
    Inactive = 2,
    Completed = 3,
}

impl StudyState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            StudyState::Unspecified => "STATE_UNSPECIFIED",
            StudyState::Active => "ACTIVE",
            StudyState::Inactive => "INACTIVE",
            StudyState::Completed => "COMPLETED",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "STATE_UNSPECIFIED" => Some(StudyState::Unspecified),
            "ACTIVE" => Some(StudyState::Active),
            "INACTIVE" => Some(StudyState::Inactive),
            "COMPLETED" => Some(StudyState::Completed),
            _ => None,
        }
    }
}

enum_as_name!(study_state_name, super::StudyState);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TrialState {
    Unspecified = 0,
    Requested = 1,
    Active = 2,
    Stopping = 3,
    Succeeded = 4,
    Infeasible = 5,
}

impl TrialState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            TrialState::Unspecified => "STATE_UNSPECIFIED",
            TrialState::Requested => "REQUESTED",
            TrialState::Active => "ACTIVE",
            TrialState::Stopping => "STOPPING",
            TrialState::Succeeded => "SUCCEEDED",
            TrialState::Infeasible => "INFEASIBLE",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "STATE_UNSPECIFIED" => Some(TrialState::Unspecified),
            "REQUESTED" => Some(TrialState::Requested),
            "ACTIVE" => Some(TrialState::Active),
            "STOPPING" => Some(TrialState::Stopping),
            "SUCCEEDED" => Some(TrialState::Succeeded),
            "INFEASIBLE" => Some(TrialState::Infeasible),
            _ => None,
        }
    }
}

enum_as_name!(trial_state_name, super::TrialState);

/// A hyperparameter study owning a set of trials.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Study {
    /// Server-assigned resource name.
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub display_name: String,
    #[prost(enumeration = "StudyState", tag = "3")]
    #[serde(with = "study_state_name")]
    pub state: i32,
}

impl prost::Name for Study {
    const NAME: &'static str = "Study";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

/// One parameter suggestion within a study.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Trial {
    #[prost(string, tag = "1")]
    pub name: String,
    /// Server-assigned identifier, unique within the study.
    #[prost(string, tag = "2")]
    pub id: String,
    #[prost(enumeration = "TrialState", tag = "3")]
    #[serde(with = "trial_state_name")]
    pub state: i32,
    /// Identifier of the worker the trial was suggested to.
    #[prost(string, tag = "9")]
    pub client_id: String,
}

impl prost::Name for Trial {
    const NAME: &'static str = "Trial";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateStudyRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(message, optional, tag = "2")]
    pub study: Option<Study>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetStudyRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListStudiesRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(string, tag = "2")]
    pub page_token: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListStudiesResponse {
    #[prost(message, repeated, tag = "1")]
    pub studies: Vec<Study>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteStudyRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

/// Looks a study up by display name under a location.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookupStudyRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(string, tag = "2")]
    pub display_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestTrialsRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    /// Number of suggestions requested.
    #[prost(int32, tag = "2")]
    pub suggestion_count: i32,
    #[prost(string, tag = "3")]
    pub client_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestTrialsResponse {
    #[prost(message, repeated, tag = "1")]
    pub trials: Vec<Trial>,
}

impl prost::Name for SuggestTrialsResponse {
    const NAME: &'static str = "SuggestTrialsResponse";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestTrialsMetadata {
    #[prost(message, optional, tag = "1")]
    pub generic_metadata: Option<GenericOperationMetadata>,
    #[prost(string, tag = "2")]
    pub client_id: String,
}

impl prost::Name for SuggestTrialsMetadata {
    const NAME: &'static str = "SuggestTrialsMetadata";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTrialRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(message, optional, tag = "2")]
    pub trial: Option<Trial>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetTrialRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTrialsRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(string, tag = "2")]
    pub page_token: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTrialsResponse {
    #[prost(message, repeated, tag = "1")]
    pub trials: Vec<Trial>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteTrialRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

impl PageRequest for ListStudiesRequest {
    fn set_page_token(&mut self, token: String) {
        self.page_token = token;
    }
}

impl PageResponse for ListStudiesResponse {
    type Item = Study;

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn into_items(self) -> Vec<Study> {
        self.studies
    }
}

impl PageRequest for ListTrialsRequest {
    fn set_page_token(&mut self, token: String) {
        self.page_token = token;
    }
}

impl PageResponse for ListTrialsResponse {
    type Item = Trial;

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn into_items(self) -> Vec<Trial> {
        self.trials
    }
}
