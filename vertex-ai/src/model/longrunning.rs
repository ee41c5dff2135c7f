//! The operations surface: the `Operation` handle returned by long-running
//! RPCs and the request records of the operations sub-client.

use super::common::{Any, Duration, Status};
use serde::{Deserialize, Serialize};
use vertex_ai_core::lro::OperationState;
use vertex_ai_core::pager::{PageRequest, PageResponse};

/// Handle to a server-side task. `done = true` means terminal, with exactly
/// one of the error status or the response payload set.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub metadata: Option<Any>,
    #[prost(bool, tag = "3")]
    pub done: bool,
    #[prost(oneof = "operation::Result", tags = "4, 5")]
    #[serde(flatten)]
    pub result: Option<operation::Result>,
}

pub mod operation {
    use super::{Any, Status};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Result {
        #[prost(message, tag = "4")]
        Error(Status),
        #[prost(message, tag = "5")]
        Response(Any),
    }
}

impl OperationState for Operation {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn error_status(&self) -> Option<(i32, String)> {
        match &self.result {
            Some(operation::Result::Error(status)) => Some((status.code, status.message.clone())),
            _ => None,
        }
    }

    fn response_any(&self) -> Option<(&str, &[u8])> {
        match &self.result {
            Some(operation::Result::Response(any)) => {
                Some((any.type_url.as_str(), any.value.as_slice()))
            }
            _ => None,
        }
    }

    fn metadata_any(&self) -> Option<(&str, &[u8])> {
        self.metadata
            .as_ref()
            .map(|any| (any.type_url.as_str(), any.value.as_slice()))
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetOperationRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListOperationsRequest {
    #[prost(string, tag = "1")]
    pub filter: String,
    #[prost(int32, tag = "2")]
    pub page_size: i32,
    #[prost(string, tag = "3")]
    pub page_token: String,
    /// The operation collection's owning resource.
    #[prost(string, tag = "4")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListOperationsResponse {
    #[prost(message, repeated, tag = "1")]
    pub operations: Vec<Operation>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CancelOperationRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteOperationRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaitOperationRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub timeout: Option<Duration>,
}

impl PageRequest for ListOperationsRequest {
    fn set_page_token(&mut self, token: String) {
        self.page_token = token;
    }
}

impl PageResponse for ListOperationsResponse {
    type Item = Operation;

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn into_items(self) -> Vec<Operation> {
        self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::Empty;

    #[test]
    fn terminal_operation_exposes_exactly_one_payload() {
        let failed = Operation {
            name: "op/1".into(),
            done: true,
            result: Some(operation::Result::Error(Status {
                code: 13,
                message: "boom".into(),
                details: Vec::new(),
            })),
            ..Default::default()
        };
        assert_eq!(failed.error_status(), Some((13, "boom".into())));
        assert!(failed.response_any().is_none());

        let succeeded = Operation {
            name: "op/2".into(),
            done: true,
            result: Some(operation::Result::Response(Any::pack(&Empty {}))),
            ..Default::default()
        };
        assert!(succeeded.error_status().is_none());
        assert!(succeeded.response_any().is_some());
    }

    #[test]
    fn json_projection_uses_the_oneof_field_name() {
        let op = Operation {
            name: "op/3".into(),
            done: true,
            result: Some(operation::Result::Response(Any::pack(&Empty {}))),
            ..Default::default()
        };
        let json = serde_json::to_value(&op).unwrap();
        assert!(json.get("response").is_some());
        assert!(json.get("error").is_none());

        let back: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
