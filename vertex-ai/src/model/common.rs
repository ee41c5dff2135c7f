//! Shared well-known records: `Any`, `Empty`, `Duration`, the RPC `Status`,
//! and the generic operation metadata attached to this service's
//! long-running operations.

use serde::{Deserialize, Serialize};

/// A message packed with its type identity.
///
/// The JSON projection keeps the packed bytes as base64 under `value` rather
/// than inlining the message, which is all the runtime needs to round-trip
/// operation payloads.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Any {
    #[prost(string, tag = "1")]
    #[serde(rename = "@type")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

impl Any {
    /// Packs a message under its canonical type URL.
    pub fn pack<M: prost::Message + prost::Name>(message: &M) -> Self {
        Any {
            type_url: format!("type.googleapis.com/{}", M::full_name()),
            value: message.encode_to_vec(),
        }
    }

    /// Whether this payload carries a message of type `M`.
    pub fn is<M: prost::Name>(&self) -> bool {
        self.type_url.rsplit('/').next() == Some(M::full_name().as_str())
    }
}

/// The canonical empty response.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Empty {}

impl prost::Name for Empty {
    const NAME: &'static str = "Empty";
    const PACKAGE: &'static str = "google.protobuf";
}

/// A span of time at nanosecond resolution.
#[derive(Clone, Copy, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Duration {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Duration {
            seconds: value.as_secs() as i64,
            nanos: value.subsec_nanos() as i32,
        }
    }
}

/// Error status carried by failed RPCs and failed operations.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub details: Vec<Any>,
}

impl prost::Name for Status {
    const NAME: &'static str = "Status";
    const PACKAGE: &'static str = "google.rpc";
}

/// Progress metadata common to this service's operations.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenericOperationMetadata {
    #[prost(message, repeated, tag = "1")]
    pub partial_failures: Vec<Status>,
}

impl prost::Name for GenericOperationMetadata {
    const NAME: &'static str = "GenericOperationMetadata";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

/// Metadata attached to delete operations.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteOperationMetadata {
    #[prost(message, optional, tag = "1")]
    pub generic_metadata: Option<GenericOperationMetadata>,
}

impl prost::Name for DeleteOperationMetadata {
    const NAME: &'static str = "DeleteOperationMetadata";
    const PACKAGE: &'static str = "google.cloud.aiplatform.v1";
}

pub(crate) mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
