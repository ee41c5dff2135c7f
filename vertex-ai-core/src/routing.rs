//! # Routing Metadata
//!
//! Each RPC declares at most one request field (typically `name` or `parent`)
//! whose value the server uses to route the call to the shard owning the
//! referenced resource. The entry is emitted even when the field is empty;
//! rejecting an unroutable request is the server's job.
//!
//! The entry is always appended after caller-supplied metadata, never
//! inserted or substituted.

use crate::options::Metadata;
use crate::rpc::RpcDescriptor;
use crate::transcoding::json_field_key;
use serde::Serialize;
use serde_json::Value;

/// Computes the routing entry for a canonical request, if the RPC declares a
/// routing field.
pub fn routing_entry<R: Serialize>(rpc: &RpcDescriptor, request: &R) -> Option<(String, String)> {
    let field = rpc.routing_field?;
    let value = serde_json::to_value(request)
        .ok()
        .and_then(|projection| pluck(&projection, field))
        .unwrap_or_default();
    Some((field.to_string(), value))
}

/// Appends the routing entry for `rpc` to `metadata`.
pub fn append_routing<R: Serialize>(metadata: &mut Metadata, rpc: &RpcDescriptor, request: &R) {
    if let Some(entry) = routing_entry(rpc, request) {
        metadata.push(entry);
    }
}

/// Walks a dotted proto field path through the serde projection and
/// stringifies the leaf.
fn pluck(projection: &Value, dotted: &str) -> Option<String> {
    let mut current = projection;
    for part in dotted.split('.') {
        current = current.get(json_field_key(part))?;
    }
    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
