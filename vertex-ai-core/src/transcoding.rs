//! # JSON Transcoding
//!
//! The JSON transport matches each RPC against its declared
//! `(HTTP method, URI template, body field)` rule, substitutes path-captured
//! fields from the request, serializes the designated body sub-message, and
//! places the remaining fields into the query string as dotted keys.
//!
//! The input is the serde projection of the request (camelCase keys, enums by
//! name); proto3 default values are omitted from the query string, matching
//! what the server reconstructs for absent fields.

use crate::error::Error;
use crate::path_template::PathTemplate;
use crate::rpc::HttpRule;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A transcoded request, ready to be assembled into an HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Translates a proto field path (`custom_job`, `a.b_c`) into the key used by
/// the serde projection (`customJob`, `a.bC`).
pub fn json_field_key(proto_path: &str) -> String {
    proto_path
        .split('.')
        .map(camel_case)
        .collect::<Vec<_>>()
        .join(".")
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Applies `rule` to the serde projection of a request.
pub fn transcode(rule: &HttpRule, request: Value) -> Result<TranscodedRequest, Error> {
    let Value::Object(mut fields) = request else {
        return Err(Error::invalid_argument(
            "request must serialize to a JSON object",
        ));
    };

    let template = PathTemplate::new(rule.template)?;
    let mut captured = BTreeMap::new();
    for field in template.variables() {
        let value = take_field(&mut fields, field).ok_or_else(|| {
            Error::invalid_argument(format!(
                "request is missing '{field}' required by '{}'",
                rule.template
            ))
        })?;
        let Value::String(value) = value else {
            return Err(Error::invalid_argument(format!(
                "path field '{field}' must be a string"
            )));
        };
        captured.insert(field.to_string(), value);
    }
    let path = template.render(&captured)?;

    let body = match rule.body {
        Some("*") => Some(Value::Object(std::mem::take(&mut fields))),
        Some(field) => match take_field(&mut fields, field) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        },
        None => None,
    };

    let mut query = Vec::new();
    flatten_query(&Value::Object(fields), "", &mut query);

    Ok(TranscodedRequest {
        method: rule.method,
        path,
        query,
        body,
    })
}

/// Removes a possibly-dotted proto field path from the request object.
fn take_field(fields: &mut Map<String, Value>, proto_path: &str) -> Option<Value> {
    match proto_path.split_once('.') {
        None => fields.remove(&json_field_key(proto_path)),
        Some((head, rest)) => {
            let nested = fields.get_mut(&json_field_key(head))?;
            let Value::Object(nested) = nested else {
                return None;
            };
            take_field(nested, rest)
        }
    }
}

fn flatten_query(value: &Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_query(nested, &prefix, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_query(item, prefix, out);
            }
        }
        scalar => {
            if let Some(rendered) = render_scalar(scalar) {
                out.push((prefix.to_string(), rendered));
            }
        }
    }
}

// Proto3 defaults are not transmitted; the server fills them back in.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CREATE: HttpRule = HttpRule {
        method: "POST",
        template: "/v1/{parent=projects/*/locations/*}/customJobs",
        body: Some("custom_job"),
    };

    const LIST: HttpRule = HttpRule {
        method: "GET",
        template: "/v1/{parent=projects/*/locations/*}/customJobs",
        body: None,
    };

    #[test]
    fn body_field_is_lifted_out_of_the_request() {
        let request = json!({
            "parent": "projects/p/locations/l",
            "customJob": {"displayName": "train"},
        });

        let transcoded = transcode(&CREATE, request).unwrap();
        assert_eq!(transcoded.method, "POST");
        assert_eq!(transcoded.path, "/v1/projects/p/locations/l/customJobs");
        assert_eq!(transcoded.body, Some(json!({"displayName": "train"})));
        assert!(transcoded.query.is_empty());
    }

    #[test]
    fn remaining_fields_become_query_parameters() {
        let request = json!({
            "parent": "projects/p/locations/l",
            "pageSize": 25,
            "pageToken": "t1",
            "filter": "",
        });

        let transcoded = transcode(&LIST, request).unwrap();
        assert_eq!(transcoded.body, None);
        assert_eq!(
            transcoded.query,
            vec![
                ("pageSize".to_string(), "25".to_string()),
                ("pageToken".to_string(), "t1".to_string()),
            ]
        );
    }

    #[test]
    fn wildcard_body_takes_everything_left() {
        let rule = HttpRule {
            method: "POST",
            template: "/v1/{name=projects/*/locations/*/customJobs/*}:cancel",
            body: Some("*"),
        };
        let request = json!({
            "name": "projects/p/locations/l/customJobs/9",
            "reason": "superseded",
        });

        let transcoded = transcode(&rule, request).unwrap();
        assert_eq!(
            transcoded.path,
            "/v1/projects/p/locations/l/customJobs/9:cancel"
        );
        assert_eq!(transcoded.body, Some(json!({"reason": "superseded"})));
        assert!(transcoded.query.is_empty());
    }

    #[test]
    fn missing_path_field_is_a_caller_error() {
        let err = transcode(&LIST, json!({"pageSize": 5})).unwrap_err();
        assert!(err.to_string().contains("parent"));
    }

    #[test]
    fn the_server_side_can_reconstruct_the_request() {
        let original = json!({
            "parent": "projects/p/locations/l",
            "customJob": {"displayName": "train"},
            "pageSize": 10,
        });

        let rule = HttpRule {
            method: "POST",
            template: "/v1/{parent=projects/*/locations/*}/customJobs",
            body: Some("custom_job"),
        };
        let transcoded = transcode(&rule, original.clone()).unwrap();

        // Rebuild the request the way a server would: path captures, then
        // the body field, then the query parameters.
        let template = crate::path_template::PathTemplate::new(rule.template).unwrap();
        let mut rebuilt = serde_json::Map::new();
        for (field, value) in template.parse(&transcoded.path).unwrap() {
            rebuilt.insert(json_field_key(&field), Value::String(value));
        }
        rebuilt.insert("customJob".to_string(), transcoded.body.clone().unwrap());
        for (key, value) in &transcoded.query {
            rebuilt.insert(key.clone(), serde_json::from_str(value).unwrap());
        }

        assert_eq!(Value::Object(rebuilt), original);
    }

    #[test]
    fn field_keys_are_translated_to_the_serde_projection() {
        assert_eq!(json_field_key("custom_job"), "customJob");
        assert_eq!(json_field_key("parent"), "parent");
        assert_eq!(json_field_key("job.display_name"), "job.displayName");
    }
}
