//! # JSON Transport
//!
//! Speaks the service's REST projection: each RPC is matched against its
//! declared HTTP rule, the request is transcoded into a verb, URI, query
//! string, and JSON body, and the response JSON is decoded into the declared
//! response type, ignoring unknown fields.
//!
//! The wire itself is an injected [`HttpCallable`]; this crate builds and
//! interprets `http` request/response values but performs no I/O of its own.

use crate::auth::Credentials;
use crate::error::Error;
use crate::options::Metadata;
use crate::rpc::{RpcDescriptor, TransportKind};
use crate::transcoding;
use crate::transport::{ApiMessage, Transport};

/// The wire side of the JSON transport: executes one HTTP exchange.
pub trait HttpCallable: Clone + Send + Sync + 'static {
    fn execute(
        &mut self,
        request: http::Request<Vec<u8>>,
    ) -> impl Future<Output = Result<http::Response<Vec<u8>>, Error>> + Send;
}

/// JSON-over-HTTP transport over an injected wire callable.
#[derive(Clone)]
pub struct RestTransport<C> {
    callable: C,
    host: String,
    credentials: Option<Credentials>,
}

impl<C> RestTransport<C> {
    pub fn new(callable: C, host: impl Into<String>) -> Self {
        Self {
            callable,
            host: host.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }
}

impl<C> std::fmt::Debug for RestTransport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("host", &self.host)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl<C: HttpCallable> Transport for RestTransport<C> {
    fn host(&self) -> &str {
        &self.host
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Rest
    }

    fn unary<Req, Res>(
        &mut self,
        rpc: &'static RpcDescriptor,
        request: Req,
        metadata: Metadata,
    ) -> impl Future<Output = Result<Res, Error>> + Send
    where
        Req: ApiMessage,
        Res: ApiMessage,
    {
        async move {
            let rule = rpc.http.as_ref().ok_or_else(|| {
                Error::invalid_argument(format!(
                    "{} has no HTTP binding; use the gRPC transport",
                    rpc.full_name()
                ))
            })?;

            let projection = serde_json::to_value(&request)
                .map_err(|e| Error::codec(format!("failed to project request to JSON: {e}")))?;
            let transcoded = transcoding::transcode(rule, projection)?;

            let mut uri = format!("https://{}{}", self.host, transcoded.path);
            if !transcoded.query.is_empty() {
                uri.push('?');
                uri.push_str(&query_string(&transcoded.query));
            }

            let body = match &transcoded.body {
                Some(value) => serde_json::to_vec(value)
                    .map_err(|e| Error::codec(format!("failed to serialize body: {e}")))?,
                None => Vec::new(),
            };

            let mut builder = http::Request::builder()
                .method(transcoded.method)
                .uri(uri.as_str())
                .header(http::header::CONTENT_TYPE, "application/json");
            if let Some(authorization) =
                self.credentials.as_ref().and_then(|c| c.authorization_value())
            {
                builder = builder.header(http::header::AUTHORIZATION, authorization);
            }
            for (key, value) in &metadata {
                builder = builder.header(key.as_str(), value.as_str());
            }
            let http_request = builder
                .body(body)
                .map_err(|e| Error::invalid_argument(format!("failed to build request: {e}")))?;

            tracing::trace!(rpc = %rpc.full_name(), %uri, "sending REST call");
            let response = self.callable.execute(http_request).await?;
            interpret_response(response)
        }
    }
}

fn interpret_response<Res: ApiMessage>(response: http::Response<Vec<u8>>) -> Result<Res, Error> {
    let status = response.status();
    let body = response.into_body();

    if !status.is_success() {
        return Err(Error::from_http_status(
            status.as_u16(),
            remote_error_message(&body),
        ));
    }

    // Unknown fields are ignored for forward compatibility.
    serde_json::from_slice(&body)
        .map_err(|e| Error::codec(format!("failed to decode response JSON: {e}")))
}

/// Pulls the message out of a standard error envelope, falling back to the
/// raw body.
fn remote_error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: RemoteError,
    }
    #[derive(serde::Deserialize)]
    struct RemoteError {
        message: String,
    }

    serde_json::from_slice::<Envelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned())
}

fn query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_percent_encoded() {
        let pairs = vec![("filter".to_string(), "state = RUNNING".to_string())];
        assert_eq!(query_string(&pairs), "filter=state%20%3D%20RUNNING");
    }

    #[test]
    fn error_envelopes_are_unwrapped() {
        let body = br#"{"error": {"code": 404, "message": "job not found", "status": "NOT_FOUND"}}"#;
        assert_eq!(remote_error_message(body), "job not found");
        assert_eq!(remote_error_message(b"plain text"), "plain text");
    }
}
