//! # Method Wrapper
//!
//! Adapts a raw transport callable into a retrying, timing-out,
//! client-info-stamped, interceptable method. Every generated facade method
//! funnels through [`invoke`]:
//!
//! 1. resolve the effective retry policy (caller's, else the method default
//!    of no retry);
//! 2. resolve the effective timeout (caller's, else the RPC's declared
//!    default, else the runtime-wide default);
//! 3. run the pre-call interceptor, which may mutate request and metadata;
//! 4. stamp the client-info entry and append routing metadata;
//! 5. drive the transport through the retry loop — every attempt sends the
//!    same request bytes;
//! 6. run the post-call interceptor, which may substitute the response.

use crate::error::Error;
use crate::interceptor::InterceptorRegistry;
use crate::options::{CallOptions, ClientInfo};
use crate::retry;
use crate::routing;
use crate::rpc::RpcDescriptor;
use crate::transport::{ApiMessage, Transport};
use std::sync::Arc;
use std::time::Duration;

/// Timeout applied when neither the caller nor the RPC declares one.
///
/// Uniform across the generated surface; [`MethodRuntime::with_default_timeout`]
/// is the single knob that overrides it globally.
pub const DEFAULT_METHOD_TIMEOUT: Duration = Duration::from_secs(5);

/// State shared by every wrapped method of a facade.
#[derive(Debug, Clone)]
pub struct MethodRuntime {
    pub client_info: ClientInfo,
    pub default_timeout: Duration,
    pub interceptors: Arc<InterceptorRegistry>,
}

impl MethodRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_client_info(mut self, client_info: ClientInfo) -> Self {
        self.client_info = client_info;
        self
    }

    pub fn with_interceptors(mut self, interceptors: InterceptorRegistry) -> Self {
        self.interceptors = Arc::new(interceptors);
        self
    }
}

impl Default for MethodRuntime {
    fn default() -> Self {
        Self {
            client_info: ClientInfo::default(),
            default_timeout: DEFAULT_METHOD_TIMEOUT,
            interceptors: Arc::new(InterceptorRegistry::new()),
        }
    }
}

/// Invokes `rpc` on `transport` with the full pipeline applied.
pub async fn invoke<T, Req, Res>(
    transport: &T,
    rpc: &'static RpcDescriptor,
    mut request: Req,
    options: CallOptions,
    runtime: &MethodRuntime,
) -> Result<Res, Error>
where
    T: Transport,
    Req: ApiMessage,
    Res: ApiMessage,
{
    let CallOptions {
        retry: retry_override,
        timeout: timeout_override,
        mut metadata,
    } = options;

    let policy = retry_override.unwrap_or_default();
    let timeout = timeout_override
        .or(rpc.default_timeout_ms.map(Duration::from_millis))
        .unwrap_or(runtime.default_timeout);

    runtime.interceptors.run_pre(rpc, &mut request, &mut metadata);
    metadata.push(runtime.client_info.metadata_entry());
    routing::append_routing(&mut metadata, rpc, &request);

    let mut response: Res = retry::with_retry(&policy, Some(timeout), |_attempt| {
        let mut transport = transport.clone();
        let request = request.clone();
        let metadata = metadata.clone();
        async move { transport.unary(rpc, request, metadata).await }
    })
    .await?;

    runtime.interceptors.run_post(rpc, &mut response);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::options::{CLIENT_INFO_METADATA_KEY, Metadata};
    use crate::retry::RetryPolicy;
    use crate::rpc::TransportKind;
    use std::sync::Mutex;

    const RPC: RpcDescriptor = RpcDescriptor {
        service: "google.cloud.aiplatform.v1.JobService",
        method: "GetCustomJob",
        routing_field: Some("name"),
        http: None,
        default_timeout_ms: None,
    };

    #[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
    struct FakeRequest {
        #[prost(string, tag = "1")]
        name: String,
    }

    /// Responds with `Res::default()`; optionally fails the first N calls
    /// with a transient error. Records forwarded metadata.
    #[derive(Clone)]
    struct FakeTransport {
        calls: Arc<Mutex<Vec<Metadata>>>,
        failures_left: Arc<Mutex<u32>>,
    }

    impl FakeTransport {
        fn new(failures: u32) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                failures_left: Arc::new(Mutex::new(failures)),
            }
        }
    }

    impl Transport for FakeTransport {
        fn host(&self) -> &str {
            "test.local"
        }

        fn kind(&self) -> TransportKind {
            TransportKind::Grpc
        }

        fn unary<Req, Res>(
            &mut self,
            _rpc: &'static RpcDescriptor,
            _request: Req,
            metadata: Metadata,
        ) -> impl Future<Output = Result<Res, Error>> + Send
        where
            Req: ApiMessage,
            Res: ApiMessage,
        {
            let calls = Arc::clone(&self.calls);
            let failures_left = Arc::clone(&self.failures_left);
            async move {
                calls.lock().unwrap().push(metadata);
                let mut failures = failures_left.lock().unwrap();
                if *failures > 0 {
                    *failures -= 1;
                    return Err(Error::Transient {
                        code: 14,
                        message: "unavailable".into(),
                    });
                }
                Ok(Res::default())
            }
        }
    }

    fn request() -> FakeRequest {
        FakeRequest {
            name: "projects/p/locations/l/customJobs/1".into(),
        }
    }

    #[tokio::test]
    async fn metadata_carries_caller_entries_then_client_info_then_routing() {
        let transport = FakeTransport::new(0);
        let options = CallOptions::new().with_metadata_entry("x-caller", "yes");

        let _: FakeRequest = invoke(&transport, &RPC, request(), options, &MethodRuntime::new())
            .await
            .unwrap();

        let calls = transport.calls.lock().unwrap();
        let metadata = &calls[0];
        assert_eq!(metadata[0], ("x-caller".into(), "yes".into()));
        assert_eq!(metadata[1].0, CLIENT_INFO_METADATA_KEY);
        assert_eq!(
            metadata[2],
            (
                "name".into(),
                "projects/p/locations/l/customJobs/1".into()
            )
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_when_opted_in() {
        let transport = FakeTransport::new(2);
        let options = CallOptions::new().with_retry(RetryPolicy::transient());

        let _: FakeRequest = invoke(&transport, &RPC, request(), options, &MethodRuntime::new())
            .await
            .unwrap();

        assert_eq!(transport.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn no_retry_is_the_method_default() {
        let transport = FakeTransport::new(1);

        let err = invoke::<_, _, FakeRequest>(
            &transport,
            &RPC,
            request(),
            CallOptions::new(),
            &MethodRuntime::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransientTransport);
        assert_eq!(transport.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_timeout_never_reaches_the_transport() {
        let transport = FakeTransport::new(0);
        let options = CallOptions::new().with_timeout(Duration::ZERO);

        let err = invoke::<_, _, FakeRequest>(
            &transport,
            &RPC,
            request(),
            options,
            &MethodRuntime::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn interceptors_wrap_the_call() {
        let transport = FakeTransport::new(0);
        let mut interceptors = InterceptorRegistry::new();
        interceptors.on_request(&RPC, |request, metadata| {
            if let Some(request) = request.downcast_mut::<FakeRequest>() {
                request.name = "projects/p/locations/l/customJobs/2".into();
            }
            metadata.push(("x-pre".into(), "1".into()));
        });
        interceptors.on_response(&RPC, |response| {
            if let Some(response) = response.downcast_mut::<FakeRequest>() {
                response.name = "substituted".into();
            }
        });
        let runtime = MethodRuntime::new().with_interceptors(interceptors);

        let response: FakeRequest =
            invoke(&transport, &RPC, request(), CallOptions::new(), &runtime)
                .await
                .unwrap();

        assert_eq!(response.name, "substituted");
        let calls = transport.calls.lock().unwrap();
        let metadata = &calls[0];
        // The pre hook ran before routing was computed.
        assert_eq!(metadata[0], ("x-pre".into(), "1".into()));
        assert_eq!(
            metadata[2],
            (
                "name".into(),
                "projects/p/locations/l/customJobs/2".into()
            )
        );
    }
}
