use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use vertex_ai::CallOptions;
use vertex_ai::core::error::{Error, ErrorKind};
use vertex_ai::core::transport::rest::{HttpCallable, RestTransport};
use vertex_ai::job_service::JobServiceClient;
use vertex_ai::model::job::{CustomJob, JobState, ListCustomJobsRequest, ListCustomJobsResponse};
use vertex_ai_mock::MockTransport;

/// What the wire callable observed for one exchange.
#[derive(Debug, Clone)]
struct SeenRequest {
    method: String,
    uri: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// In-memory wire: records requests, serves queued `(status, body)` pairs.
#[derive(Clone, Default)]
struct FakeWire {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    responses: Arc<Mutex<VecDeque<(u16, Vec<u8>)>>>,
}

impl FakeWire {
    fn respond(&self, status: u16, body: Vec<u8>) {
        self.responses.lock().unwrap().push_back((status, body));
    }

    fn respond_json<T: serde::Serialize>(&self, status: u16, value: &T) {
        self.respond(status, serde_json::to_vec(value).unwrap());
    }

    fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl HttpCallable for FakeWire {
    fn execute(
        &mut self,
        request: http::Request<Vec<u8>>,
    ) -> impl Future<Output = Result<http::Response<Vec<u8>>, Error>> + Send {
        let seen = Arc::clone(&self.seen);
        let responses = Arc::clone(&self.responses);
        async move {
            let (parts, body) = request.into_parts();
            seen.lock().unwrap().push(SeenRequest {
                method: parts.method.to_string(),
                uri: parts.uri.to_string(),
                headers: parts
                    .headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
                    .collect(),
                body,
            });

            let (status, body) = responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::internal("fake wire response queue exhausted"))?;
            Ok(http::Response::builder()
                .status(status)
                .body(body)
                .expect("valid fake response"))
        }
    }
}

fn rest_client(wire: FakeWire) -> JobServiceClient<RestTransport<FakeWire>> {
    JobServiceClient::from_transport(RestTransport::new(wire, "aiplatform.googleapis.com"))
}

#[tokio::test]
async fn get_substitutes_the_resource_name_into_the_uri() {
    let wire = FakeWire::default();
    wire.respond_json(
        200,
        &CustomJob {
            name: "projects/p/locations/l/customJobs/123".into(),
            display_name: "j1".into(),
            ..Default::default()
        },
    );

    let client = rest_client(wire.clone());
    let job = client
        .get_custom_job(
            None,
            Some("projects/p/locations/l/customJobs/123".into()),
            CallOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(job.display_name, "j1");

    let seen = wire.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "GET");
    assert_eq!(
        seen[0].uri,
        "https://aiplatform.googleapis.com/v1/projects/p/locations/l/customJobs/123"
    );
    assert!(seen[0].body.is_empty());
    // Routing metadata rides along as a header.
    assert!(
        seen[0]
            .headers
            .iter()
            .any(|(k, v)| k == "name" && v == "projects/p/locations/l/customJobs/123")
    );
}

#[tokio::test]
async fn create_posts_the_designated_body_sub_message() {
    let wire = FakeWire::default();
    let job = CustomJob {
        display_name: "train".into(),
        state: JobState::Pending as i32,
        ..Default::default()
    };
    wire.respond_json(
        200,
        &CustomJob {
            name: "projects/p/locations/l/customJobs/9".into(),
            ..job.clone()
        },
    );

    let client = rest_client(wire.clone());
    client
        .create_custom_job(
            None,
            Some("projects/p/locations/l".into()),
            Some(job.clone()),
            CallOptions::new(),
        )
        .await
        .unwrap();

    let seen = wire.seen();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(
        seen[0].uri,
        "https://aiplatform.googleapis.com/v1/projects/p/locations/l/customJobs"
    );

    // The body is exactly the job sub-message in its JSON projection, with
    // the enum rendered by name.
    let body: serde_json::Value = serde_json::from_slice(&seen[0].body).unwrap();
    assert_eq!(body, serde_json::to_value(&job).unwrap());
    assert_eq!(body["state"], "JOB_STATE_PENDING");
}

#[tokio::test]
async fn list_places_remaining_fields_into_the_query_string() {
    let wire = FakeWire::default();
    wire.respond_json(
        200,
        &ListCustomJobsResponse {
            custom_jobs: vec![],
            next_page_token: String::new(),
        },
    );

    let client = rest_client(wire.clone());
    let request = ListCustomJobsRequest {
        parent: "projects/p/locations/l".into(),
        filter: "state = RUNNING".into(),
        page_size: 25,
        page_token: String::new(),
    };
    client
        .list_custom_jobs(Some(request), None, CallOptions::new())
        .await
        .unwrap();

    let uri = &wire.seen()[0].uri;
    assert!(uri.starts_with("https://aiplatform.googleapis.com/v1/projects/p/locations/l/customJobs?"));
    assert!(uri.contains("pageSize=25"));
    assert!(uri.contains("filter=state%20%3D%20RUNNING"));
    // Defaults stay home.
    assert!(!uri.contains("pageToken"));
}

#[tokio::test]
async fn unknown_response_fields_are_ignored() {
    let wire = FakeWire::default();
    wire.respond(
        200,
        br#"{"name": "projects/p/locations/l/customJobs/1", "veryNewField": {"x": 1}}"#.to_vec(),
    );

    let client = rest_client(wire.clone());
    let job = client
        .get_custom_job(
            None,
            Some("projects/p/locations/l/customJobs/1".into()),
            CallOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(job.name, "projects/p/locations/l/customJobs/1");
}

#[tokio::test]
async fn http_statuses_map_onto_the_error_taxonomy() {
    let wire = FakeWire::default();
    wire.respond(
        503,
        br#"{"error": {"code": 503, "message": "unavailable", "status": "UNAVAILABLE"}}"#.to_vec(),
    );
    wire.respond(
        404,
        br#"{"error": {"code": 404, "message": "no such job", "status": "NOT_FOUND"}}"#.to_vec(),
    );

    let client = rest_client(wire.clone());
    let name = "projects/p/locations/l/customJobs/1".to_string();

    let transient = client
        .get_custom_job(None, Some(name.clone()), CallOptions::new())
        .await
        .unwrap_err();
    assert_eq!(transient.kind(), ErrorKind::TransientTransport);

    let permanent = client
        .get_custom_job(None, Some(name), CallOptions::new())
        .await
        .unwrap_err();
    assert_eq!(permanent.kind(), ErrorKind::PermanentTransport);
    assert_eq!(permanent.remote_status(), Some((404, "no such job")));
}

#[tokio::test]
async fn transport_registry_still_serves_grpc_by_default() {
    // The same facade type accepts either registered transport.
    use vertex_ai::core::rpc::TransportKind;
    use vertex_ai::model::job::GetCustomJobRequest;
    use vertex_ai::rpcs::job_service as rpcs;

    assert_eq!(TransportKind::resolve(None), Some(TransportKind::Grpc));

    let transport = MockTransport::new();
    transport.on_unary::<GetCustomJobRequest, CustomJob, _>(&rpcs::GET_CUSTOM_JOB, |request| {
        Ok(CustomJob {
            name: request.name,
            ..Default::default()
        })
    });
    let client = JobServiceClient::from_transport(transport);
    let job = client
        .get_custom_job(
            None,
            Some("projects/p/locations/l/customJobs/5".into()),
            CallOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(job.name, "projects/p/locations/l/customJobs/5");
}
