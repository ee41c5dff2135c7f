use vertex_ai::CallOptions;
use vertex_ai::core::error::{Error, ErrorKind};
use vertex_ai::core::options::CLIENT_INFO_METADATA_KEY;
use vertex_ai::core::retry::RetryPolicy;
use vertex_ai::job_service::JobServiceClient;
use vertex_ai::model::job::{
    CancelBatchPredictionJobRequest, CreateCustomJobRequest, CustomJob,
    GetBatchPredictionJobRequest, GetCustomJobRequest, JobState, ListCustomJobsRequest,
    ListCustomJobsResponse,
};
use vertex_ai::model::common::Empty;
use vertex_ai::model::job::BatchPredictionJob;
use vertex_ai::rpcs::job_service as rpcs;
use vertex_ai_mock::MockTransport;

fn job(display_name: &str) -> CustomJob {
    CustomJob {
        display_name: display_name.to_string(),
        ..Default::default()
    }
}

fn page(jobs: Vec<CustomJob>, token: &str) -> ListCustomJobsResponse {
    ListCustomJobsResponse {
        custom_jobs: jobs,
        next_page_token: token.to_string(),
    }
}

#[tokio::test]
async fn create_then_get_custom_job() {
    let transport = MockTransport::new();
    transport.on_unary::<CreateCustomJobRequest, CustomJob, _>(
        &rpcs::CREATE_CUSTOM_JOB,
        |request| {
            let job = request.custom_job.expect("job payload present");
            Ok(CustomJob {
                name: format!("{}/customJobs/123", request.parent),
                ..job
            })
        },
    );
    transport.on_unary::<GetCustomJobRequest, CustomJob, _>(&rpcs::GET_CUSTOM_JOB, |request| {
        Ok(CustomJob {
            name: request.name,
            display_name: "j1".into(),
            ..Default::default()
        })
    });

    let client = JobServiceClient::from_transport(transport.clone());

    let created = client
        .create_custom_job(
            None,
            Some("projects/p/locations/l".into()),
            Some(job("j1")),
            CallOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(created.name, "projects/p/locations/l/customJobs/123");
    assert_eq!(created.display_name, "j1");

    let create_call = &transport.calls_for(&rpcs::CREATE_CUSTOM_JOB)[0];
    assert_eq!(
        create_call.metadata.last().unwrap(),
        &("parent".to_string(), "projects/p/locations/l".to_string())
    );

    let fetched = client
        .get_custom_job(None, Some(created.name.clone()), CallOptions::new())
        .await
        .unwrap();
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.display_name, created.display_name);

    let get_call = &transport.calls_for(&rpcs::GET_CUSTOM_JOB)[0];
    assert_eq!(
        get_call.metadata.last().unwrap(),
        &("name".to_string(), created.name.clone())
    );
}

#[tokio::test]
async fn metadata_orders_caller_entries_before_client_info_and_routing() {
    let transport = MockTransport::new();
    transport.on_unary::<GetCustomJobRequest, CustomJob, _>(&rpcs::GET_CUSTOM_JOB, |request| {
        Ok(CustomJob {
            name: request.name,
            ..Default::default()
        })
    });

    let client = JobServiceClient::from_transport(transport.clone());
    client
        .get_custom_job(
            None,
            Some("projects/p/locations/l/customJobs/1".into()),
            CallOptions::new().with_metadata_entry("x-caller", "yes"),
        )
        .await
        .unwrap();

    let metadata = &transport.calls_for(&rpcs::GET_CUSTOM_JOB)[0].metadata;
    assert_eq!(metadata[0], ("x-caller".into(), "yes".into()));
    assert_eq!(metadata[1].0, CLIENT_INFO_METADATA_KEY);
    assert!(metadata[1].1.contains("vertex-ai/"));
    assert_eq!(
        metadata[2],
        (
            "name".to_string(),
            "projects/p/locations/l/customJobs/1".to_string()
        )
    );
}

#[tokio::test]
async fn listing_flattens_pages_and_forwards_the_token() {
    let transport = MockTransport::new();
    transport.on_unary::<ListCustomJobsRequest, ListCustomJobsResponse, _>(
        &rpcs::LIST_CUSTOM_JOBS,
        |request| match request.page_token.as_str() {
            "" => Ok(page(vec![job("a0"), job("a1")], "t1")),
            "t1" => Ok(page(vec![job("b0")], "")),
            other => Err(Error::internal(format!("unexpected token '{other}'"))),
        },
    );

    let client = JobServiceClient::from_transport(transport.clone());
    let mut pager = client
        .list_custom_jobs(None, Some("projects/p/locations/l".into()), CallOptions::new())
        .await
        .unwrap();

    let names: Vec<String> = pager
        .all_items()
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.display_name)
        .collect();
    assert_eq!(names, vec!["a0", "a1", "b0"]);

    // Exactly two RPCs; the second carries the server's token.
    let requests = transport.requests_for::<ListCustomJobsRequest>(&rpcs::LIST_CUSTOM_JOBS);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].page_token, "");
    assert_eq!(requests[1].page_token, "t1");
}

#[tokio::test]
async fn single_page_listing_makes_no_follow_up_call() {
    let transport = MockTransport::new();
    transport.on_unary::<ListCustomJobsRequest, ListCustomJobsResponse, _>(
        &rpcs::LIST_CUSTOM_JOBS,
        |_| Ok(page(vec![job("only")], "")),
    );

    let client = JobServiceClient::from_transport(transport.clone());
    let mut pager = client
        .list_custom_jobs(None, Some("projects/p/locations/l".into()), CallOptions::new())
        .await
        .unwrap();

    let items = pager.all_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(transport.call_count(&rpcs::LIST_CUSTOM_JOBS), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_page_fetch_failures_retry_under_the_caller_policy() {
    let transport = MockTransport::new();
    let mut failed_once = false;
    transport.on_unary::<ListCustomJobsRequest, ListCustomJobsResponse, _>(
        &rpcs::LIST_CUSTOM_JOBS,
        move |request| match request.page_token.as_str() {
            "" => Ok(page(vec![job("a0")], "t1")),
            "t1" if !failed_once => {
                failed_once = true;
                Err(Error::Transient {
                    code: 14,
                    message: "unavailable".into(),
                })
            }
            "t1" => Ok(page(vec![job("b0")], "")),
            other => Err(Error::internal(format!("unexpected token '{other}'"))),
        },
    );

    let client = JobServiceClient::from_transport(transport.clone());
    let mut pager = client
        .list_custom_jobs(
            None,
            Some("projects/p/locations/l".into()),
            CallOptions::new().with_retry(RetryPolicy::transient()),
        )
        .await
        .unwrap();

    let items = pager.all_items().await.unwrap();
    assert_eq!(items.len(), 2);
    // First page, failed second page, retried second page.
    assert_eq!(transport.call_count(&rpcs::LIST_CUSTOM_JOBS), 3);
}

#[tokio::test]
async fn request_and_flattened_fields_conflict_before_any_io() {
    let transport = MockTransport::new();
    let client = JobServiceClient::from_transport(transport.clone());

    let request = CreateCustomJobRequest {
        parent: "projects/p/locations/l".into(),
        custom_job: Some(job("j1")),
    };
    let err = client
        .create_custom_job(
            Some(request),
            Some("projects/x/locations/y".into()),
            None,
            CallOptions::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn cancelled_batch_prediction_job_reaches_the_cancelled_state() {
    let transport = MockTransport::new();
    transport.on_unary::<CancelBatchPredictionJobRequest, Empty, _>(
        &rpcs::CANCEL_BATCH_PREDICTION_JOB,
        |_| Ok(Empty {}),
    );
    transport.on_unary::<GetBatchPredictionJobRequest, BatchPredictionJob, _>(
        &rpcs::GET_BATCH_PREDICTION_JOB,
        |request| {
            Ok(BatchPredictionJob {
                name: request.name,
                state: JobState::Cancelled as i32,
                ..Default::default()
            })
        },
    );

    let client = JobServiceClient::from_transport(transport.clone());
    let name = "projects/p/locations/l/batchPredictionJobs/9".to_string();

    client
        .cancel_batch_prediction_job(None, Some(name.clone()), CallOptions::new())
        .await
        .unwrap();

    let job = client
        .get_batch_prediction_job(None, Some(name), CallOptions::new())
        .await
        .unwrap();
    assert_eq!(job.state, JobState::Cancelled as i32);

    let cancel_call = &transport.calls_for(&rpcs::CANCEL_BATCH_PREDICTION_JOB)[0];
    assert_eq!(
        cancel_call.metadata.last().unwrap().0,
        "name",
        "cancel routes on the job name"
    );
}
