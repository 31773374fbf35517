use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arrival_queue_cell::create_arrival_queue_router;
use shared_models::{
    Appointment, AppointmentDraft, AppointmentId, PositionLookup, QueuePosition, ServiceError,
    WaitTimeMinutes,
};
use shared_scheduling::SchedulingService;
use shared_utils::test_utils::{MockSchedulingResponses, TestConfig};

mock! {
    pub Scheduling {}

    #[async_trait]
    impl SchedulingService for Scheduling {
        async fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceError>;
        async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<Option<AppointmentId>, ServiceError>;
        async fn replace_appointment(&self, id: &AppointmentId, draft: &AppointmentDraft) -> Result<(), ServiceError>;
        async fn delete_appointment(&self, id: &AppointmentId) -> Result<(), ServiceError>;
        async fn wait_time(&self) -> Result<WaitTimeMinutes, ServiceError>;
        async fn set_wait_time(&self, minutes: WaitTimeMinutes) -> Result<(), ServiceError>;
        async fn register_arrival(&self, patient_name: &str) -> Result<QueuePosition, ServiceError>;
        async fn queue_position(&self, patient_name: &str) -> Result<PositionLookup, ServiceError>;
    }
}

fn arrival_request(patient_name: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/arrive")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "patientName": patient_name }).to_string()))
        .unwrap()
}

fn create_test_app(mock_server: &MockServer) -> Router {
    create_arrival_queue_router(TestConfig::with_service_url(mock_server.uri()).to_scheduling())
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_arrive_reports_position() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/arrive"))
        .and(body_json(json!({ "patientName": "Alice" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockSchedulingResponses::position_response(3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/arrive")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "patientName": "Alice" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "position": 3, "ahead": 2 }));
}

#[tokio::test]
async fn test_arrive_without_name_is_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/arrive"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/arrive")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "patientName": "" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "Please enter your name");
}

#[tokio::test]
async fn test_queue_position_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queue-position/Mary%20Ann"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockSchedulingResponses::position_response(1)),
        )
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(
            Request::builder()
                .uri("/queue-position/Mary%20Ann")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "position": 1, "ahead": 0 }));
}

#[tokio::test]
async fn test_queue_position_not_found_keeps_service_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queue-position/Ghost"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockSchedulingResponses::not_found_response()),
        )
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(
            Request::builder()
                .uri("/queue-position/Ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({ "error": "not found" }));
}

#[tokio::test]
async fn test_arrival_refused_in_success_body_is_not_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/arrive"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockSchedulingResponses::error_response("already queued")),
        )
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(arrival_request("Bob"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(read_json(response).await, json!({ "error": "already queued" }));
}

#[tokio::test]
async fn test_router_serves_every_request_from_the_injected_service() {
    let mut scheduling = MockScheduling::new();
    let mut next = 0;
    scheduling
        .expect_register_arrival()
        .times(2)
        .returning(move |_| {
            next += 1;
            Ok(QueuePosition::new(next).unwrap())
        });

    let app = create_arrival_queue_router(Arc::new(scheduling));

    let first = app.clone().oneshot(arrival_request("Alice")).await.unwrap();
    assert_eq!(read_json(first).await, json!({ "position": 1, "ahead": 0 }));

    let second = app.oneshot(arrival_request("Bob")).await.unwrap();
    assert_eq!(read_json(second).await, json!({ "position": 2, "ahead": 1 }));
}
