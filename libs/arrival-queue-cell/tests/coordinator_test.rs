use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use mockall::mock;

use arrival_queue_cell::*;
use shared_models::{
    Appointment, AppointmentDraft, AppointmentId, PositionLookup, QueuePosition, ServiceError,
    WaitTimeMinutes,
};
use shared_scheduling::SchedulingService;

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

fn position(rank: u32) -> QueuePosition {
    QueuePosition::new(rank).unwrap()
}

fn coordinator_with(mock: MockScheduling) -> QueueCoordinator {
    QueueCoordinator::with_service(Arc::new(mock))
}

#[tokio::test]
async fn test_announce_arrival_returns_service_position() {
    let mut mock = MockScheduling::new();
    mock.expect_register_arrival()
        .withf(|name: &str| name == "Alice")
        .times(1)
        .returning(|_| Ok(position(4)));

    let result = coordinator_with(mock).announce_arrival("Alice").await;

    assert_eq!(result, Ok(position(4)));
}

#[tokio::test]
async fn test_announce_arrival_requires_a_name() {
    let mut mock = MockScheduling::new();
    mock.expect_register_arrival().never();

    let coordinator = coordinator_with(mock);

    assert_eq!(coordinator.announce_arrival("").await, Err(ArrivalError::MissingName));
    assert_eq!(coordinator.announce_arrival("  ").await, Err(ArrivalError::MissingName));
}

#[tokio::test]
async fn test_repeated_arrival_is_forwarded_each_time() {
    let mut mock = MockScheduling::new();
    let mut next = 0;
    mock.expect_register_arrival()
        .withf(|name: &str| name == "Bob")
        .times(2)
        .returning(move |_| {
            next += 1;
            Ok(position(next))
        });

    let coordinator = coordinator_with(mock);

    assert_eq!(coordinator.announce_arrival("Bob").await, Ok(position(1)));
    assert_eq!(coordinator.announce_arrival("Bob").await, Ok(position(2)));
}

#[tokio::test]
async fn test_service_rejection_of_arrival_is_surfaced() {
    let mut mock = MockScheduling::new();
    mock.expect_register_arrival().returning(|_| {
        Err(ServiceError::Rejected {
            status: 409,
            message: "Bob is already in the queue".to_string(),
        })
    });

    let err = coordinator_with(mock).announce_arrival("Bob").await.unwrap_err();

    assert_eq!(err.to_string(), "Bob is already in the queue");
}

#[tokio::test]
async fn test_lookup_position_found() {
    let mut mock = MockScheduling::new();
    mock.expect_queue_position()
        .withf(|name: &str| name == "Carol")
        .times(1)
        .returning(|_| Ok(PositionLookup::Queued(position(2))));

    let found = coordinator_with(mock).lookup_position("Carol").await.unwrap();

    assert_eq!(found.rank(), 2);
    assert_eq!(found.ahead(), 1);
}

#[tokio::test]
async fn test_lookup_without_arrival_is_not_found() {
    let mut mock = MockScheduling::new();
    mock.expect_queue_position()
        .times(1)
        .returning(|_| Ok(PositionLookup::NotQueued("not found".to_string())));

    let result = coordinator_with(mock).lookup_position("Dave").await;

    assert_eq!(result, Err(LookupError::NotFound("not found".to_string())));
}

#[tokio::test]
async fn test_lookup_requires_a_name() {
    let mut mock = MockScheduling::new();
    mock.expect_queue_position().never();

    assert_eq!(
        coordinator_with(mock).lookup_position("").await,
        Err(LookupError::MissingName)
    );
}

#[tokio::test]
async fn test_lookup_transport_failure_is_not_retried() {
    let mut mock = MockScheduling::new();
    mock.expect_queue_position()
        .times(1)
        .returning(|_| Err(ServiceError::Transport("timed out".to_string())));

    let err = coordinator_with(mock).lookup_position("Erin").await.unwrap_err();

    assert_matches!(err, LookupError::Service(ServiceError::Transport(_)));
}
