//! Analysis client tests against a mock planning service

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck_planning::{
    normalize, AnalysisApi, HttpAnalysisClient, PlanningConfig, PlanningError, RawTask,
};

fn client_for(server: &MockServer) -> HttpAnalysisClient {
    HttpAnalysisClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn request() -> taskdeck_planning::AnalysisRequest {
    let raw = RawTask {
        id: "t1".to_string(),
        name: Some("Checkout flow".to_string()),
        story_points: Some(8.0),
        ..RawTask::default()
    };
    normalize(&[raw], &PlanningConfig::default())
}

#[tokio::test]
async fn analyze_posts_the_normalized_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/planning/analyze"))
        .and(header_exists("x-request-id"))
        .and(body_partial_json(json!({
            "sprint_length_days": 14,
            "tasks": [{ "id": "t1", "name": "Checkout flow", "story_points": 8 }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "overall_risk_score": 62,
            "critical_issues": ["timeline at risk"],
            "task_analysis": [
                { "task_id": "t1", "risk_score": 80, "risk_level": "High" }
            ],
            "predicted_release_delay_days": 4,
            "average_velocity": 21.3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).analyze(&request()).await.unwrap();

    assert_eq!(response.overall_risk_score, Some(62.0));
    assert_eq!(response.task_analysis.len(), 1);
    assert_eq!(response.task_analysis[0].risk_level.as_deref(), Some("High"));
}

#[tokio::test]
async fn sparse_responses_still_parse() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/planning/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let response = client_for(&server).analyze(&request()).await.unwrap();
    assert_eq!(response.overall_risk_score, None);
    assert!(response.task_analysis.is_empty());
}

#[tokio::test]
async fn validation_failures_join_messages_with_newlines() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/planning/analyze"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["tasks", 0, "story_points"], "msg": "value is not a valid integer" },
                { "loc": ["tasks", 0, "due_date"], "msg": "invalid date format" },
            ]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(&request()).await.unwrap_err();

    assert!(err.is_validation());
    match err {
        PlanningError::Service { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "value is not a valid integer\ninvalid date format");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_failures_surface_the_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/planning/analyze"))
        .respond_with(ResponseTemplate::new(503).set_body_string("analysis engine warming up"))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(&request()).await.unwrap_err();
    match err {
        PlanningError::Service { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "analysis engine warming up");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}
