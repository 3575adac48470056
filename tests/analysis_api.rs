//! HTTP surface tests: the analysis router dispatched in isolation through
//! tower's `oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use internship_copilot::api::analysis_router;
use internship_copilot::engine::{DecisionEngine, ReferenceData};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_router() -> axum::Router {
    analysis_router(Arc::new(DecisionEngine::new(ReferenceData::builtin())))
}

fn analysis_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/analysis")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

fn profile_payload(gpa_scale: f64) -> Value {
    json!({
        "education": "Junior CS Major at a state university",
        "primaryGoal": "Data Engineer",
        "geographicConstraints": "Remote only",
        "technicalSkills": ["Python", "SQL"],
        "gpa": 3.4,
        "gpaScale": gpa_scale,
        "experienceText": "Built an ETL pipeline for a campus research lab."
    })
}

#[tokio::test]
async fn post_analysis_returns_scored_report() {
    let router = build_router();
    let payload = json!({
        "profile": profile_payload(4.0),
        "listings": [
            { "rawText": "Data Intern at Spotify\nWe need Python and SQL daily." }
        ],
        "evaluated_on": "2026-08-07"
    });

    let response = router
        .oneshot(analysis_request(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let report: Value = serde_json::from_slice(&body).expect("json");

    assert_eq!(
        report.get("evaluated_on").and_then(Value::as_str),
        Some("2026-08-07")
    );
    assert_eq!(report.get("listing_count").and_then(Value::as_u64), Some(1));

    let internships = report
        .get("internships")
        .and_then(Value::as_array)
        .expect("internships array");
    assert_eq!(internships.len(), 1);

    let record = &internships[0];
    assert_eq!(record.get("company").and_then(Value::as_str), Some("Spotify"));
    assert_eq!(
        record.get("role").and_then(Value::as_str),
        Some("Data Intern")
    );
    assert!(record.get("roi").and_then(Value::as_f64).is_some());
    assert!(record.get("hard_verdict").and_then(Value::as_str).is_some());
    assert!(matches!(
        record.get("classification").and_then(Value::as_str),
        Some("Strong Apply" | "Apply Only If Low Effort" | "Not Worth Your Time")
    ));
}

#[tokio::test]
async fn unsupported_gpa_scale_is_unprocessable() {
    let router = build_router();
    let payload = json!({
        "profile": profile_payload(7.0),
        "listings": []
    });

    let response = router
        .oneshot(analysis_request(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body(), 1024).await.expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json");
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("supported scales"));
}

#[tokio::test]
async fn evaluated_on_defaults_when_omitted() {
    let router = build_router();
    let payload = json!({
        "profile": profile_payload(4.0),
        "listings": []
    });

    let response = router
        .oneshot(analysis_request(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let report: Value = serde_json::from_slice(&body).expect("json");
    assert!(report.get("evaluated_on").and_then(Value::as_str).is_some());
    assert_eq!(report.get("listing_count").and_then(Value::as_u64), Some(0));
}
