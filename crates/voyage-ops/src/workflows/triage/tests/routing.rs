use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use super::common::{raw, RecordingLog};
use crate::sources::{FollowUpAction, FollowUpEntry};
use crate::workflows::narrative::Disabled;
use crate::workflows::triage::router::{digest_handler, follow_up_handler, DigestRequest};
use crate::workflows::triage::service::DigestService;

fn service() -> Arc<DigestService<RecordingLog, Disabled>> {
    Arc::new(DigestService::new(Arc::new(RecordingLog::default()), None))
}

#[tokio::test]
async fn digest_endpoint_returns_classified_batch() {
    let request = DigestRequest {
        travelers: vec![
            raw("t1", 3, &["passport"], 0),
            raw("t2", 40, &["dietary"], 0),
            raw("t3", 12, &[], 0),
        ],
        include_drafts: false,
    };

    let response = digest_handler(State(service()), axum::Json(request)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("body parses");

    assert_eq!(payload["summary"]["total"], 3);
    assert_eq!(payload["summary"]["critical"], 1);
    assert_eq!(payload["summary"]["complete"], 1);
    let travelers = payload["travelers"].as_array().expect("travelers array");
    assert_eq!(travelers.len(), 2);
    assert_eq!(travelers[0]["id"], "t1");
    assert_eq!(travelers[0]["priority"], "critical");
}

#[tokio::test]
async fn empty_digest_request_is_ok() {
    let response = digest_handler(
        State(service()),
        axum::Json(DigestRequest {
            travelers: Vec::new(),
            include_drafts: false,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn follow_up_endpoint_accepts_entries() {
    let log = Arc::new(RecordingLog::default());
    let service: Arc<DigestService<RecordingLog, Disabled>> =
        Arc::new(DigestService::new(log.clone(), None));

    let entry = FollowUpEntry {
        traveler_id: "t001".to_string(),
        action: FollowUpAction::Email,
        notes: "Sent passport reminder".to_string(),
        message: None,
    };

    let response = follow_up_handler(State(service), axum::Json(entry)).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(log.entries().len(), 1);
}
