use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RawTraveler, TravelerRecord};
use super::service::DigestService;
use crate::sources::{FollowUpEntry, FollowUpLog};
use crate::workflows::narrative::NarrativeGenerator;

#[derive(Debug, Deserialize)]
pub struct DigestRequest {
    #[serde(default)]
    pub travelers: Vec<RawTraveler>,
    #[serde(default)]
    pub include_drafts: bool,
}

/// Router builder exposing the digest and follow-up logging endpoints.
pub fn triage_router<L, N>(service: Arc<DigestService<L, N>>) -> Router
where
    L: FollowUpLog + 'static,
    N: NarrativeGenerator + 'static,
{
    Router::new()
        .route("/api/v1/triage/digest", post(digest_handler::<L, N>))
        .route("/api/v1/triage/follow-ups", post(follow_up_handler::<L, N>))
        .with_state(service)
}

pub(crate) async fn digest_handler<L, N>(
    State(service): State<Arc<DigestService<L, N>>>,
    axum::Json(request): axum::Json<DigestRequest>,
) -> Response
where
    L: FollowUpLog + 'static,
    N: NarrativeGenerator + 'static,
{
    // The loose wire shape is normalized exactly once, here at the boundary.
    let records: Vec<TravelerRecord> = request
        .travelers
        .into_iter()
        .map(TravelerRecord::from_raw)
        .collect();

    let report = service.digest(records, request.include_drafts).await;
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn follow_up_handler<L, N>(
    State(service): State<Arc<DigestService<L, N>>>,
    axum::Json(entry): axum::Json<FollowUpEntry>,
) -> Response
where
    L: FollowUpLog + 'static,
    N: NarrativeGenerator + 'static,
{
    match service.record_follow_up(entry).await {
        Ok(()) => {
            let payload = json!({ "status": "recorded" });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
