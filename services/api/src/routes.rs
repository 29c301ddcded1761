use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::infra::{AppState, DataProvider};
use voyage_ops::error::AppError;
use voyage_ops::sources::FollowUpLog;
use voyage_ops::workflows::health::{RawTrip, TripHealthService, TripRecord};
use voyage_ops::workflows::narrative::types::{AnomalySnapshot, FollowUpRequest, InterpretRequest};
use voyage_ops::workflows::narrative::{self, NarrativeGenerator};
use voyage_ops::workflows::triage::{triage_router, DigestService};

/// Shared state for the non-triage endpoints.
pub(crate) struct ApiContext<N> {
    pub(crate) health: Arc<TripHealthService<N>>,
    pub(crate) narrative: Option<Arc<N>>,
    pub(crate) provider: Arc<DataProvider>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TripHealthRequest {
    #[serde(default)]
    pub(crate) trips: Vec<RawTrip>,
    #[serde(default)]
    pub(crate) include_assessments: bool,
}

pub(crate) fn with_api_routes<L, N>(
    triage: Arc<DigestService<L, N>>,
    context: Arc<ApiContext<N>>,
) -> Router
where
    L: FollowUpLog + 'static,
    N: NarrativeGenerator + 'static,
{
    triage_router(triage)
        .merge(
            Router::new()
                .route("/api/v1/travelers", get(travelers_endpoint::<N>))
                .route("/api/v1/trips", get(trips_endpoint::<N>))
                .route("/api/v1/trips/health", post(trips_health_endpoint::<N>))
                .route("/api/v1/followups/draft", post(draft_endpoint::<N>))
                .route("/api/v1/interpret", post(interpret_endpoint::<N>))
                .route("/api/v1/anomalies", post(anomalies_endpoint::<N>))
                .with_state(context),
        )
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn travelers_endpoint<N>(
    State(context): State<Arc<ApiContext<N>>>,
) -> Result<Json<serde_json::Value>, AppError>
where
    N: NarrativeGenerator + 'static,
{
    let travelers = context.provider.travelers().await?;
    Ok(Json(json!({
        "travelers": travelers,
        "source": context.provider.label(),
    })))
}

pub(crate) async fn trips_endpoint<N>(
    State(context): State<Arc<ApiContext<N>>>,
) -> Result<Json<serde_json::Value>, AppError>
where
    N: NarrativeGenerator + 'static,
{
    let trips = context.provider.trips().await?;
    Ok(Json(json!({
        "trips": trips,
        "source": context.provider.label(),
    })))
}

pub(crate) async fn trips_health_endpoint<N>(
    State(context): State<Arc<ApiContext<N>>>,
    Json(request): Json<TripHealthRequest>,
) -> Response
where
    N: NarrativeGenerator + 'static,
{
    let records: Vec<TripRecord> = request.trips.into_iter().map(TripRecord::from_raw).collect();
    let report = context
        .health
        .assess(records, request.include_assessments)
        .await;
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn draft_endpoint<N>(
    State(context): State<Arc<ApiContext<N>>>,
    Json(request): Json<FollowUpRequest>,
) -> Response
where
    N: NarrativeGenerator + 'static,
{
    let Some(narrative) = &context.narrative else {
        return narrative_unavailable();
    };

    match narrative::draft_follow_up(narrative.as_ref(), &request).await {
        Ok(draft) => (StatusCode::OK, Json(draft)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn interpret_endpoint<N>(
    State(context): State<Arc<ApiContext<N>>>,
    Json(request): Json<InterpretRequest>,
) -> Response
where
    N: NarrativeGenerator + 'static,
{
    if request.response_text.trim().is_empty() {
        let payload = json!({ "error": "response text is required" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let Some(narrative) = &context.narrative else {
        return narrative_unavailable();
    };

    match narrative::interpret_response(narrative.as_ref(), &request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn anomalies_endpoint<N>(
    State(context): State<Arc<ApiContext<N>>>,
) -> Response
where
    N: NarrativeGenerator + 'static,
{
    let Some(narrative) = &context.narrative else {
        return narrative_unavailable();
    };

    let trips = match context.provider.trips().await {
        Ok(trips) => trips,
        Err(err) => return AppError::from(err).into_response(),
    };
    let travelers = match context.provider.travelers().await {
        Ok(travelers) => travelers,
        Err(err) => return AppError::from(err).into_response(),
    };

    let snapshot = AnomalySnapshot::new(trips, travelers);
    match narrative::scan_anomalies(narrative.as_ref(), &snapshot).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

fn narrative_unavailable() -> Response {
    let payload = json!({ "error": "narrative generator is not configured" });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::DataProvider;
    use std::future::Future;
    use voyage_ops::sources::FixtureSource;
    use voyage_ops::workflows::narrative::{Disabled, NarrativeError};

    struct ScriptedNarrative(String);

    impl NarrativeGenerator for ScriptedNarrative {
        fn complete(
            &self,
            _system: &str,
            _user: &str,
        ) -> impl Future<Output = Result<String, NarrativeError>> + Send {
            let body = self.0.clone();
            async move { Ok(body) }
        }
    }

    fn offline_context() -> Arc<ApiContext<Disabled>> {
        Arc::new(ApiContext {
            health: Arc::new(TripHealthService::new(None)),
            narrative: None,
            provider: Arc::new(DataProvider::Fixture(FixtureSource)),
        })
    }

    fn scripted_context(body: &str) -> Arc<ApiContext<ScriptedNarrative>> {
        let narrative = Arc::new(ScriptedNarrative(body.to_string()));
        Arc::new(ApiContext {
            health: Arc::new(TripHealthService::new(Some(narrative.clone()))),
            narrative: Some(narrative),
            provider: Arc::new(DataProvider::Fixture(FixtureSource)),
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        serde_json::from_slice(&bytes).expect("body parses")
    }

    #[tokio::test]
    async fn travelers_endpoint_serves_fixture_batch() {
        let Json(payload) = travelers_endpoint(State(offline_context()))
            .await
            .expect("fixture fetch succeeds");

        assert_eq!(payload["source"], "sample");
        assert_eq!(payload["travelers"].as_array().expect("array").len(), 11);
    }

    #[tokio::test]
    async fn trips_health_endpoint_classifies_posted_batch() {
        let request = TripHealthRequest {
            trips: vec![serde_json::from_value(json!({
                "id": "trip-1",
                "name": "Patagonia Trek",
                "days_until_departure": 23,
                "completion_rate": 0.25,
                "expected_completion_rate": 0.75
            }))
            .expect("raw trip parses")],
            include_assessments: false,
        };

        let response = trips_health_endpoint(State(offline_context()), Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["summary"]["critical"], 1);
        assert_eq!(payload["trips"][0]["status"], "critical");
        assert_eq!(
            payload["trips"][0]["readiness"]["label"],
            "50% behind expected"
        );
    }

    #[tokio::test]
    async fn draft_endpoint_requires_narrative() {
        let request: FollowUpRequest = serde_json::from_value(json!({
            "name": "Marcus Chen",
            "missing_items": ["passport"]
        }))
        .expect("request parses");

        let response = draft_endpoint(State(offline_context()), Json(request)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn draft_endpoint_returns_scripted_draft() {
        let context =
            scripted_context(r#"{"subject": "Your passport", "body": "Hi Marcus!"}"#);
        let request: FollowUpRequest = serde_json::from_value(json!({
            "name": "Marcus Chen",
            "trip_name": "Patagonia Explorer",
            "days_until_departure": 3,
            "previous_contacts": 3,
            "missing_items": ["passport", "medical"]
        }))
        .expect("request parses");

        let response = draft_endpoint(State(context), Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["subject"], "Your passport");
    }

    #[tokio::test]
    async fn interpret_endpoint_rejects_empty_text() {
        let request: InterpretRequest = serde_json::from_value(json!({
            "response_text": "   "
        }))
        .expect("request parses");

        let response = interpret_endpoint(State(offline_context()), Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn anomalies_endpoint_recomputes_summary_counts() {
        let context = scripted_context(
            r#"{
                "anomalies": [
                    {
                        "id": "anomaly-1",
                        "type": "behavior_change",
                        "priority": "high",
                        "title": "VIP gone quiet",
                        "description": "Robert Kim has not replied to three emails."
                    }
                ]
            }"#,
        );

        let response = anomalies_endpoint(State(context)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["summary"]["anomalies_found"], 1);
        assert_eq!(payload["summary"]["high_priority"], 1);
        assert_eq!(payload["summary"]["trips_analyzed"], 6);
        assert_eq!(payload["summary"]["travelers_analyzed"], 11);
    }
}
