use crate::cli::ServeArgs;
use crate::infra::{AppState, DataProvider, InMemoryFollowUpLog};
use crate::routes::{with_api_routes, ApiContext};
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use voyage_ops::config::{AppConfig, ConfigError, DataSourceMode};
use voyage_ops::error::AppError;
use voyage_ops::sources::{CrmSource, FixtureSource, FollowUpLog};
use voyage_ops::telemetry;
use voyage_ops::workflows::health::TripHealthService;
use voyage_ops::workflows::narrative::AnthropicNarrativeClient;
use voyage_ops::workflows::triage::DigestService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let narrative = match &config.narrative {
        Some(settings) => Some(Arc::new(AnthropicNarrativeClient::from_config(settings)?)),
        None => None,
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // The data provider and follow-up sink are fixed here, once, for the
    // process lifetime.
    let (app, source_label) = match config.data.mode {
        DataSourceMode::Crm => {
            let settings = config
                .data
                .crm
                .as_ref()
                .ok_or(ConfigError::MissingCrmCredentials)?;
            let crm = CrmSource::new(settings)?;
            let provider = Arc::new(DataProvider::Crm(crm.clone()));
            let label = provider.label();
            (
                build_app(Arc::new(crm), narrative, provider, app_state, prometheus_layer),
                label,
            )
        }
        DataSourceMode::Fixture => {
            let provider = Arc::new(DataProvider::Fixture(FixtureSource));
            let label = provider.label();
            (
                build_app(
                    Arc::new(InMemoryFollowUpLog::default()),
                    narrative,
                    provider,
                    app_state,
                    prometheus_layer,
                ),
                label,
            )
        }
    };

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, source = source_label, "travel ops copilot ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_app<L>(
    log: Arc<L>,
    narrative: Option<Arc<AnthropicNarrativeClient>>,
    provider: Arc<DataProvider>,
    app_state: AppState,
    prometheus_layer: PrometheusMetricLayer<'static>,
) -> Router
where
    L: FollowUpLog + 'static,
{
    let triage = Arc::new(DigestService::new(log, narrative.clone()));
    let context = Arc::new(ApiContext {
        health: Arc::new(TripHealthService::new(narrative.clone())),
        narrative,
        provider,
    });

    with_api_routes(triage, context)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
}
