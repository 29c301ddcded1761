use std::future::Future;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use voyage_ops::sources::{
    CrmSource, FixtureSource, FollowUpEntry, FollowUpLog, FollowUpLogError, SourceError,
    TravelerSource, TripSource,
};
use voyage_ops::workflows::health::TripRecord;
use voyage_ops::workflows::triage::TravelerRecord;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Follow-up log used in mock mode: entries live for the process only.
#[derive(Default)]
pub(crate) struct InMemoryFollowUpLog {
    entries: Mutex<Vec<FollowUpEntry>>,
}

impl FollowUpLog for InMemoryFollowUpLog {
    fn record(
        &self,
        entry: FollowUpEntry,
    ) -> impl Future<Output = Result<(), FollowUpLogError>> + Send {
        self.entries.lock().expect("log mutex poisoned").push(entry);
        async { Ok(()) }
    }
}

/// Data-provider strategy fixed at startup: bundled fixtures or the live
/// CRM. Business logic only sees the source traits.
pub(crate) enum DataProvider {
    Fixture(FixtureSource),
    Crm(CrmSource),
}

impl DataProvider {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            DataProvider::Fixture(_) => "sample",
            DataProvider::Crm(_) => "crm",
        }
    }

    pub(crate) async fn travelers(&self) -> Result<Vec<TravelerRecord>, SourceError> {
        match self {
            DataProvider::Fixture(source) => source.travelers().await,
            DataProvider::Crm(source) => source.travelers().await,
        }
    }

    pub(crate) async fn trips(&self) -> Result<Vec<TripRecord>, SourceError> {
        match self {
            DataProvider::Fixture(source) => source.trips().await,
            DataProvider::Crm(source) => source.trips().await,
        }
    }
}
