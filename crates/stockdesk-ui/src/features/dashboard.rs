//! Dashboard aggregates.

use stockdesk_api_models::{ApiEnvelope, DashboardStats};
use stockdesk_client::ApiClient;
use stockdesk_telemetry::action_span;
use tracing::{Instrument, warn};

const STATS_PATH: &str = "dashboard_stats";

/// Holds the latest dashboard figures. Failures are logged and keep the
/// previous figures. The store adds no alert of its own; HTTP status failures
/// still get the client's error toast.
#[derive(Debug)]
pub struct DashboardStore {
    api: ApiClient,
    stats: DashboardStats,
    loading: bool,
}

impl DashboardStore {
    /// Empty figures.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            stats: DashboardStats::default(),
            loading: false,
        }
    }

    /// Latest figures.
    #[must_use]
    pub const fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Refresh the figures; returns whether they were replaced.
    pub async fn fetch(&mut self) -> bool {
        self.loading = true;
        let result = self
            .api
            .get::<ApiEnvelope<Option<DashboardStats>>>(STATS_PATH, &[])
            .instrument(action_span(STATS_PATH, "fetch"))
            .await;
        self.loading = false;
        match result {
            Ok(ApiEnvelope {
                data: Some(stats), ..
            }) => {
                self.stats = stats;
                true
            }
            Ok(_) => false,
            Err(err) => {
                warn!(error = %err, "dashboard stats unavailable");
                false
            }
        }
    }
}
