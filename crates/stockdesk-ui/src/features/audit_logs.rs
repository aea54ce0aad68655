//! Read-only audit trail with an optional date window.

use chrono::NaiveDate;
use stockdesk_api_models::{AuditLog, PageRequest};

use crate::core::outcome::ActionOutcome;
use crate::core::resource::{Listable, Resource};
use crate::core::store::ResourceStore;

/// Audit trail list.
pub type AuditLogStore = ResourceStore<AuditLog>;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Resource for AuditLog {
    const PATH: &'static str = "audit_logs";
}

impl Listable for AuditLog {}

/// Inclusive date window applied to the audit trail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    /// First day to include.
    pub start_date: Option<NaiveDate>,
    /// Last day to include.
    pub end_date: Option<NaiveDate>,
}

impl AuditLogFilter {
    /// Window covering `start` through `end`.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    fn query(self) -> Vec<(&'static str, String)> {
        [("start_date", self.start_date), ("end_date", self.end_date)]
            .into_iter()
            .filter_map(|(key, date)| date.map(|day| (key, day.format(DATE_FORMAT).to_string())))
            .collect()
    }
}

impl ResourceStore<AuditLog> {
    /// Load a page of the trail restricted to `filter`.
    pub async fn fetch_window(
        &mut self,
        request: PageRequest,
        filter: AuditLogFilter,
    ) -> ActionOutcome {
        self.fetch_filtered(request, filter.query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::signed_in;
    use anyhow::{Context, Result};
    use httpmock::prelude::*;
    use serde_json::json;
    use stockdesk_test_support::{api_path, paged_tuple};

    #[test]
    fn open_ended_window_sends_one_bound() -> Result<()> {
        let filter = AuditLogFilter {
            start_date: Some(NaiveDate::from_ymd_opt(2026, 3, 1).context("date")?),
            end_date: None,
        };
        assert_eq!(filter.query(), vec![("start_date", "2026-03-01".to_string())]);
        assert!(AuditLogFilter::default().query().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn window_is_sent_with_pagination() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(api_path("audit_logs"))
                    .query_param("page", "1")
                    .query_param("per_page", "10")
                    .query_param("start_date", "2026-01-01")
                    .query_param("end_date", "2026-01-31");
                then.status(200).json_body(paged_tuple(
                    json!([{"action": "login", "entity": "users", "details": {"userAgent": "curl/8"}}]),
                    1,
                    1,
                    1,
                ));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = AuditLogStore::from_context(&harness.context);
        let filter = AuditLogFilter::between(
            NaiveDate::from_ymd_opt(2026, 1, 1).context("start")?,
            NaiveDate::from_ymd_opt(2026, 1, 31).context("end")?,
        );

        assert!(store.fetch_window(PageRequest::default(), filter).await.is_completed());

        list.assert_async().await;
        assert_eq!(store.items()[0].details.user_agent.as_deref(), Some("curl/8"));
        Ok(())
    }
}
