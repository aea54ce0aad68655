//! Notification feed for the signed-in user.
//!
//! # Design
//! - The feed endpoint answers with `[rows, meta]` and the full page meta is kept.
//! - Marking as read is fire-and-forget: failures are logged and local state is
//!   only changed after the server accepts.

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use stockdesk_api_models::{ApiEnvelope, MessageEnvelope, Notification, PageMeta};
use stockdesk_client::{ApiClient, ClientResult};
use stockdesk_telemetry::action_span;
use tracing::{Instrument, debug, warn};

use crate::core::outcome::{ActionOutcome, failure_text, report_failure};

const FEED_PATH: &str = "notifications";
const READ_PATH: &str = "notifications/read";
const FEED_TITLE: &str = "Notifications";

/// Notification rows plus feed state.
#[derive(Debug)]
pub struct NotificationStore {
    api: ApiClient,
    items: Vec<Notification>,
    meta: PageMeta,
    loading: bool,
    error: Option<String>,
}

impl NotificationStore {
    /// Empty feed.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Vec::new(),
            meta: PageMeta::default(),
            loading: false,
            error: None,
        }
    }

    /// Every loaded notification.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Page meta from the last load.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Notifications not yet read.
    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|item| !item.read)
    }

    /// Notifications already read.
    pub fn read(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|item| item.read)
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.unread().count()
    }

    /// Load `page` of the feed.
    pub async fn fetch(&mut self, page: u32) -> ActionOutcome {
        self.loading = true;
        self.error = None;
        let result = self
            .api
            .get::<ApiEnvelope<(Vec<Notification>, Option<PageMeta>)>>(
                FEED_PATH,
                &[("page", page.to_string())],
            )
            .instrument(action_span(FEED_PATH, "fetch"))
            .await;
        self.loading = false;
        match result {
            Ok(reply) => {
                let (items, meta) = reply.data;
                self.items = items;
                if let Some(meta) = meta {
                    self.meta = meta;
                }
                self.api
                    .alerts()
                    .success(FEED_TITLE, reply.message.unwrap_or_default());
                ActionOutcome::Completed
            }
            Err(err) => {
                self.error = Some(failure_text(&err));
                report_failure(self.api.alerts(), &err);
                ActionOutcome::Failed
            }
        }
    }

    /// Mark one notification read. Unknown or already read notifications are
    /// skipped without a request.
    pub async fn mark_as_read(&mut self, notification_uuid: &str) -> ActionOutcome {
        let pending = self
            .items
            .iter()
            .any(|item| item.notification_uuid == notification_uuid && !item.read);
        if !pending {
            debug!(notification_uuid, "nothing to mark");
            return ActionOutcome::Completed;
        }

        let result: ClientResult<MessageEnvelope> = self
            .api
            .put(READ_PATH, &json!({"notification_uuid": notification_uuid}))
            .instrument(action_span(FEED_PATH, "mark_as_read"))
            .await;
        if let Err(err) = result {
            warn!(notification_uuid, error = %err, "mark as read failed");
            return ActionOutcome::Failed;
        }

        let read_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.notification_uuid == notification_uuid)
        {
            item.read = true;
            item.read_at = Some(read_at);
        }
        ActionOutcome::Completed
    }
}
