//! Generic list store shared by every CRUD resource.
//!
//! # Design
//! - One store per resource holds rows, pagination and a loading flag.
//! - Every action sets loading, calls the client, then clears loading; failures
//!   end in one error alert and leave previously loaded rows in place.
//! - A successful mutation shows one success alert and re-fetches the current page once.

use serde::Serialize;
use serde_json::{Map, Value};
use stockdesk_api_models::{
    ApiEnvelope, DEFAULT_PER_PAGE, ListPayload, MessageEnvelope, PageRequest, Pagination,
    PlainList, Validate,
};
use stockdesk_client::{AlertChannel, ApiClient, AppContext, ClientResult, ERROR_TITLE, Upload};
use stockdesk_telemetry::action_span;
use tracing::{Instrument, debug, warn};

use crate::core::outcome::{ActionOutcome, FALLBACK_ERROR, report_failure};
use crate::core::resource::{
    ActiveListing, Creatable, Listable, Mutable, Resource, SoftDeletable, StatusToggle, Updatable,
    endpoint,
};

/// Request body of a mutation.
#[derive(Debug)]
pub(crate) enum Payload {
    Post(Value),
    Put(Value),
    Upload(Upload),
}

/// Rows, pagination and loading state for one resource.
#[derive(Debug)]
pub struct ResourceStore<R: Resource> {
    api: ApiClient,
    items: Vec<R>,
    pagination: Pagination,
    loading: bool,
}

impl<R: Resource> ResourceStore<R> {
    /// Empty store using the default page size.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self::with_per_page(api, DEFAULT_PER_PAGE)
    }

    /// Empty store using `per_page` rows per page.
    #[must_use]
    pub fn with_per_page(api: ApiClient, per_page: u32) -> Self {
        Self {
            api,
            items: Vec::new(),
            pagination: Pagination::with_per_page(per_page),
            loading: false,
        }
    }

    /// Empty store wired to the context's client and page size.
    #[must_use]
    pub fn from_context(context: &AppContext) -> Self {
        Self::with_per_page(context.api.clone(), context.per_page())
    }

    /// Rows from the last successful load.
    #[must_use]
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// Pagination from the last successful load.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Whether an action is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) const fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) const fn alerts(&self) -> &AlertChannel {
        self.api.alerts()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<R> {
        &mut self.items
    }

    pub(crate) fn settle(&self, result: ClientResult<()>) -> ActionOutcome {
        match result {
            Ok(()) => ActionOutcome::Completed,
            Err(error) => {
                report_failure(self.alerts(), &error);
                ActionOutcome::Failed
            }
        }
    }

    pub(crate) fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Option<Value> {
        match serde_json::to_value(value) {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(resource = R::PATH, error = %err, "request body could not be encoded");
                self.alerts().error(ERROR_TITLE, FALLBACK_ERROR);
                None
            }
        }
    }

    async fn send(&self, endpoint: &str, payload: Payload) -> ClientResult<MessageEnvelope> {
        match payload {
            Payload::Post(body) => self.api.post(endpoint, &body).await,
            Payload::Put(body) => self.api.put(endpoint, &body).await,
            Payload::Upload(upload) => self.api.post_multipart(endpoint, upload).await,
        }
    }
}

impl<R: Listable> ResourceStore<R> {
    /// Load a page, applying `request` overrides to the pagination first.
    pub async fn fetch_all(&mut self, request: PageRequest) -> ActionOutcome {
        self.fetch_filtered(request, Vec::new()).await
    }

    pub(crate) async fn fetch_filtered(
        &mut self,
        request: PageRequest,
        filters: Vec<(&'static str, String)>,
    ) -> ActionOutcome {
        self.loading = true;
        self.pagination.apply(request);
        let result = self
            .load(&filters)
            .instrument(action_span(R::PATH, "fetch"))
            .await;
        self.loading = false;
        self.settle(result)
    }

    async fn load(&mut self, filters: &[(&'static str, String)]) -> ClientResult<()> {
        if R::PAGINATED {
            let mut query = self.pagination.query();
            query.extend(filters.iter().cloned());
            let reply: ApiEnvelope<ListPayload<R>> = self.api.get(R::PATH, &query).await?;
            let page = reply.data.normalize(self.pagination.per_page);
            self.items = page.items;
            self.pagination = page.pagination;
        } else {
            let reply: PlainList<R> = self.api.get(R::PATH, filters).await?;
            self.items = reply.into_items();
        }
        debug!(resource = R::PATH, rows = self.items.len(), "list loaded");
        Ok(())
    }

    /// Send a mutation; on success show `title` with the server message (or
    /// `fallback_text`) and re-fetch the current page.
    pub(crate) async fn mutate(
        &mut self,
        action: &'static str,
        title: &str,
        endpoint: &str,
        payload: Payload,
        fallback_text: Option<&str>,
    ) -> ActionOutcome {
        self.loading = true;
        let result = async {
            let reply = self.send(endpoint, payload).await?;
            let text = reply
                .message
                .filter(|message| !message.trim().is_empty())
                .or_else(|| fallback_text.map(str::to_string))
                .unwrap_or_default();
            self.alerts().success(title, text);
            self.load(&[]).await
        }
        .instrument(action_span(R::PATH, action))
        .await;
        self.loading = false;
        self.settle(result)
    }
}

impl<R: ActiveListing> ResourceStore<R> {
    /// Replace the rows with the resource's active list.
    pub async fn fetch_active(&mut self) -> ActionOutcome {
        let result = async {
            let reply: PlainList<R> = self.api.get(&endpoint::<R>("active"), &[]).await?;
            self.items = reply.into_items();
            Ok(())
        }
        .instrument(action_span(R::PATH, "fetch_active"))
        .await;
        self.settle(result)
    }
}

impl<R: Creatable> ResourceStore<R> {
    /// Validate `draft` and post it to `{PATH}/create`.
    pub async fn create(&mut self, draft: &R::Draft) -> ActionOutcome {
        if let Err(errors) = draft.validate() {
            return ActionOutcome::Invalid(errors);
        }
        let Some(body) = self.encode(draft) else {
            return ActionOutcome::Failed;
        };
        self.mutate(
            "create",
            R::CREATE_LABEL,
            &endpoint::<R>("create"),
            Payload::Post(body),
            None,
        )
        .await
    }
}

impl<R: Updatable> ResourceStore<R> {
    /// Send the edited row to the update endpoint.
    pub async fn update(&mut self, row: &R) -> ActionOutcome {
        let Some(body) = self.encode(row) else {
            return ActionOutcome::Failed;
        };
        self.mutate(
            "update",
            R::UPDATE_LABEL,
            &endpoint::<R>(R::UPDATE_ENDPOINT),
            Payload::Put(body),
            None,
        )
        .await
    }
}

impl<R: SoftDeletable> ResourceStore<R> {
    /// Soft-delete the row keyed by `id`.
    pub async fn delete(&mut self, id: &str) -> ActionOutcome {
        self.mutate(
            "delete",
            R::DELETE_LABEL,
            &endpoint::<R>("delete"),
            Payload::Put(keyed_body::<R>(id, None)),
            None,
        )
        .await
    }

    /// Undo a soft delete.
    pub async fn restore(&mut self, id: &str) -> ActionOutcome {
        self.mutate(
            "restore",
            R::RESTORE_LABEL,
            &endpoint::<R>("restore"),
            Payload::Put(keyed_body::<R>(id, None)),
            None,
        )
        .await
    }
}

impl<R: StatusToggle> ResourceStore<R> {
    /// Mark the row keyed by `id` active.
    pub async fn activate(&mut self, id: &str) -> ActionOutcome {
        self.set_status(id, 1, "activate", R::ACTIVATE_LABEL).await
    }

    /// Mark the row keyed by `id` inactive.
    pub async fn deactivate(&mut self, id: &str) -> ActionOutcome {
        self.set_status(id, 0, "deactivate", R::DEACTIVATE_LABEL)
            .await
    }

    async fn set_status(
        &mut self,
        id: &str,
        flag: u8,
        action: &'static str,
        title: &str,
    ) -> ActionOutcome {
        let body = keyed_body::<R>(id, Some((R::STATUS_FIELD, Value::from(flag))));
        self.mutate(
            action,
            title,
            &endpoint::<R>(R::STATUS_ENDPOINT),
            Payload::Put(body),
            None,
        )
        .await
    }
}

fn keyed_body<R: Mutable>(id: &str, extra: Option<(&str, Value)>) -> Value {
    let mut body = Map::new();
    body.insert(R::ID_FIELD.to_string(), Value::from(id));
    if let Some((field, value)) = extra {
        body.insert(field.to_string(), value);
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::testing::{TOKEN, signed_in, signed_out};
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;
    use stockdesk_api_models::{Category, NewCategory};
    use stockdesk_client::{AlertColor, ROOT_ROUTE, RecordingNavigator, Session};
    use stockdesk_test_support::{
        api_path, config_for, expired_at, paged_record, paged_tuple, session_user,
        success_message,
    };

    type Categories = ResourceStore<Category>;

    fn three_categories() -> Value {
        json!([
            {"category_uuid": "c-6", "category_name": "Phones", "active": 1},
            {"category_uuid": "c-7", "category_name": "Tablets", "active": 1},
            {"category_uuid": "c-8", "category_name": "Chargers", "active": 0}
        ])
    }

    #[tokio::test]
    async fn second_page_of_five_uses_requested_size() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(api_path("categories"))
                    .query_param("page", "2")
                    .query_param("per_page", "5")
                    .header("Authorization", format!("Bearer {TOKEN}"));
                then.status(200)
                    .json_body(paged_tuple(three_categories(), 13, 2, 3));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = Categories::from_context(&harness.context);

        let outcome = store.fetch_all(PageRequest::new(2, 5)).await;

        assert_eq!(outcome, ActionOutcome::Completed);
        list.assert_async().await;
        assert_eq!(store.items().len(), 3);
        assert_eq!(
            store.pagination(),
            Pagination {
                total: 13,
                per_page: 5,
                current_page: 2,
                last_page: 3,
            }
        );
        assert!(!store.is_loading());
        assert_eq!(harness.context.alerts.shown(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn record_shape_normalizes_like_tuple() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("categories"));
                then.status(200)
                    .json_body(paged_record(three_categories(), 13, 2, 3));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = Categories::with_per_page(harness.context.api.clone(), 5);

        assert!(store.fetch_all(PageRequest::page(2)).await.is_completed());

        assert_eq!(store.items()[2].category_name, "Chargers");
        assert_eq!(store.pagination().per_page, 5);
        assert_eq!(store.pagination().total, 13);
        Ok(())
    }

    #[tokio::test]
    async fn create_success_toasts_once_and_refetches_once() -> Result<()> {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("categories/create"))
                    .json_body(json!({"category_name": "Audio"}));
                then.status(200).json_body(success_message("Category created"));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("categories"));
                then.status(200)
                    .json_body(paged_tuple(three_categories(), 3, 1, 1));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = Categories::from_context(&harness.context);

        let draft = NewCategory {
            category_name: "Audio".into(),
        };
        assert!(store.create(&draft).await.is_completed());

        create.assert_async().await;
        list.assert_hits_async(1).await;
        assert_eq!(harness.context.alerts.shown(), 1);
        let alert = harness.context.alerts.current();
        assert_eq!(alert.title, "Create New Category");
        assert_eq!(alert.text, "Category created");
        assert_eq!(alert.color, AlertColor::Success);
        assert_eq!(store.items().len(), 3);
        assert!(!store.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn delete_failure_toasts_once_without_refetch() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("categories"));
                then.status(200)
                    .json_body(paged_tuple(three_categories(), 3, 1, 1));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(api_path("categories/delete"))
                    .json_body(json!({"category_uuid": "c-6"}));
                then.status(403).json_body(json!({"message": "nope"}));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = Categories::from_context(&harness.context);
        assert!(store.fetch_all(PageRequest::default()).await.is_completed());
        let id = store.items()[0].category_uuid.clone();

        let outcome = store.delete(&id).await;

        assert_eq!(outcome, ActionOutcome::Failed);
        delete.assert_async().await;
        list.assert_hits_async(1).await;
        assert_eq!(harness.context.alerts.shown(), 1);
        let alert = harness.context.alerts.current();
        assert_eq!(alert.color, AlertColor::Error);
        assert_eq!(
            alert.text,
            "Forbidden — you do not have permission to access this resource"
        );
        assert_eq!(store.items().len(), 3);
        assert!(!store.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn status_toggle_sends_id_and_flag() -> Result<()> {
        let server = MockServer::start_async().await;
        let toggle = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(api_path("categories/updateStatus"))
                    .json_body(json!({"category_uuid": "c-8", "active": 1}));
                then.status(200).json_body(success_message("Activated"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("categories"));
                then.status(200)
                    .json_body(paged_tuple(three_categories(), 3, 1, 1));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = Categories::from_context(&harness.context);
        assert!(store.activate("c-8").await.is_completed());

        toggle.assert_async().await;
        assert_eq!(harness.context.alerts.current().title, "Activate Category");
        Ok(())
    }

    #[tokio::test]
    async fn expired_session_short_circuits_with_one_toast() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("categories"));
                then.status(200).json_body(paged_tuple(json!([]), 0, 1, 1));
            })
            .await;
        let harness = signed_out(&server)?;
        harness
            .context
            .session
            .set(Session {
                token: TOKEN.into(),
                expiry: expired_at(60),
                user: serde_json::from_value(session_user())?,
            })
            .await;
        let mut store = Categories::from_context(&harness.context);

        assert_eq!(store.fetch_all(PageRequest::default()).await, ActionOutcome::Failed);

        list.assert_hits_async(0).await;
        assert!(harness.context.session.current().is_none());
        assert_eq!(harness.navigator.current().as_deref(), Some(ROOT_ROUTE));
        assert_eq!(harness.context.alerts.shown(), 1);
        assert_eq!(harness.context.alerts.current().text, "Token expired");
        assert!(!store.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_by_the_store() -> Result<()> {
        let server = MockServer::start_async().await;
        let mut config = config_for(&server);
        config.api_url = "http://127.0.0.1:9/api".to_string();
        let context = AppContext::new(config, Arc::new(RecordingNavigator::new()))?;
        let mut store = Categories::from_context(&context);

        assert_eq!(store.fetch_all(PageRequest::default()).await, ActionOutcome::Failed);

        assert_eq!(context.alerts.shown(), 1);
        assert_eq!(context.alerts.current().color, AlertColor::Error);
        assert!(store.items().is_empty());
        Ok(())
    }
}
