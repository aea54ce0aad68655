//! Authenticated JSON client for the Stockdesk backend.
//!
//! Every request goes through [`ApiClient::dispatch`]: an expired session is
//! cleared before any network traffic, the bearer token is attached when
//! present, and non-2xx replies are classified into one error alert.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stockdesk_api_models::MessageEnvelope;
use stockdesk_config::ClientConfig;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::alert::AlertChannel;
use crate::error::{ClientError, ClientResult};
use crate::navigator::{Navigator, ROOT_ROUTE};
use crate::session::SessionStore;

/// Title of the alert raised for failed requests.
pub const ERROR_TITLE: &str = "Error";

/// File sent as the `file` field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Name reported to the server.
    pub file_name: String,
    /// MIME type of the content.
    pub mime: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// CSV upload.
    #[must_use]
    pub fn csv(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: "text/csv".to_string(),
            bytes,
        }
    }
}

/// HTTP client bound to one backend and one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    alerts: AlertChannel,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration and the shared handles.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPath`] for an unparsable base URL and
    /// [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        alerts: AlertChannel,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|source| ClientError::InvalidPath {
            path: config.api_url.clone(),
            source,
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|source| ClientError::Build { source })?;
        Ok(Self {
            http,
            base_url,
            session,
            alerts,
            navigator,
        })
    }

    /// Session handle used for the bearer token.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Alert channel used for failures.
    #[must_use]
    pub const fn alerts(&self) -> &AlertChannel {
        &self.alerts
    }

    /// Navigator used for redirects.
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Absolute URL for an endpoint relative to the base path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPath`] if the joined URL does not parse.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ClientError::InvalidPath {
            path: path.to_string(),
            source,
        })
    }

    /// `GET path?query`.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.dispatch(Method::GET, path, |request| request.query(query))
            .await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.dispatch(Method::POST, path, |request| request.json(body))
            .await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.dispatch(Method::PUT, path, |request| request.json(body))
            .await
    }

    /// `DELETE path?query`.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn delete<T>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.dispatch(Method::DELETE, path, |request| request.query(query))
            .await
    }

    /// `POST path` as `multipart/form-data` with the upload in field `file`.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn post_multipart<T>(&self, path: &str, upload: Upload) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)
            .map_err(|source| ClientError::Transport {
                path: path.to_string(),
                source,
            })?;
        let form = Form::new().part("file", part);
        self.dispatch(Method::POST, path, move |request| request.multipart(form))
            .await
    }

    #[instrument(name = "api.request", skip(self, method, attach), fields(method = %method))]
    async fn dispatch<T, F>(&self, method: Method, path: &str, attach: F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        self.ensure_fresh_session().await?;
        let url = self.endpoint(path)?;

        let mut request = attach(self.http.request(method, url));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let transport = |source| ClientError::Transport {
            path: path.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(self.reject(status, &body).await);
        }
        decode(path, &body)
    }

    async fn ensure_fresh_session(&self) -> ClientResult<()> {
        if !self.session.is_expired() {
            return Ok(());
        }
        warn!("session expired; signing out");
        self.session.clear().await;
        self.navigator.navigate(ROOT_ROUTE);
        Err(ClientError::SessionExpired)
    }

    async fn reject(&self, status: StatusCode, body: &[u8]) -> ClientError {
        let server_message = serde_json::from_slice::<MessageEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|message| !message.trim().is_empty());
        let code = status.as_u16();
        let message = status_message(code, server_message);
        warn!(status = code, %message, "request rejected");

        if status == StatusCode::UNAUTHORIZED {
            self.session.clear().await;
            self.navigator.navigate(ROOT_ROUTE);
        }
        self.alerts.error(ERROR_TITLE, message.clone());
        ClientError::Status {
            status: code,
            message,
            surfaced: true,
        }
    }
}

/// User-facing message for a failed status; 400 and 422 prefer the server's text.
#[must_use]
pub fn status_message(status: u16, server_message: Option<String>) -> String {
    match status {
        400 => server_message.unwrap_or_else(|| "Bad request".to_string()),
        401 => "Unauthorized — please log in again".to_string(),
        403 => "Forbidden — you do not have permission to access this resource".to_string(),
        404 => "Resource not found".to_string(),
        422 => server_message.unwrap_or_else(|| "Validation failed".to_string()),
        500 => "Server error — please try later".to_string(),
        _ => "Unexpected error occurred".to_string(),
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> ClientResult<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertColor;
    use crate::navigator::RecordingNavigator;
    use crate::session::{Session, unix_now};
    use crate::storage::{MemoryStorage, SessionStorage};
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use stockdesk_api_models::{ApiEnvelope, SessionUser};
    use stockdesk_test_support::{api_path, config_for, failure, success};

    struct Harness {
        api: ApiClient,
        navigator: RecordingNavigator,
    }

    fn harness(server: &MockServer) -> Result<Harness> {
        let navigator = RecordingNavigator::new();
        let api = ApiClient::new(
            &config_for(server),
            SessionStore::default(),
            AlertChannel::default(),
            Arc::new(navigator.clone()),
        )?;
        Ok(Harness { api, navigator })
    }

    async fn sign_in(api: &ApiClient, expiry: i64) {
        api.session()
            .set(Session {
                token: "tok-123".into(),
                expiry,
                user: SessionUser::default(),
            })
            .await;
    }

    #[test]
    fn status_table_matches_backend_contract() {
        assert_eq!(status_message(400, Some("Name taken".into())), "Name taken");
        assert_eq!(status_message(400, None), "Bad request");
        assert_eq!(status_message(401, Some("ignored".into())), "Unauthorized — please log in again");
        assert_eq!(
            status_message(403, None),
            "Forbidden — you do not have permission to access this resource"
        );
        assert_eq!(status_message(404, None), "Resource not found");
        assert_eq!(status_message(422, None), "Validation failed");
        assert_eq!(status_message(500, None), "Server error — please try later");
        assert_eq!(status_message(503, None), "Unexpected error occurred");
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_query() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(api_path("categories"))
                .query_param("page", "2")
                .header("Authorization", "Bearer tok-123");
            then.status(200).json_body(success("ok", json!([])));
        });
        let Harness { api, .. } = harness(&server)?;
        sign_in(&api, unix_now() + 600).await;

        let reply: ApiEnvelope<Value> = api.get("categories", &[("page", "2".into())]).await?;
        assert!(reply.is_success());
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn signed_out_requests_carry_no_authorization() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(api_path("login"))
                .header_missing("Authorization");
            then.status(200).json_body(success("ok", Value::Null));
        });
        let Harness { api, .. } = harness(&server)?;

        let _: Value = api.post("login", &json!({"email": "a@b.co"})).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn expired_session_short_circuits_without_network() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path(api_path("categories"));
            then.status(200);
        });
        let Harness { api, navigator } = harness(&server)?;
        sign_in(&api, unix_now() - 5).await;

        let result: ClientResult<Value> = api.get("categories", &[]).await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert!(api.session().current().is_none());
        assert_eq!(navigator.current().as_deref(), Some(ROOT_ROUTE));
        assert_eq!(api.alerts().shown(), 0);
        mock.assert_hits(0);
        Ok(())
    }

    #[tokio::test]
    async fn expired_hydrated_session_is_cleared_by_first_request() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path(api_path("dashboard_stats"));
            then.status(200);
        });
        let storage = Arc::new(MemoryStorage::new());
        SessionStore::new(storage.clone())
            .set(Session {
                token: "stale".into(),
                expiry: unix_now() - 30,
                user: SessionUser::default(),
            })
            .await;
        let navigator = RecordingNavigator::new();
        let api = ApiClient::new(
            &config_for(&server),
            SessionStore::new(storage.clone()),
            AlertChannel::default(),
            Arc::new(navigator.clone()),
        )?;
        assert!(!api.session().hydrate().await);

        let result: ClientResult<Value> = api.get("dashboard_stats", &[]).await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert_eq!(navigator.history(), vec![ROOT_ROUTE]);
        assert_eq!(storage.get("accessToken").await?, None);
        mock.assert_hits(0);
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_surfaces_one_alert() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(api_path("users"));
            then.status(401).json_body(failure("jwt expired"));
        });
        let Harness { api, navigator } = harness(&server)?;
        sign_in(&api, unix_now() + 600).await;

        let result: ClientResult<Value> = api.get("users", &[]).await;
        let Err(err) = result else {
            anyhow::bail!("expected a status error");
        };
        assert!(err.is_surfaced());
        assert_eq!(err.status(), Some(401));
        assert!(api.session().current().is_none());
        assert_eq!(navigator.history(), vec![ROOT_ROUTE]);

        let alert = api.alerts().current();
        assert_eq!(api.alerts().shown(), 1);
        assert_eq!(alert.title, ERROR_TITLE);
        assert_eq!(alert.color, AlertColor::Error);
        assert_eq!(alert.icon, "$error");
        assert_eq!(alert.text, "Unauthorized — please log in again");
        Ok(())
    }

    #[tokio::test]
    async fn validation_failure_prefers_server_message() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path(api_path("categories/create"));
            then.status(422)
                .json_body(failure("Category name already exists"));
        });
        let Harness { api, navigator } = harness(&server)?;

        let result: ClientResult<Value> = api
            .post("categories/create", &json!({"category_name": "Phones"}))
            .await;
        assert!(matches!(
            result,
            Err(ClientError::Status { status: 422, ref message, surfaced: true })
                if message == "Category name already exists"
        ));
        assert!(navigator.history().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_body_is_not_surfaced() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(api_path("dashboard_stats"));
            then.status(200).body("<html>");
        });
        let Harness { api, .. } = harness(&server)?;

        let result: ClientResult<Value> = api.get("dashboard_stats", &[]).await;
        let Err(err) = result else {
            anyhow::bail!("expected a decode error");
        };
        assert!(matches!(err, ClientError::Decode { .. }));
        assert!(!err.is_surfaced());
        assert_eq!(api.alerts().shown(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn multipart_upload_uses_file_field() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(api_path("product-inventory/importProductInventory"))
                .body_includes("name=\"file\"")
                .body_includes("SN-001");
            then.status(200).json_body(success("Imported 1 row", Value::Null));
        });
        let Harness { api, .. } = harness(&server)?;

        let upload = Upload::csv("stock.csv", b"serial_number\nSN-001\n".to_vec());
        let reply: ApiEnvelope<Value> = api
            .post_multipart("product-inventory/importProductInventory", upload)
            .await?;
        assert_eq!(reply.message.as_deref(), Some("Imported 1 row"));
        mock.assert();
        Ok(())
    }

    #[test]
    fn endpoint_joins_without_double_slashes() -> Result<()> {
        let server = MockServer::start();
        let Harness { api, .. } = harness(&server)?;
        let url = api.endpoint("/permissions/active/paginate?page=1&perPage=10")?;
        assert!(url.as_str().ends_with("/api/permissions/active/paginate?page=1&perPage=10"));
        Ok(())
    }

    #[test]
    fn empty_body_decodes_as_null() -> Result<()> {
        let value: Option<Value> = decode("x", b"  ")?;
        assert!(value.is_none());
        Ok(())
    }
}
