//! Login, logout and session restore.

use stockdesk_api_models::{LoginForm, LoginResponse, SessionUser, Validate};
use stockdesk_client::{
    AlertColor, AlertOptions, ApiClient, DASHBOARD_ROUTE, ROOT_ROUTE, Session, unix_now,
};
use stockdesk_telemetry::{action_span, record_user};
use tracing::{Instrument, info};

use crate::core::outcome::{ActionOutcome, report_failure};

const LOGIN_PATH: &str = "login";
const LOGIN_ICON: &str = "tabler-check";

/// Drives the session through login and logout.
#[derive(Debug)]
pub struct AuthStore {
    api: ApiClient,
    loading: bool,
}

impl AuthStore {
    /// Store over `api` and its session.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            loading: false,
        }
    }

    /// Whether a login is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Token present and not expired.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }

    /// Signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.api.session().user()
    }

    /// Restore a persisted session; returns whether one was found.
    pub async fn hydrate(&self) -> bool {
        let restored = self.api.session().hydrate().await;
        if let Some(user) = self.user() {
            record_user(&user.email);
        }
        restored
    }

    /// Exchange credentials for a session and open the dashboard.
    pub async fn login(&mut self, form: &LoginForm) -> ActionOutcome {
        if let Err(errors) = form.validate() {
            return ActionOutcome::Invalid(errors);
        }
        self.loading = true;
        let result = self
            .api
            .post::<LoginResponse, _>(LOGIN_PATH, form)
            .instrument(action_span("auth", "login"))
            .await;
        self.loading = false;

        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                report_failure(self.api.alerts(), &err);
                return ActionOutcome::Failed;
            }
        };
        let success = reply.is_success();
        match reply.data {
            Some(data) if success => {
                let email = data.user.email.clone();
                self.api
                    .session()
                    .set(Session::from_login(data, unix_now()))
                    .await;
                record_user(&email);
                info!(%email, "signed in");
                self.api.alerts().show(AlertOptions {
                    title: "Login Successful".to_string(),
                    text: reply.message.unwrap_or_default(),
                    color: AlertColor::Success,
                    icon: Some(LOGIN_ICON.to_string()),
                    duration: None,
                });
                self.api.navigator().navigate(DASHBOARD_ROUTE);
                ActionOutcome::Completed
            }
            _ => {
                let text = reply
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| "Invalid credentials".to_string());
                self.api.alerts().error("Login failed", text);
                ActionOutcome::Failed
            }
        }
    }

    /// Drop the session and return to the root route.
    pub async fn logout(&self) {
        self.api.session().clear().await;
        self.api.navigator().navigate(ROOT_ROUTE);
        info!("signed out");
    }
}
