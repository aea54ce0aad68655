//! Wiring shared by store tests.

use std::sync::Arc;

use anyhow::Result;
use httpmock::MockServer;
use stockdesk_api_models::SessionUser;
use stockdesk_client::{AppContext, RecordingNavigator, Session};
use stockdesk_test_support::{config_for, session_user, valid_until};

pub const TOKEN: &str = "token-123";

pub struct Harness {
    pub context: AppContext,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn signed_out(server: &MockServer) -> Result<Harness> {
    let navigator = Arc::new(RecordingNavigator::new());
    let context = AppContext::new(config_for(server), navigator.clone())?;
    Ok(Harness { context, navigator })
}

pub async fn signed_in(server: &MockServer) -> Result<Harness> {
    let harness = signed_out(server)?;
    let user: SessionUser = serde_json::from_value(session_user())?;
    harness
        .context
        .session
        .set(Session {
            token: TOKEN.to_string(),
            expiry: valid_until(3_600),
            user,
        })
        .await;
    Ok(harness)
}
