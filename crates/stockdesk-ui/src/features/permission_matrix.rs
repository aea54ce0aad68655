//! Role × permission grid with optimistic toggles.
//!
//! # Design
//! - Roles and their grants load once; the permission axis pages independently.
//! - A toggle flips the local grant first and restores the pre-toggle snapshot
//!   when the server rejects it. Concurrent toggles are not serialized.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::json;
use stockdesk_api_models::{
    ApiEnvelope, MessageEnvelope, PageMeta, Permission, PlainList, Role, RoleWithPermissions,
};
use stockdesk_client::{ApiClient, ClientResult};
use stockdesk_telemetry::action_span;
use tracing::{Instrument, debug, warn};

use crate::core::optimistic::optimistic;
use crate::core::outcome::{ActionOutcome, report_failure};

const MATRIX_PATH: &str = "permission-matrix";
const TOGGLE_PATH: &str = "permission-matrix/create";
const PERMISSION_PAGE_PATH: &str = "permissions/active/paginate";

/// Role id → granted permission ids.
pub type Grants = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Deserialize)]
struct MatrixPayload {
    roles: PlainList<RoleWithPermissions>,
}

/// State behind the permission matrix screen.
#[derive(Debug)]
pub struct PermissionMatrix {
    api: ApiClient,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    grants: Grants,
    initialized: bool,
}

impl PermissionMatrix {
    /// Empty matrix.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            roles: Vec::new(),
            permissions: Vec::new(),
            grants: Grants::new(),
            initialized: false,
        }
    }

    /// Role axis.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Current page of the permission axis.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Every grant currently shown.
    #[must_use]
    pub const fn grants(&self) -> &Grants {
        &self.grants
    }

    /// Whether `role_id` holds `permission_id`.
    #[must_use]
    pub fn has_permission(&self, role_id: &str, permission_id: &str) -> bool {
        self.grants
            .get(role_id)
            .is_some_and(|granted| granted.contains(permission_id))
    }

    /// Load roles and grants on first use, then the requested permission page.
    /// Returns the page meta of the permission axis.
    pub async fn fetch_data(&mut self, page: u32, per_page: u32) -> Option<PageMeta> {
        let result = self
            .load(page, per_page)
            .instrument(action_span(MATRIX_PATH, "fetch"))
            .await;
        match result {
            Ok(meta) => Some(meta),
            Err(err) => {
                report_failure(self.api.alerts(), &err);
                None
            }
        }
    }

    async fn load(&mut self, page: u32, per_page: u32) -> ClientResult<PageMeta> {
        if !self.initialized {
            let reply: ApiEnvelope<MatrixPayload> = self.api.get(MATRIX_PATH, &[]).await?;
            let roles = reply.data.roles.into_items();
            self.grants = roles
                .iter()
                .map(|entry| {
                    let granted = entry
                        .permissions
                        .iter()
                        .map(|permission| permission.permission_uuid.clone())
                        .collect();
                    (entry.role.roles_uuid.clone(), granted)
                })
                .collect();
            self.roles = roles.into_iter().map(|entry| entry.role).collect();
            self.initialized = true;
            debug!(roles = self.roles.len(), "permission matrix loaded");
        }

        let query = [("page", page.to_string()), ("perPage", per_page.to_string())];
        let reply: ApiEnvelope<(Vec<Permission>, PageMeta)> =
            self.api.get(PERMISSION_PAGE_PATH, &query).await?;
        let (permissions, meta) = reply.data;
        self.permissions = permissions;
        Ok(meta)
    }

    /// Grant or revoke `permission_id` for `role_id`.
    pub async fn toggle(&mut self, role_id: &str, permission_id: &str) -> ActionOutcome {
        let granted = self.has_permission(role_id, permission_id);
        let body = json!({"roles_uuid": role_id, "permission_uuid": permission_id});
        let api = &self.api;
        let result = optimistic(
            &mut self.grants,
            |grants| {
                let set = grants.entry(role_id.to_string()).or_default();
                if granted {
                    set.remove(permission_id);
                } else {
                    set.insert(permission_id.to_string());
                }
            },
            || api.post::<MessageEnvelope, _>(TOGGLE_PATH, &body),
        )
        .instrument(action_span(MATRIX_PATH, "toggle"))
        .await;

        match result {
            Ok(_) => {
                let (title, text) = if granted {
                    ("Permission Removed", "Permission removed from role")
                } else {
                    ("Permission Added", "Permission assigned to role")
                };
                self.api.alerts().success(title, text);
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(role_id, permission_id, error = %err, "permission toggle rejected");
                if !err.is_surfaced() {
                    self.api
                        .alerts()
                        .error("Update Failed", "Could not update permission");
                }
                ActionOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::signed_in;
    use anyhow::Result;
    use httpmock::prelude::*;
    use stockdesk_client::AlertColor;
    use stockdesk_test_support::{api_path, success, success_message};

    fn matrix_reply() -> serde_json::Value {
        success(
            "Matrix",
            json!({"roles": {"data": [
                {"roles_uuid": "r-1", "role_name": "Admin", "permissions": [
                    {"permission_uuid": "p-1", "permission_name": "View stock"}
                ]},
                {"roles_uuid": "r-2", "role_name": "Clerk", "permissions": []}
            ]}}),
        )
    }

    fn permission_page() -> serde_json::Value {
        success(
            "Permissions",
            json!([
                [
                    {"permission_uuid": "p-1", "permission_name": "View stock"},
                    {"permission_uuid": "p-2", "permission_name": "Edit stock"}
                ],
                {"perPage": 2, "currentPage": 1, "total": 4, "lastPage": 2, "hasMorePages": true}
            ]),
        )
    }

    async fn loaded(server: &MockServer) -> Result<(crate::core::testing::Harness, PermissionMatrix)> {
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("permission-matrix"));
                then.status(200).json_body(matrix_reply());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(api_path("permissions/active/paginate"))
                    .query_param("perPage", "2");
                then.status(200).json_body(permission_page());
            })
            .await;
        let harness = signed_in(server).await?;
        let mut matrix = PermissionMatrix::new(harness.context.api.clone());
        let meta = matrix.fetch_data(1, 2).await;
        assert!(meta.is_some_and(|meta| meta.has_more_pages));
        Ok((harness, matrix))
    }

    #[tokio::test]
    async fn roles_load_once_and_permissions_every_page() -> Result<()> {
        let server = MockServer::start_async().await;
        let (_harness, mut matrix) = loaded(&server).await?;

        assert!(matrix.has_permission("r-1", "p-1"));
        assert!(!matrix.has_permission("r-2", "p-1"));
        assert_eq!(matrix.roles().len(), 2);
        assert_eq!(matrix.permissions().len(), 2);

        assert!(matrix.fetch_data(2, 2).await.is_some());
        assert_eq!(matrix.roles().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn successful_toggle_keeps_grant() -> Result<()> {
        let server = MockServer::start_async().await;
        let (harness, mut matrix) = loaded(&server).await?;
        let toggle = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("permission-matrix/create"))
                    .json_body(json!({"roles_uuid": "r-2", "permission_uuid": "p-2"}));
                then.status(200).json_body(success_message("Saved"));
            })
            .await;

        assert!(matrix.toggle("r-2", "p-2").await.is_completed());

        toggle.assert_async().await;
        assert!(matrix.has_permission("r-2", "p-2"));
        assert_eq!(harness.context.alerts.current().title, "Permission Added");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_toggle_rolls_back_with_one_error() -> Result<()> {
        let server = MockServer::start_async().await;
        let (harness, mut matrix) = loaded(&server).await?;
        server
            .mock_async(|when, then| {
                when.method(POST).path(api_path("permission-matrix/create"));
                then.status(500);
            })
            .await;
        let before_grants = matrix.grants().clone();
        let before = harness.context.alerts.shown();

        assert_eq!(matrix.toggle("r-1", "p-1").await, ActionOutcome::Failed);

        assert_eq!(matrix.grants(), &before_grants);
        assert!(matrix.has_permission("r-1", "p-1"));
        assert_eq!(harness.context.alerts.shown(), before + 1);
        assert_eq!(harness.context.alerts.current().color, AlertColor::Error);
        Ok(())
    }
}
