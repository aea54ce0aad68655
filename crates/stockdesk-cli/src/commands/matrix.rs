use stockdesk_ui::{ActionOutcome, PermissionMatrix};

use crate::cli::{MatrixPageArgs, MatrixToggleArgs};
use crate::client::{CliContext, CliError, CliResult};
use crate::output::render_matrix;

pub(crate) async fn handle_matrix_show(ctx: &CliContext, args: MatrixPageArgs) -> CliResult<()> {
    ctx.require_session()?;
    let per_page = args.per_page.unwrap_or_else(|| ctx.app.per_page());
    let mut matrix = PermissionMatrix::new(ctx.app.api.clone());
    let Some(meta) = matrix.fetch_data(args.page, per_page).await else {
        return ctx.settle(ActionOutcome::Failed);
    };
    render_matrix(&matrix, &meta, ctx.output)
}

pub(crate) async fn handle_matrix_toggle(
    ctx: &CliContext,
    args: MatrixToggleArgs,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut matrix = PermissionMatrix::new(ctx.app.api.clone());
    if matrix.fetch_data(1, ctx.app.per_page()).await.is_none() {
        return ctx.settle(ActionOutcome::Failed);
    }
    if !matrix
        .roles()
        .iter()
        .any(|role| role.roles_uuid == args.role)
    {
        return Err(CliError::validation(format!("unknown role '{}'", args.role)));
    }
    ctx.settle(matrix.toggle(&args.role, &args.permission).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::signed_in;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use serde_json::json;
    use stockdesk_test_support::{api_path, success, success_message};

    async fn mock_matrix(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("permission-matrix"));
                then.status(200).json_body(success(
                    "Matrix",
                    json!({"roles": {"data": [
                        {"roles_uuid": "r-1", "role_name": "Admin", "permissions": [
                            {"permission_uuid": "p-1", "permission_name": "View stock"}
                        ]}
                    ]}}),
                ));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("permissions/active/paginate"));
                then.status(200).json_body(success(
                    "Permissions",
                    json!([
                        [{"permission_uuid": "p-1", "permission_name": "View stock"}],
                        {"perPage": 10, "currentPage": 1, "total": 1, "lastPage": 1}
                    ]),
                ));
            })
            .await;
    }

    #[tokio::test]
    async fn toggle_revokes_a_held_permission() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_matrix(&server).await;
        let toggle = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("permission-matrix/create"))
                    .json_body(json!({"roles_uuid": "r-1", "permission_uuid": "p-1"}));
                then.status(200).json_body(success_message("Updated"));
            })
            .await;
        let ctx = signed_in(&server).await?;

        let args = MatrixToggleArgs {
            role: "r-1".into(),
            permission: "p-1".into(),
        };
        handle_matrix_toggle(&ctx, args)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        toggle.assert_async().await;
        assert_eq!(ctx.app.alerts.current().title, "Permission Removed");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_role_is_rejected_before_posting() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_matrix(&server).await;
        let toggle = server
            .mock_async(|when, then| {
                when.method(POST).path(api_path("permission-matrix/create"));
                then.status(200);
            })
            .await;
        let ctx = signed_in(&server).await?;

        let args = MatrixToggleArgs {
            role: "r-404".into(),
            permission: "p-1".into(),
        };
        assert!(matches!(
            handle_matrix_toggle(&ctx, args).await,
            Err(CliError::Validation(_))
        ));
        toggle.assert_calls_async(0).await;
        Ok(())
    }
}
