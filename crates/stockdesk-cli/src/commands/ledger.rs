use stockdesk_api_models::UpdatePaymentStatus;
use stockdesk_ui::{PaymentStore, TransactionStore};

use crate::cli::StatusArgs;
use crate::client::{CliContext, CliResult};

pub(crate) async fn handle_transaction_item_status(
    ctx: &CliContext,
    args: StatusArgs,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut store = TransactionStore::from_context(&ctx.app);
    ctx.settle(store.update_item_status(&args.id, &args.status).await)
}

pub(crate) async fn handle_transaction_status(ctx: &CliContext, args: StatusArgs) -> CliResult<()> {
    ctx.require_session()?;
    let mut store = TransactionStore::from_context(&ctx.app);
    ctx.settle(store.update_status(&args.id, &args.status).await)
}

pub(crate) async fn handle_payment_status(ctx: &CliContext, args: StatusArgs) -> CliResult<()> {
    ctx.require_session()?;
    let change = UpdatePaymentStatus {
        status: args.status,
    };
    let mut store = PaymentStore::from_context(&ctx.app);
    ctx.settle(store.update_status(&args.id, &change).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CliError;
    use crate::commands::testing::signed_in;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use serde_json::json;
    use stockdesk_test_support::{api_path, paged_tuple, success_message};

    #[tokio::test]
    async fn transaction_status_is_sent_and_list_refreshed() -> Result<()> {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(api_path("transactions/updateStatus"))
                    .json_body(json!({"transaction_uuid": "t-1", "status": "completed"}));
                then.status(200).json_body(success_message("Status updated"));
            })
            .await;
        let refresh = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("transactions"));
                then.status(200).json_body(paged_tuple(json!([]), 0, 1, 1));
            })
            .await;
        let ctx = signed_in(&server).await?;

        let args = StatusArgs {
            id: "t-1".into(),
            status: "completed".into(),
        };
        handle_transaction_status(&ctx, args)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        update.assert_async().await;
        refresh.assert_async().await;
        assert_eq!(ctx.app.alerts.current().title, "Update Transaction Status");
        Ok(())
    }

    #[tokio::test]
    async fn blank_payment_status_is_a_validation_error() -> Result<()> {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT).path(api_path("payments/updateStatus"));
                then.status(200);
            })
            .await;
        let ctx = signed_in(&server).await?;

        let args = StatusArgs {
            id: "p-1".into(),
            status: String::new(),
        };
        match handle_payment_status(&ctx, args).await {
            Err(CliError::Validation(message)) => {
                assert_eq!(message, "status: Status is required");
            }
            _ => anyhow::bail!("expected a validation error"),
        }
        update.assert_calls_async(0).await;
        Ok(())
    }
}
