use serde_json::json;
use stockdesk_api_models::PageRequest;
use stockdesk_ui::{
    ActionOutcome, AuditLogFilter, AuditLogStore, DashboardStore, NotificationStore,
};

use crate::cli::{AuditLogArgs, NotificationPageArgs, NotificationReadArgs, OutputFormat};
use crate::client::{CliContext, CliError, CliResult};
use crate::output::{format_table, print_json, render_dashboard, render_rows};

pub(crate) async fn handle_audit_logs(ctx: &CliContext, args: AuditLogArgs) -> CliResult<()> {
    ctx.require_session()?;
    if let (Some(from), Some(to)) = (args.from, args.to)
        && from > to
    {
        return Err(CliError::validation(format!(
            "--from ({from}) must not be after --to ({to})"
        )));
    }

    let request = PageRequest {
        page: args.page,
        per_page: args.per_page,
    };
    let filter = AuditLogFilter {
        start_date: args.from,
        end_date: args.to,
    };
    let mut store = AuditLogStore::from_context(&ctx.app);
    ctx.settle(store.fetch_window(request, filter).await)?;
    render_rows(store.items(), Some(store.pagination()), ctx.output)
}

pub(crate) async fn handle_notifications_list(
    ctx: &CliContext,
    args: NotificationPageArgs,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut store = NotificationStore::new(ctx.app.api.clone());
    ctx.settle(store.fetch(args.page).await)?;

    match ctx.output {
        OutputFormat::Json => print_json(&json!({
            "items": store.items(),
            "meta": store.meta(),
            "unread": store.unread_count(),
        })),
        OutputFormat::Table => {
            println!("{}", format_table(store.items()));
            let meta = store.meta();
            println!(
                "page {}/{} ({} total, {} unread here)",
                meta.current_page,
                meta.last_page,
                meta.total,
                store.unread_count()
            );
            Ok(())
        }
    }
}

pub(crate) async fn handle_notifications_read(
    ctx: &CliContext,
    args: NotificationReadArgs,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut store = NotificationStore::new(ctx.app.api.clone());
    ctx.settle(store.fetch(args.page).await)?;

    let Some(notification) = store
        .items()
        .iter()
        .find(|item| item.notification_uuid == args.uuid)
    else {
        return Err(CliError::validation(format!(
            "notification {} is not on page {}",
            args.uuid, args.page
        )));
    };
    if notification.read {
        println!("Notification {} was already read", args.uuid);
        return Ok(());
    }

    match store.mark_as_read(&args.uuid).await {
        ActionOutcome::Completed => {
            println!("Notification {} marked as read", args.uuid);
            Ok(())
        }
        outcome => ctx.settle(outcome),
    }
}

pub(crate) async fn handle_dashboard(ctx: &CliContext) -> CliResult<()> {
    ctx.require_session()?;
    let mut store = DashboardStore::new(ctx.app.api.clone());
    if !store.fetch().await {
        return ctx.settle(ActionOutcome::Failed);
    }
    render_dashboard(store.stats(), ctx.output)
}
