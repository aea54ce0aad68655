use std::fs;
use std::path::Path;

use anyhow::anyhow;
use serde::Serialize;
use serde::de::DeserializeOwned;
use stockdesk_api_models::{
    Category, Collector, Debtor, PageRequest, Payment, Permission, Product, ProductInventory,
    Role, Supplier, Transaction, User,
};
use stockdesk_client::Upload;
use stockdesk_ui::{
    ActiveListing, Creatable, Listable, ProductInventoryStore, ResourceStore, SoftDeletable,
    StatusToggle, Updatable,
};

use crate::cli::{ActionArgs, FileArgs, ImportArgs, ListArgs, ResourceKind, RowAction};
use crate::client::{CliContext, CliError, CliResult};
use crate::commands::read_json_file;
use crate::output::{TableRow, render_rows};

fn unsupported(kind: ResourceKind, operation: &str) -> CliError {
    CliError::validation(format!("{} does not support {operation}", kind.as_str()))
}

pub(crate) async fn handle_list(ctx: &CliContext, args: ListArgs) -> CliResult<()> {
    ctx.require_session()?;
    let request = PageRequest {
        page: args.page,
        per_page: args.per_page,
    };

    if args.active {
        return match args.resource {
            ResourceKind::Categories => list_active::<Category>(ctx).await,
            ResourceKind::Inventory => list_active::<ProductInventory>(ctx).await,
            ResourceKind::Users => list_active::<User>(ctx).await,
            ResourceKind::Roles => list_active::<Role>(ctx).await,
            ResourceKind::Collectors => list_active::<Collector>(ctx).await,
            other => Err(unsupported(other, "--active")),
        };
    }

    match args.resource {
        ResourceKind::Categories => list::<Category>(ctx, request).await,
        ResourceKind::Products => list::<Product>(ctx, request).await,
        ResourceKind::Inventory => list::<ProductInventory>(ctx, request).await,
        ResourceKind::Debtors => list::<Debtor>(ctx, request).await,
        ResourceKind::Suppliers => list::<Supplier>(ctx, request).await,
        ResourceKind::Users => list::<User>(ctx, request).await,
        ResourceKind::Roles => list::<Role>(ctx, request).await,
        ResourceKind::Permissions => list::<Permission>(ctx, request).await,
        ResourceKind::Transactions => list::<Transaction>(ctx, request).await,
        ResourceKind::Payments => list::<Payment>(ctx, request).await,
        // collectors are only served as an active list
        ResourceKind::Collectors => list_active::<Collector>(ctx).await,
    }
}

async fn list<R>(ctx: &CliContext, request: PageRequest) -> CliResult<()>
where
    R: Listable + TableRow + Serialize,
{
    let mut store = ResourceStore::<R>::from_context(&ctx.app);
    ctx.settle(store.fetch_all(request).await)?;
    let pagination = R::PAGINATED.then_some(store.pagination());
    render_rows(store.items(), pagination, ctx.output)
}

async fn list_active<R>(ctx: &CliContext) -> CliResult<()>
where
    R: ActiveListing + TableRow + Serialize,
{
    let mut store = ResourceStore::<R>::from_context(&ctx.app);
    ctx.settle(store.fetch_active().await)?;
    render_rows(store.items(), None, ctx.output)
}

pub(crate) async fn handle_create(ctx: &CliContext, args: FileArgs) -> CliResult<()> {
    ctx.require_session()?;
    let path = args.file.as_path();
    match args.resource {
        ResourceKind::Categories => create::<Category>(ctx, path).await,
        ResourceKind::Products => create::<Product>(ctx, path).await,
        ResourceKind::Inventory => create::<ProductInventory>(ctx, path).await,
        ResourceKind::Debtors => create::<Debtor>(ctx, path).await,
        ResourceKind::Suppliers => create::<Supplier>(ctx, path).await,
        ResourceKind::Users => create::<User>(ctx, path).await,
        ResourceKind::Roles => create::<Role>(ctx, path).await,
        ResourceKind::Permissions => create::<Permission>(ctx, path).await,
        ResourceKind::Transactions => create::<Transaction>(ctx, path).await,
        ResourceKind::Payments => create::<Payment>(ctx, path).await,
        ResourceKind::Collectors => Err(unsupported(args.resource, "create")),
    }
}

async fn create<R>(ctx: &CliContext, path: &Path) -> CliResult<()>
where
    R: Creatable,
    R::Draft: DeserializeOwned,
{
    let draft: R::Draft = read_json_file(path)?;
    let mut store = ResourceStore::<R>::from_context(&ctx.app);
    ctx.settle(store.create(&draft).await)
}

pub(crate) async fn handle_update(ctx: &CliContext, args: FileArgs) -> CliResult<()> {
    ctx.require_session()?;
    let path = args.file.as_path();
    match args.resource {
        ResourceKind::Categories => update::<Category>(ctx, path).await,
        ResourceKind::Products => update::<Product>(ctx, path).await,
        ResourceKind::Inventory => update::<ProductInventory>(ctx, path).await,
        ResourceKind::Debtors => update::<Debtor>(ctx, path).await,
        ResourceKind::Suppliers => update::<Supplier>(ctx, path).await,
        ResourceKind::Users => update::<User>(ctx, path).await,
        ResourceKind::Roles => update::<Role>(ctx, path).await,
        ResourceKind::Permissions => update::<Permission>(ctx, path).await,
        other => Err(unsupported(other, "update")),
    }
}

async fn update<R: Updatable>(ctx: &CliContext, path: &Path) -> CliResult<()> {
    let row: R = read_json_file(path)?;
    let mut store = ResourceStore::<R>::from_context(&ctx.app);
    ctx.settle(store.update(&row).await)
}

pub(crate) async fn handle_action(ctx: &CliContext, args: ActionArgs) -> CliResult<()> {
    ctx.require_session()?;
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::validation("id must not be empty"));
    }

    match args.action {
        RowAction::Delete | RowAction::Restore => {
            let restore = args.action == RowAction::Restore;
            match args.resource {
                ResourceKind::Categories => soft_delete::<Category>(ctx, id, restore).await,
                ResourceKind::Products => soft_delete::<Product>(ctx, id, restore).await,
                ResourceKind::Inventory => {
                    soft_delete::<ProductInventory>(ctx, id, restore).await
                }
                ResourceKind::Debtors => soft_delete::<Debtor>(ctx, id, restore).await,
                ResourceKind::Suppliers => soft_delete::<Supplier>(ctx, id, restore).await,
                ResourceKind::Users => soft_delete::<User>(ctx, id, restore).await,
                ResourceKind::Roles => soft_delete::<Role>(ctx, id, restore).await,
                ResourceKind::Permissions => soft_delete::<Permission>(ctx, id, restore).await,
                other => Err(unsupported(other, "delete or restore")),
            }
        }
        RowAction::Activate | RowAction::Deactivate => {
            let active = args.action == RowAction::Activate;
            match args.resource {
                ResourceKind::Categories => set_status::<Category>(ctx, id, active).await,
                ResourceKind::Products => set_status::<Product>(ctx, id, active).await,
                ResourceKind::Debtors => set_status::<Debtor>(ctx, id, active).await,
                ResourceKind::Suppliers => set_status::<Supplier>(ctx, id, active).await,
                ResourceKind::Users => set_status::<User>(ctx, id, active).await,
                ResourceKind::Roles => set_status::<Role>(ctx, id, active).await,
                ResourceKind::Permissions => set_status::<Permission>(ctx, id, active).await,
                other => Err(unsupported(other, "activate or deactivate")),
            }
        }
    }
}

async fn soft_delete<R: SoftDeletable>(
    ctx: &CliContext,
    id: &str,
    restore: bool,
) -> CliResult<()> {
    let mut store = ResourceStore::<R>::from_context(&ctx.app);
    let outcome = if restore {
        store.restore(id).await
    } else {
        store.delete(id).await
    };
    ctx.settle(outcome)
}

async fn set_status<R: StatusToggle>(
    ctx: &CliContext,
    id: &str,
    active: bool,
) -> CliResult<()> {
    let mut store = ResourceStore::<R>::from_context(&ctx.app);
    let outcome = if active {
        store.activate(id).await
    } else {
        store.deactivate(id).await
    };
    ctx.settle(outcome)
}

pub(crate) async fn handle_import(ctx: &CliContext, args: ImportArgs) -> CliResult<()> {
    ctx.require_session()?;
    let path = args.file.as_path();
    let bytes = fs::read(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read CSV file '{}': {err}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(CliError::validation("CSV file is empty"));
    }
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("inventory.csv");

    let mut store = ProductInventoryStore::from_context(&ctx.app);
    ctx.settle(store.import_csv(Upload::csv(file_name, bytes)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{TOKEN, signed_in, signed_out};
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io::Write;
    use stockdesk_test_support::{api_path, failure, paged_tuple, success_message};
    use tempfile::NamedTempFile;

    fn json_file(value: &serde_json::Value) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{value}")?;
        Ok(file)
    }

    #[tokio::test]
    async fn list_forwards_page_and_size() -> Result<()> {
        let server = MockServer::start_async().await;
        let rows = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(api_path("categories"))
                    .query_param("page", "2")
                    .query_param("per_page", "5")
                    .header("authorization", format!("Bearer {TOKEN}"));
                then.status(200).json_body(paged_tuple(
                    json!([{"category_uuid": "c-1", "category_name": "Phones", "active": 1}]),
                    6,
                    2,
                    2,
                ));
            })
            .await;
        let ctx = signed_in(&server).await?;

        let args = ListArgs {
            resource: ResourceKind::Categories,
            page: Some(2),
            per_page: Some(5),
            active: false,
        };
        assert!(handle_list(&ctx, args).await.is_ok());
        rows.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn listing_requires_a_session() -> Result<()> {
        let server = MockServer::start_async().await;
        let rows = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("debtors"));
                then.status(200);
            })
            .await;
        let ctx = signed_out(&server)?;

        let args = ListArgs {
            resource: ResourceKind::Debtors,
            page: None,
            per_page: None,
            active: false,
        };
        let result = handle_list(&ctx, args).await;
        assert!(matches!(result, Err(CliError::Validation(_))));
        rows.assert_calls_async(0).await;
        Ok(())
    }

    #[tokio::test]
    async fn active_flag_is_rejected_for_debtors() -> Result<()> {
        let server = MockServer::start_async().await;
        let ctx = signed_in(&server).await?;
        let args = ListArgs {
            resource: ResourceKind::Debtors,
            page: None,
            per_page: None,
            active: true,
        };
        match handle_list(&ctx, args).await {
            Err(CliError::Validation(message)) => {
                assert_eq!(message, "debtors does not support --active");
            }
            _ => anyhow::bail!("expected a validation error"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn invalid_draft_is_reported_without_a_request() -> Result<()> {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path(api_path("categories/create"));
                then.status(200).json_body(success_message("Created"));
            })
            .await;
        let ctx = signed_in(&server).await?;
        let file = json_file(&json!({"category_name": "A"}))?;

        let args = FileArgs {
            resource: ResourceKind::Categories,
            file: file.path().to_path_buf(),
        };
        match handle_create(&ctx, args).await {
            Err(CliError::Validation(message)) => assert!(message.starts_with("category_name: ")),
            _ => anyhow::bail!("expected a validation error"),
        }
        create.assert_calls_async(0).await;
        Ok(())
    }

    #[tokio::test]
    async fn forbidden_delete_fails_with_server_alert() -> Result<()> {
        let server = MockServer::start_async().await;
        let delete = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(api_path("suppliers/delete"))
                    .json_body(json!({"supplier_uuid": "s-9"}));
                then.status(403).json_body(failure("nope"));
            })
            .await;
        let ctx = signed_in(&server).await?;

        let args = ActionArgs {
            resource: ResourceKind::Suppliers,
            action: RowAction::Delete,
            id: "s-9".into(),
        };
        let err = match handle_action(&ctx, args).await {
            Err(err) => err,
            Ok(()) => anyhow::bail!("expected a failure"),
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("Forbidden"));
        assert_eq!(ctx.app.alerts.shown(), 1);
        delete.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn status_toggle_is_rejected_for_inventory() -> Result<()> {
        let server = MockServer::start_async().await;
        let ctx = signed_in(&server).await?;
        let args = ActionArgs {
            resource: ResourceKind::Inventory,
            action: RowAction::Activate,
            id: "i-1".into(),
        };
        assert!(matches!(
            handle_action(&ctx, args).await,
            Err(CliError::Validation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn import_uploads_the_file_and_refreshes() -> Result<()> {
        let server = MockServer::start_async().await;
        let upload = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("product-inventory/importProductInventory"))
                    .body_includes("filename=\"stock.csv\"")
                    .body_includes("SN-001");
                then.status(200).json_body(success_message("Imported 1 item"));
            })
            .await;
        let refresh = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("product-inventory"));
                then.status(200).json_body(paged_tuple(json!([]), 0, 1, 1));
            })
            .await;
        let ctx = signed_in(&server).await?;
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("stock.csv");
        fs::write(&path, "serial_number,status\nSN-001,available\n")?;

        handle_import(&ctx, ImportArgs { file: path })
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        upload.assert_async().await;
        refresh.assert_async().await;
        assert_eq!(ctx.app.alerts.current().text, "Imported 1 item");
        Ok(())
    }
}
