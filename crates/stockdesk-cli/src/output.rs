//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use serde::Serialize;
use serde_json::json;
use stockdesk_api_models::{
    AuditLog, Category, Collector, DashboardStats, Debtor, Notification, PageMeta, Pagination,
    Payment, Permission, Product, ProductInventory, Role, Supplier, Transaction, User,
};
use stockdesk_ui::{NavItem, PermissionMatrix};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Fixed-width table projection of a row.
pub(crate) trait TableRow {
    /// Column headers.
    const HEADERS: &'static [&'static str];

    /// Cell values in header order.
    fn cells(&self) -> Vec<String>;
}

fn active_flag(active: i32) -> String {
    let flag = if active == 1 { "yes" } else { "no" };
    flag.to_string()
}

fn deleted_flag(deleted_at: Option<&String>) -> String {
    deleted_at.map_or_else(String::new, |_| "deleted".to_string())
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

impl TableRow for Category {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ACTIVE", "STATE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.category_uuid.clone(),
            self.category_name.clone(),
            active_flag(self.active),
            deleted_flag(self.deleted_at.as_ref()),
        ]
    }
}

impl TableRow for Product {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "BRAND", "MODEL", "CATEGORY", "PRICE", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.product_uuid.clone(),
            self.product_name.clone(),
            self.product_brand.clone(),
            self.product_model_number.clone(),
            self.category_name.clone(),
            money(self.default_price),
            active_flag(self.active),
        ]
    }
}

impl TableRow for ProductInventory {
    const HEADERS: &'static [&'static str] =
        &["ID", "SERIAL", "PRODUCT", "SUPPLIER", "SOURCE", "STATUS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.inventory_uuid.clone(),
            self.serial_number.clone(),
            self.product_name.clone(),
            self.supplier_shop_name.clone(),
            self.source_type.clone(),
            self.status.clone(),
        ]
    }
}

impl TableRow for Debtor {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "PHONE", "EMAIL", "TYPE", "LIMIT", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.debtor_uuid.clone(),
            self.debtor_name.clone(),
            self.debtor_phone.clone(),
            self.debtor_email.clone(),
            self.debtor_type.clone(),
            money(self.credit_limit),
            active_flag(self.active),
        ]
    }
}

impl TableRow for Supplier {
    const HEADERS: &'static [&'static str] = &["ID", "SHOP", "CONTACT", "PHONE", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.supplier_uuid.clone(),
            self.supplier_shop_name.clone(),
            self.supplier_name.clone(),
            self.supplier_phone.clone(),
            active_flag(self.active),
        ]
    }
}

impl TableRow for User {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "ROLES", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        let roles = self
            .roles
            .iter()
            .map(|role| role.role_name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            self.user_uuid.clone(),
            self.full_name.clone(),
            self.email.clone(),
            roles,
            active_flag(self.active),
        ]
    }
}

impl TableRow for Role {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "SLUG", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.roles_uuid.clone(),
            self.role_name.clone(),
            self.role_slug.clone(),
            active_flag(self.active),
        ]
    }
}

impl TableRow for Permission {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ACTION", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.permission_uuid.clone(),
            self.permission_name.clone(),
            self.permission_action.clone(),
            active_flag(self.active),
        ]
    }
}

impl TableRow for Transaction {
    const HEADERS: &'static [&'static str] =
        &["ID", "TYPE", "STATUS", "DEBTOR", "EXPECTED", "PAID", "ITEMS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_uuid.clone(),
            self.transaction_type.clone(),
            self.status.clone(),
            self.debtor
                .as_ref()
                .map(|debtor| debtor.debtor_name.clone())
                .unwrap_or_default(),
            money(self.total_expected),
            money(self.payments_sum_amount),
            self.items.len().to_string(),
        ]
    }
}

impl TableRow for Payment {
    const HEADERS: &'static [&'static str] =
        &["ID", "AMOUNT", "METHOD", "REFERENCE", "STATUS", "TRANSACTION"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.payment_uuid.clone(),
            money(self.amount),
            self.payment_method.clone(),
            self.reference_code.clone(),
            self.status.clone(),
            self.transaction
                .as_ref()
                .map(|transaction| transaction.transaction_uuid.clone())
                .unwrap_or_default(),
        ]
    }
}

impl TableRow for AuditLog {
    const HEADERS: &'static [&'static str] = &["WHEN", "ACTION", "ENTITY", "USER", "IP"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.created_at.clone(),
            self.action.clone(),
            self.entity.clone(),
            self.email.clone(),
            self.details.ip.clone().unwrap_or_default(),
        ]
    }
}

impl TableRow for Collector {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_uuid.clone(),
            self.full_name.clone(),
            self.email.clone(),
        ]
    }
}

impl TableRow for Notification {
    const HEADERS: &'static [&'static str] = &["ID", "READ", "TITLE", "MESSAGE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.notification_uuid.clone(),
            if self.read { "read" } else { "new" }.to_string(),
            self.title.clone(),
            self.message.clone(),
        ]
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Lay rows out as a left-aligned table sized to the widest cell per column.
pub(crate) fn format_table<R: TableRow>(rows: &[R]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();
    let widths: Vec<usize> = R::HEADERS
        .iter()
        .enumerate()
        .map(|(column, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(R::HEADERS.to_vec())];
    out.extend(
        cells
            .iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}

pub(crate) fn render_rows<R: TableRow + Serialize>(
    rows: &[R],
    pagination: Option<Pagination>,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => match pagination {
            Some(pagination) => print_json(&json!({"items": rows, "pagination": pagination})),
            None => print_json(rows),
        },
        OutputFormat::Table => {
            println!("{}", format_table(rows));
            if let Some(pagination) = pagination {
                println!("{}", page_footer(pagination));
            }
            Ok(())
        }
    }
}

pub(crate) fn page_footer(pagination: Pagination) -> String {
    format!(
        "page {}/{} ({} total, {} per page)",
        pagination.current_page, pagination.last_page, pagination.total, pagination.per_page
    )
}

pub(crate) fn render_dashboard(stats: &DashboardStats, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(stats),
        OutputFormat::Table => {
            println!("stock units: {}", stats.stock_units());
            for row in &stats.products {
                println!(
                    "  {:<24} {:<12} {:>6}",
                    row.product_name, row.status, row.total
                );
            }
            println!("transactions:");
            for row in &stats.transactions {
                println!(
                    "  {:<12} {:<12} {:>6}",
                    row.transaction_type, row.status, row.total
                );
            }
            println!("collected: {}", money(stats.collected()));
            for row in &stats.payments {
                println!(
                    "  {:<12} {:<12} {:>12}",
                    row.payment_method,
                    row.status,
                    money(row.total)
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_menu(menu: &[NavItem], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(menu),
        OutputFormat::Table => {
            for item in menu {
                match item {
                    NavItem::Link(link) => println!("{} -> {}", link.title, link.to),
                    NavItem::Group {
                        title, children, ..
                    } => {
                        println!("{title}");
                        for link in *children {
                            println!("  {} -> {}", link.title, link.to);
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

pub(crate) fn render_matrix(
    matrix: &PermissionMatrix,
    meta: &PageMeta,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "roles": matrix.roles(),
            "permissions": matrix.permissions(),
            "grants": matrix.grants(),
            "meta": meta,
        })),
        OutputFormat::Table => {
            let name_width = matrix
                .permissions()
                .iter()
                .map(|permission| permission.permission_name.chars().count())
                .chain(std::iter::once("PERMISSION".len()))
                .max()
                .unwrap_or(0);
            let mut header = format!("{:<name_width$}", "PERMISSION");
            for role in matrix.roles() {
                header.push_str("  ");
                header.push_str(&role.role_name);
            }
            println!("{}", header.trim_end());
            for permission in matrix.permissions() {
                let mut line = format!("{:<name_width$}", permission.permission_name);
                for role in matrix.roles() {
                    let held =
                        matrix.has_permission(&role.roles_uuid, &permission.permission_uuid);
                    let mark = if held { "x" } else { "-" };
                    let width = role.role_name.len();
                    line.push_str(&format!("  {mark:<width$}"));
                }
                println!("{}", line.trim_end());
            }
            println!(
                "page {}/{} ({} permissions)",
                meta.current_page, meta.last_page, meta.total
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_columns_stretch_to_widest_cell() {
        let rows = vec![
            Category {
                category_uuid: "c-1".into(),
                category_name: "Phones & Tablets".into(),
                active: 1,
                ..Category::default()
            },
            Category {
                category_uuid: "c-22".into(),
                category_name: "Audio".into(),
                deleted_at: Some("2026-02-01".into()),
                ..Category::default()
            },
        ];
        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID    NAME              ACTIVE  STATE");
        assert_eq!(lines[1], "c-1   Phones & Tablets  yes");
        assert_eq!(lines[2], "c-22  Audio             no      deleted");
    }

    #[test]
    fn footer_reports_page_position() {
        let footer = page_footer(Pagination {
            total: 13,
            per_page: 5,
            current_page: 2,
            last_page: 3,
        });
        assert_eq!(footer, "page 2/3 (13 total, 5 per page)");
    }
}
