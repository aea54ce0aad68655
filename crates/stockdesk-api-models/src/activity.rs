//! Read-only activity feeds: audit trail, notifications and dashboard figures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request metadata captured with an audit entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogDetails {
    /// Client address.
    #[serde(default)]
    pub ip: Option<String>,
    /// Email of the acting user.
    #[serde(default)]
    pub email: Option<String>,
    /// Token fingerprint, when recorded.
    #[serde(default)]
    pub token: Option<String>,
    /// Request payload as sent.
    #[serde(default)]
    pub payload: Option<Value>,
    /// Acting user identifier.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Client user agent.
    #[serde(default, rename = "userAgent")]
    pub user_agent: Option<String>,
}

/// Audit trail entry joined with the acting user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    /// What happened (`login`, `create`, ...).
    pub action: String,
    /// Affected entity kind.
    #[serde(default)]
    pub entity: String,
    /// Affected entity identifier.
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Request metadata.
    #[serde(default)]
    pub details: AuditLogDetails,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Acting user's name.
    #[serde(default)]
    pub full_name: String,
    /// Acting user's email.
    #[serde(default)]
    pub email: String,
    /// Acting user's role.
    #[serde(default)]
    pub role_name: String,
}

/// Transaction line referenced by a notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationDetail {
    /// Line identifier.
    pub transaction_item_uuid: String,
    /// Agreed unit price.
    #[serde(default)]
    pub unit_price: f64,
    /// Where the unit came from.
    #[serde(default)]
    pub source_type: String,
    /// Line status.
    #[serde(default)]
    pub status: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// In-app notification addressed to the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable identifier.
    pub notification_uuid: String,
    /// Recipient.
    #[serde(default)]
    pub user_id: String,
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub message: String,
    /// Lines the notification refers to.
    #[serde(default)]
    pub details: Vec<NotificationDetail>,
    /// Whether the recipient has read it.
    #[serde(default)]
    pub read: bool,
    /// When it was read.
    #[serde(default)]
    pub read_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Sender name.
    #[serde(default)]
    pub full_name: String,
    /// Sender email.
    #[serde(default)]
    pub email: String,
}

/// Stock count grouped by product and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStat {
    /// Product name.
    pub product_name: String,
    /// Brand.
    #[serde(default)]
    pub product_brand: String,
    /// Model number.
    #[serde(default)]
    pub product_model_number: String,
    /// Where the units came from.
    #[serde(default)]
    pub source_type: String,
    /// Stock status.
    #[serde(default)]
    pub status: String,
    /// Unit count.
    #[serde(default)]
    pub total: u64,
}

/// Transaction count grouped by status and type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStat {
    /// Transaction count.
    #[serde(default)]
    pub total: u64,
    /// Transaction status.
    #[serde(default)]
    pub status: String,
    /// Transaction type.
    #[serde(default)]
    pub transaction_type: String,
}

/// Payment total grouped by status and method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentStat {
    /// Amount collected.
    #[serde(default)]
    pub total: f64,
    /// Payment status.
    #[serde(default)]
    pub status: String,
    /// Payment method.
    #[serde(default)]
    pub payment_method: String,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Stock breakdown.
    #[serde(default)]
    pub products: Vec<ProductStat>,
    /// Transaction breakdown.
    #[serde(default)]
    pub transactions: Vec<TransactionStat>,
    /// Payment breakdown.
    #[serde(default)]
    pub payments: Vec<PaymentStat>,
}

impl DashboardStats {
    /// Units across every product row.
    #[must_use]
    pub fn stock_units(&self) -> u64 {
        self.products.iter().map(|row| row.total).sum()
    }

    /// Money collected across every payment row.
    #[must_use]
    pub fn collected(&self) -> f64 {
        self.payments.iter().map(|row| row.total).sum()
    }
}
