//! External parties: debtors, suppliers and collectors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validate::{FormErrors, Rules, Validate};

/// Customer allowed to buy on credit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    /// Stable identifier.
    pub debtor_uuid: String,
    /// Display name.
    pub debtor_name: String,
    /// Contact phone.
    #[serde(default)]
    pub debtor_phone: String,
    /// Contact email.
    #[serde(default)]
    pub debtor_email: String,
    /// Debtor classification.
    #[serde(default)]
    pub debtor_type: String,
    /// Maximum outstanding balance.
    #[serde(default)]
    pub credit_limit: f64,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Create-debtor form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDebtor {
    /// Display name.
    pub debtor_name: String,
    /// Contact email.
    pub debtor_email: String,
    /// Contact phone.
    pub debtor_phone: String,
    /// Debtor classification.
    pub debtor_type: String,
    /// Maximum outstanding balance.
    #[serde(default)]
    pub credit_limit: f64,
}

impl Validate for NewDebtor {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.length(
            "debtor_name",
            &self.debtor_name,
            2,
            Some(255),
            (Some("Debtor Name must be at least 2 characters"), None),
        );
        rules.email("debtor_email", &self.debtor_email, "Invalid email address");
        rules.length("debtor_phone", &self.debtor_phone, 12, Some(20), (None, None));
        if !self.credit_limit.is_finite() || self.credit_limit < 0.0 {
            rules.push("credit_limit", "Credit limit must be a non-negative number");
        }
        rules.finish()
    }
}

/// Supplier of stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Stable identifier.
    pub supplier_uuid: String,
    /// Shop or trading name.
    pub supplier_shop_name: String,
    /// Contact person.
    #[serde(default)]
    pub supplier_name: String,
    /// Contact phone.
    #[serde(default)]
    pub supplier_phone: String,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Create-supplier form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    /// Shop or trading name.
    pub supplier_shop_name: String,
    /// Contact person.
    pub supplier_name: String,
    /// Contact phone.
    pub supplier_phone: String,
}

impl Validate for NewSupplier {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.length(
            "supplier_shop_name",
            &self.supplier_shop_name,
            2,
            Some(200),
            (None, None),
        );
        rules.length("supplier_name", &self.supplier_name, 2, Some(200), (None, None));
        rules.length("supplier_phone", &self.supplier_phone, 12, Some(20), (None, None));
        rules.finish()
    }
}

/// Field agent who collects payments. The backend shape is user-like; unknown
/// members are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    /// Identifier of the backing user account.
    #[serde(default)]
    pub user_uuid: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Remaining members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
