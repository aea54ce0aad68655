//! Sales ledger: transactions, their line items and payments.

use serde::{Deserialize, Serialize};

use crate::directory::Debtor;
use crate::validate::{FormErrors, Rules, Validate, is_blank};

/// Transaction type that does not require an up-front payment.
pub const CREDIT_TRANSACTION: &str = "Credit";
/// Transaction type that may require a reference code for non-cash payments.
pub const SALE_TRANSACTION: &str = "Sale";
/// Payment method that never needs a reference code.
pub const CASH_PAYMENT: &str = "Cash";

/// Staff member attached to a transaction (clerk or runner).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionParty {
    /// Stable identifier.
    pub user_uuid: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Verification timestamp.
    #[serde(default)]
    pub email_verified_at: Option<String>,
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

/// Stock unit referenced by a transaction line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUnit {
    /// Stable identifier.
    pub inventory_uuid: String,
    /// Unit serial number.
    #[serde(default)]
    pub serial_number: String,
    /// Where the unit came from.
    #[serde(default)]
    pub source_type: String,
    /// Stock status.
    #[serde(default)]
    pub status: String,
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

/// Transaction line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    /// Stable identifier.
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
    /// Stock unit sold on this line.
    #[serde(default)]
    pub product_inventory: Option<InventoryUnit>,
}

/// Payment as embedded in a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Stable identifier.
    pub payment_uuid: String,
    /// Amount paid.
    #[serde(default)]
    pub amount: f64,
    /// Payment method.
    #[serde(default)]
    pub payment_method: String,
    /// External reference (M-Pesa code, cheque number).
    #[serde(default)]
    pub reference_code: String,
    /// Payment status.
    #[serde(default)]
    pub status: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Transaction row with its parties, items and payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identifier.
    pub transaction_uuid: String,
    /// `Sale`, `Credit`, ...
    pub transaction_type: String,
    /// Sum of line prices.
    #[serde(default)]
    pub total_expected: f64,
    /// Sum of recorded payments.
    #[serde(default)]
    pub payments_sum_amount: f64,
    /// Transaction status.
    #[serde(default)]
    pub status: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Clerk who recorded the transaction.
    #[serde(default)]
    pub clerk: Option<TransactionParty>,
    /// Debtor the goods were sold to.
    #[serde(default)]
    pub debtor: Option<Debtor>,
    /// Runner who carried the goods.
    #[serde(default)]
    pub runner: Option<TransactionParty>,
    /// Sales person credited with the sale.
    #[serde(default)]
    pub sales_person: Option<Debtor>,
    /// Recorded payments.
    #[serde(default)]
    pub payments: Vec<PaymentSummary>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<TransactionItem>,
}

impl Transaction {
    /// Amount still owed on the transaction.
    #[must_use]
    pub fn outstanding(&self) -> f64 {
        self.total_expected - self.payments_sum_amount
    }
}

/// Transaction as embedded in a payment row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    /// Stable identifier.
    pub transaction_uuid: String,
    /// `Sale`, `Credit`, ...
    #[serde(default)]
    pub transaction_type: String,
    /// Transaction status.
    #[serde(default)]
    pub status: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Line items.
    #[serde(default)]
    pub items: Vec<TransactionItem>,
}

/// Payment row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Stable identifier.
    pub payment_uuid: String,
    /// Amount paid.
    #[serde(default)]
    pub amount: f64,
    /// Payment method.
    #[serde(default)]
    pub payment_method: String,
    /// External reference.
    #[serde(default)]
    pub reference_code: String,
    /// Payment status.
    #[serde(default)]
    pub status: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Items the payment settles.
    #[serde(default)]
    pub transaction_items: Vec<String>,
    /// Parent transaction.
    #[serde(default)]
    pub transaction: Option<PaymentTransaction>,
}

/// Record-payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    /// Amount as typed by the user.
    pub amount: String,
    /// Payment method.
    pub payment_method: String,
    /// External reference.
    #[serde(default)]
    pub reference_code: String,
    /// Transaction being paid.
    pub transaction_uuid: String,
}

impl Validate for NewPayment {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.required("amount", &self.amount, "Amount is required");
        rules.required(
            "payment_method",
            &self.payment_method,
            "Payment method is required",
        );
        rules.uuid(
            "transaction_uuid",
            &self.transaction_uuid,
            "Please select a transaction",
        );
        rules.finish()
    }
}

/// Payment status change form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePaymentStatus {
    /// New status.
    pub status: String,
}

impl Validate for UpdatePaymentStatus {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.required("status", &self.status, "Status is required");
        rules.finish()
    }
}

/// New transaction line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransactionItem {
    /// Stock unit being sold.
    pub product_inventory_uuid: String,
    /// Agreed unit price as typed by the user.
    pub unit_price: String,
    /// Where the unit came from.
    pub source_type: String,
    /// Line status.
    pub status: String,
}

/// Runner registered inline while recording a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRunner {
    /// Display name.
    pub full_name: String,
    /// National ID number.
    pub id_number: String,
    /// Contact phone.
    pub phone_number: String,
}

/// Record-transaction form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Sales person identifier.
    pub sales_person_id: String,
    /// Debtor identifier.
    pub debtor_id: String,
    /// Existing runner; mutually exclusive with `new_runner`.
    #[serde(default)]
    pub runner_id: Option<String>,
    /// Runner to register; mutually exclusive with `runner_id`.
    #[serde(default)]
    pub new_runner: Option<NewRunner>,
    /// `Sale`, `Credit`, ...
    pub transaction_type: String,
    /// Line items; at least one.
    pub transaction_items: Vec<NewTransactionItem>,
    /// Up-front payment method.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Up-front payment amount.
    #[serde(default)]
    pub amount: Option<String>,
    /// Up-front payment reference.
    #[serde(default)]
    pub reference_code: Option<String>,
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.uuid(
            "sales_person_id",
            &self.sales_person_id,
            "Invalid sales person UUID",
        );
        rules.uuid("debtor_id", &self.debtor_id, "Invalid debtor UUID");

        let runner_id = self.runner_id.as_deref().filter(|id| !id.is_empty());
        if let Some(runner_id) = runner_id {
            rules.uuid("runner_id", runner_id, "Invalid runner UUID");
        }
        if let Some(runner) = &self.new_runner {
            rules.required("new_runner.full_name", &runner.full_name, "Full name is required");
            rules.required("new_runner.id_number", &runner.id_number, "ID number is required");
            rules.required(
                "new_runner.phone_number",
                &runner.phone_number,
                "Phone number is required",
            );
        }
        match (runner_id.is_some(), self.new_runner.is_some()) {
            (false, false) => rules.push(
                "runner_id",
                "Either an existing runner or a new runner must be provided",
            ),
            (true, true) => rules.push(
                "runner_id",
                "Cannot provide both an existing runner and a new runner",
            ),
            _ => {}
        }

        rules.required(
            "transaction_type",
            &self.transaction_type,
            "Transaction type is required",
        );
        if self.transaction_items.is_empty() {
            rules.push(
                "transaction_items",
                "At least one transaction item is required",
            );
        }
        for (index, item) in self.transaction_items.iter().enumerate() {
            let path = |field: &str| format!("transaction_items.{index}.{field}");
            rules.uuid(
                &path("product_inventory_uuid"),
                &item.product_inventory_uuid,
                "Invalid product inventory UUID",
            );
            rules.required(&path("unit_price"), &item.unit_price, "Unit price is required");
            rules.required(&path("source_type"), &item.source_type, "Source type is required");
            rules.required(&path("status"), &item.status, "Status is required");
        }

        if self.transaction_type != CREDIT_TRANSACTION {
            if is_blank(self.payment_method.as_deref()) {
                rules.push("payment_method", "Payment method is required");
            }
            if is_blank(self.amount.as_deref()) {
                rules.push("amount", "Amount is required");
            }
            let non_cash = self
                .payment_method
                .as_deref()
                .is_some_and(|method| !method.is_empty() && method != CASH_PAYMENT);
            if self.transaction_type == SALE_TRANSACTION
                && non_cash
                && is_blank(self.reference_code.as_deref())
            {
                rules.push(
                    "reference_code",
                    "Reference code is required for non-cash payments",
                );
            }
        }
        rules.finish()
    }
}
