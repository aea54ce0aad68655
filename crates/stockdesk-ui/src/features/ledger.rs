//! Transactions, their line items and payments.

use serde_json::json;
use stockdesk_api_models::{
    NewPayment, NewTransaction, Payment, Transaction, UpdatePaymentStatus, Validate,
};

use crate::core::outcome::ActionOutcome;
use crate::core::resource::{Creatable, Listable, Mutable, Resource, endpoint};
use crate::core::store::{Payload, ResourceStore};

/// Transaction list and actions.
pub type TransactionStore = ResourceStore<Transaction>;
/// Payment list and actions.
pub type PaymentStore = ResourceStore<Payment>;

const TRANSACTION_ITEM_STATUS: &str = "transaction-items/updateStatus";
const ITEM_STATUS_LABEL: &str = "Update New Transaction";
const TRANSACTION_STATUS_LABEL: &str = "Update Transaction Status";
const PAYMENT_STATUS_LABEL: &str = "Update Payment Status";

impl Resource for Transaction {
    const PATH: &'static str = "transactions";
}

impl Listable for Transaction {}

impl Mutable for Transaction {
    const ID_FIELD: &'static str = "transaction_uuid";
}

impl Creatable for Transaction {
    type Draft = NewTransaction;
    const CREATE_LABEL: &'static str = "Create New Transaction";
}

impl ResourceStore<Transaction> {
    /// Change the status of one line item.
    pub async fn update_item_status(&mut self, item_uuid: &str, status: &str) -> ActionOutcome {
        let body = json!({"transaction_item_uuid": item_uuid, "status": status});
        self.mutate(
            "update_item_status",
            ITEM_STATUS_LABEL,
            TRANSACTION_ITEM_STATUS,
            Payload::Post(body),
            None,
        )
        .await
    }

    /// Change the status of a whole transaction.
    pub async fn update_status(&mut self, transaction_uuid: &str, status: &str) -> ActionOutcome {
        let body = json!({"transaction_uuid": transaction_uuid, "status": status});
        self.mutate(
            "update_status",
            TRANSACTION_STATUS_LABEL,
            &endpoint::<Transaction>("updateStatus"),
            Payload::Put(body),
            None,
        )
        .await
    }
}

impl Resource for Payment {
    const PATH: &'static str = "payments";
}

impl Listable for Payment {}

impl Mutable for Payment {
    const ID_FIELD: &'static str = "payment_uuid";
}

impl Creatable for Payment {
    type Draft = NewPayment;
    const CREATE_LABEL: &'static str = "Payment Created";
}

impl ResourceStore<Payment> {
    /// Validate `change` and apply it to `payment_uuid`.
    pub async fn update_status(
        &mut self,
        payment_uuid: &str,
        change: &UpdatePaymentStatus,
    ) -> ActionOutcome {
        if let Err(errors) = change.validate() {
            return ActionOutcome::Invalid(errors);
        }
        let body = json!({"payment_uuid": payment_uuid, "status": change.status});
        self.mutate(
            "update_status",
            PAYMENT_STATUS_LABEL,
            &endpoint::<Payment>("updateStatus"),
            Payload::Put(body),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::signed_in;
    use anyhow::Result;
    use httpmock::prelude::*;
    use stockdesk_api_models::{NewTransactionItem, PageRequest};
    use stockdesk_client::AlertColor;
    use stockdesk_test_support::{api_path, paged_tuple, success_message};

    const SALES_PERSON: &str = "0b6f8c3e-2f4a-4a7e-9a51-6c1d2e3f4a5b";
    const DEBTOR: &str = "7d9e1f20-3a4b-4c5d-8e6f-708192a3b4c5";
    const INVENTORY: &str = "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";
    const RUNNER: &str = "5c4b3a29-1807-4f6e-9d5c-4b3a29180706";

    fn credit_sale() -> NewTransaction {
        NewTransaction {
            sales_person_id: SALES_PERSON.into(),
            debtor_id: DEBTOR.into(),
            runner_id: Some(RUNNER.into()),
            new_runner: None,
            transaction_type: "Credit".into(),
            transaction_items: vec![NewTransactionItem {
                product_inventory_uuid: INVENTORY.into(),
                unit_price: "1500".into(),
                source_type: "stock".into(),
                status: "pending".into(),
            }],
            payment_method: None,
            amount: None,
            reference_code: None,
        }
    }

    #[tokio::test]
    async fn transaction_create_posts_draft_and_refetches() -> Result<()> {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("transactions/create"))
                    .body_includes(DEBTOR)
                    .body_includes("\"transaction_type\":\"Credit\"");
                then.status(200).json_body(success_message("Transaction recorded"));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("transactions"));
                then.status(200).json_body(paged_tuple(
                    json!([{"transaction_uuid": "t-1", "transaction_type": "Credit", "total_expected": 1500.0}]),
                    1,
                    1,
                    1,
                ));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = TransactionStore::from_context(&harness.context);

        assert!(store.create(&credit_sale()).await.is_completed());

        create.assert_async().await;
        list.assert_hits_async(1).await;
        assert!((store.items()[0].outstanding() - 1500.0).abs() < f64::EPSILON);
        assert_eq!(harness.context.alerts.current().title, "Create New Transaction");
        Ok(())
    }

    #[tokio::test]
    async fn transaction_without_runner_is_rejected_locally() -> Result<()> {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path(api_path("transactions/create"));
                then.status(200).json_body(success_message("Transaction recorded"));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = TransactionStore::from_context(&harness.context);
        let draft = NewTransaction {
            runner_id: None,
            ..credit_sale()
        };

        let outcome = store.create(&draft).await;

        assert_eq!(
            outcome.form_errors().and_then(|errors| errors.message_for("runner_id")),
            Some("Either an existing runner or a new runner must be provided")
        );
        create.assert_hits_async(0).await;
        assert_eq!(harness.context.alerts.shown(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn item_status_goes_to_transaction_items_endpoint() -> Result<()> {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("transaction-items/updateStatus"))
                    .json_body(json!({"transaction_item_uuid": "ti-1", "status": "returned"}));
                then.status(200).json_body(success_message("Item updated"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("transactions"));
                then.status(200).json_body(paged_tuple(json!([]), 0, 1, 1));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = TransactionStore::from_context(&harness.context);

        assert!(store.update_item_status("ti-1", "returned").await.is_completed());
        update.assert_async().await;
        assert_eq!(harness.context.alerts.current().title, "Update New Transaction");
        Ok(())
    }

    #[tokio::test]
    async fn transaction_status_puts_uuid_and_status() -> Result<()> {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(api_path("transactions/updateStatus"))
                    .json_body(json!({"transaction_uuid": "t-1", "status": "closed"}));
                then.status(200).json_body(success_message("Transaction closed"));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("transactions"));
                then.status(200).json_body(paged_tuple(json!([]), 0, 1, 1));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = TransactionStore::from_context(&harness.context);

        assert!(store.update_status("t-1", "closed").await.is_completed());

        update.assert_async().await;
        list.assert_hits_async(1).await;
        let alert = harness.context.alerts.current();
        assert_eq!(alert.title, "Update Transaction Status");
        assert_eq!(alert.text, "Transaction closed");
        Ok(())
    }

    #[tokio::test]
    async fn transaction_status_failure_keeps_rows() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("transactions"));
                then.status(200).json_body(paged_tuple(
                    json!([{"transaction_uuid": "t-1", "transaction_type": "Sale"}]),
                    1,
                    1,
                    1,
                ));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path(api_path("transactions/updateStatus"));
                then.status(422).json_body(json!({"message": "Status not allowed"}));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = TransactionStore::from_context(&harness.context);
        assert!(store.fetch_all(PageRequest::default()).await.is_completed());
        let before = harness.context.alerts.shown();

        let outcome = store.update_status("t-1", "closed").await;

        assert_eq!(outcome, ActionOutcome::Failed);
        list.assert_hits_async(1).await;
        assert_eq!(harness.context.alerts.shown(), before + 1);
        let alert = harness.context.alerts.current();
        assert_eq!(alert.color, AlertColor::Error);
        assert_eq!(alert.text, "Status not allowed");
        assert_eq!(store.items().len(), 1);
        assert!(!store.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn payment_status_requires_a_value() -> Result<()> {
        let server = MockServer::start_async().await;
        let harness = signed_in(&server).await?;
        let mut store = PaymentStore::from_context(&harness.context);

        let outcome = store
            .update_status("p-1", &UpdatePaymentStatus { status: String::new() })
            .await;

        assert_eq!(
            outcome.form_errors().and_then(|errors| errors.message_for("status")),
            Some("Status is required")
        );
        Ok(())
    }

    #[tokio::test]
    async fn payment_status_puts_uuid_and_status() -> Result<()> {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(api_path("payments/updateStatus"))
                    .json_body(json!({"payment_uuid": "p-1", "status": "confirmed"}));
                then.status(200).json_body(success_message("Payment confirmed"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("payments"));
                then.status(200).json_body(paged_tuple(json!([]), 0, 1, 1));
            })
            .await;
        let harness = signed_in(&server).await?;
        let mut store = PaymentStore::from_context(&harness.context);

        let change = UpdatePaymentStatus {
            status: "confirmed".into(),
        };
        assert!(store.update_status("p-1", &change).await.is_completed());
        update.assert_async().await;
        assert_eq!(harness.context.alerts.current().title, "Update Payment Status");
        Ok(())
    }
}
