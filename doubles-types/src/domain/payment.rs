//! Payment domain model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::issue::OrderId;
use super::timestamp::Timestamp;
use crate::dto::{NewPayment, PaymentChanges};

/// A payment attached to an order. At most one payment exists per order,
/// so the order id doubles as the record key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub order_id: OrderId,
    pub status: String,
    /// Opaque: whatever JSON the caller sent is echoed back
    pub amount: Value,
    /// Opaque: whatever JSON the caller sent is echoed back
    pub currency: Value,
    pub external_tx_id: String,
    pub timestamp: Timestamp,
}

impl Payment {
    /// Status assigned when the caller does not provide one.
    pub const DEFAULT_STATUS: &'static str = "PENDING";

    /// Builds a freshly stamped payment, filling defaults for omitted
    /// `status` and `externalTxId`.
    pub fn new(new: NewPayment) -> Self {
        Self {
            order_id: new.order_id,
            status: new
                .status
                .unwrap_or_else(|| Self::DEFAULT_STATUS.to_string()),
            amount: new.amount,
            currency: new.currency,
            external_tx_id: new
                .external_tx_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(generate_external_tx_id),
            timestamp: Timestamp::now(),
        }
    }

    /// Overwrites every field present in `changes`, keeps the rest, and
    /// re-stamps the record. The order id never changes.
    pub fn apply(&mut self, changes: PaymentChanges) {
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(currency) = changes.currency {
            self.currency = currency;
        }
        if let Some(external_tx_id) = changes.external_tx_id {
            self.external_tx_id = external_tx_id;
        }
        self.timestamp = Timestamp::now();
    }

    /// Condensed view served by the status endpoint.
    pub fn status_view(&self) -> PaymentStatus {
        PaymentStatus {
            order_id: self.order_id,
            status: self.status.clone(),
            external_tx_id: self.external_tx_id.clone(),
        }
    }
}

fn generate_external_tx_id() -> String {
    Uuid::new_v4().to_string()
}

/// Body of `GET /payments/{orderId}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub order_id: OrderId,
    pub status: String,
    pub external_tx_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_payment(order_id: OrderId) -> NewPayment {
        NewPayment {
            order_id,
            amount: json!(100),
            currency: json!("USD"),
            status: None,
            external_tx_id: None,
        }
    }

    #[test]
    fn test_defaults_are_filled() {
        let payment = Payment::new(new_payment(42));
        assert_eq!(payment.order_id, 42);
        assert_eq!(payment.status, "PENDING");
        assert!(Uuid::parse_str(&payment.external_tx_id).is_ok());
    }

    #[test]
    fn test_generated_tx_ids_are_unique() {
        let a = Payment::new(new_payment(1));
        let b = Payment::new(new_payment(2));
        assert_ne!(a.external_tx_id, b.external_tx_id);
    }

    #[test]
    fn test_empty_external_tx_id_is_replaced() {
        let payment = Payment::new(NewPayment {
            external_tx_id: Some(String::new()),
            ..new_payment(1)
        });
        assert!(!payment.external_tx_id.is_empty());
    }

    #[test]
    fn test_caller_values_are_kept() {
        let payment = Payment::new(NewPayment {
            status: Some("CAPTURED".into()),
            external_tx_id: Some("tx-1".into()),
            ..new_payment(5)
        });
        assert_eq!(payment.status, "CAPTURED");
        assert_eq!(payment.external_tx_id, "tx-1");
    }

    #[test]
    fn test_apply_keeps_unmentioned_fields() {
        let mut payment = Payment::new(new_payment(9));
        let tx = payment.external_tx_id.clone();

        payment.apply(PaymentChanges {
            status: Some("PAID".into()),
            ..Default::default()
        });

        assert_eq!(payment.order_id, 9);
        assert_eq!(payment.status, "PAID");
        assert_eq!(payment.amount, json!(100));
        assert_eq!(payment.currency, json!("USD"));
        assert_eq!(payment.external_tx_id, tx);
    }

    #[test]
    fn test_status_view() {
        let payment = Payment::new(new_payment(3));
        let view = payment.status_view();
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "orderId": 3,
                "status": "PENDING",
                "externalTxId": payment.external_tx_id,
            })
        );
    }
}
