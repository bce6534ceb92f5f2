//! Payments API client.

use doubles_types::{
    Deleted, NewPayment, OrderId, Payment, PaymentChanges, PaymentFilter, PaymentStatus,
};
use reqwest::Method;
use serde_json::json;

use crate::{ClientError, Transport};

const NO_QUERY: &[(&str, &str)] = &[];

/// Payments API client.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    transport: Transport,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.transport.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        self.transport.health().await
    }

    pub async fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, ClientError> {
        self.transport.get("/payments", filter).await
    }

    pub async fn payment_status(&self, order_id: OrderId) -> Result<PaymentStatus, ClientError> {
        self.transport
            .get(&format!("/payments/{}/status", order_id), NO_QUERY)
            .await
    }

    /// Creates the payment for an order. A second payment for the same
    /// order fails with a 409.
    pub async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, ClientError> {
        self.transport.send_json(Method::POST, "/payments", payment).await
    }

    /// Full update (`PUT`).
    pub async fn replace_payment(
        &self,
        order_id: OrderId,
        changes: &PaymentChanges,
    ) -> Result<Payment, ClientError> {
        self.transport
            .send_json(Method::PUT, &format!("/payments/{}", order_id), changes)
            .await
    }

    /// Partial update (`PATCH`).
    pub async fn patch_payment(
        &self,
        order_id: OrderId,
        changes: &PaymentChanges,
    ) -> Result<Payment, ClientError> {
        self.transport
            .send_json(Method::PATCH, &format!("/payments/{}", order_id), changes)
            .await
    }

    /// Sends a `PATCH` carrying `conflict: true`; an existing payment answers 409.
    pub async fn simulate_update_conflict(
        &self,
        order_id: OrderId,
    ) -> Result<Payment, ClientError> {
        self.transport
            .send_json(
                Method::PATCH,
                &format!("/payments/{}", order_id),
                &json!({ "conflict": true }),
            )
            .await
    }

    pub async fn delete_payment(
        &self,
        order_id: OrderId,
        simulate_conflict: bool,
    ) -> Result<Deleted, ClientError> {
        self.transport
            .delete(&format!("/payments/{}", order_id), simulate_conflict)
            .await
    }
}
