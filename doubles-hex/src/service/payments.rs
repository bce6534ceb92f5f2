//! Payment service.

use doubles_types::{
    AppError, DeleteParams, NewPayment, OrderId, Payment, PaymentChanges, PaymentFilter,
    PaymentRepository, PaymentStatus, conflict_requested, parse_body,
};

/// Application service for payments. One payment per order, keyed by order id.
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
}

impl<R: PaymentRepository> PaymentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub async fn list(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, AppError> {
        let payments = self.repo.list_payments().await?;
        Ok(filter.apply(payments))
    }

    pub async fn get(&self, order_id: OrderId) -> Result<Payment, AppError> {
        self.repo.get_payment(order_id).await?.ok_or_else(not_found)
    }

    pub async fn status(&self, order_id: OrderId) -> Result<PaymentStatus, AppError> {
        Ok(self.get(order_id).await?.status_view())
    }

    /// Validates the body and stores the payment under its order id.
    ///
    /// A second payment for the same order is rejected with a conflict and
    /// the first one is left as it was.
    pub async fn create(&self, body: &[u8]) -> Result<Payment, AppError> {
        let new = NewPayment::from_body(parse_body(body)?)?;
        let payment = self.repo.insert_payment(Payment::new(new)).await?;
        tracing::info!(
            order_id = payment.order_id,
            status = %payment.status,
            external_tx_id = %payment.external_tx_id,
            "payment created"
        );
        Ok(payment)
    }

    /// Full update: every field takes the body value or keeps its prior value.
    pub async fn replace(&self, order_id: OrderId, body: &[u8]) -> Result<Payment, AppError> {
        self.update(order_id, body).await
    }

    /// Partial update: fields present in the body overwrite, the rest stay.
    pub async fn patch(&self, order_id: OrderId, body: &[u8]) -> Result<Payment, AppError> {
        self.update(order_id, body).await
    }

    async fn update(&self, order_id: OrderId, body: &[u8]) -> Result<Payment, AppError> {
        let mut payment = self.get(order_id).await?;
        let body = parse_body(body)?;
        if conflict_requested(&body) {
            tracing::warn!(order_id, "simulated update conflict");
            return Err(AppError::Conflict("Simulated conflict".into()));
        }
        payment.apply(PaymentChanges::from_body(body)?);
        Ok(self.repo.save_payment(payment).await?)
    }

    pub async fn delete(&self, order_id: OrderId, params: &DeleteParams) -> Result<(), AppError> {
        self.get(order_id).await?;
        if params.conflict_requested() {
            tracing::warn!(order_id, "simulated deletion conflict");
            return Err(AppError::Conflict("Simulated deletion conflict".into()));
        }
        if !self.repo.delete_payment(order_id).await? {
            return Err(not_found());
        }
        tracing::info!(order_id, "payment deleted");
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Payment not found".into())
}
