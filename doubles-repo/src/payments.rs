//! In-memory payment store.

use async_trait::async_trait;
use doubles_types::{OrderId, Payment, PaymentRepository, RepoError};

use crate::memory::MemoryStore;

/// Payment repository keyed by order id. At most one payment per order.
#[derive(Default)]
pub struct InMemoryPaymentRepo {
    store: MemoryStore<OrderId, Payment>,
}

impl InMemoryPaymentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepo {
    async fn insert_payment(&self, payment: Payment) -> Result<Payment, RepoError> {
        if !self.store.insert_new(payment.order_id, payment.clone()) {
            return Err(RepoError::Conflict("Payment already exists".into()));
        }
        tracing::debug!(order_id = payment.order_id, "payment stored");
        Ok(payment)
    }

    async fn get_payment(&self, order_id: OrderId) -> Result<Option<Payment>, RepoError> {
        Ok(self.store.get(&order_id))
    }

    async fn save_payment(&self, payment: Payment) -> Result<Payment, RepoError> {
        self.store.put(payment.order_id, payment.clone());
        Ok(payment)
    }

    async fn delete_payment(&self, order_id: OrderId) -> Result<bool, RepoError> {
        Ok(self.store.delete(&order_id).is_some())
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError> {
        Ok(self.store.list())
    }
}
