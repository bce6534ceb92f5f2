//! Repository port traits.
//!
//! One store per resource type. Each store owns its records for the life of
//! the process; nothing is persisted. Single operations are atomic, sequences
//! of operations are not: concurrent writers to the same key race and the
//! last write wins.

use crate::domain::{Issue, IssueId, OrderId, Payment};
use crate::error::RepoError;

/// Store for order issues, keyed by server-assigned [`IssueId`].
#[async_trait::async_trait]
pub trait IssueRepository: Send + Sync + 'static {
    /// Returns the next unused id and advances the counter. Ids are never reused.
    async fn next_issue_id(&self) -> Result<IssueId, RepoError>;

    async fn get_issue(&self, id: IssueId) -> Result<Option<Issue>, RepoError>;

    /// Inserts or overwrites the issue under its own id.
    async fn save_issue(&self, issue: Issue) -> Result<Issue, RepoError>;

    /// Returns `false` if nothing was stored under `id`.
    async fn delete_issue(&self, id: IssueId) -> Result<bool, RepoError>;

    /// All issues in insertion order.
    async fn list_issues(&self) -> Result<Vec<Issue>, RepoError>;
}

/// Store for payments, keyed by the caller-supplied order id.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Inserts a new payment. Fails with [`RepoError::Conflict`] if the
    /// order already has one; the stored record is left untouched.
    async fn insert_payment(&self, payment: Payment) -> Result<Payment, RepoError>;

    async fn get_payment(&self, order_id: OrderId) -> Result<Option<Payment>, RepoError>;

    /// Inserts or overwrites the payment under its order id.
    async fn save_payment(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Returns `false` if the order had no payment.
    async fn delete_payment(&self, order_id: OrderId) -> Result<bool, RepoError>;

    /// All payments in insertion order.
    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError>;
}
