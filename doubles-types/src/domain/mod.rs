//! Domain models for the test doubles.

pub mod filter;
pub mod issue;
pub mod payment;
pub mod timestamp;

pub use filter::{DateRange, IssueFilter, PaymentFilter};
pub use issue::{Issue, IssueId, OrderId};
pub use payment::{Payment, PaymentStatus};
pub use timestamp::Timestamp;
