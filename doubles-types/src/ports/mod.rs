//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod fault;
mod repository;

pub use fault::FaultStrategy;
pub use repository::{IssueRepository, PaymentRepository};
