//! # Doubles Repository
//!
//! Volatile repository adapters for the test doubles. A store is created
//! empty when its service starts and is dropped with it; nothing survives a
//! restart.

pub mod issues;
pub mod memory;
pub mod payments;


pub use issues::InMemoryIssueRepo;
pub use memory::MemoryStore;
pub use payments::InMemoryPaymentRepo;
