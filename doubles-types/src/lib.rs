//! # Doubles Types
//!
//! Domain records and port traits for the order-issues and payments test
//! doubles. This crate has ZERO IO dependencies - only data structures,
//! filtering rules and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Records (`Issue`, `Payment`), timestamps and list filters
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Request body parsing and validation
//! - `error/` - Repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DateRange, Issue, IssueFilter, IssueId, OrderId, Payment, PaymentFilter, PaymentStatus,
    Timestamp,
};
pub use dto::*;
pub use error::{AppError, RepoError};
pub use ports::{FaultStrategy, IssueRepository, PaymentRepository};
