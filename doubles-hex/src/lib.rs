//! # Doubles Hex
//!
//! Application services and HTTP adapters for the order-issues and payments
//! test doubles.
//!
//! ## Architecture
//!
//! - `service/` - Application services (CRUD semantics, filtering, conflict hooks)
//! - `faults` - Fault injection strategies
//! - `inbound/` - HTTP adapters (Axum servers)
//!
//! Services are generic over their repository port, so any store
//! implementation can be injected.

pub mod faults;
pub mod inbound;
pub mod service;


pub use faults::{FaultInjector, NoFaults, ProbabilisticFaults, ScriptedFaults};
pub use service::{IssueService, PaymentService};
