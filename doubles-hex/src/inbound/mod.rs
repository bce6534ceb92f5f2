//! HTTP Inbound Adapters
//!
//! Axum-based HTTP servers that drive the application services.

mod fault;
mod handlers;
mod server;

pub use handlers::{ApiError, IssuesState, PaymentsState};
pub use server::{IssuesServer, PaymentsServer};
