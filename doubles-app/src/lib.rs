//! # Doubles Application
//!
//! Shared wiring for the two server binaries:
//! - Load configuration from environment
//! - Initialize tracing
//! - Build the in-memory store and service
//! - Start the HTTP server

pub mod config;
pub mod telemetry;

pub use config::{Config, LogFormat, ServiceKind};
