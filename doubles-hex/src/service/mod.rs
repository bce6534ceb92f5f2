//! Application services.
//!
//! Orchestrate record operations through the repository ports. Every check
//! (existence, body validity, conflict flags, uniqueness) runs before the
//! first store write, so a failed request never leaves a partial mutation.

mod issues;
mod payments;

pub use issues::IssueService;
pub use payments::PaymentService;
