//! Order issue domain model.

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;
use crate::dto::{IssueChanges, NewIssue};

/// Caller-supplied order reference. Issues point at it, payments are keyed by it.
pub type OrderId = i64;

/// Server-assigned issue identifier.
///
/// Identifiers form a strictly increasing sequence starting at 1 and are
/// never reused, even after the issue is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(i64);

impl IssueId {
    /// The first identifier handed out by an empty store.
    pub const FIRST: IssueId = IssueId(1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IssueId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A problem recorded against an order by the system under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Immutable after creation
    pub id: IssueId,
    pub order_id: OrderId,
    pub error_code: String,
    pub error_message: String,
    pub severity: String,
    /// Rewritten on every create and update
    pub timestamp: Timestamp,
}

impl Issue {
    /// Builds a freshly stamped issue under the given identifier.
    pub fn new(id: IssueId, new: NewIssue) -> Self {
        Self {
            id,
            order_id: new.order_id,
            error_code: new.error_code,
            error_message: new.error_message,
            severity: new.severity,
            timestamp: Timestamp::now(),
        }
    }

    /// Overwrites every field present in `changes`, keeps the rest, and
    /// re-stamps the record. The identifier never changes.
    pub fn apply(&mut self, changes: IssueChanges) {
        if let Some(order_id) = changes.order_id {
            self.order_id = order_id;
        }
        if let Some(error_code) = changes.error_code {
            self.error_code = error_code;
        }
        if let Some(error_message) = changes.error_message {
            self.error_message = error_message;
        }
        if let Some(severity) = changes.severity {
            self.severity = severity;
        }
        self.timestamp = Timestamp::now();
    }
}
